//! Animated jump slot selection

use crate::config::LoopMode;
use crate::pool::Slot;

/// Edge slot an animated jump from `current` to `index` scrolls toward
///
/// Backward jumps use the previous slot and forward jumps the next one.
/// Under `Loop` the wrap-around route is taken when it is shorter, which
/// reverses the side.
pub fn choose_jump_slot(current: usize, index: usize, count: usize, loop_mode: LoopMode) -> Slot {
    let direct = if index < current {
        Slot::Previous
    } else {
        Slot::Next
    };
    match loop_mode {
        LoopMode::None | LoopMode::Bounded => direct,
        LoopMode::Loop if current.abs_diff(index) <= count / 2 => direct,
        LoopMode::Loop => match direct {
            Slot::Previous => Slot::Next,
            _ => Slot::Previous,
        },
    }
}
