//! Index/offset mapping
//!
//! The three containers sit at virtual offsets `0`, `extent` and
//! `2 * extent`. The viewport rests on the middle one, so the raw offset
//! relative to `extent` says which way the user is panning and how far the
//! transition has progressed. Everything here is pure and is recomputed on
//! every offset change, sub-pixel updates included.

use crate::config::LoopMode;

/// Direction of the in-flight pan relative to the resting position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PanDirection {
    /// Moving toward the previous page (offset below extent)
    Previous,
    /// At rest on the middle container
    #[default]
    Center,
    /// Moving toward the next page (offset above extent)
    Next,
}

/// Panning direction for a main-axis offset
pub fn panning_direction(offset: f32, extent: f32) -> PanDirection {
    if offset < extent {
        PanDirection::Previous
    } else if offset > extent {
        PanDirection::Next
    } else {
        PanDirection::Center
    }
}

/// Transition progress in `[0, 1]`: 0 at rest, 1 at a full page swap
pub fn progress(offset: f32, extent: f32) -> f32 {
    if extent <= 0.0 || !extent.is_finite() {
        return 0.0;
    }
    (offset / extent - 1.0).abs().min(1.0)
}

/// Step one page from `current` toward `direction`
///
/// Returns the provisional target and whether the step would cross an edge.
/// At an edge, `None` clamps to the same page while `Loop` and `Bounded`
/// wrap to the opposite end.
pub fn step_target(
    current: usize,
    count: usize,
    direction: PanDirection,
    loop_mode: LoopMode,
) -> (usize, bool) {
    if count == 0 {
        return (0, false);
    }
    let last = count - 1;
    match direction {
        PanDirection::Center => (current, false),
        PanDirection::Previous if current == 0 => {
            let target = if loop_mode.wraps() { last } else { 0 };
            (target, true)
        }
        PanDirection::Previous => (current - 1, false),
        PanDirection::Next if current >= last => {
            let target = if loop_mode.wraps() { 0 } else { last };
            (target, true)
        }
        PanDirection::Next => (current + 1, false),
    }
}

/// Inputs for a single mapping pass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapperInput {
    /// Raw main-axis offset
    pub offset: f32,
    /// Viewport extent along the main axis
    pub extent: f32,
    pub loop_mode: LoopMode,
    pub count: usize,
    pub current: usize,
    /// Target carried over from the previous pass
    pub target: usize,
    /// While jumping the target is pinned to the jump destination
    pub jumping: bool,
}

/// Result of a mapping pass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mapping {
    pub direction: PanDirection,
    pub progress: f32,
    pub target: usize,
    /// The step crosses the first/last page boundary
    pub beyond_bound: bool,
}

/// Map a raw offset to direction, progress, and provisional target
pub fn map_offset(input: MapperInput) -> Mapping {
    let direction = panning_direction(input.offset, input.extent);
    let progress = progress(input.offset, input.extent);

    let (target, beyond_bound) = if input.jumping {
        (input.target, false)
    } else {
        step_target(input.current, input.count, direction, input.loop_mode)
    };

    Mapping {
        direction,
        progress,
        target,
        beyond_bound,
    }
}
