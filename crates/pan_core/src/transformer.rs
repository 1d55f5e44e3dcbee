//! Transition effect hook
//!
//! A [`Transformer`] applies cosmetic transforms, opacity and stacking to the
//! three containers while a transition is in flight. It never decides which
//! page is mounted where.

use crate::axis::ScrollAxis;
use crate::mapper::PanDirection;
use crate::pool::{Container, SLOT_COUNT};

/// Snapshot of the transition passed to [`Transformer::update`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionFrame {
    /// Committed page
    pub from: usize,
    /// Page the transition moves toward (equals `from` at rest)
    pub to: usize,
    /// Transition progress (0.0-1.0)
    pub progress: f32,
    pub direction: PanDirection,
    pub axis: ScrollAxis,
    /// Viewport extent along the scroll axis
    pub extent: f32,
}

impl TransitionFrame {
    /// Frame that resets cosmetic state for a freshly swapped neighbourhood
    pub fn settled(page: usize, axis: ScrollAxis, extent: f32) -> Self {
        Self {
            from: page,
            to: page,
            progress: 0.0,
            direction: PanDirection::Center,
            axis,
            extent,
        }
    }
}

/// Pluggable visual effect
pub trait Transformer {
    /// Called on every offset update, and once with progress 0 after every
    /// container content swap
    fn update(&mut self, containers: &mut [Container; SLOT_COUNT], frame: &TransitionFrame);

    /// Called when this effect is replaced; restore anything `update` changed
    fn teardown(&mut self, _containers: &mut [Container; SLOT_COUNT]) {}
}
