//! Pager configuration
//!
//! [`PanConfig`] is plain data. Applying it to a live controller happens
//! through [`PanController::reconfigure`] or the individual setters, each of
//! which rebuilds synchronously.
//!
//! [`PanController::reconfigure`]: crate::controller::PanController::reconfigure

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::axis::ScrollAxis;

/// Default bounded-mode pull progress that accepts an edge wrap
pub const DEFAULT_PULLING_THRESHOLD: f32 = 0.28;

/// Default duration (seconds) of the bounded-mode edge release animation
pub const DEFAULT_PULL_ANIMATION_DURATION: f32 = 0.2;

/// Behaviour at the first/last page boundary
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopMode {
    /// Hard edges; the surface bounces back
    None,
    /// Wraps seamlessly from the last page to the first
    #[default]
    Loop,
    /// Wraps, but only after pulling past the threshold at an edge
    Bounded,
}

impl LoopMode {
    /// Whether stepping past an edge wraps to the opposite end
    pub fn wraps(self) -> bool {
        !matches!(self, LoopMode::None)
    }
}

/// Configuration for a pager
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanConfig {
    /// Edge behaviour (default: loop)
    pub loop_mode: LoopMode,
    /// Scroll axis (default: horizontal)
    pub axis: ScrollAxis,
    /// Hide edge containers unless the pan moves toward them
    pub hide_outside_views: bool,
    /// Bounded mode: progress (0.0-1.0) a tracked pull needs to release the edge
    pub pulling_threshold: f32,
    /// Bounded mode: edge release animation duration in seconds
    pub pull_animation_duration: f32,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            loop_mode: LoopMode::default(),
            axis: ScrollAxis::default(),
            hide_outside_views: false,
            pulling_threshold: DEFAULT_PULLING_THRESHOLD,
            pull_animation_duration: DEFAULT_PULL_ANIMATION_DURATION,
        }
    }
}

impl PanConfig {
    /// Create config with the given loop mode
    pub fn with_loop_mode(loop_mode: LoopMode) -> Self {
        Self {
            loop_mode,
            ..Default::default()
        }
    }

    /// Clamp out-of-range values, logging what was changed
    pub fn validated(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.pulling_threshold) {
            let clamped = if self.pulling_threshold.is_nan() {
                DEFAULT_PULLING_THRESHOLD
            } else {
                self.pulling_threshold.clamp(0.0, 1.0)
            };
            warn!(
                threshold = self.pulling_threshold,
                clamped, "pulling threshold out of range"
            );
            self.pulling_threshold = clamped;
        }
        if self.pull_animation_duration.is_nan() || self.pull_animation_duration < 0.0 {
            warn!(
                duration = self.pull_animation_duration,
                "negative pull animation duration, using default"
            );
            self.pull_animation_duration = DEFAULT_PULL_ANIMATION_DURATION;
        }
        self
    }
}
