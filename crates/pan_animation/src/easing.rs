//! Easing curves

use serde::{Deserialize, Serialize};

/// Easing curve mapping linear time `t` in `[0, 1]` to eased progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Hermite smoothstep
    Smoothstep,
    EaseInCubic,
    /// Fast start, gentle landing (scroll deceleration)
    #[default]
    EaseOutCubic,
    EaseInOutCubic,
}

impl Easing {
    /// Apply the curve; `t` is clamped into `[0, 1]`
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Smoothstep => t * t * (3.0 - 2.0 * t),
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}
