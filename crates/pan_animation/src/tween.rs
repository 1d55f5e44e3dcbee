//! Fixed-duration tweens
//!
//! A [`Tween`] interpolates a scalar from `from` to `to` over a duration
//! with an [`Easing`] curve. It can be shifted when the value it drives is
//! rebased underneath it.

use crate::easing::Easing;

/// Eased interpolation of a scalar over time (seconds)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

/// Shortest allowed duration, so sampling never divides by zero
const MIN_DURATION: f32 = 1e-4;

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration.max(MIN_DURATION),
            elapsed: 0.0,
            easing,
        }
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Linear time fraction in `[0, 1]`
    pub fn fraction(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Current value; exactly `to` once done
    pub fn sample(&self) -> f32 {
        if self.is_done() {
            return self.to;
        }
        self.from + (self.to - self.from) * self.easing.apply(self.fraction())
    }

    /// Advance by `dt` seconds and return the new sample
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.sample()
    }

    /// Rebase both endpoints by `delta`, keeping the timing
    pub fn shift(&mut self, delta: f32) {
        self.from += delta;
        self.to += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_reaches_exact_target() {
        let mut tween = Tween::new(100.0, 0.0, 0.3, Easing::EaseOutCubic);
        let mut last = tween.sample();
        while !tween.is_done() {
            let value = tween.advance(1.0 / 60.0);
            assert!(value <= last);
            last = value;
        }
        assert_eq!(tween.sample(), 0.0);
    }

    #[test]
    fn test_shift_preserves_progress() {
        let mut tween = Tween::new(100.0, 0.0, 0.3, Easing::Linear);
        tween.advance(0.15);
        let before = tween.sample();
        tween.shift(100.0);
        assert!((tween.sample() - (before + 100.0)).abs() < 1e-3);
        tween.advance(1.0);
        assert_eq!(tween.sample(), 100.0);
    }

    #[test]
    fn test_smoothstep_is_halfway_at_midpoint() {
        let mut tween = Tween::new(0.0, 100.0, 0.2, Easing::Smoothstep);
        tween.advance(0.1);
        assert!((tween.fraction() - 0.5).abs() < 1e-4);
        assert!((tween.sample() - 50.0).abs() < 1e-3);
        assert!(!tween.is_done());
    }

    #[test]
    fn test_zero_duration_completes_on_first_step() {
        let mut tween = Tween::new(0.0, 10.0, 0.0, Easing::Linear);
        assert_eq!(tween.advance(1.0 / 60.0), 10.0);
        assert!(tween.is_done());
    }
}
