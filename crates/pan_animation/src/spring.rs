//! Spring physics
//!
//! RK4-integrated damped spring. The host uses it to spring back from an
//! overscroll, where the release velocity must carry into the motion.

use serde::{Deserialize, Serialize};

/// Stiffness, damping and mass of a spring
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Critically damped for its stiffness: no overshoot
    pub fn critical(stiffness: f32) -> Self {
        let mut config = Self::new(stiffness, 0.0, 1.0);
        config.damping = config.critical_damping();
        config
    }

    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Will oscillate around the target
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }
}

/// A spring-driven scalar
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

/// Distance (points) below which a spring counts as settled
const REST_EPSILON: f32 = 0.5;

impl Spring {
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Move the target; current velocity is kept
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Move value and target together, keeping velocity
    pub fn shift(&mut self, delta: f32) {
        self.value += delta;
        self.target += delta;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_EPSILON
            && self.velocity.abs() < REST_EPSILON * 10.0
    }

    /// Advance by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }

        let (x, v) = (self.value, self.velocity);
        let half = dt * 0.5;

        let k1_x = v;
        let k1_v = self.acceleration(x, v);

        let k2_x = v + k1_v * half;
        let k2_v = self.acceleration(x + k1_x * half, k2_x);

        let k3_x = v + k2_v * half;
        let k3_v = self.acceleration(x + k2_x * half, k3_x);

        let k4_x = v + k3_v * dt;
        let k4_v = self.acceleration(x + k3_x * dt, k4_x);

        self.value += (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * dt / 6.0;
        self.velocity += (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * dt / 6.0;
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let spring_force = -self.config.stiffness * (x - self.target);
        let damping_force = -self.config.damping * v;
        (spring_force + damping_force) / self.config.mass
    }
}
