//! Damped spring physics
//!
//! A spring pulls `value` toward `target` with a force proportional to the
//! displacement, opposed by a damping force proportional to velocity. The
//! integrator is semi-implicit Euler with fixed sub-steps, which stays stable
//! for the very stiff springs used for scroll edge snap-back.

use serde::{Deserialize, Serialize};

/// Largest integration sub-step in seconds
const MAX_SUBSTEP: f64 = 1.0 / 240.0;

/// Spring parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringConfig {
    pub const fn new(stiffness: f64, damping: f64, mass: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Stiff spring, quick settle with a little overshoot
    pub const fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Soft, wobbly spring
    pub const fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Very stiff, slightly overdamped spring
    ///
    /// Critical damping is `2 * sqrt(stiffness * mass)` ≈ 109.5 here, so 110
    /// snaps back without rebounding. This is the iOS-like edge snap-back.
    pub const fn snappy() -> Self {
        Self::new(3000.0, 110.0, 1.0)
    }

    /// Damping ratio (1.0 = critically damped)
    pub fn damping_ratio(&self) -> f64 {
        let critical = 2.0 * (self.stiffness * self.mass).sqrt();
        if critical > 0.0 {
            self.damping / critical
        } else {
            0.0
        }
    }

    /// Whether all parameters can drive a converging spring
    pub fn is_valid(&self) -> bool {
        self.stiffness.is_finite()
            && self.damping.is_finite()
            && self.mass.is_finite()
            && self.stiffness > 0.0
            && self.damping > 0.0
            && self.mass > 0.0
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::snappy()
    }
}

/// A single animated value driven by a damped spring
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
    /// Displacement below which the spring may rest
    rest_delta: f64,
    /// Speed below which the spring may rest
    rest_speed: f64,
}

impl Spring {
    /// Create a spring at rest at `initial`
    pub fn new(config: SpringConfig, initial: f64) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
            rest_delta: 0.01,
            rest_speed: 0.1,
        }
    }

    /// Start with an inherited velocity (units per second)
    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = velocity;
        self
    }

    /// Override the rest thresholds
    pub fn with_rest(mut self, rest_delta: f64, rest_speed: f64) -> Self {
        self.rest_delta = rest_delta.abs();
        self.rest_speed = rest_speed.abs();
        self
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Check whether the spring is at rest on its target
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() <= self.rest_delta && self.velocity.abs() <= self.rest_speed
    }

    /// Jump to the target and stop
    pub fn snap_to_target(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
    }

    /// Advance the spring by `dt` seconds
    ///
    /// Settled springs snap exactly onto their target so callers never see a
    /// residual sub-threshold offset.
    pub fn step(&mut self, dt: f64) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        if self.is_settled() {
            self.snap_to_target();
            return;
        }

        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;

        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(MAX_SUBSTEP);
            let displacement = self.value - self.target;
            let force = -stiffness * displacement - damping * self.velocity;
            self.velocity += (force / mass) * h;
            self.value += self.velocity * h;
            remaining -= h;
        }

        if self.is_settled() {
            self.snap_to_target();
        }
    }
}
