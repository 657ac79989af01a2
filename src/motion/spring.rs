use serde::{Deserialize, Serialize};

use crate::error::{RadarError, RadarResult};

/// Fixed integration step, one 60 Hz frame.
pub const FRAME_SECONDS: f64 = 1.0 / 60.0;
/// Steps beyond this many per tick are dropped instead of replayed.
pub const MAX_STEPS_PER_TICK: u32 = 10;

pub const DEFAULT_STIFFNESS: f64 = 90.0;
pub const DEFAULT_DAMPING: f64 = 15.0;
pub const DEFAULT_PRECISION: f64 = 0.01;

/// Semi-implicit Euler stays bounded while `k·h² + 2·c·h` is below this.
const STABILITY_LIMIT: f64 = 4.0;

/// Damped spring parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    /// Velocity and distance below which a spring snaps onto its target.
    #[serde(default = "default_precision")]
    pub precision: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: DEFAULT_STIFFNESS,
            damping: DEFAULT_DAMPING,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl SpringConfig {
    #[must_use]
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            precision: DEFAULT_PRECISION,
        }
    }

    /// Rejects non-positive parameters and tunings the fixed-step integrator
    /// cannot follow: `stiffness·h² + 2·damping·h` must stay below 4 for the
    /// step `h = 1/60 s`, which caps stiffness near 14 400 with no damping.
    pub fn validate(self) -> RadarResult<Self> {
        for (value, field) in [
            (self.stiffness, "motion_stiffness"),
            (self.damping, "motion_damping"),
            (self.precision, "motion_precision"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RadarError::InvalidConfig {
                    field,
                    reason: "must be finite and > 0".to_owned(),
                });
            }
        }

        let stability = self.stiffness * FRAME_SECONDS * FRAME_SECONDS
            + 2.0 * self.damping * FRAME_SECONDS;
        if stability >= STABILITY_LIMIT {
            return Err(RadarError::InvalidConfig {
                field: "motion_stiffness",
                reason: format!(
                    "stiffness {} with damping {} is unstable at a {FRAME_SECONDS:.4}s step",
                    self.stiffness, self.damping
                ),
            });
        }
        Ok(self)
    }
}

fn default_precision() -> f64 {
    DEFAULT_PRECISION
}

/// One animated scalar following a damped spring toward its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    /// A spring already resting on `value`.
    #[must_use]
    pub fn at_rest(value: f64) -> Self {
        Self {
            position: value,
            velocity: 0.0,
            target: value,
        }
    }

    /// A spring starting at `from` and heading for `target`.
    #[must_use]
    pub fn between(from: f64, target: f64) -> Self {
        Self {
            position: from,
            velocity: 0.0,
            target,
        }
    }

    #[must_use]
    pub fn position(self) -> f64 {
        self.position
    }

    #[must_use]
    pub fn velocity(self) -> f64 {
        self.velocity
    }

    #[must_use]
    pub fn target(self) -> f64 {
        self.target
    }

    /// Moves the target while keeping current position and velocity.
    pub fn retarget(&mut self, target: f64) {
        self.target = target;
    }

    #[must_use]
    pub fn is_at_rest(self) -> bool {
        self.velocity == 0.0 && self.position == self.target
    }

    pub fn snap(&mut self) {
        self.position = self.target;
        self.velocity = 0.0;
    }

    /// Advances the spring by `delta_seconds` with semi-implicit Euler.
    pub fn step(&mut self, delta_seconds: f64, config: SpringConfig) {
        if self.is_at_rest() {
            return;
        }

        let spring_force = -config.stiffness * (self.position - self.target);
        let damper_force = -config.damping * self.velocity;
        let velocity = self.velocity + (spring_force + damper_force) * delta_seconds;
        let position = self.position + velocity * delta_seconds;

        if velocity.abs() < config.precision && (position - self.target).abs() < config.precision {
            self.snap();
        } else {
            self.velocity = velocity;
            self.position = position;
        }
    }
}
