use serde::{Deserialize, Serialize};

use crate::error::{RadarError, RadarResult};

/// Maps a series value to a distance from the radar origin.
pub trait RadiusScale: Send + Sync {
    fn radius(&self, value: f64) -> f64;
}

impl<F> RadiusScale for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn radius(&self, value: f64) -> f64 {
        self(value)
    }
}

/// Linear radius scale mapping `[0, max_value]` onto `[0, radius]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRadiusScale {
    max_value: f64,
    radius: f64,
}

impl LinearRadiusScale {
    pub fn new(max_value: f64, radius: f64) -> RadarResult<Self> {
        if !max_value.is_finite() || max_value == 0.0 {
            return Err(RadarError::InvalidData(
                "radius scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(RadarError::InvalidData(
                "radius scale range must be finite and > 0".to_owned(),
            ));
        }

        Ok(Self { max_value, radius })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (0.0, self.max_value)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (0.0, self.radius)
    }

    /// Inverse mapping from a distance back to the value domain.
    #[must_use]
    pub fn value_at(self, distance: f64) -> f64 {
        distance / self.radius * self.max_value
    }
}

impl RadiusScale for LinearRadiusScale {
    fn radius(&self, value: f64) -> f64 {
        value / self.max_value * self.radius
    }
}
