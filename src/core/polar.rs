use std::f64::consts::FRAC_PI_2;

use crate::core::Position;

/// Angle of the axis for data row `row`. The first axis points straight up.
#[must_use]
pub fn point_angle(angle_step: f64, row: usize) -> f64 {
    angle_step * row as f64 - FRAC_PI_2
}

/// Converts a polar coordinate around the radar origin to cartesian pixels.
///
/// Screen y grows downward, so negative angles land above the origin.
#[must_use]
pub fn position_from_angle(angle: f64, distance: f64) -> Position {
    Position::new(angle.cos() * distance, angle.sin() * distance)
}
