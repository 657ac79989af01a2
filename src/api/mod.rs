//! Public entry points: the dots layer and its configuration.

mod config;
mod dots;

pub use config::{MotionConfig, RadarDotsConfig};
pub use dots::RadarDots;
