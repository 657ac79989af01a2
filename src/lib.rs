//! radar-dots: data-point markers for radar (spider) charts.
//!
//! Points are derived from data rows × series keys, placed on polar axes,
//! styled through inheritable colors and optional labels, then rendered either
//! statically or through keyed spring transitions.

pub mod api;
pub mod core;
pub mod error;
pub mod motion;
pub mod render;
pub mod style;
pub mod telemetry;

pub use api::{RadarDots, RadarDotsConfig};
pub use error::{RadarError, RadarResult};
