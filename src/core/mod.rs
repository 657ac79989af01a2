pub mod points;
pub mod polar;
pub mod scale;
pub mod types;

pub use points::{RadarLayout, derive_points, evenly_spaced_angle_step};
pub use polar::{point_angle, position_from_angle};
pub use scale::{LinearRadiusScale, RadiusScale};
pub use types::{
    ColorByKey, Datum, DatumValue, IndexAccessorFn, IndexBy, PointData, Position, RadarPoint,
    SeriesKey, Viewport,
};
