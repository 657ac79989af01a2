use std::collections::HashSet;
use std::f64::consts::TAU;

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::core::{
    ColorByKey, Datum, IndexBy, PointData, Position, RadarPoint, RadiusScale, SeriesKey,
    point_angle, position_from_angle,
};
use crate::error::{RadarError, RadarResult};
use crate::style::PointStyle;

/// Inputs shaping the point cross-product for one render pass.
#[derive(Clone, Copy)]
pub struct RadarLayout<'a> {
    pub data: &'a [Datum],
    pub keys: &'a [SeriesKey],
    pub index_by: &'a IndexBy,
    pub color_by_key: &'a ColorByKey,
    pub radius_scale: &'a dyn RadiusScale,
    pub angle_step: f64,
}

impl<'a> RadarLayout<'a> {
    /// Builds a layout whose axes split the full circle evenly between rows.
    #[must_use]
    pub fn evenly_spaced(
        data: &'a [Datum],
        keys: &'a [SeriesKey],
        index_by: &'a IndexBy,
        color_by_key: &'a ColorByKey,
        radius_scale: &'a dyn RadiusScale,
    ) -> Self {
        Self {
            data,
            keys,
            index_by,
            color_by_key,
            radius_scale,
            angle_step: evenly_spaced_angle_step(data.len()),
        }
    }

    pub fn validate(&self) -> RadarResult<()> {
        if !self.angle_step.is_finite() {
            return Err(RadarError::InvalidConfig {
                field: "angle_step",
                reason: "must be finite".to_owned(),
            });
        }
        for key in self.keys {
            let color = self
                .color_by_key
                .get(key)
                .ok_or_else(|| RadarError::MissingSeriesColor(key.to_string()))?;
            color.validate()?;
        }
        Ok(())
    }
}

/// Angle between two neighbouring axes when `row_count` axes share the circle.
#[must_use]
pub fn evenly_spaced_angle_step(row_count: usize) -> f64 {
    if row_count == 0 {
        return 0.0;
    }
    TAU / row_count as f64
}

/// Derives one point per (datum, key) pair, in data order then key order.
///
/// Rows missing a series value still yield a point: it sits on the origin,
/// carries `value: None` and has no value label.
pub fn derive_points(layout: &RadarLayout<'_>, style: &PointStyle) -> RadarResult<Vec<RadarPoint>> {
    layout.validate()?;

    #[cfg(feature = "parallel-projection")]
    let rows = layout
        .data
        .par_iter()
        .enumerate()
        .map(|(row, datum)| derive_row(layout, style, row, datum))
        .collect::<RadarResult<Vec<_>>>()?;

    #[cfg(not(feature = "parallel-projection"))]
    let rows = layout
        .data
        .iter()
        .enumerate()
        .map(|(row, datum)| derive_row(layout, style, row, datum))
        .collect::<RadarResult<Vec<_>>>()?;

    let points: Vec<RadarPoint> = rows.into_iter().flatten().collect();

    let mut seen = HashSet::with_capacity(points.len());
    for point in &points {
        if !seen.insert(point.id.as_str()) {
            return Err(RadarError::DuplicatePointKey(point.id.clone()));
        }
    }

    let missing = points.iter().filter(|p| p.data.value.is_none()).count();
    if missing > 0 {
        warn!(missing, "series values missing, points placed on origin");
    }
    debug!(
        rows = layout.data.len(),
        keys = layout.keys.len(),
        points = points.len(),
        "derived radar points"
    );

    Ok(points)
}

fn derive_row(
    layout: &RadarLayout<'_>,
    style: &PointStyle,
    row: usize,
    datum: &Datum,
) -> RadarResult<Vec<RadarPoint>> {
    let index = layout.index_by.index_of(datum, row);
    let angle = point_angle(layout.angle_step, row);

    let mut points = Vec::with_capacity(layout.keys.len());
    for key in layout.keys {
        let color = layout
            .color_by_key
            .get(key)
            .copied()
            .ok_or_else(|| RadarError::MissingSeriesColor(key.to_string()))?;
        let value = datum.value(key);

        let (radius, position) = match value {
            Some(value) => {
                let radius = layout.radius_scale.radius(value);
                if !radius.is_finite() {
                    return Err(RadarError::InvalidData(format!(
                        "radius for `{key}.{index}` must be finite"
                    )));
                }
                (radius, position_from_angle(angle, radius))
            }
            None => (0.0, Position::default()),
        };

        let data = PointData {
            index: index.clone(),
            key: key.clone(),
            value,
            color,
        };
        points.push(RadarPoint {
            id: format!("{key}.{index}"),
            row,
            angle,
            radius,
            position,
            fill: style.fill.color_for(&data),
            stroke: style.stroke.color_for(&data),
            label: style.label.as_ref().and_then(|label| label.label(&data)),
            data,
        });
    }

    Ok(points)
}
