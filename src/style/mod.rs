//! Color and label resolution for radar points.

mod inherited;
mod label;
mod theme;
mod value_format;

pub use inherited::{ColorGenerator, ColorModifier, InheritedColor, PointColorSource};
pub use label::{LabelFormatterFn, LabelGenerator, LabelSource};
pub use theme::{DotsTheme, LabelsTheme, TextTheme, Theme};
pub use value_format::{FormatKind, SignMode, ValueFormat};

use crate::error::RadarResult;

/// Per-pass resolvers for fill, stroke and label.
#[derive(Debug, Clone)]
pub struct PointStyle {
    pub fill: ColorGenerator,
    pub stroke: ColorGenerator,
    /// `None` when labels are disabled.
    pub label: Option<LabelGenerator>,
}

impl PointStyle {
    pub fn new(
        color: &InheritedColor,
        border_color: &InheritedColor,
        label: Option<(&LabelSource, Option<&str>)>,
        theme: &Theme,
    ) -> RadarResult<Self> {
        Ok(Self {
            fill: color.generator(theme)?,
            stroke: border_color.generator(theme)?,
            label: label
                .map(|(source, format)| LabelGenerator::new(source, format))
                .transpose()?,
        })
    }

    /// Inherits both colors from the series and draws no labels.
    #[must_use]
    pub fn inherited() -> Self {
        Self {
            fill: ColorGenerator::FromPoint(Vec::new()),
            stroke: ColorGenerator::FromPoint(Vec::new()),
            label: None,
        }
    }
}
