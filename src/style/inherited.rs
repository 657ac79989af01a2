use serde::{Deserialize, Serialize};

use crate::core::PointData;
use crate::error::{RadarError, RadarResult};
use crate::render::Color;
use crate::style::Theme;

/// Point attribute an inherited color is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointColorSource {
    /// The series base color from `color_by_key`.
    #[default]
    #[serde(rename = "color")]
    Color,
}

/// Adjustment applied to an inherited color, serialized as `["darker", 0.3]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(String, f64)", into = "(String, f64)")]
pub enum ColorModifier {
    Darker(f64),
    Brighter(f64),
    Opacity(f64),
}

impl ColorModifier {
    #[must_use]
    pub fn apply(self, color: Color) -> Color {
        match self {
            Self::Darker(amount) => color.darker(amount),
            Self::Brighter(amount) => color.brighter(amount),
            Self::Opacity(alpha) => color.with_alpha(alpha),
        }
    }

    fn amount(self) -> f64 {
        match self {
            Self::Darker(amount) | Self::Brighter(amount) | Self::Opacity(amount) => amount,
        }
    }
}

impl TryFrom<(String, f64)> for ColorModifier {
    type Error = RadarError;

    fn try_from((name, amount): (String, f64)) -> Result<Self, Self::Error> {
        match name.as_str() {
            "darker" => Ok(Self::Darker(amount)),
            "brighter" => Ok(Self::Brighter(amount)),
            "opacity" => Ok(Self::Opacity(amount)),
            _ => Err(RadarError::InvalidConfig {
                field: "modifiers",
                reason: format!("unknown color modifier `{name}`"),
            }),
        }
    }
}

impl From<ColorModifier> for (String, f64) {
    fn from(modifier: ColorModifier) -> Self {
        let name = match modifier {
            ColorModifier::Darker(_) => "darker",
            ColorModifier::Brighter(_) => "brighter",
            ColorModifier::Opacity(_) => "opacity",
        };
        (name.to_owned(), modifier.amount())
    }
}

/// Color that is either literal or derived from the point's base color.
///
/// Accepts the JSON shapes `"#e8c1a0"`, `{"from": "color", "modifiers": [..]}`
/// and `{"theme": "dots.text.fill"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InheritedColor {
    Fixed(Color),
    FromPoint {
        from: PointColorSource,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        modifiers: Vec<ColorModifier>,
    },
    Theme {
        theme: String,
    },
}

impl Default for InheritedColor {
    fn default() -> Self {
        Self::from_point()
    }
}

impl InheritedColor {
    /// Inherit the point's base color unmodified.
    #[must_use]
    pub fn from_point() -> Self {
        Self::FromPoint {
            from: PointColorSource::Color,
            modifiers: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_point_with(modifiers: Vec<ColorModifier>) -> Self {
        Self::FromPoint {
            from: PointColorSource::Color,
            modifiers,
        }
    }

    #[must_use]
    pub fn theme(path: impl Into<String>) -> Self {
        Self::Theme { theme: path.into() }
    }

    /// Builds the per-pass generator, resolving theme lookups once.
    pub fn generator(&self, theme: &Theme) -> RadarResult<ColorGenerator> {
        match self {
            Self::Fixed(color) => {
                color.validate()?;
                Ok(ColorGenerator::Fixed(*color))
            }
            Self::FromPoint { modifiers, .. } => {
                for modifier in modifiers {
                    if !modifier.amount().is_finite() {
                        return Err(RadarError::InvalidConfig {
                            field: "modifiers",
                            reason: "modifier amount must be finite".to_owned(),
                        });
                    }
                }
                Ok(ColorGenerator::FromPoint(modifiers.clone()))
            }
            Self::Theme { theme: path } => Ok(ColorGenerator::Fixed(theme.color_at(path)?)),
        }
    }

    pub fn resolve(&self, data: &PointData, theme: &Theme) -> RadarResult<Color> {
        Ok(self.generator(theme)?.color_for(data))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColorGenerator {
    Fixed(Color),
    FromPoint(Vec<ColorModifier>),
}

impl ColorGenerator {
    #[must_use]
    pub fn color_for(&self, data: &PointData) -> Color {
        match self {
            Self::Fixed(color) => *color,
            Self::FromPoint(modifiers) => modifiers
                .iter()
                .fold(data.color, |color, modifier| modifier.apply(color))
                .clamped(),
        }
    }
}
