use serde::{Deserialize, Serialize};

use crate::error::{RadarError, RadarResult};
use crate::render::Color;

const DEFAULT_TEXT_COLOR: Color = Color::rgb(0.2, 0.2, 0.2);
const DEFAULT_FONT_SIZE_PX: f64 = 11.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextTheme {
    pub fill: Color,
    pub font_size: f64,
}

impl Default for TextTheme {
    fn default() -> Self {
        Self {
            fill: DEFAULT_TEXT_COLOR,
            font_size: DEFAULT_FONT_SIZE_PX,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DotsTheme {
    #[serde(default)]
    pub text: TextTheme,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelsTheme {
    #[serde(default)]
    pub text: TextTheme,
}

/// Read-only style context shared by the whole chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default)]
    pub dots: DotsTheme,
    #[serde(default)]
    pub labels: LabelsTheme,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: default_background(),
            dots: DotsTheme::default(),
            labels: LabelsTheme::default(),
        }
    }
}

impl Theme {
    /// Color stored at a dotted theme path such as `dots.text.fill`.
    pub fn color_at(&self, path: &str) -> RadarResult<Color> {
        match path {
            "background" => Ok(self.background),
            "dots.text.fill" => Ok(self.dots.text.fill),
            "labels.text.fill" => Ok(self.labels.text.fill),
            _ => Err(RadarError::UnknownThemePath(path.to_owned())),
        }
    }

    pub fn validate(&self) -> RadarResult<()> {
        self.background.validate()?;
        for text in [self.dots.text, self.labels.text] {
            text.fill.validate()?;
            if !text.font_size.is_finite() || text.font_size <= 0.0 {
                return Err(RadarError::InvalidConfig {
                    field: "theme.text.font_size",
                    reason: "must be finite and > 0".to_owned(),
                });
            }
        }
        Ok(())
    }
}

fn default_background() -> Color {
    Color::TRANSPARENT
}
