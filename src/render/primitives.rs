use serde::{Deserialize, Serialize};

use crate::error::{RadarError, RadarResult};

const DARKER: f64 = 0.7;
const BRIGHTER: f64 = 1.0 / DARKER;

/// RGBA color in normalized 0..=1 channel values.
///
/// Serialized as a CSS color string (`#rrggbb` when opaque, `rgba(..)`
/// otherwise) so configs read like the props a host would write by hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    /// Parses `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and
    /// `rgba(r, g, b, a)` literals.
    pub fn parse(literal: &str) -> RadarResult<Self> {
        let trimmed = literal.trim();
        let invalid = || RadarError::InvalidColor(literal.to_owned());

        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(invalid);
        }

        let (body, expects_alpha) = if let Some(rest) = trimmed.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = trimmed.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(invalid());
        };
        let body = body.strip_suffix(')').ok_or_else(invalid)?;
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected = if expects_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(invalid());
        }

        let mut channels = [0.0_f64; 3];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            let value: f64 = part.parse().map_err(|_| invalid())?;
            if !(0.0..=255.0).contains(&value) {
                return Err(invalid());
            }
            *slot = value / 255.0;
        }
        let alpha = if expects_alpha {
            parts[3].parse::<f64>().map_err(|_| invalid())?
        } else {
            1.0
        };

        let color = Self::rgba(channels[0], channels[1], channels[2], alpha);
        color.validate().map_err(|_| invalid())?;
        Ok(color)
    }

    pub fn validate(self) -> RadarResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(RadarError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// Scales RGB channels by `0.7^amount`.
    ///
    /// Channels may leave `[0, 1]` so chained modifiers stay reversible; use
    /// `clamped` before handing the color to a frame.
    #[must_use]
    pub fn darker(self, amount: f64) -> Self {
        self.scaled(DARKER.powf(amount))
    }

    /// Scales RGB channels by `(1 / 0.7)^amount`. Not clamped, see `darker`.
    #[must_use]
    pub fn brighter(self, amount: f64) -> Self {
        self.scaled(BRIGHTER.powf(amount))
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Channels clamped into `[0, 1]`.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self::rgba(
            self.red.clamp(0.0, 1.0),
            self.green.clamp(0.0, 1.0),
            self.blue.clamp(0.0, 1.0),
            self.alpha.clamp(0.0, 1.0),
        )
    }

    fn scaled(self, factor: f64) -> Self {
        Self::rgba(
            self.red * factor,
            self.green * factor,
            self.blue * factor,
            self.alpha,
        )
    }

    /// CSS representation used for serialization and text labels.
    #[must_use]
    pub fn to_css(self) -> String {
        let [red, green, blue] = [self.red, self.green, self.blue].map(channel_to_u8);
        if self.alpha >= 1.0 {
            format!("#{red:02x}{green:02x}{blue:02x}")
        } else {
            format!("rgba({red}, {green}, {blue}, {})", self.alpha)
        }
    }
}

fn channel_to_u8(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    let nibble = |index: usize| {
        u8::from_str_radix(&hex[index..=index], 16)
            .ok()
            .map(|v| v * 17)
    };

    let (red, green, blue, alpha) = match hex.len() {
        3 => (nibble(0)?, nibble(1)?, nibble(2)?, 255),
        6 => (byte(0..2)?, byte(2..4)?, byte(4..6)?, 255),
        8 => (byte(0..2)?, byte(2..4)?, byte(4..6)?, byte(6..8)?),
        _ => return None,
    };
    Some(Color::from_rgb8(red, green, blue).with_alpha(f64::from(alpha) / 255.0))
}

impl TryFrom<String> for Color {
    type Error = RadarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_css()
    }
}

/// Marker shape drawn at each point, centered on the point position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolShape {
    #[default]
    Circle,
    Square,
    Diamond,
    Triangle,
}

/// Draw command for one marker in radar-local pixel space.
///
/// Coordinates are relative to `RenderFrame::origin`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DotPrimitive {
    pub key: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub symbol: SymbolShape,
    pub fill_color: Color,
    pub border_width: f64,
    pub border_color: Color,
}

impl DotPrimitive {
    pub fn validate(&self) -> RadarResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(RadarError::InvalidData(format!(
                "dot `{}` coordinates must be finite",
                self.key
            )));
        }
        if !self.size.is_finite() || self.size < 0.0 {
            return Err(RadarError::InvalidData(format!(
                "dot `{}` size must be finite and >= 0",
                self.key
            )));
        }
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(RadarError::InvalidData(format!(
                "dot `{}` border width must be finite and >= 0",
                self.key
            )));
        }
        self.fill_color.validate()?;
        self.border_color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in radar-local pixel space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> RadarResult<()> {
        if self.text.is_empty() {
            return Err(RadarError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(RadarError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(RadarError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
