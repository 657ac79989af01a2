use serde::Serialize;

use crate::core::{Position, Viewport};
use crate::error::{RadarError, RadarResult};
use crate::render::{DotPrimitive, TextPrimitive};

/// Backend-agnostic scene for one dots draw pass.
///
/// Primitive coordinates are relative to `origin`, the radar center in
/// viewport pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub origin: Position,
    pub dots: Vec<DotPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, origin: Position) -> Self {
        Self {
            viewport,
            origin,
            dots: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_dot(mut self, dot: DotPrimitive) -> Self {
        self.dots.push(dot);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    pub fn validate(&self) -> RadarResult<()> {
        if !self.viewport.is_valid() {
            return Err(RadarError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.origin.x.is_finite() || !self.origin.y.is_finite() {
            return Err(RadarError::InvalidData(
                "frame origin must be finite".to_owned(),
            ));
        }

        for dot in &self.dots {
            dot.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dots.is_empty() && self.texts.is_empty()
    }
}
