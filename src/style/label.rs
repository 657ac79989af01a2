use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::PointData;
use crate::error::RadarResult;
use crate::style::ValueFormat;

pub type LabelFormatterFn = Arc<dyn Fn(&PointData) -> String + Send + Sync + 'static>;

/// Where a point label comes from.
///
/// Only `Field` takes part in config serialization; formatter closures are
/// installed programmatically.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelSource {
    /// One of `value`, `key`, `index` or `color`.
    Field(String),
    #[serde(skip)]
    Formatter(LabelFormatterFn),
}

impl LabelSource {
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    #[must_use]
    pub fn formatter(formatter: impl Fn(&PointData) -> String + Send + Sync + 'static) -> Self {
        Self::Formatter(Arc::new(formatter))
    }
}

impl Default for LabelSource {
    fn default() -> Self {
        Self::field("value")
    }
}

impl fmt::Debug for LabelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::Formatter(_) => f.write_str("Formatter(..)"),
        }
    }
}

impl PartialEq for LabelSource {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Field(a), Self::Field(b)) => a == b,
            (Self::Formatter(a), Self::Formatter(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

enum RawLabel {
    Number(f64),
    Text(String),
}

/// Label source and optional number format, resolved once per render pass.
#[derive(Clone)]
pub struct LabelGenerator {
    source: LabelSource,
    format: Option<ValueFormat>,
}

impl LabelGenerator {
    pub fn new(source: &LabelSource, format: Option<&str>) -> RadarResult<Self> {
        let format = format.map(ValueFormat::parse).transpose()?;
        Ok(Self {
            source: source.clone(),
            format,
        })
    }

    /// Label text for a point, `None` when the source yields nothing.
    ///
    /// The number format applies to numeric fields; text fields and
    /// formatter output pass through untouched.
    #[must_use]
    pub fn label(&self, data: &PointData) -> Option<String> {
        let raw = match &self.source {
            LabelSource::Formatter(formatter) => RawLabel::Text(formatter(data)),
            LabelSource::Field(name) => match name.as_str() {
                "value" => RawLabel::Number(data.value?),
                "key" => RawLabel::Text(data.key.to_string()),
                "index" => RawLabel::Text(data.index.clone()),
                "color" => RawLabel::Text(data.color.to_css()),
                _ => return None,
            },
        };

        match (raw, self.format) {
            (RawLabel::Number(value), Some(format)) => Some(format.format(value)),
            (RawLabel::Number(value), None) => Some(value.to_string()),
            (RawLabel::Text(text), _) => Some(text),
        }
    }
}

impl fmt::Debug for LabelGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelGenerator")
            .field("source", &self.source)
            .field("format", &self.format)
            .finish()
    }
}
