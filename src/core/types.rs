use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::render::Color;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Center of the viewport, the default radar origin.
    #[must_use]
    pub fn center(self) -> Position {
        Position::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Cartesian position in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Identifier selecting one value field across all data rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesKey(String);

impl SeriesKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SeriesKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SeriesKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Base color per series key, in series order.
pub type ColorByKey = IndexMap<SeriesKey, Color>;

/// One datum field. `null` and booleans load but never count as series values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatumValue {
    Number(f64),
    Text(String),
    Flag(bool),
    Null,
}

impl fmt::Display for DatumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Flag(value) => write!(f, "{value}"),
            Self::Null => Ok(()),
        }
    }
}

/// One record per category: the category field plus one value per series key.
///
/// Deserializes from flat JSON objects such as
/// `{"taste": "fruity", "chardonnay": 93, "carmenere": 61}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Datum {
    fields: IndexMap<String, DatumValue>,
}

impl Datum {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_text(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields
            .insert(field.into(), DatumValue::Text(value.into()));
        self
    }

    #[must_use]
    pub fn with_value(mut self, field: impl Into<String>, value: f64) -> Self {
        self.fields.insert(field.into(), DatumValue::Number(value));
        self
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&DatumValue> {
        self.fields.get(name)
    }

    /// Numeric value for a series key, `None` when absent or not numeric.
    #[must_use]
    pub fn value(&self, key: &SeriesKey) -> Option<f64> {
        match self.fields.get(key.as_str()) {
            Some(DatumValue::Number(value)) => Some(*value),
            _ => None,
        }
    }
}

pub type IndexAccessorFn = Arc<dyn Fn(&Datum) -> String + Send + Sync + 'static>;

/// Maps a data row to its category index.
#[derive(Clone)]
pub enum IndexBy {
    /// Reads a datum field; rows lacking it, or holding `null`, fall back to
    /// their row position.
    Field(String),
    Accessor(IndexAccessorFn),
}

impl IndexBy {
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    #[must_use]
    pub fn accessor(accessor: impl Fn(&Datum) -> String + Send + Sync + 'static) -> Self {
        Self::Accessor(Arc::new(accessor))
    }

    #[must_use]
    pub fn index_of(&self, datum: &Datum, row: usize) -> String {
        match self {
            Self::Field(name) => match datum.field(name) {
                None | Some(DatumValue::Null) => row.to_string(),
                Some(value) => value.to_string(),
            },
            Self::Accessor(accessor) => accessor(datum),
        }
    }
}

impl fmt::Debug for IndexBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::Accessor(_) => f.write_str("Accessor(..)"),
        }
    }
}

/// Per-point payload handed to color and label resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointData {
    pub index: String,
    pub key: SeriesKey,
    pub value: Option<f64>,
    pub color: Color,
}

/// One derived marker: a (series key, category index) pair placed on the radar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarPoint {
    /// Stable identity `"{key}.{index}"` used to match transitions.
    pub id: String,
    pub row: usize,
    pub angle: f64,
    pub radius: f64,
    pub position: Position,
    pub fill: Color,
    pub stroke: Color,
    pub label: Option<String>,
    pub data: PointData,
}
