use thiserror::Error;

pub type RadarResult<T> = Result<T, RadarError>;

#[derive(Debug, Error)]
pub enum RadarError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("no base color registered for series key `{0}`")]
    MissingSeriesColor(String),

    #[error("duplicate point identity `{0}`")]
    DuplicatePointKey(String),

    #[error("unknown theme color path `{0}`")]
    UnknownThemePath(String),

    #[error("invalid label format `{pattern}`: {reason}")]
    InvalidLabelFormat { pattern: String, reason: String },

    #[error("invalid color literal `{0}`")]
    InvalidColor(String),
}
