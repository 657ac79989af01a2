use serde::{Deserialize, Serialize};

use crate::error::{RadarError, RadarResult};
use crate::motion::{
    DEFAULT_DAMPING, DEFAULT_STIFFNESS, EnterTransition, LeaveTransition, SpringConfig,
};
use crate::render::SymbolShape;
use crate::style::{InheritedColor, LabelSource, PointStyle, Theme, ValueFormat};

const DEFAULT_DOT_SIZE_PX: f64 = 6.0;
const DEFAULT_LABEL_Y_OFFSET_PX: f64 = -12.0;

/// Animation toggle and spring tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    #[serde(default = "default_animate")]
    pub animate: bool,
    #[serde(default = "default_motion_stiffness")]
    pub motion_stiffness: f64,
    #[serde(default = "default_motion_damping")]
    pub motion_damping: f64,
    #[serde(default)]
    pub enter: EnterTransition,
    #[serde(default)]
    pub leave: LeaveTransition,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            animate: default_animate(),
            motion_stiffness: default_motion_stiffness(),
            motion_damping: default_motion_damping(),
            enter: EnterTransition::default(),
            leave: LeaveTransition::default(),
        }
    }
}

impl MotionConfig {
    #[must_use]
    pub fn spring(self) -> SpringConfig {
        SpringConfig::new(self.motion_stiffness, self.motion_damping)
    }
}

/// Appearance, label and motion settings for radar dots.
///
/// Serializable so hosts can persist chart setup. Label formatter closures
/// are not serializable and must be installed with `with_label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarDotsConfig {
    #[serde(default)]
    pub symbol: SymbolShape,
    #[serde(default = "default_size")]
    pub size: f64,
    #[serde(default)]
    pub color: InheritedColor,
    #[serde(default)]
    pub border_width: f64,
    #[serde(default)]
    pub border_color: InheritedColor,
    #[serde(default)]
    pub enable_label: bool,
    #[serde(default)]
    pub label: LabelSource,
    #[serde(default)]
    pub label_format: Option<String>,
    #[serde(default = "default_label_y_offset")]
    pub label_y_offset: f64,
    #[serde(flatten)]
    pub motion: MotionConfig,
}

impl Default for RadarDotsConfig {
    fn default() -> Self {
        Self {
            symbol: SymbolShape::default(),
            size: default_size(),
            color: InheritedColor::default(),
            border_width: 0.0,
            border_color: InheritedColor::default(),
            enable_label: false,
            label: LabelSource::default(),
            label_format: None,
            label_y_offset: default_label_y_offset(),
            motion: MotionConfig::default(),
        }
    }
}

impl RadarDotsConfig {
    #[must_use]
    pub fn with_symbol(mut self, symbol: SymbolShape) -> Self {
        self.symbol = symbol;
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: InheritedColor) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_border(mut self, width: f64, color: InheritedColor) -> Self {
        self.border_width = width;
        self.border_color = color;
        self
    }

    /// Enables labels drawn from `source`.
    #[must_use]
    pub fn with_label(mut self, source: LabelSource) -> Self {
        self.enable_label = true;
        self.label = source;
        self
    }

    #[must_use]
    pub fn with_enable_label(mut self, enable: bool) -> Self {
        self.enable_label = enable;
        self
    }

    #[must_use]
    pub fn with_label_format(mut self, format: impl Into<String>) -> Self {
        self.label_format = Some(format.into());
        self
    }

    #[must_use]
    pub fn with_label_y_offset(mut self, offset: f64) -> Self {
        self.label_y_offset = offset;
        self
    }

    #[must_use]
    pub fn with_animate(mut self, animate: bool) -> Self {
        self.motion.animate = animate;
        self
    }

    #[must_use]
    pub fn with_motion(mut self, stiffness: f64, damping: f64) -> Self {
        self.motion.motion_stiffness = stiffness;
        self.motion.motion_damping = damping;
        self
    }

    #[must_use]
    pub fn with_transitions(mut self, enter: EnterTransition, leave: LeaveTransition) -> Self {
        self.motion.enter = enter;
        self.motion.leave = leave;
        self
    }

    /// Checks numeric ranges, spring tuning, theme paths and label format.
    pub fn validate(&self, theme: &Theme) -> RadarResult<()> {
        for (value, field) in [(self.size, "size"), (self.border_width, "border_width")] {
            if !value.is_finite() || value < 0.0 {
                return Err(RadarError::InvalidConfig {
                    field,
                    reason: "must be finite and >= 0".to_owned(),
                });
            }
        }
        if !self.label_y_offset.is_finite() {
            return Err(RadarError::InvalidConfig {
                field: "label_y_offset",
                reason: "must be finite".to_owned(),
            });
        }
        if let Some(format) = &self.label_format {
            ValueFormat::parse(format)?;
        }
        self.motion.spring().validate()?;
        self.point_style(theme)?;
        Ok(())
    }

    /// Resolvers for one render pass.
    pub fn point_style(&self, theme: &Theme) -> RadarResult<PointStyle> {
        let label = self
            .enable_label
            .then(|| (&self.label, self.label_format.as_deref()));
        PointStyle::new(&self.color, &self.border_color, label, theme)
    }
}

fn default_size() -> f64 {
    DEFAULT_DOT_SIZE_PX
}

fn default_label_y_offset() -> f64 {
    DEFAULT_LABEL_Y_OFFSET_PX
}

fn default_animate() -> bool {
    true
}

fn default_motion_stiffness() -> f64 {
    DEFAULT_STIFFNESS
}

fn default_motion_damping() -> f64 {
    DEFAULT_DAMPING
}
