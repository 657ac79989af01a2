use std::time::Duration;

use tracing::debug;

use crate::core::{Position, RadarLayout, RadarPoint, Viewport, derive_points};
use crate::error::{RadarError, RadarResult};
use crate::motion::{DotTarget, DotsTransition};
#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;
use crate::render::{DotPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive};
use crate::style::Theme;

use super::RadarDotsConfig;

/// Radar chart dots layer.
///
/// Each `update` derives one point per (datum, key) pair. With animation off
/// the next frame shows the points at their final position; with animation
/// on, points become keyed spring targets and every `tick` renders the
/// interpolated state.
pub struct RadarDots<R: Renderer> {
    renderer: R,
    config: RadarDotsConfig,
    theme: Theme,
    viewport: Viewport,
    origin: Position,
    points: Vec<RadarPoint>,
    transition: DotsTransition,
}

impl<R: Renderer> RadarDots<R> {
    /// Creates the layer with its origin at the viewport center.
    pub fn new(
        renderer: R,
        config: RadarDotsConfig,
        theme: Theme,
        viewport: Viewport,
    ) -> RadarResult<Self> {
        if !viewport.is_valid() {
            return Err(RadarError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        theme.validate()?;
        config.validate(&theme)?;

        let transition = DotsTransition::new(
            config.motion.spring(),
            config.motion.enter,
            config.motion.leave,
        );
        Ok(Self {
            renderer,
            config,
            theme,
            viewport,
            origin: viewport.center(),
            points: Vec::new(),
            transition,
        })
    }

    #[must_use]
    pub fn config(&self) -> &RadarDotsConfig {
        &self.config
    }

    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn origin(&self) -> Position {
        self.origin
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Points derived by the latest `update`.
    #[must_use]
    pub fn points(&self) -> &[RadarPoint] {
        &self.points
    }

    #[must_use]
    pub fn transition(&self) -> &DotsTransition {
        &self.transition
    }

    pub fn set_origin(&mut self, origin: Position) -> RadarResult<()> {
        if !origin.x.is_finite() || !origin.y.is_finite() {
            return Err(RadarError::InvalidData("origin must be finite".to_owned()));
        }
        self.origin = origin;
        Ok(())
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> RadarResult<()> {
        if !viewport.is_valid() {
            return Err(RadarError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        self.origin = viewport.center();
        Ok(())
    }

    /// Replaces the config. Style changes show up on the next `update`;
    /// spring tuning applies to dots already in flight.
    pub fn set_config(&mut self, config: RadarDotsConfig) -> RadarResult<()> {
        config.validate(&self.theme)?;

        let was_animated = self.config.motion.animate;
        self.transition.set_spring_config(config.motion.spring());
        self.transition
            .set_policies(config.motion.enter, config.motion.leave);
        self.config = config;

        match (was_animated, self.config.motion.animate) {
            (true, false) => {
                debug!("animation disabled, dropping transition state");
                self.transition.clear();
            }
            (false, true) => {
                debug!("animation enabled, seeding transition from static points");
                self.seed_transition();
            }
            _ => {}
        }
        Ok(())
    }

    /// Replaces the theme. Takes effect on the next `update`.
    pub fn set_theme(&mut self, theme: Theme) -> RadarResult<()> {
        theme.validate()?;
        self.config.validate(&theme)?;
        self.theme = theme;
        Ok(())
    }

    /// Runs one render pass over the layout inputs.
    ///
    /// In animated mode the derived points become transition targets and the
    /// transition is started; call `tick` from the host frame loop.
    pub fn update(&mut self, layout: &RadarLayout<'_>) -> RadarResult<()> {
        let style = self.config.point_style(&self.theme)?;
        self.points = derive_points(layout, &style)?;

        if self.config.motion.animate {
            let targets = self.dot_targets();
            self.transition.set_targets(targets);
            self.transition.start();
        }
        Ok(())
    }

    /// Advances the animation by `elapsed` and renders the interpolated frame.
    ///
    /// Returns `true` while dots are still moving. A no-op in static mode.
    pub fn tick(&mut self, elapsed: Duration) -> RadarResult<bool> {
        if !self.config.motion.animate {
            return Ok(false);
        }
        let running = self.transition.tick(elapsed);
        self.render()?;
        Ok(running)
    }

    pub fn start_animation(&mut self) {
        if self.config.motion.animate {
            self.transition.start();
        }
    }

    /// Jumps every animated dot to its target and stops ticking.
    pub fn cancel_animation(&mut self) {
        self.transition.cancel();
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.config.motion.animate && self.transition.is_running()
    }

    /// Materializes the current dots into a frame.
    #[must_use]
    pub fn build_frame(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport, self.origin);

        if self.config.motion.animate {
            for dot in self.transition.dots() {
                // Springs overshoot; a shrinking dot may dip below zero size.
                let size = dot.size.max(0.0);
                self.push_dot(&mut frame, dot.point, Position::new(dot.x, dot.y), size);
            }
        } else {
            for point in &self.points {
                self.push_dot(&mut frame, point, point.position, self.config.size);
            }
        }
        frame
    }

    pub fn render(&mut self) -> RadarResult<()> {
        let frame = self.build_frame();
        self.renderer.render(&frame)
    }

    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> RadarResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_frame();
        self.renderer.render_on_cairo_context(context, &frame)
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Current frame as pretty JSON, for diagnostics and snapshot tests.
    pub fn snapshot_json(&self) -> RadarResult<String> {
        serde_json::to_string_pretty(&self.build_frame())
            .map_err(|err| RadarError::InvalidData(format!("failed to serialize frame: {err}")))
    }

    fn push_dot(&self, frame: &mut RenderFrame, point: &RadarPoint, at: Position, size: f64) {
        frame.dots.push(DotPrimitive {
            key: point.id.clone(),
            x: at.x,
            y: at.y,
            size,
            symbol: self.config.symbol,
            fill_color: point.fill,
            border_width: self.config.border_width,
            border_color: point.stroke,
        });

        if let Some(label) = point.label.as_deref().filter(|label| !label.is_empty()) {
            let text = self.theme.dots.text;
            frame.texts.push(TextPrimitive::new(
                label,
                at.x,
                at.y + self.config.label_y_offset,
                text.font_size,
                text.fill,
                TextHAlign::Center,
            ));
        }
    }

    fn dot_targets(&self) -> Vec<DotTarget> {
        self.points
            .iter()
            .map(|point| DotTarget {
                point: point.clone(),
                size: self.config.size,
            })
            .collect()
    }

    fn seed_transition(&mut self) {
        let targets = self.dot_targets();
        self.transition.clear();
        self.transition.set_targets(targets);
        self.transition.cancel();
    }
}
