use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, TAU};

use crate::error::{RadarError, RadarResult};
use crate::render::{Color, DotPrimitive, RenderFrame, Renderer, SymbolShape, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub dots_drawn: usize,
    pub texts_drawn: usize,
}

/// Renderers that can draw into an external Cairo context, for example a
/// GTK `DrawingArea` callback.
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> RadarResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Renders offscreen through `Renderer::render`, or in place on an external
/// context through `CairoContextRenderer`. Only the offscreen path paints the
/// clear color; an external context keeps whatever the host already drew.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> RadarResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(RadarError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgba(1.0, 1.0, 1.0, 0.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> RadarResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
        clear: bool,
    ) -> RadarResult<()> {
        frame.validate()?;

        if clear {
            apply_color(context, self.clear_color);
            context
                .paint()
                .map_err(|err| map_backend_error("failed to clear surface", err))?;
        }

        context
            .save()
            .map_err(|err| map_backend_error("failed to save context", err))?;
        context.translate(frame.origin.x, frame.origin.y);
        let drawn = draw_frame(context, frame);
        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context", err))?;

        self.last_stats = drawn?;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> RadarResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame, true)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> RadarResult<()> {
        self.render_with_context(context, frame, false)
    }
}

fn draw_frame(context: &Context, frame: &RenderFrame) -> RadarResult<CairoRenderStats> {
    let mut stats = CairoRenderStats::default();
    for dot in &frame.dots {
        draw_dot(context, dot)?;
        stats.dots_drawn += 1;
    }

    for text in &frame.texts {
        let layout = pangocairo::functions::create_layout(context);
        let font_description = FontDescription::from_string(&format!("Sans {}", text.font_size_px));
        layout.set_font_description(Some(&font_description));
        layout.set_text(&text.text);

        let (text_width, text_height) = layout.pixel_size();
        let x = match text.h_align {
            TextHAlign::Left => text.x,
            TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
            TextHAlign::Right => text.x - f64::from(text_width),
        };

        apply_color(context, text.color);
        // Labels are vertically centered on their anchor.
        context.move_to(x, text.y - f64::from(text_height) / 2.0);
        pangocairo::functions::show_layout(context, &layout);
        stats.texts_drawn += 1;
    }
    Ok(stats)
}

fn draw_dot(context: &Context, dot: &DotPrimitive) -> RadarResult<()> {
    if dot.size <= 0.0 {
        return Ok(());
    }

    append_symbol_path(context, dot);
    apply_color(context, dot.fill_color);
    if dot.border_width > 0.0 {
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill dot", err))?;
        apply_color(context, dot.border_color);
        context.set_line_width(dot.border_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke dot border", err))?;
    } else {
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill dot", err))?;
    }
    Ok(())
}

fn append_symbol_path(context: &Context, dot: &DotPrimitive) {
    let half = dot.size / 2.0;
    context.new_path();
    match dot.symbol {
        SymbolShape::Circle => {
            context.arc(dot.x, dot.y, half, 0.0, TAU);
        }
        SymbolShape::Square => {
            context.rectangle(dot.x - half, dot.y - half, dot.size, dot.size);
        }
        SymbolShape::Diamond => {
            context.move_to(dot.x, dot.y - half);
            context.line_to(dot.x + half, dot.y);
            context.line_to(dot.x, dot.y + half);
            context.line_to(dot.x - half, dot.y);
            context.close_path();
        }
        SymbolShape::Triangle => {
            for corner in 0..3_u8 {
                let angle = -FRAC_PI_2 + f64::from(corner) * TAU / 3.0;
                let (x, y) = (dot.x + half * angle.cos(), dot.y + half * angle.sin());
                if corner == 0 {
                    context.move_to(x, y);
                } else {
                    context.line_to(x, y);
                }
            }
            context.close_path();
        }
    }
}

fn apply_color(context: &Context, color: Color) {
    let [red, green, blue, alpha] =
        [color.red, color.green, color.blue, color.alpha].map(|channel| channel.clamp(0.0, 1.0));
    context.set_source_rgba(red, green, blue, alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> RadarError {
    RadarError::InvalidData(format!("{prefix}: {err}"))
}
