#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use radar_dots::RadarError;
use radar_dots::api::{RadarDots, RadarDotsConfig};
use radar_dots::core::{ColorByKey, Datum, IndexBy, LinearRadiusScale, RadarLayout, SeriesKey, Viewport};
use radar_dots::render::{CairoRenderer, Color, SymbolShape};
use radar_dots::style::{LabelSource, Theme};

fn layout_inputs() -> (Vec<Datum>, Vec<SeriesKey>, ColorByKey) {
    let data = vec![
        Datum::new().with_text("axis", "x").with_value("a", 20.0),
        Datum::new().with_text("axis", "y").with_value("a", 60.0),
        Datum::new().with_text("axis", "z").with_value("a", 90.0),
    ];
    let mut colors = ColorByKey::new();
    colors.insert("a".into(), Color::parse("#f47560").expect("color"));
    (data, vec![SeriesKey::from("a")], colors)
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, RadarError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_dots_and_labels() {
    let (data, keys, colors) = layout_inputs();
    let index_by = IndexBy::field("axis");
    let scale = LinearRadiusScale::new(100.0, 200.0).expect("scale");
    let config = RadarDotsConfig::default()
        .with_animate(false)
        .with_symbol(SymbolShape::Triangle)
        .with_label(LabelSource::default());
    let mut dots = RadarDots::new(
        CairoRenderer::new(500, 500).expect("renderer"),
        config,
        Theme::default(),
        Viewport::new(500, 500),
    )
    .expect("dots init");

    dots.update(&RadarLayout::evenly_spaced(&data, &keys, &index_by, &colors, &scale))
        .expect("update");
    dots.render().expect("render");

    let stats = dots.into_renderer().last_stats();
    assert_eq!(stats.dots_drawn, 3);
    assert_eq!(stats.texts_drawn, 3);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let (data, keys, colors) = layout_inputs();
    let index_by = IndexBy::field("axis");
    let scale = LinearRadiusScale::new(100.0, 120.0).expect("scale");
    let mut dots = RadarDots::new(
        CairoRenderer::new(320, 320).expect("renderer"),
        RadarDotsConfig::default().with_animate(false),
        Theme::default(),
        Viewport::new(320, 320),
    )
    .expect("dots init");
    dots.update(&RadarLayout::evenly_spaced(&data, &keys, &index_by, &colors, &scale))
        .expect("update");

    let surface = ImageSurface::create(Format::ARgb32, 320, 320).expect("surface");
    let context = Context::new(&surface).expect("context");
    dots.render_on_cairo_context(&context)
        .expect("render on context");

    assert_eq!(dots.renderer().last_stats().dots_drawn, 3);
    assert_eq!(dots.renderer().last_stats().texts_drawn, 0);
}

#[test]
fn external_context_keeps_host_drawing_and_transform() {
    let (data, keys, colors) = layout_inputs();
    let index_by = IndexBy::field("axis");
    let scale = LinearRadiusScale::new(100.0, 100.0).expect("scale");
    let mut renderer = CairoRenderer::new(240, 240).expect("renderer");
    renderer
        .set_clear_color(Color::rgb(1.0, 1.0, 1.0))
        .expect("clear color");
    let mut dots = RadarDots::new(
        renderer,
        RadarDotsConfig::default().with_animate(false),
        Theme::default(),
        Viewport::new(240, 240),
    )
    .expect("dots init");
    dots.update(&RadarLayout::evenly_spaced(&data, &keys, &index_by, &colors, &scale))
        .expect("update");

    let mut surface = ImageSurface::create(Format::ARgb32, 240, 240).expect("surface");
    {
        let context = Context::new(&surface).expect("context");
        context.set_source_rgb(1.0, 0.0, 0.0);
        context.paint().expect("host background");

        dots.render_on_cairo_context(&context)
            .expect("render on context");
        assert_eq!(context.user_to_device(0.0, 0.0), (0.0, 0.0));
    }

    surface.flush();
    let pixels = surface.data().expect("surface data");
    let corner = u32::from_ne_bytes([pixels[0], pixels[1], pixels[2], pixels[3]]);
    assert_eq!(corner, 0xffff_0000);
}
