use std::collections::HashSet;
use std::f64::consts::{FRAC_PI_2, PI};

use approx::assert_abs_diff_eq;
use radar_dots::RadarError;
use radar_dots::core::{
    ColorByKey, Datum, IndexBy, LinearRadiusScale, RadarLayout, RadiusScale, SeriesKey,
    derive_points, position_from_angle,
};
use radar_dots::render::Color;
use radar_dots::style::{ColorModifier, InheritedColor, LabelSource, PointStyle, Theme};

fn wine_data() -> Vec<Datum> {
    vec![
        Datum::new()
            .with_text("taste", "fruity")
            .with_value("chardonnay", 93.0)
            .with_value("carmenere", 61.0)
            .with_value("syrah", 114.0),
        Datum::new()
            .with_text("taste", "bitter")
            .with_value("chardonnay", 91.0)
            .with_value("carmenere", 37.0)
            .with_value("syrah", 72.0),
        Datum::new()
            .with_text("taste", "heavy")
            .with_value("chardonnay", 56.0)
            .with_value("carmenere", 95.0)
            .with_value("syrah", 99.0),
        Datum::new()
            .with_text("taste", "strong")
            .with_value("chardonnay", 64.0)
            .with_value("carmenere", 90.0)
            .with_value("syrah", 30.0),
    ]
}

fn wine_keys() -> Vec<SeriesKey> {
    ["chardonnay", "carmenere", "syrah"]
        .into_iter()
        .map(SeriesKey::from)
        .collect()
}

fn wine_colors() -> ColorByKey {
    let mut colors = ColorByKey::new();
    colors.insert("chardonnay".into(), Color::parse("#e8c1a0").expect("color"));
    colors.insert("carmenere".into(), Color::parse("#f47560").expect("color"));
    colors.insert("syrah".into(), Color::parse("#f1e15b").expect("color"));
    colors
}

#[test]
fn derives_one_point_per_datum_and_key_in_data_then_key_order() {
    let data = wine_data();
    let keys = wine_keys();
    let colors = wine_colors();
    let index_by = IndexBy::field("taste");
    let scale = LinearRadiusScale::new(120.0, 200.0).expect("scale");
    let layout = RadarLayout::evenly_spaced(&data, &keys, &index_by, &colors, &scale);

    let points = derive_points(&layout, &PointStyle::inherited()).expect("points");

    assert_eq!(points.len(), data.len() * keys.len());
    let ids: Vec<&str> = points.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(
        &ids[..4],
        &[
            "chardonnay.fruity",
            "carmenere.fruity",
            "syrah.fruity",
            "chardonnay.bitter"
        ]
    );
    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(unique.len(), points.len());
}

#[test]
fn angle_depends_on_row_only() {
    let data = wine_data();
    let keys = wine_keys();
    let colors = wine_colors();
    let index_by = IndexBy::field("taste");
    let scale = LinearRadiusScale::new(120.0, 200.0).expect("scale");
    let layout = RadarLayout::evenly_spaced(&data, &keys, &index_by, &colors, &scale);

    let points = derive_points(&layout, &PointStyle::inherited()).expect("points");

    for point in &points {
        let expected = layout.angle_step * point.row as f64 - FRAC_PI_2;
        assert_eq!(point.angle, expected);
        let position = position_from_angle(point.angle, point.radius);
        assert_eq!(point.position, position);
    }
    assert_abs_diff_eq!(points[0].angle, -FRAC_PI_2);
    assert_abs_diff_eq!(points[3].angle, 0.0, epsilon = 1e-12);
}

#[test]
fn two_rows_half_turn_apart_with_identity_scale() {
    let data = vec![
        Datum::new().with_value("v", 10.0),
        Datum::new().with_value("v", 20.0),
    ];
    let keys = vec![SeriesKey::from("v")];
    let mut colors = ColorByKey::new();
    colors.insert("v".into(), Color::rgb(0.0, 0.0, 1.0));
    let index_by = IndexBy::field("category");
    let identity = |value: f64| value;
    let layout = RadarLayout {
        data: &data,
        keys: &keys,
        index_by: &index_by,
        color_by_key: &colors,
        radius_scale: &identity,
        angle_step: PI,
    };

    let points = derive_points(&layout, &PointStyle::inherited()).expect("points");

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].id, "v.0");
    assert_abs_diff_eq!(points[0].angle, -FRAC_PI_2);
    assert_eq!(points[0].radius, 10.0);
    assert_abs_diff_eq!(points[0].position.x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(points[0].position.y, -10.0, epsilon = 1e-9);

    assert_eq!(points[1].id, "v.1");
    assert_abs_diff_eq!(points[1].angle, FRAC_PI_2);
    assert_eq!(points[1].radius, 20.0);
    assert_abs_diff_eq!(points[1].position.x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(points[1].position.y, 20.0, epsilon = 1e-9);
}

#[test]
fn inherited_fill_matches_series_color_unmodified() {
    let data = wine_data();
    let keys = wine_keys();
    let colors = wine_colors();
    let index_by = IndexBy::field("taste");
    let scale = LinearRadiusScale::new(120.0, 200.0).expect("scale");
    let layout = RadarLayout::evenly_spaced(&data, &keys, &index_by, &colors, &scale);

    let points = derive_points(&layout, &PointStyle::inherited()).expect("points");
    for point in &points {
        assert_eq!(point.fill, colors[&point.data.key]);
        assert_eq!(point.stroke, colors[&point.data.key]);
        assert!(point.label.is_none());
    }
}

#[test]
fn fixed_and_modified_colors_resolve_per_point() {
    let data = wine_data();
    let keys = wine_keys();
    let colors = wine_colors();
    let index_by = IndexBy::field("taste");
    let scale = LinearRadiusScale::new(120.0, 200.0).expect("scale");
    let layout = RadarLayout::evenly_spaced(&data, &keys, &index_by, &colors, &scale);

    let style = PointStyle::new(
        &InheritedColor::Fixed(Color::rgb(1.0, 1.0, 1.0)),
        &InheritedColor::from_point_with(vec![ColorModifier::Darker(1.0)]),
        None,
        &Theme::default(),
    )
    .expect("style");
    let points = derive_points(&layout, &style).expect("points");

    for point in &points {
        let base = colors[&point.data.key];
        assert_eq!(point.fill, Color::rgb(1.0, 1.0, 1.0));
        assert_abs_diff_eq!(point.stroke.red, base.red * 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(point.stroke.green, base.green * 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(point.stroke.blue, base.blue * 0.7, epsilon = 1e-12);
    }
}

#[test]
fn labels_resolve_only_when_enabled() {
    let data = wine_data();
    let keys = wine_keys();
    let colors = wine_colors();
    let index_by = IndexBy::field("taste");
    let scale = LinearRadiusScale::new(120.0, 200.0).expect("scale");
    let layout = RadarLayout::evenly_spaced(&data, &keys, &index_by, &colors, &scale);

    let source = LabelSource::default();
    let style = PointStyle::new(
        &InheritedColor::from_point(),
        &InheritedColor::from_point(),
        Some((&source, Some(".1f"))),
        &Theme::default(),
    )
    .expect("style");
    let points = derive_points(&layout, &style).expect("points");

    assert_eq!(points[0].label.as_deref(), Some("93.0"));
    assert_eq!(points[1].label.as_deref(), Some("61.0"));
}

#[test]
fn missing_value_yields_point_on_origin() {
    let data = vec![
        Datum::new().with_text("axis", "a").with_value("x", 5.0),
        Datum::new().with_text("axis", "b"),
    ];
    let keys = vec![SeriesKey::from("x")];
    let mut colors = ColorByKey::new();
    colors.insert("x".into(), Color::rgb(0.5, 0.5, 0.5));
    let index_by = IndexBy::field("axis");
    let scale = |value: f64| value * 2.0;
    let layout = RadarLayout::evenly_spaced(&data, &keys, &index_by, &colors, &scale);

    let points = derive_points(&layout, &PointStyle::inherited()).expect("points");

    assert_eq!(points.len(), 2);
    assert_eq!(points[1].id, "x.b");
    assert_eq!(points[1].data.value, None);
    assert_eq!(points[1].radius, 0.0);
    assert_eq!(points[1].position.x, 0.0);
    assert_eq!(points[1].position.y, 0.0);
}

#[test]
fn duplicate_category_index_is_rejected() {
    let data = vec![
        Datum::new().with_text("axis", "same").with_value("x", 1.0),
        Datum::new().with_text("axis", "same").with_value("x", 2.0),
    ];
    let keys = vec![SeriesKey::from("x")];
    let mut colors = ColorByKey::new();
    colors.insert("x".into(), Color::rgb(0.5, 0.5, 0.5));
    let index_by = IndexBy::field("axis");
    let scale = |value: f64| value;
    let layout = RadarLayout::evenly_spaced(&data, &keys, &index_by, &colors, &scale);

    let err = derive_points(&layout, &PointStyle::inherited()).expect_err("duplicate");
    assert!(matches!(err, RadarError::DuplicatePointKey(id) if id == "x.same"));
}

#[test]
fn non_finite_radius_is_rejected() {
    let data = vec![Datum::new().with_value("x", 1.0)];
    let keys = vec![SeriesKey::from("x")];
    let mut colors = ColorByKey::new();
    colors.insert("x".into(), Color::rgb(0.5, 0.5, 0.5));
    let index_by = IndexBy::field("axis");
    let scale = |_: f64| f64::INFINITY;
    let layout = RadarLayout::evenly_spaced(&data, &keys, &index_by, &colors, &scale);

    assert!(derive_points(&layout, &PointStyle::inherited()).is_err());
}

#[test]
fn accessor_index_by_drives_identity() {
    let data = vec![
        Datum::new().with_value("x", 1.0).with_value("rank", 7.0),
        Datum::new().with_value("x", 2.0).with_value("rank", 9.0),
    ];
    let keys = vec![SeriesKey::from("x")];
    let mut colors = ColorByKey::new();
    colors.insert("x".into(), Color::rgb(0.5, 0.5, 0.5));
    let index_by = IndexBy::accessor(|datum| {
        let rank = datum.value(&SeriesKey::from("rank")).unwrap_or_default();
        format!("rank-{rank}")
    });
    let scale = |value: f64| value;
    let layout = RadarLayout::evenly_spaced(&data, &keys, &index_by, &colors, &scale);

    let points = derive_points(&layout, &PointStyle::inherited()).expect("points");
    assert_eq!(points[0].id, "x.rank-7");
    assert_eq!(points[1].id, "x.rank-9");
}

#[test]
fn linear_radius_scale_maps_domain_onto_range() {
    let scale = LinearRadiusScale::new(120.0, 240.0).expect("scale");
    assert_eq!(scale.radius(0.0), 0.0);
    assert_eq!(scale.radius(60.0), 120.0);
    assert_eq!(scale.radius(120.0), 240.0);
    assert_eq!(scale.value_at(120.0), 60.0);
    assert!(LinearRadiusScale::new(0.0, 10.0).is_err());
    assert!(LinearRadiusScale::new(10.0, -1.0).is_err());
}

#[test]
fn data_rows_deserialize_from_flat_json_objects() {
    let data: Vec<Datum> = serde_json::from_str(
        r#"[{"taste": "fruity", "chardonnay": 93, "carmenere": 61.5}]"#,
    )
    .expect("data json");

    assert_eq!(data[0].value(&SeriesKey::from("chardonnay")), Some(93.0));
    assert_eq!(data[0].value(&SeriesKey::from("carmenere")), Some(61.5));
    assert_eq!(data[0].value(&SeriesKey::from("taste")), None);
    assert_eq!(IndexBy::field("taste").index_of(&data[0], 0), "fruity");
}

#[test]
fn null_and_boolean_fields_load_as_missing_values() {
    let data: Vec<Datum> = serde_json::from_str(
        r#"[
            {"taste": "fruity", "chardonnay": null, "syrah": 10},
            {"taste": null, "chardonnay": true, "syrah": 20}
        ]"#,
    )
    .expect("data json");
    let keys = vec![SeriesKey::from("chardonnay"), SeriesKey::from("syrah")];
    let colors = wine_colors();
    let index_by = IndexBy::field("taste");
    let scale = |value: f64| value;
    let layout = RadarLayout::evenly_spaced(&data, &keys, &index_by, &colors, &scale);

    let points = derive_points(&layout, &PointStyle::inherited()).expect("points");

    assert_eq!(points.len(), 4);
    assert_eq!(points[0].id, "chardonnay.fruity");
    assert_eq!(points[0].data.value, None);
    assert_eq!((points[0].position.x, points[0].position.y), (0.0, 0.0));
    assert_eq!(points[1].data.value, Some(10.0));
    assert_eq!(points[2].id, "chardonnay.1");
    assert_eq!(points[2].data.value, None);
    assert_eq!(points[3].data.value, Some(20.0));
}
