use radar_dots::RadarError;
use radar_dots::core::{PointData, SeriesKey};
use radar_dots::render::Color;
use radar_dots::style::{LabelGenerator, LabelSource, ValueFormat};

fn point_data(value: Option<f64>) -> PointData {
    PointData {
        index: "bitter".to_owned(),
        key: SeriesKey::from("carmenere"),
        value,
        color: Color::parse("#f47560").expect("color"),
    }
}

fn format(pattern: &str, value: f64) -> String {
    ValueFormat::parse(pattern).expect(pattern).format(value)
}

#[test]
fn field_sources_read_point_attributes() {
    let data = point_data(Some(37.0));
    let label = |field: &str| {
        LabelGenerator::new(&LabelSource::field(field), None)
            .expect("generator")
            .label(&data)
    };

    assert_eq!(label("value").as_deref(), Some("37"));
    assert_eq!(label("key").as_deref(), Some("carmenere"));
    assert_eq!(label("index").as_deref(), Some("bitter"));
    assert_eq!(label("color").as_deref(), Some("#f47560"));
    assert_eq!(label("unknown"), None);
}

#[test]
fn missing_value_has_no_value_label() {
    let generator = LabelGenerator::new(&LabelSource::default(), Some(".2f")).expect("generator");
    assert_eq!(generator.label(&point_data(None)), None);
}

#[test]
fn format_applies_to_numeric_fields_only() {
    let data = point_data(Some(0.4567));

    let value = LabelGenerator::new(&LabelSource::field("value"), Some(".1%")).expect("value");
    assert_eq!(value.label(&data).as_deref(), Some("45.7%"));

    let key = LabelGenerator::new(&LabelSource::field("key"), Some(".1%")).expect("key");
    assert_eq!(key.label(&data).as_deref(), Some("carmenere"));
}

#[test]
fn formatter_source_receives_point_data() {
    let source = LabelSource::formatter(|data: &PointData| {
        format!("{}: {}", data.key, data.value.unwrap_or_default())
    });
    let generator = LabelGenerator::new(&source, Some(".2f")).expect("generator");
    assert_eq!(
        generator.label(&point_data(Some(12.5))).as_deref(),
        Some("carmenere: 12.5")
    );
}

#[test]
fn invalid_format_is_reported() {
    let err = LabelGenerator::new(&LabelSource::default(), Some(".2q")).expect_err("bad format");
    assert!(matches!(err, RadarError::InvalidLabelFormat { .. }));
}

#[test]
fn fixed_point_rounds_half_away_from_zero() {
    assert_eq!(format(".2f", 3.14159), "3.14");
    assert_eq!(format(".0f", 2.5), "3");
    assert_eq!(format("f", 1.5), "1.500000");
    assert_eq!(format(".1f", -7.25), "-7.3");
}

#[test]
fn negative_values_rounding_to_zero_drop_the_sign() {
    assert_eq!(format(".2f", -0.001), "0.00");
}

#[test]
fn integer_grouping_and_sign() {
    assert_eq!(format(",d", 1_234_567.8), "1,234,568");
    assert_eq!(format("+d", 42.0), "+42");
    assert_eq!(format(" d", 42.0), " 42");
    assert_eq!(format(",.2f", -9876.5), "-9,876.50");
}

#[test]
fn percent_and_exponent() {
    assert_eq!(format(".0%", 0.256), "26%");
    assert_eq!(format(".1e", 12_345.0), "1.2e+4");
    assert_eq!(format(".2e", 0.00123), "1.23e-3");
}

#[test]
fn exponent_rounds_ties_away_from_zero() {
    assert_eq!(format(".1e", 1.25), "1.3e+0");
    assert_eq!(format(".0e", 2.5), "3e+0");
    assert_eq!(format(".1e", -1.25), "-1.3e+0");
    assert_eq!(format(".1e", 9.96), "1.0e+1");
    assert_eq!(format(".1e", 0.0), "0.0e+0");
    assert_eq!(format(".2e", 1e-30), "1.00e-30");
}

#[test]
fn untyped_precision_switches_to_exponent_like_d3() {
    assert_eq!(format(".2", 1234.5), "1.2e+3");
    assert_eq!(format(".2", 99.6), "1e+2");
    assert_eq!(format(".3", 0.0000001234), "1.23e-7");
    assert_eq!(format(".3", 0.000001234), "0.00000123");
    assert_eq!(format(".4", 12.5), "12.5");
    assert_eq!(format(".2", 2.25), "2.3");
}

#[test]
fn trim_and_untyped_formats() {
    assert_eq!(format(".3~f", 1.5), "1.5");
    assert_eq!(format(".3~f", 2.0), "2");
    assert_eq!(format("", 10.0), "10");
    assert_eq!(format("", 0.25), "0.25");
    assert_eq!(format(".3", 0.123456), "0.123");
    assert_eq!(format(".2f", f64::NAN), "NaN");
}
