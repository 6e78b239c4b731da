use super::*;

#[test]
fn value_drops_exactly_one_space_after_equals() {
    assert_eq!(value_of("name = Star"), Some("Star"));
    assert_eq!(value_of("name=Star"), Some("Star"));
    assert_eq!(value_of("name =  two"), Some(" two"));
    assert_eq!(value_of("DRAWING_INFO_START"), None);
}

#[test]
fn info_keys_match_by_prefix() {
    let mut info = DrawingMetadata::default();
    apply_info_line("name = Sailboat", &mut info);
    apply_info_line("width = 120.5", &mut info);
    apply_info_line("heightInCm = 80", &mut info);
    apply_info_line("pointsCount = 42", &mut info);
    apply_info_line("author = nobody", &mut info);

    assert_eq!(info.name, "Sailboat");
    assert_eq!(info.width, 120.5);
    assert_eq!(info.height, 80.0);
    assert_eq!(info.point_count, 42);
}

#[test]
fn info_keys_are_case_sensitive() {
    let mut info = DrawingMetadata::default();
    apply_info_line("Width = 3", &mut info);
    assert_eq!(info.width, 0.0);
}

#[test]
fn long_names_are_truncated() {
    let mut info = DrawingMetadata::default();
    apply_info_line("name = a-very-long-drawing-name-indeed", &mut info);
    assert_eq!(info.name, "a-very-long-drawing");
    assert_eq!(info.name.chars().count(), crate::drawing::model::MAX_NAME_LEN);
}

#[test]
fn negative_point_count_clamps_to_zero() {
    let mut info = DrawingMetadata::default();
    apply_info_line("pointsCount = -4", &mut info);
    assert_eq!(info.point_count, 0);
}

#[test]
fn settings_keys_fill_their_fields() {
    let mut settings = DrawingSettings::default();
    apply_settings_line("followAngularVelocityScale = 3", &mut settings);
    apply_settings_line("curveTightness = 50", &mut settings);

    assert_eq!(settings.follow_angular_velocity_scale, 3.0);
    assert!(settings.follow_velocity.is_nan());
    assert_eq!(settings.curve_tightness, 50.0);
}

#[test]
fn lenient_numbers_take_the_numeric_prefix() {
    assert_eq!(lenient_f64("12.5"), (12.5, true));
    assert_eq!(lenient_f64("  -3"), (-3.0, true));
    assert_eq!(lenient_f64("12abc"), (12.0, true));
    assert_eq!(lenient_f64(".5"), (0.5, true));
    assert_eq!(lenient_f64("1e3"), (1000.0, true));
    assert_eq!(lenient_f64("2e"), (2.0, true));
    assert_eq!(lenient_f64("abc"), (0.0, false));
    assert_eq!(lenient_f64("-"), (0.0, false));
    assert_eq!(lenient_f64(""), (0.0, false));

    assert_eq!(lenient_i64("42"), 42);
    assert_eq!(lenient_i64("17.9"), 17);
    assert_eq!(lenient_i64("x"), 0);
}

#[test]
fn full_point_line_decodes() {
    let mut warnings = Vec::new();
    let p = decode_point("10.5 -2 RED true", 7, &Waypoint::default(), &mut warnings);
    assert_eq!(p, Waypoint::new(10.5, -2.0, PenColor::Red, true));
    assert!(warnings.is_empty());
}

#[test]
fn repeated_spaces_collapse_and_extra_tokens_are_ignored() {
    let mut warnings = Vec::new();
    let p = decode_point("1  2 BLUE false trailing", 1, &Waypoint::default(), &mut warnings);
    assert_eq!(p, Waypoint::new(1.0, 2.0, PenColor::Blue, false));
    assert!(warnings.is_empty());
}

#[test]
fn boundary_flag_is_literal_true_only() {
    let mut warnings = Vec::new();
    let p = decode_point("0 0 BLACK TRUE", 1, &Waypoint::default(), &mut warnings);
    assert!(!p.is_boundary);
}

#[test]
fn short_line_keeps_prior_fields_and_warns() {
    let prior = Waypoint::new(4.0, 5.0, PenColor::Green, true);
    let mut warnings = Vec::new();
    let p = decode_point("8", 12, &prior, &mut warnings);

    assert_eq!(p, Waypoint::new(8.0, 5.0, PenColor::Green, true));
    assert_eq!(
        warnings,
        vec![DecodeWarning::MissingFields { line: 12, found: 1 }]
    );
}

#[test]
fn bad_coordinates_default_to_zero_and_warn() {
    let mut warnings = Vec::new();
    let p = decode_point("oops 3 BLACK false", 2, &Waypoint::default(), &mut warnings);

    assert_eq!(p.position.x, 0.0);
    assert_eq!(p.position.y, 3.0);
    assert_eq!(warnings.len(), 1);
    assert!(matches!(warnings[0], DecodeWarning::BadNumber { line: 2, .. }));
}
