use super::*;

#[test]
fn defaults_match_the_robot() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.precision, 1.0);
    assert_eq!(cfg.pencil.lift_channel, ServoChannel(1));
    assert_eq!(cfg.pencil.color_channel, ServoChannel(2));
    assert_eq!(cfg.pencil.up_angle_deg, 83.0);
    assert_eq!(cfg.pencil.down_angle_deg, 100.0);
    assert_eq!(cfg.pencil.rest_color, PenColor::Black);
    cfg.validate().unwrap();
}

#[test]
fn partial_json_fills_in_defaults() {
    let cfg = EngineConfig::from_json_str(r#"{ "precision": 0.4, "pencil": { "step_time_ms": 150 } }"#)
        .unwrap();
    assert_eq!(cfg.precision, 0.4);
    assert_eq!(cfg.pencil.step_time_ms, 150);
    assert_eq!(cfg.pencil.degrees_per_step, 40.0);
}

#[test]
fn rest_color_uses_wire_names() {
    let cfg = EngineConfig::from_json_str(r#"{ "pencil": { "rest_color": "GREEN" } }"#).unwrap();
    assert_eq!(cfg.pencil.rest_color, PenColor::Green);
}

#[test]
fn invalid_values_are_rejected() {
    let err = EngineConfig::from_json_str(r#"{ "precision": 0 }"#).unwrap_err();
    assert!(matches!(err, PlotError::Config(_)));

    let err = EngineConfig::from_json_str(r#"{ "pencil": { "degrees_per_step": -1 } }"#)
        .unwrap_err();
    assert!(err.to_string().contains("degrees_per_step"));

    let err = EngineConfig::from_json_str(r#"{ "pencil": { "lift_channel": 2 } }"#).unwrap_err();
    assert!(err.to_string().contains("different channels"));

    let err = EngineConfig::from_json_str("not json").unwrap_err();
    assert!(err.to_string().contains("invalid config JSON"));
}

#[test]
fn load_json_reports_missing_files() {
    let err = EngineConfig::load_json(Path::new("target/no-such-config.json")).unwrap_err();
    assert!(matches!(err, PlotError::Other(_)));
    assert!(err.to_string().contains("read config"));
}
