use super::*;

const SAMPLE: &str = r##"{
    "width": 800,
    "height": 600,
    "title": "Legend",
    "background": "#101018",
    "fonts": {
        "latin": { "path": "fonts/latin.ttf", "size": 24 },
        "cjk": { "path": "/abs/cjk.ttf", "size": 26.5 }
    }
}"##;

#[test]
fn sample_config_parses_and_validates() {
    let config = UiConfig::from_json_str(SAMPLE).unwrap();
    config.validate().unwrap();
    assert_eq!(config.canvas_size().unwrap(), CanvasSize::new(800, 600).unwrap());
    assert_eq!(config.title.as_deref(), Some("Legend"));
    assert_eq!(config.background, Rgb8::new(0x10, 0x10, 0x18));
    assert_eq!(config.fade, FadeConfig::default());
    assert_eq!(config.font_entry(ScriptClass::Cjk).unwrap().size, 26.5);
}

#[test]
fn relative_font_paths_resolve_against_base() {
    let mut config = UiConfig::from_json_str(SAMPLE).unwrap();
    config.resolve_relative_paths(Path::new("/game"));
    assert_eq!(
        config.font_entry(ScriptClass::Latin).unwrap().path,
        PathBuf::from("/game/fonts/latin.ttf")
    );
    assert_eq!(
        config.font_entry(ScriptClass::Cjk).unwrap().path,
        PathBuf::from("/abs/cjk.ttf")
    );
}

#[test]
fn missing_script_entry_fails_validation() {
    let config = UiConfig::from_json_str(
        r#"{ "width": 10, "height": 10, "fonts": { "latin": { "path": "a.ttf", "size": 12 } } }"#,
    )
    .unwrap();
    let err = config.validate().unwrap_err();
    assert!(matches!(err, LegendError::Config(_)));
    assert!(err.to_string().contains("cjk"), "{err}");
}

#[test]
fn bad_values_fail_validation() {
    let mut config = UiConfig::from_json_str(SAMPLE).unwrap();
    config.width = 0;
    assert!(config.validate().is_err());

    let mut config = UiConfig::from_json_str(SAMPLE).unwrap();
    config.fonts.get_mut("latin").unwrap().size = 0.0;
    assert!(config.validate().is_err());

    let mut config = UiConfig::from_json_str(SAMPLE).unwrap();
    config.fonts.insert(
        "greek".to_string(),
        FontEntry {
            path: PathBuf::from("g.ttf"),
            size: 12.0,
        },
    );
    assert!(config.validate().is_err());

    let mut config = UiConfig::from_json_str(SAMPLE).unwrap();
    config.fade.steps = 0;
    assert!(config.validate().is_err());
}

#[test]
fn unknown_fields_and_bad_json_are_config_errors() {
    assert!(matches!(
        UiConfig::from_json_str(r#"{ "width": 1 }"#),
        Err(LegendError::Config(_))
    ));
    assert!(UiConfig::from_json_str(&SAMPLE.replace("\"title\"", "\"tilte\"")).is_err());
}

#[test]
fn missing_font_file_is_fatal() {
    let config = UiConfig::from_json_str(SAMPLE).unwrap();
    let err = config.load_fonts().unwrap_err();
    assert!(matches!(err, LegendError::Font(_)), "{err}");
    assert!(err.to_string().contains("latin"), "{err}");
}
