#[path = "support.rs"]
mod support;

use super::*;
use crate::{
    assets::font::FontSet, effects::fade::FadeConfig, text::script::ScriptClass,
};
use support::{FixedFace, Op, RecordingCanvas};

fn ui() -> Ui<RecordingCanvas> {
    let fonts = FontSet::new()
        .with_face(ScriptClass::Latin, FixedFace::new(10))
        .with_face(ScriptClass::Cjk, FixedFace::new(20));
    let fade = FadeConfig {
        step_delay_ms: 0,
        ..FadeConfig::default()
    };
    Ui::from_parts(RecordingCanvas::new(800, 600), fonts, fade).unwrap()
}

const SCENE: &str = r##"{
    "commands": [
        { "op": "set_title", "title": "Legend" },
        { "op": "draw_centered_text", "text": "序章", "y": 40, "color": "#ffffff" },
        { "op": "draw_text", "text": "Kam Yung 金庸", "x": 10, "y": 80, "color": 16711680 },
        { "op": "show_image", "path": "missing.png", "flags": { "centered": true } },
        { "op": "present" }
    ]
}"##;

#[test]
fn scene_parses_all_command_kinds() {
    let script = Script::from_json_str(SCENE).unwrap();
    assert_eq!(script.commands.len(), 5);
    assert_eq!(
        script.commands[2],
        Command::DrawText {
            text: "Kam Yung 金庸".to_string(),
            x: 10,
            y: 80,
            color: Rgb8::new(255, 0, 0),
        }
    );
    assert!(matches!(
        &script.commands[3],
        Command::ShowImage { flags, .. } if flags.centered && !flags.fade_in
    ));
}

#[test]
fn run_executes_in_order_and_tolerates_missing_images() {
    let script = Script::from_json_str(SCENE).unwrap();
    let mut ui = ui();
    let report = run_script(&mut ui, &script, Path::new("/nonexistent")).unwrap();

    assert_eq!(report.executed, 5);
    assert_eq!(report.images_shown, 0);
    assert_eq!(
        report.images_failed,
        vec![PathBuf::from("/nonexistent/missing.png")]
    );
    assert_eq!(ui.title(), "Legend");
    // Centered title (1 run) + mixed line (2 runs), then the final present.
    assert_eq!(ui.canvas().blits().len(), 3);
    assert_eq!(ui.canvas().ops.last(), Some(&Op::Present));
}

#[test]
fn unknown_or_incomplete_ops_are_rejected() {
    assert!(Script::from_json_str(r#"{ "commands": [ { "op": "explode" } ] }"#).is_err());
    assert!(Script::from_json_str(r#"{ "commands": [ { "op": "draw_text" } ] }"#).is_err());
}
