#[path = "../support.rs"]
mod support;

use super::*;
use support::{Op, RecordingCanvas};

fn instant() -> FadeConfig {
    FadeConfig {
        step_delay_ms: 0,
        ..FadeConfig::default()
    }
}

#[test]
fn default_ramp_matches_legacy_timing() {
    let c = FadeConfig::default();
    assert_eq!(c.steps, 35);
    assert_eq!(c.alpha_step, 1);
    assert_eq!(c.step_delay(), Duration::from_millis(15));
    assert_eq!(c.total_duration(), Duration::from_millis(525));
    assert_eq!(c.max_alpha(), 35);
}

#[test]
fn fade_in_yields_exactly_steps_frames_with_rising_alpha() {
    let frames: Vec<FadeFrame> = FadeIn::new(FadeConfig::default()).collect();
    assert_eq!(frames.len(), 35);
    assert_eq!(frames[0], FadeFrame { step: 1, alpha: 1 });
    assert_eq!(frames[34], FadeFrame { step: 35, alpha: 35 });
    assert!(frames.windows(2).all(|w| w[1].alpha == w[0].alpha + 1));
}

#[test]
fn alpha_saturates_at_opaque() {
    let config = FadeConfig {
        steps: 10,
        alpha_step: 40,
        step_delay_ms: 0,
    };
    let alphas: Vec<u8> = FadeIn::new(config).map(|f| f.alpha).collect();
    assert_eq!(alphas[5], 240);
    assert_eq!(alphas[6], 255);
    assert_eq!(alphas[9], 255);
}

#[test]
fn iterator_reports_remaining_length() {
    let mut fade = FadeIn::new(instant());
    assert_eq!(fade.len(), 35);
    assert_eq!(fade.current_alpha(), 0);
    fade.next();
    assert_eq!(fade.len(), 34);
    assert_eq!(fade.current_alpha(), 1);
}

#[test]
fn blocking_fade_blits_then_presents_every_step() {
    let mut canvas = RecordingCanvas::new(64, 64);
    let image = PreparedImage::solid(8, 8, [255, 255, 255, 255]);
    let dest = PixelRect::new(4, 4, 8, 8);

    fade_in_image(&mut canvas, &image, dest, &instant()).unwrap();

    assert_eq!(canvas.ops.len(), 70);
    for (i, pair) in canvas.ops.chunks(2).enumerate() {
        assert_eq!(
            pair[0],
            Op::Blit {
                dest,
                alpha: (i + 1) as u8,
                width: 8
            }
        );
        assert_eq!(pair[1], Op::Present);
    }
}

#[test]
fn invalid_config_is_rejected_before_drawing() {
    let mut canvas = RecordingCanvas::new(8, 8);
    let image = PreparedImage::solid(1, 1, [0, 0, 0, 255]);
    let config = FadeConfig {
        steps: 0,
        ..instant()
    };
    assert!(fade_in_image(&mut canvas, &image, PixelRect::default(), &config).is_err());
    assert!(canvas.ops.is_empty());
}

#[test]
fn config_deserializes_with_defaults() {
    let c: FadeConfig = serde_json::from_str(r#"{ "step_delay_ms": 5 }"#).unwrap();
    assert_eq!(c.steps, 35);
    assert_eq!(c.step_delay_ms, 5);
    assert!(serde_json::from_str::<FadeConfig>(r#"{ "bogus": 1 }"#).is_err());
}
