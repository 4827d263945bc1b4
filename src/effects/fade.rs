use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    assets::decode::PreparedImage,
    foundation::{
        core::PixelRect,
        error::{LegendError, LegendResult},
    },
    render::canvas::Canvas,
};

/// Fixed-step alpha ramp parameters.
///
/// Blits accumulate on the canvas, so even the small default peak alpha ends close to opaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FadeConfig {
    pub steps: u32,
    pub alpha_step: u8,
    pub step_delay_ms: u64,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            steps: 35,
            alpha_step: 1,
            step_delay_ms: 15,
        }
    }
}

impl FadeConfig {
    pub fn validate(&self) -> LegendResult<()> {
        if self.steps == 0 {
            return Err(LegendError::validation("fade steps must be > 0"));
        }
        if self.alpha_step == 0 {
            return Err(LegendError::validation("fade alpha_step must be > 0"));
        }
        Ok(())
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    /// Alpha reached on the last step.
    pub fn max_alpha(&self) -> u8 {
        alpha_at(self, self.steps)
    }

    /// Time the blocking ramp holds the thread.
    pub fn total_duration(&self) -> Duration {
        self.step_delay().saturating_mul(self.steps)
    }
}

fn alpha_at(config: &FadeConfig, step: u32) -> u8 {
    step.saturating_mul(u32::from(config.alpha_step))
        .min(u32::from(u8::MAX)) as u8
}

/// One step of a fade: blit at `alpha`, then present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FadeFrame {
    /// 1-based step index.
    pub step: u32,
    pub alpha: u8,
}

/// Cooperative fade-in: yields exactly `config.steps` frames with rising alpha.
///
/// Hosts that drive their own loop pull frames from this and pace them; [`fade_in_image`] is the
/// blocking form.
#[derive(Clone, Debug)]
pub struct FadeIn {
    config: FadeConfig,
    step: u32,
}

impl FadeIn {
    pub fn new(config: FadeConfig) -> Self {
        Self { config, step: 0 }
    }

    pub fn config(&self) -> &FadeConfig {
        &self.config
    }

    /// Current alpha (0 before the first frame).
    pub fn current_alpha(&self) -> u8 {
        alpha_at(&self.config, self.step)
    }
}

impl Iterator for FadeIn {
    type Item = FadeFrame;

    fn next(&mut self) -> Option<FadeFrame> {
        if self.step >= self.config.steps {
            return None;
        }
        self.step += 1;
        Some(FadeFrame {
            step: self.step,
            alpha: self.current_alpha(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.config.steps.saturating_sub(self.step) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for FadeIn {}

/// Blit one fade frame and present it.
pub fn apply_fade_frame(
    canvas: &mut dyn Canvas,
    image: &PreparedImage,
    dest: PixelRect,
    frame: FadeFrame,
) -> LegendResult<()> {
    canvas.blit(image, dest, frame.alpha)?;
    canvas.present()
}

/// Blocking fade-in of `image` at `dest`.
///
/// Each step sleeps `step_delay`, blits at the step's alpha and presents. There is no way to
/// cancel; the calling thread is held for [`FadeConfig::total_duration`].
#[tracing::instrument(skip(canvas, image), fields(w = image.width, h = image.height))]
pub fn fade_in_image(
    canvas: &mut dyn Canvas,
    image: &PreparedImage,
    dest: PixelRect,
    config: &FadeConfig,
) -> LegendResult<()> {
    config.validate()?;
    let delay = config.step_delay();
    for frame in FadeIn::new(*config) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        apply_fade_frame(canvas, image, dest, frame)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/fade.rs"]
mod tests;
