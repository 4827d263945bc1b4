use serde::{Deserialize, Serialize};

use crate::{
    assets::decode::PreparedImage,
    effects::fade::{FadeConfig, fade_in_image},
    foundation::{
        core::PixelRect,
        error::{LegendError, LegendResult},
        math::half_span,
    },
    render::canvas::Canvas,
};

/// How an image is placed and revealed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageFlags {
    /// Center on the canvas instead of placing at the origin.
    pub centered: bool,
    /// Reveal with the fixed-step fade-in ramp.
    pub fade_in: bool,
    /// Accepted for compatibility with host scripts but not implemented.
    pub fade_out: bool,
}

/// Destination rectangle for `image` under `flags`.
pub fn placement(canvas: &dyn Canvas, image: &PreparedImage, flags: ImageFlags) -> PixelRect {
    if flags.centered {
        PixelRect::new(
            half_span(canvas.width(), image.width),
            half_span(canvas.height(), image.height),
            image.width,
            image.height,
        )
    } else {
        PixelRect::new(0, 0, image.width, image.height)
    }
}

/// Put `image` on the canvas and present it, fading in if requested.
///
/// Returns the rectangle used. `fade_out` is rejected with [`LegendError::Unsupported`] before
/// anything is drawn.
pub fn show_image(
    canvas: &mut dyn Canvas,
    image: &PreparedImage,
    flags: ImageFlags,
    fade: &FadeConfig,
) -> LegendResult<PixelRect> {
    if flags.fade_out {
        return Err(LegendError::unsupported("image fade-out is not implemented"));
    }

    let dest = placement(canvas, image, flags);
    if flags.fade_in {
        fade_in_image(canvas, image, dest, fade)?;
    } else {
        canvas.blit(image, dest, u8::MAX)?;
        canvas.present()?;
    }
    Ok(dest)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/display.rs"]
mod tests;
