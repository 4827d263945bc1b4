//! Measuring and drawing a single [`TextRun`].

use std::borrow::Cow;

use crate::{
    assets::font::FontFace,
    foundation::{
        core::{PixelRect, Rgb8},
        error::LegendResult,
    },
    render::canvas::Canvas,
    text::segment::TextRun,
};

/// Bytes a single run may occupy in the render buffer. Longer runs are skipped.
pub const RUN_BUFFER_CAPACITY: usize = 1024;

/// The run's bytes as text for the font backend, or `None` if the run must not be drawn.
///
/// Legacy forms that are not valid modern UTF-8 are substituted with U+FFFD.
fn run_text<'a>(run: &TextRun, text: &'a [u8]) -> Option<Cow<'a, str>> {
    if run.is_empty() {
        return None;
    }
    if run.len > RUN_BUFFER_CAPACITY {
        tracing::debug!(
            start = run.start,
            len = run.len,
            capacity = RUN_BUFFER_CAPACITY,
            "run exceeds render buffer, skipped"
        );
        return None;
    }
    let bytes = run.bytes(text)?;
    Some(String::from_utf8_lossy(bytes))
}

/// Pixel width `run` would occupy when drawn with `font`. No drawing happens.
pub fn measure_run(run: &TextRun, text: &[u8], font: &dyn FontFace) -> LegendResult<u32> {
    match run_text(run, text) {
        Some(s) => font.measure(&s),
        None => Ok(0),
    }
}

/// Draw `run` with its top-left corner at `(x, y)` and return the advance.
///
/// The destination rectangle is cleared before the glyph block is blitted so anti-aliased edges
/// never blend with whatever was drawn there before. A block with no pixels (whitespace only)
/// still advances the cursor but touches nothing.
pub fn render_run(
    run: &TextRun,
    text: &[u8],
    font: &dyn FontFace,
    color: Rgb8,
    canvas: &mut dyn Canvas,
    x: i32,
    y: i32,
) -> LegendResult<u32> {
    let Some(s) = run_text(run, text) else {
        return Ok(0);
    };

    let block = font.rasterize(&s, color)?;
    let dest = PixelRect::new(x, y, block.width, block.height);
    if dest.is_empty() {
        return Ok(block.width);
    }
    canvas.clear_rect(dest)?;
    canvas.blit(&block, dest, u8::MAX)?;
    Ok(block.width)
}

#[cfg(test)]
#[path = "../../tests/unit/text/run.rs"]
mod tests;
