use crate::{
    assets::font::FontSet,
    foundation::{core::Rgb8, error::LegendResult, math::half_span},
    render::canvas::Canvas,
    text::{
        run::{measure_run, render_run},
        segment::Runs,
    },
};

/// Left x that horizontally centers `text_width` pixels on a `canvas_width` canvas.
///
/// Integer division truncating toward zero; negative when the text is wider than the canvas.
pub fn centered_origin(canvas_width: u32, text_width: u32) -> i32 {
    half_span(canvas_width, text_width)
}

/// Single-line mixed-script text drawing over a [`FontSet`].
///
/// Every call segments its input afresh; nothing is cached between calls.
#[derive(Clone, Copy, Debug)]
pub struct TextPainter<'f> {
    fonts: &'f FontSet,
}

impl<'f> TextPainter<'f> {
    pub fn new(fonts: &'f FontSet) -> Self {
        Self { fonts }
    }

    /// Total advance of `text`. Pure; draws nothing.
    pub fn measure_total_width(&self, text: impl AsRef<[u8]>) -> LegendResult<u32> {
        let text = text.as_ref();
        let mut total = 0u32;
        for run in Runs::new(text) {
            let font = self.fonts.font_for(run.script)?;
            total = total.saturating_add(measure_run(&run, text, font)?);
        }
        Ok(total)
    }

    /// Draw `text` left to right starting at `(x, y)`; returns the cursor x after the last run.
    pub fn draw(
        &self,
        canvas: &mut dyn Canvas,
        text: impl AsRef<[u8]>,
        x: i32,
        y: i32,
        color: Rgb8,
    ) -> LegendResult<i32> {
        let text = text.as_ref();
        let mut cursor_x = x;
        for run in Runs::new(text) {
            let font = self.fonts.font_for(run.script)?;
            let advance = render_run(&run, text, font, color, canvas, cursor_x, y)?;
            cursor_x = cursor_x.saturating_add_unsigned(advance);
        }
        Ok(cursor_x)
    }

    /// Draw `text` horizontally centered on the canvas at row `y`; returns the origin x used.
    ///
    /// Measures and then draws, so the string is decoded and segmented twice.
    pub fn draw_centered(
        &self,
        canvas: &mut dyn Canvas,
        text: impl AsRef<[u8]>,
        y: i32,
        color: Rgb8,
    ) -> LegendResult<i32> {
        let text = text.as_ref();
        let width = self.measure_total_width(text)?;
        let x = centered_origin(canvas.width(), width);
        self.draw(canvas, text, x, y, color)?;
        Ok(x)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
