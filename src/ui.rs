use std::path::Path;

use crate::{
    assets::{decode::load_image, font::FontSet},
    config::UiConfig,
    effects::{
        display::{ImageFlags, show_image},
        fade::FadeConfig,
    },
    foundation::{
        core::{PixelRect, Rgb8},
        error::LegendResult,
    },
    render::canvas::{Canvas, PixmapCanvas},
    text::layout::TextPainter,
};

/// Composition root: owns the canvas, the per-script fonts and the fade timing.
///
/// This is the surface a host script drives. Colors cross this boundary packed as `0xRRGGBB`.
pub struct Ui<C: Canvas = PixmapCanvas> {
    canvas: C,
    fonts: FontSet,
    fade: FadeConfig,
    title: String,
}

impl Ui<PixmapCanvas> {
    /// Validate `config`, load every font and allocate the canvas.
    ///
    /// Font failures are returned as errors; callers treat them as fatal.
    #[tracing::instrument(skip(config), fields(width = config.width, height = config.height))]
    pub fn init(config: &UiConfig) -> LegendResult<Self> {
        config.validate()?;
        let fonts = config.load_fonts()?;
        let canvas = PixmapCanvas::new(config.canvas_size()?, config.background.to_premul())?;

        let mut ui = Self::from_parts(canvas, fonts, config.fade)?;
        if let Some(title) = &config.title {
            ui.set_title(title);
        }
        Ok(ui)
    }
}

impl<C: Canvas> Ui<C> {
    pub fn from_parts(canvas: C, fonts: FontSet, fade: FadeConfig) -> LegendResult<Self> {
        fonts.ensure_complete()?;
        fade.validate()?;
        Ok(Self {
            canvas,
            fonts,
            fade,
            title: String::new(),
        })
    }

    pub fn set_title(&mut self, title: &str) {
        tracing::debug!(title, "window title set");
        self.title = title.to_string();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Draw `text` at `(x, y)` in packed color `0xRRGGBB`; returns the cursor x after the text.
    pub fn draw_text(
        &mut self,
        text: impl AsRef<[u8]>,
        x: i32,
        y: i32,
        color: u32,
    ) -> LegendResult<i32> {
        TextPainter::new(&self.fonts).draw(
            &mut self.canvas,
            text,
            x,
            y,
            Rgb8::from_packed(color),
        )
    }

    /// Draw `text` horizontally centered at row `y`; returns the origin x used.
    pub fn draw_centered_text(
        &mut self,
        text: impl AsRef<[u8]>,
        y: i32,
        color: u32,
    ) -> LegendResult<i32> {
        TextPainter::new(&self.fonts).draw_centered(
            &mut self.canvas,
            text,
            y,
            Rgb8::from_packed(color),
        )
    }

    pub fn measure_text(&self, text: impl AsRef<[u8]>) -> LegendResult<u32> {
        TextPainter::new(&self.fonts).measure_total_width(text)
    }

    /// Load and display an image. A missing or undecodable file is returned as an error and
    /// leaves the canvas untouched.
    pub fn show_image(&mut self, path: &Path, flags: ImageFlags) -> LegendResult<PixelRect> {
        let image = load_image(path)?;
        show_image(&mut self.canvas, &image, flags, &self.fade)
    }

    pub fn present(&mut self) -> LegendResult<()> {
        self.canvas.present()
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    pub fn fade_config(&self) -> &FadeConfig {
        &self.fade
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }
}

#[cfg(test)]
#[path = "../tests/unit/ui.rs"]
mod tests;
