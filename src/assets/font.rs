use std::{collections::BTreeMap, path::Path, sync::Mutex};

use crate::{
    assets::decode::PreparedImage,
    foundation::{
        core::Rgb8,
        error::{LegendError, LegendResult},
    },
    text::script::ScriptClass,
};

/// A font bound to one script class.
///
/// Implementations must be pure with respect to their inputs: measuring the same text twice
/// returns the same width, and the rasterized block is exactly as wide as the measured width.
/// Loaded fonts are shared read-only, so faces must be `Send + Sync`.
pub trait FontFace: Send + Sync {
    /// Horizontal advance of `text` in whole pixels.
    fn measure(&self, text: &str) -> LegendResult<u32>;

    /// Rasterize `text` into a premultiplied glyph block whose width is the advance and whose
    /// height is the line height.
    fn rasterize(&self, text: &str, color: Rgb8) -> LegendResult<PreparedImage>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgb8> for TextBrushRgba8 {
    fn from(c: Rgb8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }
}

/// Stateful helper for building single-line Parley layouts against one registered family.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Register raw font bytes and return the first family name they provide.
    pub(crate) fn register(&mut self, font_bytes: &[u8]) -> LegendResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| LegendError::font("no font families registered from font bytes"))?;

        Ok(self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| LegendError::font("registered font family has no name"))?
            .to_string())
    }

    /// Shape `text` as one unbroken line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        family: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family.to_string())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

/// Pixel extent of a layout: widest line advance by summed line heights, rounded up.
fn layout_extent(layout: &parley::Layout<TextBrushRgba8>) -> (u32, u32) {
    let mut w = 0.0f32;
    let mut h = 0.0f32;
    for line in layout.lines() {
        let m = line.metrics();
        w = w.max(m.advance);
        h += m.ascent + m.descent + m.leading;
    }
    (w.max(0.0).ceil() as u32, h.max(0.0).ceil() as u32)
}

/// A TTF/OTF face loaded once at startup and shaped through Parley.
pub struct LoadedFont {
    family: String,
    size_px: f32,
    font: vello_cpu::peniko::FontData,
    shaper: Mutex<TextLayoutEngine>,
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("family", &self.family)
            .field("size_px", &self.size_px)
            .finish_non_exhaustive()
    }
}

impl LoadedFont {
    /// Build a face from font file bytes. `size_px` is the nominal size (1pt == 1px).
    pub fn from_bytes(font_bytes: Vec<u8>, size_px: f32) -> LegendResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(LegendError::font("font size must be finite and > 0"));
        }

        let mut shaper = TextLayoutEngine::new();
        let family = shaper.register(&font_bytes)?;
        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);

        Ok(Self {
            family,
            size_px,
            font,
            shaper: Mutex::new(shaper),
        })
    }

    #[tracing::instrument]
    pub fn load(path: &Path, size_px: f32) -> LegendResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            LegendError::font(format!("failed to read font '{}': {e}", path.display()))
        })?;
        let font = Self::from_bytes(bytes, size_px)?;
        tracing::debug!(family = %font.family, "font loaded");
        Ok(font)
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    fn with_layout<R>(
        &self,
        text: &str,
        brush: TextBrushRgba8,
        f: impl FnOnce(&parley::Layout<TextBrushRgba8>) -> LegendResult<R>,
    ) -> LegendResult<R> {
        let mut shaper = self
            .shaper
            .lock()
            .map_err(|_| LegendError::font("font shaper lock poisoned"))?;
        let layout = shaper.layout_line(text, &self.family, self.size_px, brush);
        f(&layout)
    }
}

impl FontFace for LoadedFont {
    fn measure(&self, text: &str) -> LegendResult<u32> {
        self.with_layout(text, TextBrushRgba8::default(), |layout| {
            Ok(layout_extent(layout).0)
        })
    }

    fn rasterize(&self, text: &str, color: Rgb8) -> LegendResult<PreparedImage> {
        self.with_layout(text, color.into(), |layout| {
            let (w, h) = layout_extent(layout);
            if w == 0 || h == 0 {
                return Ok(PreparedImage::blank(w));
            }
            let width: u16 = w
                .try_into()
                .map_err(|_| LegendError::render("glyph block width exceeds u16"))?;
            let height: u16 = h
                .try_into()
                .map_err(|_| LegendError::render("glyph block height exceeds u16"))?;

            let mut ctx = vello_cpu::RenderContext::new(width, height);
            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&self.font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
            ctx.flush();

            let mut pixmap = vello_cpu::Pixmap::new(width, height);
            ctx.render_to_pixmap(&mut pixmap);
            PreparedImage::new(w, h, pixmap.data_as_u8_slice().to_vec())
        })
    }
}

/// Fonts keyed by script class. Read-only once built.
#[derive(Default)]
pub struct FontSet {
    faces: BTreeMap<ScriptClass, Box<dyn FontFace>>,
}

impl std::fmt::Debug for FontSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSet")
            .field("scripts", &self.faces.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FontSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_face(mut self, script: ScriptClass, face: impl FontFace + 'static) -> Self {
        self.insert(script, face);
        self
    }

    pub fn insert(&mut self, script: ScriptClass, face: impl FontFace + 'static) {
        self.faces.insert(script, Box::new(face));
    }

    pub fn contains(&self, script: ScriptClass) -> bool {
        self.faces.contains_key(&script)
    }

    /// The font bound to `script`. There is no fallback to another class.
    pub fn font_for(&self, script: ScriptClass) -> LegendResult<&dyn FontFace> {
        self.faces
            .get(&script)
            .map(|f| f.as_ref())
            .ok_or_else(|| LegendError::font(format!("no font bound for script '{script}'")))
    }

    /// Fail unless every script class has a font.
    pub fn ensure_complete(&self) -> LegendResult<()> {
        for script in ScriptClass::ALL {
            if !self.contains(script) {
                return Err(LegendError::font(format!(
                    "no font configured for script '{script}'"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
