use crate::{
    assets::decode::{PreparedImage, unpremultiply_rgba8_in_place},
    foundation::{
        core::{CanvasSize, PixelRect, Rgba8Premul},
        error::{LegendError, LegendResult},
    },
    render::composite::{fill_region_in_place, over_region_in_place},
};

/// The shared drawing surface text and images are composed onto.
///
/// Writes go through `&mut self`, so a single owner serializes all drawing.
pub trait Canvas {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Reset `rect` to the canvas background.
    fn clear_rect(&mut self, rect: PixelRect) -> LegendResult<()>;

    /// Composite `image` with its top-left corner at `dest.x, dest.y`, scaled by `alpha`
    /// (`255` = image opacity unchanged). `dest` width/height are informational; the image is
    /// never scaled.
    fn blit(&mut self, image: &PreparedImage, dest: PixelRect, alpha: u8) -> LegendResult<()>;

    /// Make the current contents visible.
    fn present(&mut self) -> LegendResult<()>;
}

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Convert to straight alpha in place (no-op if already straight).
    pub fn into_straight(mut self) -> Self {
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut self.data);
            self.premultiplied = false;
        }
        self
    }
}

/// Counters for drawing primitives issued against a canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CanvasStats {
    pub clears: u64,
    pub blits: u64,
    pub presents: u64,
}

/// Offscreen CPU canvas backed by a `vello_cpu` pixmap.
///
/// `present` snapshots the pixmap as the last presented frame.
pub struct PixmapCanvas {
    size: CanvasSize,
    background: Rgba8Premul,
    pixmap: vello_cpu::Pixmap,
    presented: Option<FrameRGBA>,
    stats: CanvasStats,
}

impl PixmapCanvas {
    pub fn new(size: CanvasSize, background: Rgba8Premul) -> LegendResult<Self> {
        let width_u16: u16 = size
            .width
            .try_into()
            .map_err(|_| LegendError::render("canvas width exceeds u16"))?;
        let height_u16: u16 = size
            .height
            .try_into()
            .map_err(|_| LegendError::render("canvas height exceeds u16"))?;

        let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
        clear_pixmap(&mut pixmap, background.to_array());

        Ok(Self {
            size,
            background,
            pixmap,
            presented: None,
            stats: CanvasStats::default(),
        })
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn stats(&self) -> CanvasStats {
        self.stats
    }

    /// Fill the whole canvas with the background color.
    pub fn clear(&mut self) {
        clear_pixmap(&mut self.pixmap, self.background.to_array());
        self.stats.clears += 1;
    }

    /// Current (possibly not yet presented) contents.
    pub fn snapshot(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.size.width,
            height: self.size.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    pub fn last_presented(&self) -> Option<&FrameRGBA> {
        self.presented.as_ref()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = (y as usize * self.size.width as usize + x as usize) * 4;
        let px = self.pixmap.data_as_u8_slice().get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

impl Canvas for PixmapCanvas {
    fn width(&self) -> u32 {
        self.size.width
    }

    fn height(&self) -> u32 {
        self.size.height
    }

    fn clear_rect(&mut self, rect: PixelRect) -> LegendResult<()> {
        self.stats.clears += 1;
        let Some(region) = rect.clip_to(self.size.width, self.size.height) else {
            return Ok(());
        };
        fill_region_in_place(
            self.pixmap.data_as_u8_slice_mut(),
            self.size.width,
            region,
            self.background.to_array(),
        )
    }

    fn blit(&mut self, image: &PreparedImage, dest: PixelRect, alpha: u8) -> LegendResult<()> {
        self.stats.blits += 1;
        let placed = PixelRect::new(dest.x, dest.y, image.width, image.height);
        let Some(region) = placed.clip_to(self.size.width, self.size.height) else {
            return Ok(());
        };
        over_region_in_place(
            self.pixmap.data_as_u8_slice_mut(),
            self.size.width,
            image.rgba8_premul.as_slice(),
            image.width,
            region,
            alpha,
        )
    }

    fn present(&mut self) -> LegendResult<()> {
        self.stats.presents += 1;
        self.presented = Some(self.snapshot());
        Ok(())
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
