use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::error::{LegendError, LegendResult};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Raster image in premultiplied RGBA8 form.
///
/// Used both for decoded image files and for rasterized glyph blocks.
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    pub fn new(width: u32, height: u32, rgba8_premul: Vec<u8>) -> LegendResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| LegendError::image("image dimensions overflow"))?;
        if rgba8_premul.len() != expected {
            return Err(LegendError::image(format!(
                "image byte length mismatch: expected {expected}, got {}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// A zero-height block that still carries a horizontal advance.
    pub fn blank(width: u32) -> Self {
        Self {
            width,
            height: 0,
            rgba8_premul: Arc::new(Vec::new()),
        }
    }

    /// Solid premultiplied fill, mostly useful for tests and placeholders.
    pub fn solid(width: u32, height: u32, px: [u8; 4]) -> Self {
        let n = width as usize * height as usize;
        let mut data = Vec::with_capacity(n * 4);
        for _ in 0..n {
            data.extend_from_slice(&px);
        }
        Self {
            width,
            height,
            rgba8_premul: Arc::new(data),
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.rgba8_premul.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

pub fn decode_image(bytes: &[u8]) -> LegendResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    PreparedImage::new(width, height, rgba8_premul)
}

/// Read and decode an image file.
///
/// Failures come back as [`LegendError::Image`]; callers decide whether to go on without it.
#[tracing::instrument]
pub fn load_image(path: &Path) -> LegendResult<PreparedImage> {
    let bytes = std::fs::read(path).map_err(|e| {
        LegendError::image(format!("failed to read image '{}': {e}", path.display()))
    })?;
    decode_image(&bytes).map_err(|e| {
        LegendError::image(format!("failed to decode image '{}': {e}", path.display()))
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

/// Undo premultiplication for export to straight-alpha formats such as PNG.
pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = (((*c as u16) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
