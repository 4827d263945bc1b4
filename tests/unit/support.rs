//! Deterministic fakes shared by unit tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};

use crate::{
    assets::{decode::PreparedImage, font::FontFace},
    foundation::{
        core::{PixelRect, Rgb8},
        error::LegendResult,
    },
    render::canvas::Canvas,
};

/// Every char advances by `advance` pixels; blocks are `line_height` tall and solid `color`.
pub(crate) struct FixedFace {
    pub(crate) advance: u32,
    pub(crate) line_height: u32,
    pub(crate) measures: AtomicU32,
}

impl FixedFace {
    pub(crate) fn new(advance: u32) -> Self {
        Self {
            advance,
            line_height: 4,
            measures: AtomicU32::new(0),
        }
    }

    pub(crate) fn measure_calls(&self) -> u32 {
        self.measures.load(Ordering::Relaxed)
    }
}

impl FontFace for FixedFace {
    fn measure(&self, text: &str) -> LegendResult<u32> {
        self.measures.fetch_add(1, Ordering::Relaxed);
        Ok(self.advance * text.chars().count() as u32)
    }

    fn rasterize(&self, text: &str, color: Rgb8) -> LegendResult<PreparedImage> {
        let w = self.advance * text.chars().count() as u32;
        Ok(PreparedImage::solid(
            w,
            self.line_height,
            [color.r, color.g, color.b, 255],
        ))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Op {
    Clear(PixelRect),
    Blit { dest: PixelRect, alpha: u8, width: u32 },
    Present,
}

/// Records primitives instead of drawing them.
pub(crate) struct RecordingCanvas {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) ops: Vec<Op>,
}

impl RecordingCanvas {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub(crate) fn blits(&self) -> Vec<(PixelRect, u8)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Blit { dest, alpha, .. } => Some((*dest, *alpha)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear_rect(&mut self, rect: PixelRect) -> LegendResult<()> {
        self.ops.push(Op::Clear(rect));
        Ok(())
    }

    fn blit(&mut self, image: &PreparedImage, dest: PixelRect, alpha: u8) -> LegendResult<()> {
        self.ops.push(Op::Blit {
            dest,
            alpha,
            width: image.width,
        });
        Ok(())
    }

    fn present(&mut self) -> LegendResult<()> {
        self.ops.push(Op::Present);
        Ok(())
    }
}
