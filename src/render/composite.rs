use crate::foundation::{
    core::ClippedRect,
    error::{LegendError, LegendResult},
    math::mul_div255_u8,
};

pub type PremulRgba8 = [u8; 4];

/// Source-over with an extra per-blit alpha in `0..=255`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, alpha: u8) -> PremulRgba8 {
    if alpha == 0 || src[3] == 0 {
        return dst;
    }

    let op = u16::from(alpha);
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Blend the clipped region of `src` (row stride `src_w`) over `dst` (row stride `dst_w`).
pub(crate) fn over_region_in_place(
    dst: &mut [u8],
    dst_w: u32,
    src: &[u8],
    src_w: u32,
    region: ClippedRect,
    alpha: u8,
) -> LegendResult<()> {
    let row_bytes = region.width as usize * 4;
    for row in 0..region.height as usize {
        let d0 = ((region.dst_y as usize + row) * dst_w as usize + region.dst_x as usize) * 4;
        let s0 = ((region.src_y as usize + row) * src_w as usize + region.src_x as usize) * 4;
        let d = dst
            .get_mut(d0..d0 + row_bytes)
            .ok_or_else(|| LegendError::render("blit destination row out of bounds"))?;
        let s = src
            .get(s0..s0 + row_bytes)
            .ok_or_else(|| LegendError::render("blit source row out of bounds"))?;
        for (d, s) in d.chunks_exact_mut(4).zip(s.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], alpha);
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

/// Overwrite the clipped region of `dst` with a single pixel value.
pub(crate) fn fill_region_in_place(
    dst: &mut [u8],
    dst_w: u32,
    region: ClippedRect,
    px: PremulRgba8,
) -> LegendResult<()> {
    let row_bytes = region.width as usize * 4;
    for row in 0..region.height as usize {
        let d0 = ((region.dst_y as usize + row) * dst_w as usize + region.dst_x as usize) * 4;
        let d = dst
            .get_mut(d0..d0 + row_bytes)
            .ok_or_else(|| LegendError::render("fill row out of bounds"))?;
        for p in d.chunks_exact_mut(4) {
            p.copy_from_slice(&px);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
