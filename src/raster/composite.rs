//! Straight-alpha RGBA8 pixel math.
//!
//! Blending keeps colour channels un-premultiplied so that a pixel composited onto a transparent
//! background comes out bit-identical, whatever its alpha.

use crate::foundation::error::{FrameError, FrameResult};

pub type Rgba8 = [u8; 4];

/// Extra fixed-point bits carried by the blend coefficients.
const PRECISION_BITS: u32 = 7;

/// Source-over on straight-alpha pixels.
///
/// Fixed-point with rounded divisions. A transparent `src` returns `dst`, and any `src` over a
/// transparent `dst` returns `src` exactly.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let blend = u32::from(dst[3]) * (255 - sa);
    let out_a255 = sa * 255 + blend;
    let coef1 = sa * 255 * 255 * (1 << PRECISION_BITS) / out_a255;
    let coef2 = 255 * (1 << PRECISION_BITS) - coef1;

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = u32::from(src[i]) * coef1 + u32::from(dst[i]) * coef2;
        out[i] = (shift_div255(c + (0x80 << PRECISION_BITS)) >> PRECISION_BITS) as u8;
    }
    out[3] = shift_div255(out_a255 + 0x80) as u8;
    out
}

/// Scale alpha by `coverage / 255`. Colour is kept unless the pixel becomes fully transparent.
pub fn scale(px: Rgba8, coverage: u8) -> Rgba8 {
    match coverage {
        255 => px,
        c => {
            let a = mul_div255(u16::from(px[3]), u16::from(c));
            if a == 0 {
                [0; 4]
            } else {
                [px[0], px[1], px[2], a]
            }
        }
    }
}

pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> FrameResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(FrameError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Multiply the alpha of every pixel of `rgba` by the matching 8-bit coverage value.
pub fn scale_in_place(rgba: &mut [u8], coverage: &[u8]) -> FrameResult<()> {
    if rgba.len() != coverage.len() * 4 {
        return Err(FrameError::render(
            "scale_in_place expects one coverage byte per rgba8 pixel",
        ));
    }
    for (px, &c) in rgba.chunks_exact_mut(4).zip(coverage) {
        let out = scale([px[0], px[1], px[2], px[3]], c);
        px.copy_from_slice(&out);
    }
    Ok(())
}

/// Convert rasterizer output (premultiplied) to straight alpha.
pub fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 255 {
            continue;
        }
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

/// `x / 255` for the ranges used above, via shifts.
fn shift_div255(x: u32) -> u32 {
    ((x >> 8) + x) >> 8
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;
