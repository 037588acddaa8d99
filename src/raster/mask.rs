//! Canvas-aligned stencils built from layer masks.

use crate::{
    document::model::Mask,
    foundation::core::Canvas,
    foundation::error::{FrameError, FrameResult},
    raster::{composite, frame::Frame},
};

/// Canvas-sized 8-bit coverage. `0` hides a pixel, `255` keeps it untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stencil {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Stencil {
    /// Place `mask` at its bbox origin on an all-zero canvas. Mask pixels outside the canvas are
    /// clipped.
    pub fn from_mask(mask: &Mask, canvas: Canvas) -> Self {
        let mut data = vec![0u8; canvas.pixel_count()];
        if let Some(visible) = mask.bbox.clip_to(canvas) {
            let raster = mask.raster.as_raw();
            let mw = mask.raster.width() as usize;
            let sx0 = (visible.x0 - mask.bbox.x0) as usize;
            let n = visible.width() as usize;
            for y in visible.y0..visible.y1 {
                let sy = (y - mask.bbox.y0) as usize;
                let src = sy * mw + sx0;
                let dst = y as usize * canvas.width as usize + visible.x0 as usize;
                data[dst..dst + n].copy_from_slice(&raster[src..src + n]);
            }
        }
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
        }
    }

    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Scale every tile pixel by the coverage underneath it.
    pub fn apply(&self, tile: &mut Frame) -> FrameResult<()> {
        if tile.width != self.width || tile.height != self.height {
            return Err(FrameError::render(format!(
                "stencil {}x{} does not match tile {}x{}",
                self.width, self.height, tile.width, tile.height
            )));
        }
        composite::scale_in_place(&mut tile.data, &self.data)
    }
}

/// Copy of `mask` that keeps only its bottom `percent`% of rows; rows above are zeroed.
///
/// `percent` is clamped to 100. The kept row count rounds down, so `0` hides the whole mask and
/// `100` returns it unchanged.
pub fn reveal_bottom(mask: &Mask, percent: u8) -> Mask {
    let percent = u32::from(percent.min(100));
    let height = mask.raster.height();
    let kept = height * percent / 100;
    let cut = (height - kept) as usize;

    let mut out = mask.clone();
    let row = out.raster.width() as usize;
    let pixels: &mut [u8] = &mut out.raster;
    pixels[..cut * row].fill(0);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/raster/mask.rs"]
mod tests;
