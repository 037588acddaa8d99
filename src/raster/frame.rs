use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::core::{Canvas, Offset},
    foundation::error::{FrameError, FrameResult},
    raster::composite,
};

/// Canvas-sized straight-alpha RGBA8 buffer. Used both as the accumulator and as per-leaf tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Row-major straight-alpha RGBA8, tightly packed.
    pub data: Vec<u8>,
}

impl Frame {
    pub fn transparent(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0; canvas.rgba_len()],
        }
    }

    /// Wrap a premultiplied buffer such as rasterizer output, converting it to straight alpha.
    pub fn from_premul(canvas: Canvas, mut data: Vec<u8>) -> FrameResult<Self> {
        composite::unpremultiply_in_place(&mut data);
        Self::from_rgba(canvas, data)
    }

    /// Wrap a straight-alpha buffer.
    pub fn from_rgba(canvas: Canvas, data: Vec<u8>) -> FrameResult<Self> {
        if data.len() != canvas.rgba_len() {
            return Err(FrameError::render(format!(
                "frame buffer has {} bytes, expected {} for {}x{}",
                data.len(),
                canvas.rgba_len(),
                canvas.width,
                canvas.height
            )));
        }
        Ok(Self {
            width: canvas.width,
            height: canvas.height,
            data,
        })
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Copy a straight-alpha image onto this frame at `offset`, replacing what is underneath.
    /// Parts that fall outside the canvas are dropped.
    pub fn paste(&mut self, image: &image::RgbaImage, offset: Offset) {
        let (iw, ih) = image.dimensions();
        let w = i64::from(self.width);
        let h = i64::from(self.height);
        let src = image.as_raw();

        for sy in 0..ih {
            let dy = i64::from(offset.y) + i64::from(sy);
            if dy < 0 || dy >= h {
                continue;
            }
            let sx0 = (-i64::from(offset.x)).clamp(0, i64::from(iw));
            let sx1 = (w - i64::from(offset.x)).clamp(0, i64::from(iw));
            if sx0 >= sx1 {
                return;
            }
            let src_row = (sy as usize * iw as usize + sx0 as usize) * 4;
            let src_end = (sy as usize * iw as usize + sx1 as usize) * 4;
            let dx0 = (i64::from(offset.x) + sx0) as usize;
            let dst_row = (dy as usize * self.width as usize + dx0) * 4;
            let n = src_end - src_row;

            self.data[dst_row..dst_row + n].copy_from_slice(&src[src_row..src_end]);
        }
    }

    /// Alpha-composite `tile` over this frame.
    pub fn composite_over(mut self, tile: &Frame) -> FrameResult<Self> {
        if tile.width != self.width || tile.height != self.height {
            return Err(FrameError::render(format!(
                "tile {}x{} does not match accumulator {}x{}",
                tile.width, tile.height, self.width, self.height
            )));
        }
        composite::over_in_place(&mut self.data, &tile.data)?;
        Ok(self)
    }

    pub fn to_rgba_image(&self) -> FrameResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| FrameError::render("frame buffer does not match its dimensions"))
    }

    /// Encode as PNG at `path`, creating parent directories as needed.
    pub fn save_png(&self, path: &Path) -> FrameResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        self.to_rgba_image()?
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/frame.rs"]
mod tests;
