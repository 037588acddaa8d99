use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{FrameError, FrameResult};

pub fn decode_rgba(bytes: &[u8]) -> FrameResult<image::RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

pub fn decode_gray(bytes: &[u8]) -> FrameResult<image::GrayImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_luma8())
}

/// Read `path` and decode it as straight-alpha RGBA8.
pub fn load_rgba(path: &Path) -> FrameResult<image::RgbaImage> {
    let bytes = read_input(path)?;
    decode_rgba(&bytes).map_err(|e| FrameError::input(format!("'{}': {e}", path.display())))
}

/// Read `path` and decode it as 8-bit grayscale.
pub fn load_gray(path: &Path) -> FrameResult<image::GrayImage> {
    let bytes = read_input(path)?;
    decode_gray(&bytes).map_err(|e| FrameError::input(format!("'{}': {e}", path.display())))
}

pub fn read_input(path: &Path) -> FrameResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| FrameError::input(format!("read '{}': {e}", path.display())))
}

/// Resize to exactly `width`x`height`, ignoring the source aspect ratio.
pub fn stretch_to(img: &image::RgbaImage, width: u32, height: u32) -> image::RgbaImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    image::imageops::resize(img, width, height, image::imageops::FilterType::CatmullRom)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
