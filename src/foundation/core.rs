use crate::foundation::error::{FrameError, FrameResult};

/// Pixel size of a document canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> FrameResult<Self> {
        if width == 0 || height == 0 {
            return Err(FrameError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Byte length of an RGBA8 buffer covering the whole canvas.
    pub fn rgba_len(self) -> usize {
        self.pixel_count() * 4
    }
}

/// Top-left position of a tile on the canvas. May be negative or past the canvas edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Half-open pixel rectangle `[x0, x1) x [y0, y1)` in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BBox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl BBox {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> FrameResult<Self> {
        if x1 < x0 || y1 < y0 {
            return Err(FrameError::validation(format!(
                "bbox ({x0},{y0},{x1},{y1}) must have x1>=x0 and y1>=y0"
            )));
        }
        Ok(Self { x0, y0, x1, y1 })
    }

    pub fn width(self) -> u32 {
        self.x1.abs_diff(self.x0)
    }

    pub fn height(self) -> u32 {
        self.y1.abs_diff(self.y0)
    }

    pub fn origin(self) -> Offset {
        Offset::new(self.x0, self.y0)
    }

    /// Intersection with the canvas rectangle, or `None` when nothing overlaps.
    pub fn clip_to(self, canvas: Canvas) -> Option<Self> {
        let cw = i32::try_from(canvas.width).unwrap_or(i32::MAX);
        let ch = i32::try_from(canvas.height).unwrap_or(i32::MAX);
        let x0 = self.x0.max(0);
        let y0 = self.y0.max(0);
        let x1 = self.x1.min(cw);
        let y1 = self.y1.min(ch);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(Self { x0, y0, x1, y1 })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
