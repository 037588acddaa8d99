use std::fmt::Write as _;

use crate::{
    foundation::core::{BBox, Canvas, Offset},
    foundation::error::{FrameError, FrameResult},
};

/// A layered design document: a fixed canvas plus a bottom-to-top layer tree.
#[derive(Clone, Debug)]
pub struct Document {
    pub canvas: Canvas,
    /// Top-level layers, index 0 is the bottom-most.
    pub layers: Vec<Layer>,
}

#[derive(Clone, Debug)]
pub enum Layer {
    Group(GroupLayer),
    Leaf(LeafLayer),
}

#[derive(Clone, Debug)]
pub struct GroupLayer {
    pub name: String,
    pub visible: bool,
    pub children: Vec<Layer>,
}

/// A layer with its own pixels.
#[derive(Clone, Debug)]
pub struct LeafLayer {
    pub name: String,
    pub visible: bool,
    /// Top-left corner of `content` on the canvas.
    pub offset: Offset,
    /// Straight-alpha RGBA pixels, without the mask applied.
    pub content: image::RgbaImage,
    pub mask: Option<Mask>,
}

/// 8-bit opacity raster positioned on the canvas by `bbox`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    pub bbox: BBox,
    pub raster: image::GrayImage,
}

impl Mask {
    pub fn new(bbox: BBox, raster: image::GrayImage) -> FrameResult<Self> {
        let mask = Self { bbox, raster };
        mask.validate()?;
        Ok(mask)
    }

    fn validate(&self) -> FrameResult<()> {
        if self.raster.dimensions() != (self.bbox.width(), self.bbox.height()) {
            return Err(FrameError::validation(format!(
                "mask raster is {}x{} but its bbox is {}x{}",
                self.raster.width(),
                self.raster.height(),
                self.bbox.width(),
                self.bbox.height()
            )));
        }
        Ok(())
    }
}

impl GroupLayer {
    pub fn new(name: impl Into<String>, children: Vec<Layer>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            children,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

impl LeafLayer {
    pub fn new(name: impl Into<String>, content: image::RgbaImage, offset: Offset) -> Self {
        Self {
            name: name.into(),
            visible: true,
            offset,
            content,
            mask: None,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn with_mask(mut self, mask: Mask) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Pixel size of the layer content.
    pub fn size(&self) -> (u32, u32) {
        self.content.dimensions()
    }
}

impl From<GroupLayer> for Layer {
    fn from(g: GroupLayer) -> Self {
        Self::Group(g)
    }
}

impl From<LeafLayer> for Layer {
    fn from(l: LeafLayer) -> Self {
        Self::Leaf(l)
    }
}

impl Layer {
    pub fn name(&self) -> &str {
        match self {
            Self::Group(g) => &g.name,
            Self::Leaf(l) => &l.name,
        }
    }

    pub fn visible(&self) -> bool {
        match self {
            Self::Group(g) => g.visible,
            Self::Leaf(l) => l.visible,
        }
    }
}

impl Document {
    pub fn new(canvas: Canvas, layers: Vec<Layer>) -> FrameResult<Self> {
        let doc = Self { canvas, layers };
        doc.validate()?;
        Ok(doc)
    }

    pub fn validate(&self) -> FrameResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(FrameError::validation("canvas width/height must be > 0"));
        }
        let mut stack: Vec<&Layer> = self.layers.iter().collect();
        while let Some(layer) = stack.pop() {
            match layer {
                Layer::Group(g) => stack.extend(g.children.iter()),
                Layer::Leaf(l) => {
                    if let Some(mask) = &l.mask {
                        mask.validate().map_err(|e| {
                            FrameError::validation(format!("layer '{}': {e}", l.name))
                        })?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Leaves that can reach the output: visible leaves under visible groups, in paint order.
    pub fn reachable_leaves(&self) -> Vec<&LeafLayer> {
        fn walk<'a>(layers: &'a [Layer], out: &mut Vec<&'a LeafLayer>) {
            for layer in layers {
                match layer {
                    Layer::Group(g) if g.visible => walk(&g.children, out),
                    Layer::Group(_) => {}
                    Layer::Leaf(l) if l.visible => out.push(l),
                    Layer::Leaf(_) => {}
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.layers, &mut out);
        out
    }

    /// Indented, top-most-first listing of the layer tree.
    pub fn outline(&self) -> String {
        fn walk(layers: &[Layer], depth: usize, out: &mut String) {
            for layer in layers.iter().rev() {
                let indent = "  ".repeat(depth);
                let hidden = if layer.visible() { "" } else { " (hidden)" };
                match layer {
                    Layer::Group(g) => {
                        let _ = writeln!(out, "{indent}[group] {}{hidden}", g.name);
                        walk(&g.children, depth + 1, out);
                    }
                    Layer::Leaf(l) => {
                        let (w, h) = l.size();
                        let mask = match &l.mask {
                            Some(m) => format!(
                                " mask=({},{},{},{})",
                                m.bbox.x0, m.bbox.y0, m.bbox.x1, m.bbox.y1
                            ),
                            None => String::new(),
                        };
                        let _ = writeln!(
                            out,
                            "{indent}{} @({},{}) {w}x{h}{mask}{hidden}",
                            l.name, l.offset.x, l.offset.y
                        );
                    }
                }
            }
        }
        let mut out = String::new();
        walk(&self.layers, 0, &mut out);
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/model.rs"]
mod tests;
