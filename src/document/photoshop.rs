//! Build a [`Document`] from a Photoshop file through the `psd` crate.
//!
//! The crate lists pixel layers top-most first and links each one to its enclosing group by id.
//! Its visibility accessor returns the raw record flag, which Photoshop sets on *hidden* layers, so
//! it is inverted here. Layer masks are not exposed, so PSD leaves never carry a [`Mask`]; masked
//! templates go through the JSON manifest instead.
//!
//! [`Mask`]: crate::Mask

use std::{collections::HashMap, path::Path};

use crate::{
    document::model::{Document, GroupLayer, Layer, LeafLayer},
    foundation::core::{BBox, Canvas},
    foundation::error::{FrameError, FrameResult},
};

enum Node {
    Group { id: u32, children: Vec<Node> },
    Leaf(LeafLayer),
}

impl Document {
    /// Read and parse a `.psd` file.
    pub fn open_psd(path: &Path) -> FrameResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| FrameError::input(format!("read psd '{}': {e}", path.display())))?;
        Self::from_psd_bytes(&bytes)
    }

    pub fn from_psd_bytes(bytes: &[u8]) -> FrameResult<Self> {
        let psd = psd::Psd::from_bytes(bytes)
            .map_err(|e| FrameError::input(format!("parse psd: {e}")))?;
        let canvas = Canvas::new(psd.width(), psd.height())?;

        let groups = psd.groups();

        let mut roots: Vec<Node> = Vec::new();
        for layer in psd.layers().iter().rev() {
            let chain = group_chain(layer.parent_id(), groups)?;
            let leaf = leaf_from_psd(layer, canvas)?;
            insert_leaf(&mut roots, &chain, leaf);
        }

        let layers = roots
            .into_iter()
            .map(|n| into_layer(n, groups))
            .collect::<FrameResult<Vec<_>>>()?;

        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            layers = psd.layers().len(),
            groups = groups.len(),
            "loaded psd"
        );
        Self::new(canvas, layers)
    }
}

/// Group ids from the outermost ancestor down to `parent`.
fn group_chain(
    parent: Option<u32>,
    groups: &HashMap<u32, psd::PsdGroup>,
) -> FrameResult<Vec<u32>> {
    let mut chain = Vec::new();
    let mut cur = parent;
    while let Some(id) = cur {
        if chain.contains(&id) || chain.len() > groups.len() {
            return Err(FrameError::validation(format!(
                "psd group {id} is its own ancestor"
            )));
        }
        let group = groups.get(&id).ok_or_else(|| {
            FrameError::validation(format!("psd layer references missing group {id}"))
        })?;
        chain.push(id);
        cur = group.parent_id();
    }
    chain.reverse();
    Ok(chain)
}

/// Layers of one group are contiguous in the file, so a group is only reused while it is the
/// most recent sibling.
fn insert_leaf(siblings: &mut Vec<Node>, chain: &[u32], leaf: LeafLayer) {
    let Some((&id, rest)) = chain.split_first() else {
        siblings.push(Node::Leaf(leaf));
        return;
    };
    let reuse = matches!(siblings.last(), Some(Node::Group { id: last, .. }) if *last == id);
    if !reuse {
        siblings.push(Node::Group {
            id,
            children: Vec::new(),
        });
    }
    if let Some(Node::Group { children, .. }) = siblings.last_mut() {
        insert_leaf(children, rest, leaf);
    }
}

fn into_layer(node: Node, groups: &HashMap<u32, psd::PsdGroup>) -> FrameResult<Layer> {
    match node {
        Node::Leaf(leaf) => Ok(Layer::Leaf(leaf)),
        Node::Group { id, children } => {
            let group = groups
                .get(&id)
                .ok_or_else(|| FrameError::validation(format!("missing psd group {id}")))?;
            let children = children
                .into_iter()
                .map(|n| into_layer(n, groups))
                .collect::<FrameResult<Vec<_>>>()?;
            Ok(Layer::Group(GroupLayer {
                name: group.name().to_string(),
                visible: !group.visible(),
                children,
            }))
        }
    }
}

fn leaf_from_psd(layer: &psd::PsdLayer, canvas: Canvas) -> FrameResult<LeafLayer> {
    let left = layer.layer_left();
    let top = layer.layer_top();
    let bounds = BBox::new(
        left,
        top,
        left.saturating_add(i32::from(layer.width())),
        top.saturating_add(i32::from(layer.height())),
    )?;

    let rgba = layer.rgba();
    if rgba.len() != canvas.rgba_len() {
        return Err(FrameError::validation(format!(
            "psd layer '{}' has {} rgba bytes, expected {} for the canvas",
            layer.name(),
            rgba.len(),
            canvas.rgba_len()
        )));
    }

    let mut content = layer_from_canvas_rgba(&rgba, canvas, bounds);
    apply_opacity(&mut content, layer.opacity());

    let mut leaf = LeafLayer::new(layer.name(), content, bounds.origin());
    leaf.visible = !layer.visible();
    Ok(leaf)
}

/// Cut the layer's full bounds out of a canvas-sized buffer. Parts outside the canvas stay
/// transparent, so the leaf keeps its real size and offset.
fn layer_from_canvas_rgba(rgba: &[u8], canvas: Canvas, bounds: BBox) -> image::RgbaImage {
    let mut out = image::RgbaImage::new(bounds.width(), bounds.height());
    let Some(visible) = bounds.clip_to(canvas) else {
        return out;
    };

    let src_row = canvas.width as usize * 4;
    let dst_row = bounds.width() as usize * 4;
    let n = visible.width() as usize * 4;
    let dx = (visible.x0 - bounds.x0) as usize * 4;
    let buf: &mut [u8] = &mut out;
    for y in visible.y0..visible.y1 {
        let src = y as usize * src_row + visible.x0 as usize * 4;
        let dst = (y - bounds.y0) as usize * dst_row + dx;
        buf[dst..dst + n].copy_from_slice(&rgba[src..src + n]);
    }
    out
}

fn apply_opacity(content: &mut image::RgbaImage, opacity: u8) {
    if opacity == 255 {
        return;
    }
    for px in content.pixels_mut() {
        px.0[3] = ((u16::from(px.0[3]) * u16::from(opacity) + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/photoshop.rs"]
mod tests;
