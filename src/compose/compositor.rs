//! Layer-tree traversal and per-leaf replacement dispatch.
//!
//! Children are visited in stored order (bottom-most first) and each leaf is blended onto the
//! accumulator as soon as it is reached, so nested groups expand in place. Hidden groups are
//! skipped with their whole subtree; groups are never replaced themselves.

use crate::{
    assets::decode::stretch_to,
    assets::store::{PreparedReplacement, PreparedReplacements},
    document::model::{Document, Layer, LeafLayer, Mask},
    foundation::core::Canvas,
    foundation::error::{FrameError, FrameResult},
    raster::{
        frame::Frame,
        mask::{Stencil, reveal_bottom},
        text::rasterize_text,
    },
    replace::table::ReplacementTable,
};

/// Counters collected during one traversal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompositeStats {
    /// Leaves reached under visible groups.
    pub leaves_visited: u64,
    /// Leaves whose tile was blended onto the accumulator.
    pub leaves_composited: u64,
    /// Composited leaves whose pixels came from a replacement.
    pub leaves_replaced: u64,
    /// Hidden leaves and `Visible(false)` replacements.
    pub leaves_skipped: u64,
}

/// Flatten `doc` with `table` applied.
pub fn composite(doc: &Document, table: &ReplacementTable) -> FrameResult<Frame> {
    composite_with_stats(doc, table).map(|(frame, _)| frame)
}

#[tracing::instrument(
    skip(doc, table),
    fields(width = doc.canvas.width, height = doc.canvas.height, entries = table.len())
)]
pub fn composite_with_stats(
    doc: &Document,
    table: &ReplacementTable,
) -> FrameResult<(Frame, CompositeStats)> {
    doc.validate()?;
    let prepared = PreparedReplacements::prepare(doc, table)?;

    let mut stats = CompositeStats::default();
    let frame = composite_layers(
        &doc.layers,
        doc.canvas,
        &prepared,
        Frame::transparent(doc.canvas),
        &mut stats,
    )?;

    tracing::debug!(?stats, "composite finished");
    Ok((frame, stats))
}

/// Blend `layers` onto `acc` in order and return the new accumulator.
pub fn composite_layers(
    layers: &[Layer],
    canvas: Canvas,
    prepared: &PreparedReplacements,
    mut acc: Frame,
    stats: &mut CompositeStats,
) -> FrameResult<Frame> {
    for layer in layers {
        acc = match layer {
            Layer::Group(g) if g.visible => {
                composite_layers(&g.children, canvas, prepared, acc, stats)?
            }
            Layer::Group(g) => {
                tracing::debug!(group = %g.name, "skipping hidden group");
                acc
            }
            Layer::Leaf(leaf) => composite_leaf(leaf, canvas, prepared, acc, stats)?,
        };
    }
    Ok(acc)
}

fn composite_leaf(
    leaf: &LeafLayer,
    canvas: Canvas,
    prepared: &PreparedReplacements,
    acc: Frame,
    stats: &mut CompositeStats,
) -> FrameResult<Frame> {
    stats.leaves_visited += 1;
    if !leaf.visible {
        stats.leaves_skipped += 1;
        return Ok(acc);
    }

    let tile = match prepared.get(&leaf.name) {
        None | Some(PreparedReplacement::Visible(true)) => natural_tile(leaf, canvas)?,
        Some(PreparedReplacement::Visible(false)) => {
            tracing::debug!(layer = %leaf.name, "hidden by replacement");
            stats.leaves_skipped += 1;
            return Ok(acc);
        }
        Some(PreparedReplacement::RevealPercent(p)) => {
            tracing::debug!(layer = %leaf.name, percent = p, "revealing mask");
            stats.leaves_replaced += 1;
            reveal_tile(leaf, *p, canvas)?
        }
        Some(PreparedReplacement::Image(img)) => {
            tracing::debug!(
                layer = %leaf.name,
                src_w = img.width(),
                src_h = img.height(),
                "substituting image"
            );
            stats.leaves_replaced += 1;
            image_tile(leaf, img, canvas)?
        }
        Some(PreparedReplacement::Text(text)) => {
            tracing::debug!(layer = %leaf.name, family = %text.font_family, "rendering text");
            stats.leaves_replaced += 1;
            rasterize_text(text, leaf.offset, canvas)?
        }
    };

    stats.leaves_composited += 1;
    acc.composite_over(&tile)
}

/// The leaf as the document draws it: its pixels at its offset, gated by its own mask.
fn natural_tile(leaf: &LeafLayer, canvas: Canvas) -> FrameResult<Frame> {
    let mut tile = Frame::transparent(canvas);
    tile.paste(&leaf.content, leaf.offset);
    if let Some(mask) = &leaf.mask {
        apply_mask(&mut tile, mask, canvas)?;
    }
    Ok(tile)
}

fn reveal_tile(leaf: &LeafLayer, percent: u8, canvas: Canvas) -> FrameResult<Frame> {
    let mask = leaf.mask.as_ref().ok_or_else(|| {
        FrameError::config(format!("layer '{}' has no mask to reveal", leaf.name))
    })?;
    let revealed = reveal_bottom(mask, percent);

    let mut tile = Frame::transparent(canvas);
    tile.paste(&leaf.content, leaf.offset);
    apply_mask(&mut tile, &revealed, canvas)?;
    Ok(tile)
}

fn image_tile(leaf: &LeafLayer, img: &image::RgbaImage, canvas: Canvas) -> FrameResult<Frame> {
    let mut tile = Frame::transparent(canvas);
    let (w, h) = leaf.size();
    if w == 0 || h == 0 {
        return Ok(tile);
    }
    tile.paste(&stretch_to(img, w, h), leaf.offset);
    if let Some(mask) = &leaf.mask {
        apply_mask(&mut tile, mask, canvas)?;
    }
    Ok(tile)
}

fn apply_mask(tile: &mut Frame, mask: &Mask, canvas: Canvas) -> FrameResult<()> {
    Stencil::from_mask(mask, canvas).apply(tile)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
