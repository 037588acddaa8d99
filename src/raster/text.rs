//! Glyph rasterization onto canvas-sized tiles.

use crate::{
    assets::text::PreparedText,
    foundation::core::{Canvas, Offset},
    foundation::error::{FrameError, FrameResult},
    raster::frame::Frame,
};

/// Draw `text` with its layout origin at `offset` on a transparent canvas-sized tile.
pub fn rasterize_text(text: &PreparedText, offset: Offset, canvas: Canvas) -> FrameResult<Frame> {
    let width: u16 = canvas
        .width
        .try_into()
        .map_err(|_| FrameError::render("canvas width exceeds u16 for text rasterization"))?;
    let height: u16 = canvas
        .height
        .try_into()
        .map_err(|_| FrameError::render("canvas height exceeds u16 for text rasterization"))?;

    let font = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(text.font_bytes.as_ref().clone()),
        0,
    );

    let mut ctx = vello_cpu::RenderContext::new(width, height);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        f64::from(offset.x),
        f64::from(offset.y),
    )));

    for line in text.layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };

            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));

            // Absolute pen positions within the layout.
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }

    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    Frame::from_premul(canvas, pixmap.data_as_u8_slice().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/raster/text.rs"]
mod tests;
