//! Timing and heap instrumentation around a whole render, kept outside the compositor.

use std::time::{Duration, Instant};

use crate::{
    compose::compositor::composite,
    document::model::Document,
    foundation::alloc_track::{self, AllocRegion, AllocReport},
    foundation::error::FrameResult,
    raster::frame::Frame,
    replace::table::ReplacementTable,
};

/// Anything that turns a document plus replacements into one flattened frame.
pub trait FrameRenderer {
    fn render(&self, doc: &Document, table: &ReplacementTable) -> FrameResult<Frame>;
}

/// The plain layer compositor.
#[derive(Clone, Copy, Debug, Default)]
pub struct LayerCompositor;

impl FrameRenderer for LayerCompositor {
    fn render(&self, doc: &Document, table: &ReplacementTable) -> FrameResult<Frame> {
        composite(doc, table)
    }
}

/// Resources spent by one [`Profiled`] render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderProfile {
    pub elapsed: Duration,
    /// Zeroed unless built with the `alloc-track` feature.
    pub alloc: AllocReport,
}

/// Wraps a renderer and reports wall time and heap activity through `tracing`.
#[derive(Clone, Debug)]
pub struct Profiled<R> {
    inner: R,
    label: String,
}

impl<R: FrameRenderer> Profiled<R> {
    pub fn new(inner: R, label: impl Into<String>) -> Self {
        Self {
            inner,
            label: label.into(),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Render and return the measurements alongside the frame.
    pub fn render_profiled(
        &self,
        doc: &Document,
        table: &ReplacementTable,
    ) -> FrameResult<(Frame, RenderProfile)> {
        let region = AllocRegion::start();
        let start = Instant::now();
        let frame = self.inner.render(doc, table)?;
        let profile = RenderProfile {
            elapsed: start.elapsed(),
            alloc: region.finish(),
        };

        tracing::info!(
            label = %self.label,
            elapsed_ms = profile.elapsed.as_secs_f64() * 1000.0,
            alloc_tracked = alloc_track::ENABLED,
            allocations = profile.alloc.allocations,
            net_mib = profile.alloc.net_bytes() as f64 / (1024.0 * 1024.0),
            width = frame.width,
            height = frame.height,
            "render profile"
        );
        Ok((frame, profile))
    }
}

impl<R: FrameRenderer> FrameRenderer for Profiled<R> {
    fn render(&self, doc: &Document, table: &ReplacementTable) -> FrameResult<Frame> {
        self.render_profiled(doc, table).map(|(frame, _)| frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/profile.rs"]
mod tests;
