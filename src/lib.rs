//! psdframe renders mock-up frames from layered design templates.
//!
//! A [`Document`] (loaded from a PSD or a JSON manifest) is flattened into one straight-alpha
//! RGBA8 [`Frame`]. Leaves named in a [`ReplacementTable`] are swapped for external images,
//! rendered text, a partially revealed mask, or hidden, and everything else passes through
//! untouched.
//!
//! # Pipeline overview
//!
//! 1. **Load**: `.psd`/`.json` -> [`Document`] (bottom-to-top layer tree)
//! 2. **Prepare**: [`Document`] + [`ReplacementTable`] -> [`PreparedReplacements`] (all IO)
//! 3. **Composite**: depth-first traversal, each leaf blended source-over onto the accumulator
//! 4. **Encode**: [`Frame::save_png`]
//!
//! Rendering is deterministic: the same document and table always produce the same bytes.
#![forbid(unsafe_code)]

mod assets;
mod compose;
mod document;
mod foundation;
mod raster;
mod replace;

pub use assets::decode::{decode_rgba, load_rgba, stretch_to};
pub use assets::store::{PreparedReplacement, PreparedReplacements, normalize_rel_path};
pub use assets::text::{PreparedText, TextBrushRgba8, TextLayoutEngine};
pub use compose::compositor::{CompositeStats, composite, composite_layers, composite_with_stats};
pub use compose::profile::{FrameRenderer, LayerCompositor, Profiled, RenderProfile};
pub use document::manifest::{Manifest, ManifestGroup, ManifestLayer, ManifestLeaf, ManifestMask};
pub use document::model::{Document, GroupLayer, Layer, LeafLayer, Mask};
pub use foundation::alloc_track::AllocReport;
pub use foundation::core::{BBox, Canvas, Offset};
pub use foundation::error::{FrameError, FrameResult};
pub use raster::frame::Frame;
pub use raster::mask::{Stencil, reveal_bottom};
pub use raster::text::rasterize_text;
pub use replace::table::{ReplacementSpec, ReplacementTable, TextSpec};
pub use replace::text::to_full_width;
