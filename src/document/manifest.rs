//! JSON description of a layered document whose leaves and masks are stored as image files.
//!
//! ```json
//! {
//!   "width": 1920, "height": 1080,
//!   "layers": [
//!     { "leaf": { "name": "background", "image": "tiles/bg.png" } },
//!     { "group": { "name": "hud", "children": [
//!       { "leaf": { "name": "hp_bar", "offset": [40, 900], "image": "tiles/hp.png",
//!                   "mask": { "bbox": [40, 900, 440, 940], "image": "masks/hp.png" } } }
//!     ] } }
//!   ]
//! }
//! ```
//!
//! Layers are listed bottom-most first. Image paths are relative to the manifest file.

use std::path::Path;

use crate::{
    assets::decode,
    assets::store::normalize_rel_path,
    document::model::{Document, GroupLayer, Layer, LeafLayer, Mask},
    foundation::core::{BBox, Canvas, Offset},
    foundation::error::{FrameError, FrameResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Manifest {
    pub width: u32,
    pub height: u32,
    pub layers: Vec<ManifestLayer>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestLayer {
    Group(ManifestGroup),
    Leaf(ManifestLeaf),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ManifestGroup {
    pub name: String,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
    pub children: Vec<ManifestLayer>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ManifestLeaf {
    pub name: String,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
    #[serde(default)]
    pub offset: [i32; 2],
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<ManifestMask>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ManifestMask {
    /// `[x0, y0, x1, y1]` in canvas pixels.
    pub bbox: [i32; 4],
    /// Grayscale image sized `(x1 - x0) x (y1 - y0)`.
    pub image: String,
}

fn visible_by_default() -> bool {
    true
}

impl Manifest {
    pub fn from_json_str(json: &str) -> FrameResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| FrameError::validation(format!("parse document manifest: {e}")))
    }

    /// Decode every referenced tile and mask, resolving paths against `root`.
    pub fn into_document(self, root: &Path) -> FrameResult<Document> {
        let canvas = Canvas::new(self.width, self.height)?;
        let layers = self
            .layers
            .into_iter()
            .map(|l| load_layer(l, root))
            .collect::<FrameResult<Vec<_>>>()?;
        Document::new(canvas, layers)
    }
}

impl Document {
    /// Read a JSON manifest and the images it references.
    pub fn open_manifest(path: &Path) -> FrameResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            FrameError::input(format!("read document manifest '{}': {e}", path.display()))
        })?;
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        Manifest::from_json_str(&json)?.into_document(root)
    }

    /// Open a `.psd` or `.json` document based on its extension.
    pub fn open(path: &Path) -> FrameResult<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("psd") => Self::open_psd(path),
            Some("json") => Self::open_manifest(path),
            _ => Err(FrameError::input(format!(
                "'{}': unsupported document type, expected .psd or .json",
                path.display()
            ))),
        }
    }
}

fn load_layer(layer: ManifestLayer, root: &Path) -> FrameResult<Layer> {
    match layer {
        ManifestLayer::Group(g) => {
            let children = g
                .children
                .into_iter()
                .map(|l| load_layer(l, root))
                .collect::<FrameResult<Vec<_>>>()?;
            Ok(Layer::Group(GroupLayer {
                name: g.name,
                visible: g.visible,
                children,
            }))
        }
        ManifestLayer::Leaf(l) => {
            let content = decode::load_rgba(&root.join(normalize_rel_path(&l.image)?))
                .map_err(|e| e.context(format!("layer '{}'", l.name)))?;
            let mask = match l.mask {
                Some(m) => {
                    let [x0, y0, x1, y1] = m.bbox;
                    let raster = decode::load_gray(&root.join(normalize_rel_path(&m.image)?))
                        .map_err(|e| e.context(format!("layer '{}' mask", l.name)))?;
                    let mask = Mask::new(BBox::new(x0, y0, x1, y1)?, raster)
                        .map_err(|e| e.context(format!("layer '{}'", l.name)))?;
                    Some(mask)
                }
                None => None,
            };
            Ok(Layer::Leaf(LeafLayer {
                name: l.name,
                visible: l.visible,
                offset: Offset::new(l.offset[0], l.offset[1]),
                content,
                mask,
            }))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/manifest.rs"]
mod tests;
