use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    assets::decode,
    assets::text::{PreparedText, TextBrushRgba8, TextLayoutEngine},
    document::model::Document,
    foundation::error::{FrameError, FrameResult},
    replace::table::{ReplacementSpec, ReplacementTable},
    replace::text::to_full_width,
};

/// A replacement with its external inputs already decoded.
#[derive(Clone, Debug)]
pub enum PreparedReplacement {
    /// Decoded source image at its original size.
    Image(Arc<image::RgbaImage>),
    /// Full-width normalized and shaped text.
    Text(PreparedText),
    RevealPercent(u8),
    Visible(bool),
}

/// Replacements resolved against one document.
///
/// All IO happens in [`PreparedReplacements::prepare`], so compositing itself never touches the
/// filesystem. Only entries that name a reachable leaf are loaded; the rest are ignored.
#[derive(Clone, Debug, Default)]
pub struct PreparedReplacements {
    by_name: HashMap<String, PreparedReplacement>,
}

impl PreparedReplacements {
    pub fn prepare(doc: &Document, table: &ReplacementTable) -> FrameResult<Self> {
        table.validate()?;

        let mut out = Self::default();
        let mut images: HashMap<PathBuf, Arc<image::RgbaImage>> = HashMap::new();
        let mut fonts: HashMap<PathBuf, Vec<u8>> = HashMap::new();
        let mut text_engine = TextLayoutEngine::new();

        for leaf in doc.reachable_leaves() {
            let Some(spec) = table.get(&leaf.name) else {
                continue;
            };

            if let ReplacementSpec::RevealPercent(_) = spec
                && leaf.mask.is_none()
            {
                return Err(FrameError::config(format!(
                    "layer '{}' has no mask to reveal",
                    leaf.name
                )));
            }
            if out.by_name.contains_key(&leaf.name) {
                continue;
            }

            let prepared = match spec {
                ReplacementSpec::ImagePath(path) => {
                    let img = match images.get(path) {
                        Some(img) => img.clone(),
                        None => {
                            let img = Arc::new(decode::load_rgba(path)?);
                            images.insert(path.clone(), img.clone());
                            img
                        }
                    };
                    PreparedReplacement::Image(img)
                }
                ReplacementSpec::Text(t) => {
                    let font_bytes = match fonts.get(&t.font) {
                        Some(bytes) => bytes.clone(),
                        None => {
                            let bytes = decode::read_input(&t.font)?;
                            fonts.insert(t.font.clone(), bytes.clone());
                            bytes
                        }
                    };
                    let prepared = text_engine
                        .prepare(
                            &to_full_width(&t.content),
                            font_bytes,
                            t.size_px,
                            TextBrushRgba8::BLACK,
                        )
                        .map_err(|e| e.context(format!("font '{}'", t.font.display())))?;
                    PreparedReplacement::Text(prepared)
                }
                ReplacementSpec::RevealPercent(p) => PreparedReplacement::RevealPercent(*p),
                ReplacementSpec::Visible(v) => PreparedReplacement::Visible(*v),
            };

            tracing::debug!(layer = %leaf.name, "prepared replacement");
            out.by_name.insert(leaf.name.clone(), prepared);
        }

        Ok(out)
    }

    pub fn get(&self, name: &str) -> Option<&PreparedReplacement> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Normalize and validate a manifest-relative path.
///
/// The result uses `/` separators, drops `.` segments, and rejects absolute paths or parent
/// traversals (`..`).
pub fn normalize_rel_path(source: &str) -> FrameResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') || Path::new(source).is_absolute() {
        return Err(FrameError::validation(format!(
            "path '{source}' must be relative"
        )));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(FrameError::validation(format!(
                "path '{source}' must not contain '..'"
            )));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(FrameError::validation(format!(
            "path '{source}' must contain a file name"
        )));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
