use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::foundation::error::{FrameError, FrameResult};

/// What to do with a leaf whose name matches a table entry.
#[derive(Clone, Debug, PartialEq)]
pub enum ReplacementSpec {
    /// Stretch this image over the leaf's bounds.
    ImagePath(PathBuf),
    /// Draw text at the leaf's offset instead of its pixels.
    Text(TextSpec),
    /// Keep the leaf's pixels but reveal only the bottom `percent`% of its mask.
    RevealPercent(u8),
    /// `false` drops the leaf, `true` leaves it untouched.
    Visible(bool),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextSpec {
    pub content: String,
    /// TTF/OTF file.
    pub font: PathBuf,
    pub size_px: f32,
}

impl ReplacementSpec {
    pub fn image(path: impl Into<PathBuf>) -> Self {
        Self::ImagePath(path.into())
    }

    pub fn text(content: impl Into<String>, font: impl Into<PathBuf>, size_px: f32) -> Self {
        Self::Text(TextSpec {
            content: content.into(),
            font: font.into(),
            size_px,
        })
    }

    pub fn reveal(percent: u8) -> Self {
        Self::RevealPercent(percent)
    }

    pub fn visible(visible: bool) -> Self {
        Self::Visible(visible)
    }

    pub fn validate(&self) -> FrameResult<()> {
        match self {
            Self::RevealPercent(p) if *p > 100 => Err(FrameError::config(format!(
                "reveal percent {p} must be within 0..=100"
            ))),
            Self::Text(t) if !t.size_px.is_finite() || t.size_px <= 0.0 => {
                Err(FrameError::config("text size must be finite and > 0"))
            }
            _ => Ok(()),
        }
    }

    /// Resolve a JSON table value. Relative paths are joined onto `root`.
    ///
    /// | value | spec |
    /// |---|---|
    /// | string | [`ReplacementSpec::ImagePath`] |
    /// | bool | [`ReplacementSpec::Visible`] |
    /// | integer `0..=100` | [`ReplacementSpec::RevealPercent`] |
    /// | `[text, font, size]` | [`ReplacementSpec::Text`] |
    pub fn from_json(value: &serde_json::Value, root: &Path) -> FrameResult<Self> {
        use serde_json::Value;

        let spec = match value {
            Value::String(path) => Self::ImagePath(root.join(path)),
            Value::Bool(b) => Self::Visible(*b),
            Value::Number(n) => {
                let p = n
                    .as_u64()
                    .and_then(|p| u8::try_from(p).ok())
                    .filter(|p| *p <= 100)
                    .ok_or_else(|| {
                        FrameError::config(format!(
                            "reveal percent {n} must be an integer 0..=100"
                        ))
                    })?;
                Self::RevealPercent(p)
            }
            Value::Array(items) => match items.as_slice() {
                [Value::String(text), Value::String(font), Value::Number(size)] => {
                    let size_px = size
                        .as_f64()
                        .ok_or_else(|| FrameError::config("text size must be a number"))?
                        as f32;
                    Self::text(text.clone(), root.join(font), size_px)
                }
                _ => {
                    return Err(FrameError::config(
                        "text replacement must be [text, font_path, size]",
                    ));
                }
            },
            Value::Null | Value::Object(_) => {
                return Err(FrameError::config(format!(
                    "unsupported replacement value {value}; expected image path, bool, percent or [text, font, size]"
                )));
            }
        };
        spec.validate()?;
        Ok(spec)
    }
}

/// Layer name to replacement. Inserting an existing name replaces the earlier entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReplacementTable {
    entries: BTreeMap<String, ReplacementSpec>,
}

impl ReplacementTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        spec: ReplacementSpec,
    ) -> Option<ReplacementSpec> {
        self.entries.insert(name.into(), spec)
    }

    /// Builder-style [`ReplacementTable::insert`].
    pub fn with(mut self, name: impl Into<String>, spec: ReplacementSpec) -> Self {
        self.insert(name, spec);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ReplacementSpec> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReplacementSpec)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn validate(&self) -> FrameResult<()> {
        for (name, spec) in &self.entries {
            spec.validate()
                .map_err(|e| e.context(format!("layer '{name}'")))?;
        }
        Ok(())
    }

    /// Parse a JSON object of `name -> value`; see [`ReplacementSpec::from_json`].
    pub fn from_json_str(json: &str, root: &Path) -> FrameResult<Self> {
        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|e| {
                FrameError::config(format!("replacement table is not a JSON object: {e}"))
            })?;

        let mut table = Self::new();
        for (name, value) in &map {
            let spec = ReplacementSpec::from_json(value, root)
                .map_err(|e| e.context(format!("layer '{name}'")))?;
            table.insert(name.clone(), spec);
        }
        Ok(table)
    }

    /// Load a table file; relative paths inside resolve against the file's directory.
    pub fn load(path: &Path) -> FrameResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            FrameError::input(format!("read replacement table '{}': {e}", path.display()))
        })?;
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_json_str(&json, root)
    }
}

impl<S: Into<String>> FromIterator<(S, ReplacementSpec)> for ReplacementTable {
    fn from_iter<I: IntoIterator<Item = (S, ReplacementSpec)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, spec) in iter {
            table.insert(name, spec);
        }
        table
    }
}

#[cfg(test)]
#[path = "../../tests/unit/replace/table.rs"]
mod tests;
