/// Convenience result type used across psdframe.
pub type FrameResult<T> = Result<T, FrameError>;

/// Top-level error taxonomy used by compositing APIs.
#[derive(thiserror::Error, Debug)]
pub enum FrameError {
    /// An input document, image or font could not be found or decoded.
    #[error("input error: {0}")]
    Input(String),

    /// The replacement table is malformed or does not fit the document it targets.
    #[error("configuration error: {0}")]
    Config(String),

    /// Structurally invalid document data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Raster invariants violated while building or blending tiles.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FrameError {
    /// Build a [`FrameError::Input`] value.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Build a [`FrameError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`FrameError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FrameError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Prefix the message with `ctx`, keeping the error kind.
    pub fn context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            Self::Input(m) => Self::Input(format!("{ctx}: {m}")),
            Self::Config(m) => Self::Config(format!("{ctx}: {m}")),
            Self::Validation(m) => Self::Validation(format!("{ctx}: {m}")),
            Self::Render(m) => Self::Render(format!("{ctx}: {m}")),
            Self::Other(e) => Self::Other(e.context(ctx.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
