/// Convenience result type used across framescrub.
pub type FramescrubResult<T> = Result<T, FramescrubError>;

/// Top-level error taxonomy used by player APIs.
///
/// Per-frame decode failures are deliberately absent: they are recorded as
/// [`crate::LoadError`] entries in a [`crate::LoadReport`] and never fail a batch load.
#[derive(thiserror::Error, Debug)]
pub enum FramescrubError {
    /// Invalid user-provided configuration or sequence data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while locating or decoding a single asset.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors while preparing or writing a rendered surface.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramescrubError {
    /// Build a [`FramescrubError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FramescrubError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`FramescrubError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FramescrubError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
