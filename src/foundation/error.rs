use crate::edit::contract::EditError;

/// Convenience result type used across retouch.
pub type StudioResult<T> = Result<T, StudioError>;

/// Top-level error taxonomy used by toolkit APIs.
#[derive(thiserror::Error, Debug)]
pub enum StudioError {
    /// A crop region violates its invariants.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// The source is not ready or the extraction surface could not be acquired.
    #[error("extraction error: {0}")]
    Extraction(String),

    /// None of the acceptable video encodings is available.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The source image could not be decoded.
    #[error("load error: {0}")]
    Load(String),

    /// Invalid caller-provided data or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors raised by a recording sink while encoding.
    #[error("encode error: {0}")]
    Encode(String),

    /// The job was cancelled before it produced a result.
    #[error("cancelled: {0}")]
    Cancelled(String),

    /// The remote edit call did not produce an image.
    #[error(transparent)]
    Edit(#[from] EditError),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StudioError {
    /// Build a [`StudioError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`StudioError::Extraction`] value.
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }

    /// Build a [`StudioError::UnsupportedFormat`] value.
    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    /// Build a [`StudioError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`StudioError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StudioError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`StudioError::Cancelled`] value.
    pub fn cancelled(msg: impl Into<String>) -> Self {
        Self::Cancelled(msg.into())
    }

    /// Return `true` for errors that leave the caller's state usable, so the user can try again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Extraction(_) | Self::Edit(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
