/// Convenience result type used across dotfield.
pub type DotfieldResult<T> = Result<T, DotfieldError>;

/// Top-level error taxonomy used by pipeline and render APIs.
///
/// Degenerate requests (zero dot count, zero-size canvas) are not errors;
/// they produce empty results. Unknown enum keys fall back to documented
/// defaults rather than failing.
#[derive(thiserror::Error, Debug)]
pub enum DotfieldError {
    /// Absent or ill-formed pixel data handed to sampling or quantization.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration values outside their documented ranges.
    #[error("validation error: {0}")]
    Validation(String),

    /// The drawing surface cannot produce a raster context.
    #[error("surface error: {0}")]
    Surface(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DotfieldError {
    /// Build a [`DotfieldError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`DotfieldError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DotfieldError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }
}
