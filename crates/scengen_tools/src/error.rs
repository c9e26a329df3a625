//! Error types for the tools binary.

use scengen_core::error::GeneratorError;
use thiserror::Error;

/// Result type alias using [`ToolError`].
pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors surfaced by tool commands.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Loading content or generating failed.
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// Output could not be serialized.
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    /// Content validation found errors.
    #[error("Validation failed with {0} error(s)")]
    ValidationFailed(usize),
}
