//! Error types for scenario generation.

use thiserror::Error;

/// Result type alias using [`GeneratorError`].
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Top-level error type for all generation errors.
///
/// Only malformed input surfaces here. Selection steps that cannot be
/// satisfied degrade to a fallback instead of returning an error.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A configuration value is out of range.
    #[error("Invalid configuration: `{field}` {message}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// Failed to read a content or settings file.
    #[error("Failed to read '{path}': {message}")]
    ContentRead {
        /// Path to the file.
        path: String,
        /// Error message.
        message: String,
    },

    /// Failed to parse a content or settings file.
    #[error("Failed to parse '{path}': {message}")]
    ContentParse {
        /// Path (or `<inline>`) of the parsed source.
        path: String,
        /// Error message.
        message: String,
    },

    /// An explicitly requested scenario template does not exist.
    #[error("Scenario template not found: {0}")]
    TemplateNotFound(String),

    /// A catalog that generation cannot do without is empty.
    #[error("Catalog is empty: {0}")]
    EmptyCatalog(&'static str),
}

impl GeneratorError {
    /// Shorthand for an [`GeneratorError::InvalidConfig`] error.
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }
}
