//! Error types for markdrop.
//!
//! Library crates use [`MarkdropError`] via `thiserror`.
//! The server binary wraps this with `color-eyre` at startup and translates
//! it into HTTP status responses at the request boundary.

use std::path::PathBuf;

/// Top-level error type for all markdrop operations.
#[derive(Debug, thiserror::Error)]
pub enum MarkdropError {
    /// No stored document exists under the requested name.
    #[error("no document named '{name}'")]
    DocumentNotFound { name: String },

    /// A document name failed validation (unsafe characters, separators,
    /// or a traversal sequence). Raised before any filesystem access.
    #[error("invalid document name '{name}'")]
    InvalidName { name: String },

    /// An upload request lacked the expected file payload or name field.
    #[error("malformed upload: {message}")]
    MalformedUpload { message: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MarkdropError>;

impl MarkdropError {
    /// Create a not-found error for a document name.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::DocumentNotFound { name: name.into() }
    }

    /// Create an invalid-name error.
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }

    /// Create a malformed-upload error from any displayable message.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedUpload {
            message: msg.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = MarkdropError::not_found("note");
        assert_eq!(err.to_string(), "no document named 'note'");

        let err = MarkdropError::invalid_name("../secret");
        assert!(err.to_string().contains("../secret"));

        let err = MarkdropError::malformed("missing 'file' field");
        assert_eq!(err.to_string(), "malformed upload: missing 'file' field");

        let err = MarkdropError::config("no home directory");
        assert_eq!(err.to_string(), "config error: no home directory");
    }
}
