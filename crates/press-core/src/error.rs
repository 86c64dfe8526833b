//! Error types for press

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for press
///
/// Policy rejections on comment intake are not errors; they are ordinary
/// outcomes (see [`crate::comment::CommentRejection`]). This type covers
/// infrastructure failures only.
#[derive(Debug, Error)]
pub enum PressError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Article not found
    #[error("Article not found: {0}")]
    ArticleNotFound(String),

    /// Comment not found
    #[error("Comment not found: {0}")]
    CommentNotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Store backend failure
    #[error("Store error: {0}")]
    Store(String),

    /// Notification delivery failure
    #[error("Notification failed: {0}")]
    Notify(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PressError>,
    },
}

impl PressError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PressError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<toml::de::Error> for PressError {
    fn from(err: toml::de::Error) -> Self {
        PressError::Toml(err.to_string())
    }
}

/// Result type alias for press
pub type Result<T> = std::result::Result<T, PressError>;
