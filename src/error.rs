//! Error types for district-news
//!
//! One error enum covering every failure mode in the lookup pipeline.
//! Uses thiserror for ergonomic error handling; the HTTP boundary in
//! `server` decides which variants are safe to show a client.

use thiserror::Error;

/// Result type alias for district-news operations
pub type Result<T> = std::result::Result<T, NewsError>;

/// Error type for district-news operations
#[derive(Error, Debug)]
pub enum NewsError {
    /// Request validation errors (blank state/district)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Upstream provider returned an unexpected status or shape
    #[error("Upstream provider error: {0}")]
    Upstream(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// SQLite database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),

    /// Anyhow errors (for more context)
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = NewsError::InvalidInput("missing district".to_string());
        assert_eq!(err.to_string(), "Invalid input: missing district");
    }

    #[test]
    fn test_upstream_display() {
        let err = NewsError::Upstream("status was \"error\"".to_string());
        assert!(err.to_string().starts_with("Upstream provider error"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: NewsError = io.into();
        assert!(matches!(err, NewsError::Io(_)));
    }
}
