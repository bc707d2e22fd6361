//! Error types for the feed validator
//!
//! These cover the failures that stop or prevent a run: unreadable input,
//! broken encodings and malformed schema definitions. Problems found inside a
//! record are never reported through `FeedError`; see [`crate::violation`].

use thiserror::Error;

/// Main error type for feed validation operations
#[derive(Error, Debug)]
pub enum FeedError {
    /// Invalid input data or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File access or I/O error
    #[error("File error: {0}")]
    FileError(String),

    /// The byte stream is not valid UTF-8
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A checker tree was declared inconsistently
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// Serialization of a report failed
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl FeedError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        FeedError::InvalidInput(msg.into())
    }

    /// Create a file error
    pub fn file_error(msg: impl Into<String>) -> Self {
        FeedError::FileError(msg.into())
    }

    /// Create an encoding error
    pub fn encoding(msg: impl Into<String>) -> Self {
        FeedError::Encoding(msg.into())
    }

    /// Create a schema error
    pub fn schema_error(msg: impl Into<String>) -> Self {
        FeedError::SchemaError(msg.into())
    }

    /// Create a serialization error
    pub fn serialization(msg: impl Into<String>) -> Self {
        FeedError::SerializationError(msg.into())
    }

    /// Check if this is a user-facing error (vs an internal failure)
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            FeedError::InvalidInput(_) | FeedError::FileError(_) | FeedError::Encoding(_)
        )
    }
}

impl From<std::io::Error> for FeedError {
    fn from(err: std::io::Error) -> Self {
        FeedError::FileError(err.to_string())
    }
}

/// Result type alias for feed validation operations
pub type Result<T> = std::result::Result<T, FeedError>;
