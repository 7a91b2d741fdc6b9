//! Error types for the worksheet engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the worksheet engine
#[derive(Error, Debug)]
pub enum Error {
    /// A UI event referenced an unknown input field or palette color
    #[error("Event dispatch failed: {0}")]
    EventError(String),

    /// Failed to render the composite worksheet image
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Failed to encode an image as PNG or a data URI
    #[error("Image encoding failed: {0}")]
    EncodeError(String),

    /// Storage backend read/write failure
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Persisted gallery data could not be decoded
    #[error("Gallery decode failed: {0}")]
    DecodeError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::StorageError(err.to_string())
    }
}
