//! Error types for the aeolus crate.
//!
//! This module defines a comprehensive error enum that covers all failure
//! conditions in the crate. Note that geographic lookup misses are *not*
//! errors: the locator and classifiers report them through sentinel return
//! values (see the `grid` and `classify` modules).

use thiserror::Error;

/// The main error type for aeolus operations.
#[derive(Error, Debug)]
pub enum AeolusError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid coordinate errors
    #[error("Invalid coordinates: {message}")]
    InvalidCoordinates { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Data not found errors
    #[error("Data not found: {message}")]
    DataNotFound { message: String },

    /// Palette construction errors (malformed color or gradient specs)
    #[error("Palette error: {message}")]
    Palette { message: String },

    /// Image generation errors
    #[error("Image generation error: {message}")]
    ImageGeneration { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with AeolusError
pub type Result<T> = std::result::Result<T, AeolusError>;
