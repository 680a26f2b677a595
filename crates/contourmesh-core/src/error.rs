//! Error types for contourmesh.

use thiserror::Error;

/// The main error type for contourmesh operations.
///
/// Sparse or irregular input is expected and never produces an error: invalid
/// samples and degenerate meshes are dropped during a rebuild. These variants
/// only cover surfaces where the caller hands over malformed configuration.
#[derive(Error, Debug)]
pub enum ContourError {
    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A sample grid was configured with an unusable parameter range.
    #[error("invalid sample grid: {0}")]
    InvalidGrid(String),

    /// An unknown field attribute was requested.
    #[error("unknown field attribute '{0}'")]
    UnknownAttribute(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for contourmesh operations.
pub type Result<T> = std::result::Result<T, ContourError>;
