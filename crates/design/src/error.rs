//! Error types for design files and storage.

use thiserror::Error;

/// Errors raised while reading, writing or importing designs.
#[derive(Debug, Error)]
pub enum DesignError {
    /// The backing file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload is not valid JSON or does not match the design schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Well-formed JSON with the wrong shape. The message names the expected shape.
    #[error("Invalid design file: {0}")]
    InvalidFormat(String),

    /// No design at the requested index or id.
    #[error("Design not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, DesignError>;
