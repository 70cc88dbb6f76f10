//! Error types for texture processing.

use thiserror::Error;

/// Errors raised while decoding, transforming or encoding texture images.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("image decode failed: {0}")]
    Decode(String),
    #[error("image encode failed: {0}")]
    Encode(String),
    #[error("invalid color '{0}': expected #rrggbb")]
    InvalidColor(String),
    #[error("invalid crop area: {0}")]
    InvalidCrop(String),
}

/// Result alias for texture operations.
pub type Result<T> = std::result::Result<T, TextureError>;
