//! Error types for wallpack.

use thiserror::Error;

/// Errors raised when validating geometry, walls or configuration.
///
/// Placement searches never fail with an error; they return `None` or fall
/// back to the caller's target. These variants only cover malformed input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A rectangle or block size is not usable (zero, negative or non-finite).
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// The wall dimensions are not usable.
    #[error("Invalid wall: {0}")]
    InvalidWall(String),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used across wallpack crates.
pub type Result<T> = std::result::Result<T, Error>;
