//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur during LUT operations.
#[derive(Debug, Error)]
pub enum LutError {
    /// The grid is not a cube of RGB triplets.
    #[error("invalid grid shape: {0}")]
    Shape(String),

    /// Storage length does not match the declared shape.
    #[error("invalid LUT size: {0}")]
    InvalidSize(String),

    /// Invalid input range.
    #[error("invalid input range: [{min}, {max}]")]
    InvalidRange {
        /// Minimum value
        min: f64,
        /// Maximum value
        max: f64,
    },
}
