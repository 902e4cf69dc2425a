//! Error types for the film pipeline.

use flim_lut::LutError;
use thiserror::Error;

/// Errors raised by configuration validation and grid runs.
///
/// Numeric degeneracies inside a sample (a near-zero luminance in the
/// black point remap) are not errors; they are recovered where they occur.
#[derive(Debug, Error)]
pub enum FlimError {
    /// Input grid is not a cube of RGB triplets.
    #[error("shape error: {0}")]
    Shape(String),

    /// A configuration parameter is out of its valid domain, or derives a
    /// degenerate run state (singular gamut matrix, zero white cap).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A grid cell held or produced a NaN/infinite value. Aborts the run.
    #[error("non-finite value {value} at grid cell {cell:?}")]
    NonFinite {
        /// Cell coordinate `[i, j, k]`.
        cell: [usize; 3],
        /// Offending value.
        value: f64,
    },

    /// Worker pool could not be created.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl From<LutError> for FlimError {
    fn from(err: LutError) -> Self {
        match err {
            LutError::Shape(msg) | LutError::InvalidSize(msg) => FlimError::Shape(msg),
            LutError::InvalidRange { min, max } => FlimError::InvalidConfiguration(format!(
                "log2 range [{}, {}] must be finite and increasing",
                min, max
            )),
        }
    }
}

/// Result type for film operations.
pub type FlimResult<T> = Result<T, FlimError>;
