//! Error types for grid and field construction.

use thiserror::Error;

/// Errors that can occur while building grids, ranges, and fields.
///
/// Kernel *selection* for an unsupported basis configuration is not an
/// error value: it aborts via assertion (see [`crate::dispatch`]), because
/// silently substituting a wrong kernel would produce wrong physics.
#[derive(Error, Debug)]
pub enum GkError {
    /// Dimension outside the supported 1..=6 range, or mismatched between
    /// collaborating objects.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// Grid with inverted bounds or zero cells in some direction.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// Index range with negative volume.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Field shape does not match the range/basis it is paired with.
    #[error("Invalid field shape: {0}")]
    InvalidShape(String),
}

impl GkError {
    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
