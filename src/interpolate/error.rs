//! Error types for interpolation operations.

use crate::spatial::SpatialError;

/// Result type for interpolation operations.
pub type InterpolateResult<T> = Result<T, InterpolateError>;

/// Errors that can occur during interpolation.
///
/// Only sample-set level problems are errors. Per-target conditions
/// (outside the hull, degenerate simplex) are reported through
/// [`TargetStatus`](crate::interpolate::TargetStatus) instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InterpolateError {
    /// Input arrays have mismatched lengths.
    #[error("Shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        expected: usize,
        actual: usize,
        context: String,
    },

    /// Input array is too small for the requested operation.
    #[error("Insufficient data for {context}: need at least {required}, got {actual}")]
    InsufficientData {
        required: usize,
        actual: usize,
        context: String,
    },

    /// Point dimensions disagree.
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
        context: String,
    },

    /// Invalid parameter value.
    #[error("Invalid parameter '{parameter}': {message}")]
    InvalidParameter { parameter: String, message: String },

    /// Error from triangulation or point location.
    #[error(transparent)]
    Spatial(#[from] SpatialError),
}
