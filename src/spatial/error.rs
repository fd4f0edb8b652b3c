//! Error types for spatial operations.

/// Result type for spatial operations.
pub type SpatialResult<T> = Result<T, SpatialError>;

/// Errors that can occur during triangulation, point location and
/// barycentric solves.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpatialError {
    /// Point set cannot be triangulated: too few points, or all points lie
    /// in a lower-dimensional affine subspace.
    #[error("insufficient points for {dim}-D triangulation ({count} given): {reason}")]
    InsufficientPoints {
        /// Dimension of the point set.
        dim: usize,
        /// Number of points supplied.
        count: usize,
        /// What made the set unusable.
        reason: String,
    },

    /// Simplex vertices are affinely dependent (zero volume).
    #[error("degenerate simplex: volume ratio {volume_ratio:e} below tolerance")]
    DegenerateSimplex {
        /// `|det T| / prod ||col_i||` of the edge matrix, in `[0, 1]`.
        volume_ratio: f64,
    },

    /// Argument has the wrong shape or contents.
    #[error("invalid argument '{arg}': {reason}")]
    InvalidArgument { arg: &'static str, reason: String },

    /// Point dimensions disagree.
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
        context: String,
    },
}
