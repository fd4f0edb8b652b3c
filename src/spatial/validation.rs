//! Validation helpers for spatial algorithms.

use crate::spatial::error::{SpatialError, SpatialResult};
use faer::MatRef;

/// Validate a point set `[n, d]`: at least one dimension, finite coordinates.
pub fn validate_points(points: MatRef<'_, f64>, op: &'static str) -> SpatialResult<()> {
    if points.ncols() == 0 {
        return Err(SpatialError::InvalidArgument {
            arg: "points",
            reason: format!("{op} requires points with at least one coordinate"),
        });
    }
    for i in 0..points.nrows() {
        for j in 0..points.ncols() {
            if !points[(i, j)].is_finite() {
                return Err(SpatialError::InvalidArgument {
                    arg: "points",
                    reason: format!("{op}: non-finite coordinate at point {i}, axis {j}"),
                });
            }
        }
    }
    Ok(())
}

/// Validate that two point sets have matching dimensionality.
pub fn validate_matching_dims(
    expected: usize,
    actual: usize,
    op: &'static str,
) -> SpatialResult<()> {
    if expected != actual {
        return Err(SpatialError::DimensionMismatch {
            expected,
            actual,
            context: op.to_string(),
        });
    }
    Ok(())
}

/// Validate that a simplex table `[d+1, d]` has the shape of an N-simplex.
pub fn validate_simplex_shape(simplex: MatRef<'_, f64>, op: &'static str) -> SpatialResult<()> {
    let d = simplex.ncols();
    if d == 0 || simplex.nrows() != d + 1 {
        return Err(SpatialError::InvalidArgument {
            arg: "simplex",
            reason: format!(
                "{op} requires a [d+1, d] vertex table, got [{}, {d}]",
                simplex.nrows()
            ),
        });
    }
    Ok(())
}

/// Validate that a point set has enough points to span its dimension.
pub fn validate_min_points(n: usize, d: usize) -> SpatialResult<()> {
    if n < d + 1 {
        return Err(SpatialError::InsufficientPoints {
            dim: d,
            count: n,
            reason: format!("need at least {} points", d + 1),
        });
    }
    Ok(())
}
