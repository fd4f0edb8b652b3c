//! Barycentric coordinates relative to an N-simplex.
//!
//! For a simplex with vertices v_0..v_d, the edge matrix T has columns
//! `v_i - v_d` (i < d). A point p has barycentric coordinates
//! `(x_0, .., x_{d-1}, 1 - sum(x))` where `T x = p - v_d`.

use crate::spatial::error::{SpatialError, SpatialResult};
use crate::spatial::validation::{validate_matching_dims, validate_simplex_shape};
use faer::linalg::solvers::Solve;
use faer::{Mat, MatRef};

/// Relative tolerance to which barycentric coordinates sum to one.
///
/// The last coordinate is `1 - sum(x)`, so the sum is exact up to the
/// rounding of that subtraction.
pub const BARYCENTRIC_SUM_TOL: f64 = 1e-9;

/// Edge matrix [d, d] of a [d+1, d] vertex table: column i is `v_i - v_d`.
pub fn edge_matrix(simplex: MatRef<'_, f64>) -> Mat<f64> {
    let d = simplex.ncols();
    Mat::from_fn(d, d, |row, col| simplex[(col, row)] - simplex[(d, row)])
}

/// Scale-invariant volume measure of an edge matrix.
///
/// Returns `|det T| / prod ||col_i||`, which is 1 for mutually orthogonal
/// edges and 0 for affinely dependent vertices.
pub fn volume_ratio(edges: MatRef<'_, f64>) -> f64 {
    let d = edges.ncols();
    let mut norm_prod = 1.0;
    for j in 0..d {
        let sq: f64 = (0..d).map(|i| edges[(i, j)] * edges[(i, j)]).sum();
        if sq == 0.0 {
            return 0.0;
        }
        norm_prod *= sq.sqrt();
    }
    (edges.determinant() / norm_prod).abs()
}

/// Compute the barycentric coordinates of `point` in `simplex`.
///
/// # Arguments
///
/// * `point` - Point with d coordinates
/// * `simplex` - Vertex table [d+1, d], one vertex per row
/// * `degenerate_tol` - Minimum [`volume_ratio`] accepted
///
/// # Returns
///
/// d+1 coordinates, one per vertex, summing to 1 within
/// [`BARYCENTRIC_SUM_TOL`]. All are non-negative iff the point lies in the
/// closed simplex.
///
/// # Errors
///
/// `SpatialError::DegenerateSimplex` if the vertices are affinely dependent.
pub fn to_barycentric(
    point: &[f64],
    simplex: MatRef<'_, f64>,
    degenerate_tol: f64,
) -> SpatialResult<Vec<f64>> {
    validate_simplex_shape(simplex, "to_barycentric")?;
    let d = simplex.ncols();
    validate_matching_dims(d, point.len(), "to_barycentric")?;

    let edges = edge_matrix(simplex);
    let ratio = volume_ratio(edges.as_ref());
    // Written so that a NaN ratio is rejected too.
    if !(ratio >= degenerate_tol) {
        return Err(SpatialError::DegenerateSimplex {
            volume_ratio: ratio,
        });
    }

    let rhs = Mat::from_fn(d, 1, |i, _| point[i] - simplex[(d, i)]);
    let x = edges.partial_piv_lu().solve(&rhs);

    let mut coords = Vec::with_capacity(d + 1);
    let mut sum = 0.0;
    for i in 0..d {
        coords.push(x[(i, 0)]);
        sum += x[(i, 0)];
    }
    coords.push(1.0 - sum);
    Ok(coords)
}

/// Reconstruct Cartesian coordinates from barycentric coordinates.
///
/// Inverse of [`to_barycentric`]: the barycentric-weighted sum of the
/// simplex vertices.
pub fn to_cartesian(barycentric: &[f64], simplex: MatRef<'_, f64>) -> SpatialResult<Vec<f64>> {
    validate_simplex_shape(simplex, "to_cartesian")?;
    validate_matching_dims(simplex.nrows(), barycentric.len(), "to_cartesian")?;

    let d = simplex.ncols();
    let point = (0..d)
        .map(|j| {
            barycentric
                .iter()
                .enumerate()
                .map(|(i, &w)| w * simplex[(i, j)])
                .sum()
        })
        .collect();
    Ok(point)
}
