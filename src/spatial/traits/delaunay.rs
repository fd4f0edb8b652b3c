//! Delaunay triangulation and the triangulation provider contract.
//!
//! The interpolation core never builds a triangulation itself. It consumes
//! one through [`TriangulationProvider`], so any conforming implementation
//! (the bundled Bowyer-Watson triangulator, or a wrapper around another
//! geometry library) can be substituted.

use crate::spatial::error::SpatialResult;
use faer::{Mat, MatRef};

/// Geometric tolerances used by point location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocateTolerance {
    /// A point is inside a simplex when every barycentric coordinate is
    /// `>= -inside_tol`.
    /// Default: 1e-10
    pub inside_tol: f64,

    /// A simplex is degenerate when `|det T| / prod ||col_i||` of its edge
    /// matrix falls below this value.
    /// Default: 1e-12
    pub degenerate_tol: f64,
}

impl Default for LocateTolerance {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl LocateTolerance {
    /// Tight tolerances for well-conditioned scientific data.
    pub const HIGH_PRECISION: Self = Self {
        inside_tol: 1e-14,
        degenerate_tol: 1e-15,
    };

    /// Default tolerances.
    pub const STANDARD: Self = Self {
        inside_tol: 1e-10,
        degenerate_tol: 1e-12,
    };

    /// Loose tolerances for noisy or badly scaled inputs.
    pub const RELAXED: Self = Self {
        inside_tol: 1e-8,
        degenerate_tol: 1e-10,
    };
}

/// Delaunay triangulation result.
#[derive(Debug, Clone)]
pub struct Delaunay {
    /// Original points [n, d].
    pub points: Mat<f64>,

    /// Simplices of the triangulation, flattened [n_simplices, d+1].
    /// For 1D: segments, 2D: triangles, 3D: tetrahedra.
    pub simplices: Vec<usize>,

    /// Neighboring simplex indices, flattened [n_simplices, d+1].
    /// `neighbors[s * (d+1) + j]` is the simplex sharing the facet opposite
    /// vertex j of simplex s. `None` on the convex hull boundary.
    pub neighbors: Vec<Option<usize>>,
}

impl Delaunay {
    /// Spatial dimension d.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.points.ncols()
    }

    /// Number of simplices.
    #[inline]
    pub fn n_simplices(&self) -> usize {
        self.simplices.len() / (self.ndim() + 1)
    }

    /// Vertex indices of simplex `s`, or `None` if out of range.
    #[inline]
    pub fn simplex(&self, s: usize) -> Option<&[usize]> {
        let k = self.ndim() + 1;
        self.simplices.get(s * k..(s + 1) * k)
    }

    /// Neighbors of simplex `s`, indexed by opposite vertex.
    #[inline]
    pub fn neighbors_of(&self, s: usize) -> Option<&[Option<usize>]> {
        let k = self.ndim() + 1;
        self.neighbors.get(s * k..(s + 1) * k)
    }

    /// Vertex coordinates of simplex `s` as a [d+1, d] matrix.
    pub fn simplex_coords(&self, s: usize) -> Option<Mat<f64>> {
        let verts = self.simplex(s)?;
        Some(gather_rows(self.points.as_ref(), verts))
    }
}

/// Copy the rows `indices` of `points` into a new [indices.len(), d] matrix.
pub fn gather_rows(points: MatRef<'_, f64>, indices: &[usize]) -> Mat<f64> {
    Mat::from_fn(indices.len(), points.ncols(), |i, j| points[(indices[i], j)])
}

/// Algorithmic contract for a triangulation provider.
///
/// Triangulations are built once and then only queried, so both the
/// provider and its triangulation must be shareable across worker threads.
pub trait TriangulationProvider: Send + Sync {
    /// Provider-owned simplicial decomposition.
    type Triangulation: Send + Sync;

    /// Construct the simplicial decomposition of the convex hull of `points`.
    ///
    /// # Arguments
    ///
    /// * `points` - Point set with shape [n, d] where n >= d+1
    ///
    /// # Errors
    ///
    /// `SpatialError::InsufficientPoints` when fewer than d+1 points are
    /// given or the points are affinely degenerate.
    fn build(&self, points: MatRef<'_, f64>) -> SpatialResult<Self::Triangulation>;

    /// Find the simplex containing each target point.
    ///
    /// # Arguments
    ///
    /// * `tri` - The triangulation
    /// * `targets` - Query points with shape [m, d]
    ///
    /// # Returns
    ///
    /// One entry per target: the simplex id, or `None` for points outside
    /// the convex hull.
    fn locate(
        &self,
        tri: &Self::Triangulation,
        targets: MatRef<'_, f64>,
    ) -> SpatialResult<Vec<Option<usize>>>;

    /// Vertex indices (d+1 of them) of simplex `simplex`.
    ///
    /// Simplex ids are dense and start at 0; `None` means out of range.
    fn vertices_of<'t>(
        &self,
        tri: &'t Self::Triangulation,
        simplex: usize,
    ) -> Option<&'t [usize]>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::mat;

    fn unit_square() -> Delaunay {
        Delaunay {
            points: mat![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
            simplices: vec![0, 1, 2, 0, 2, 3],
            neighbors: vec![None, Some(1), None, None, None, Some(0)],
        }
    }

    #[test]
    fn test_simplex_accessors() {
        let tri = unit_square();
        assert_eq!(tri.ndim(), 2);
        assert_eq!(tri.n_simplices(), 2);
        assert_eq!(tri.simplex(1), Some(&[0usize, 2, 3][..]));
        assert_eq!(tri.simplex(2), None);
        assert_eq!(tri.neighbors_of(0), Some(&[None, Some(1), None][..]));
    }

    #[test]
    fn test_simplex_coords() {
        let tri = unit_square();
        let coords = tri.simplex_coords(1).unwrap();
        assert_eq!(coords.nrows(), 3);
        assert_eq!(coords.ncols(), 2);
        assert_eq!(coords[(1, 0)], 1.0);
        assert_eq!(coords[(2, 1)], 1.0);
    }
}
