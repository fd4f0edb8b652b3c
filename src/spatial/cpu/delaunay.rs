//! CPU Bowyer-Watson triangulation provider.

use crate::spatial::error::SpatialResult;
use crate::spatial::impl_generic::{delaunay_impl, delaunay_locate_impl};
use crate::spatial::traits::delaunay::{Delaunay, LocateTolerance, TriangulationProvider};
use faer::MatRef;

/// Default triangulation provider: d-dimensional Bowyer-Watson Delaunay
/// triangulation with walk-based point location.
///
/// # Example
///
/// ```
/// use uncertain_interp::spatial::{BowyerWatson, TriangulationProvider};
///
/// let points = faer::mat![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
/// let provider = BowyerWatson::default();
/// let tri = provider.build(points.as_ref())?;
/// assert_eq!(tri.n_simplices(), 2);
/// # Ok::<(), uncertain_interp::spatial::SpatialError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BowyerWatson {
    /// Geometric tolerances for construction and location.
    pub tolerance: LocateTolerance,
    /// Locate query batches on the rayon thread pool.
    /// Default: true
    pub parallel: bool,
}

impl Default for BowyerWatson {
    fn default() -> Self {
        Self {
            tolerance: LocateTolerance::default(),
            parallel: true,
        }
    }
}

impl BowyerWatson {
    /// Provider with custom tolerances.
    pub fn with_tolerance(tolerance: LocateTolerance) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    /// Provider that locates query batches on the calling thread.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }
}

impl TriangulationProvider for BowyerWatson {
    type Triangulation = Delaunay;

    fn build(&self, points: MatRef<'_, f64>) -> SpatialResult<Delaunay> {
        delaunay_impl(points, self.tolerance)
    }

    fn locate(
        &self,
        tri: &Delaunay,
        targets: MatRef<'_, f64>,
    ) -> SpatialResult<Vec<Option<usize>>> {
        delaunay_locate_impl(tri, targets, self.tolerance, self.parallel)
    }

    fn vertices_of<'t>(&self, tri: &'t Delaunay, simplex: usize) -> Option<&'t [usize]> {
        tri.simplex(simplex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::mat;

    #[test]
    fn test_delaunay_find_simplex() {
        let provider = BowyerWatson::default();
        let points = mat![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let tri = provider.build(points.as_ref()).unwrap();

        // Query point inside the triangulation
        let query = mat![[0.5, 0.5], [1.5, 0.5]];
        let found = provider.locate(&tri, query.as_ref()).unwrap();

        // Should find a valid simplex for the first, none for the second
        let s = found[0].unwrap();
        assert_eq!(provider.vertices_of(&tri, s).unwrap().len(), 3);
        assert_eq!(found[1], None);
    }

    #[test]
    fn test_vertices_of_out_of_range() {
        let provider = BowyerWatson::sequential();
        let points = mat![[0.0], [1.0]];
        let tri = provider.build(points.as_ref()).unwrap();
        assert_eq!(provider.vertices_of(&tri, 0).map(|v| v.len()), Some(2));
        assert!(provider.vertices_of(&tri, 1).is_none());
    }

    #[test]
    fn test_with_tolerance() {
        let provider = BowyerWatson::with_tolerance(LocateTolerance::RELAXED);
        assert_eq!(provider.tolerance, LocateTolerance::RELAXED);
        assert!(provider.parallel);
    }
}
