//! Piecewise-linear interpolation with uncertainty propagation.

use crate::interpolate::error::InterpolateResult;
use faer::MatRef;

/// Options for uncertainty-carrying linear interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UncertainInterpOptions {
    /// Solve targets on the rayon thread pool.
    ///
    /// Covers the barycentric solves. Point location is run by the
    /// provider, which has its own setting (`BowyerWatson::parallel`);
    /// `UncertainLinearNd::with_options` keeps the two in step.
    /// Default: true
    pub parallel: bool,
    /// Minimum volume ratio `|det T| / prod ||col_i||` of a simplex before it
    /// is treated as degenerate.
    /// Default: 1e-12
    pub degenerate_tol: f64,
}

impl Default for UncertainInterpOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            degenerate_tol: 1e-12,
        }
    }
}

impl UncertainInterpOptions {
    /// Options that process every target on the calling thread.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Options with a custom degeneracy threshold.
    pub fn with_degenerate_tol(degenerate_tol: f64) -> Self {
        Self {
            degenerate_tol,
            ..Self::default()
        }
    }
}

/// Outcome for a single target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetStatus {
    /// Target lies in a simplex; outputs are finite (given finite inputs).
    Interpolated,
    /// No simplex contains the target; outputs are NaN.
    OutsideHull,
    /// The containing simplex is degenerate; outputs are NaN.
    DegenerateSimplex,
}

impl TargetStatus {
    /// Whether the target received an interpolated value.
    pub fn is_interpolated(self) -> bool {
        self == TargetStatus::Interpolated
    }
}

/// Containing simplex of each target in a query batch.
///
/// `simplices` is a flat `[m, d+1]` table of sample indices. Rows for
/// targets outside the hull hold the sentinel simplex (the first simplex the
/// provider enumerates) and have `contained[i] == false`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplexLocation {
    /// Flat vertex table, `d + 1` indices per target.
    pub simplices: Vec<usize>,
    /// Whether target `i` lies in its simplex.
    pub contained: Vec<bool>,
    /// Dimension of the point space.
    pub ndim: usize,
}

impl SimplexLocation {
    /// Number of targets.
    pub fn len(&self) -> usize {
        self.contained.len()
    }

    /// Whether the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.contained.is_empty()
    }

    /// Vertex indices of the simplex assigned to target `i`.
    pub fn vertices(&self, i: usize) -> Option<&[usize]> {
        let k = self.ndim + 1;
        self.simplices.get(i * k..(i + 1) * k)
    }
}

/// Barycentric coordinates of a query batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BarycentricBatch {
    /// Flat `[m, d+1]` coordinates, index-aligned with `location.simplices`.
    /// Rows for targets that were not interpolated are NaN.
    pub coords: Vec<f64>,
    /// Per-target outcome.
    pub status: Vec<TargetStatus>,
    /// Simplex assignment the coordinates refer to.
    pub location: SimplexLocation,
}

impl BarycentricBatch {
    /// Number of targets.
    pub fn len(&self) -> usize {
        self.status.len()
    }

    /// Whether the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
    }

    /// Barycentric coordinates of target `i`.
    pub fn coords_of(&self, i: usize) -> Option<&[f64]> {
        let k = self.location.ndim + 1;
        self.coords.get(i * k..(i + 1) * k)
    }
}

/// Interpolated values with propagated uncertainties.
///
/// All vectors are index-aligned with the target batch. Targets that were
/// not interpolated carry `f64::NAN` in both `values` and `uncertainties`.
#[derive(Debug, Clone, PartialEq)]
pub struct UncertainValues {
    /// Interpolated values, `sum(b_i * v_i)`.
    pub values: Vec<f64>,
    /// Propagated uncertainties, `sqrt(sum(b_i^2 * u_i^2))`.
    pub uncertainties: Vec<f64>,
    /// Per-target outcome.
    pub status: Vec<TargetStatus>,
}

impl UncertainValues {
    /// Number of targets.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of targets that received a value.
    pub fn n_interpolated(&self) -> usize {
        self.status.iter().filter(|s| s.is_interpolated()).count()
    }
}

/// Uncertainty-carrying piecewise-linear interpolation over scattered samples.
pub trait UncertainInterpAlgorithms {
    /// Interpolate values and uncertainties at target points.
    ///
    /// Each target is located in a simplex of the triangulation of `points`.
    /// The value is the barycentric-weighted sum of the vertex values and the
    /// uncertainty is `sqrt(sum(b_i^2 * u_i^2))`, assuming independent vertex
    /// uncertainties.
    ///
    /// # Arguments
    /// * `points` - Sample coordinates, shape `[n, d]`
    /// * `values` - Sample values, length `n`
    /// * `uncertainties` - Non-negative sample uncertainties, length `n`
    /// * `targets` - Query coordinates, shape `[m, d]`
    /// * `options` - Parallelism and degeneracy threshold
    fn interpolate_uncertain(
        &self,
        points: MatRef<'_, f64>,
        values: &[f64],
        uncertainties: &[f64],
        targets: MatRef<'_, f64>,
        options: &UncertainInterpOptions,
    ) -> InterpolateResult<UncertainValues>;
}
