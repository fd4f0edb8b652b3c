//! Query evaluation for the session interpolator.

use crate::interpolate::error::InterpolateResult;
use crate::interpolate::impl_generic::{barycentric_batch_impl, evaluate_uncertain_impl};
use crate::interpolate::traits::uncertain_linear::{BarycentricBatch, UncertainValues};
use crate::spatial::TriangulationProvider;
use faer::MatRef;

use super::UncertainLinearNd;

impl<P: TriangulationProvider> UncertainLinearNd<P> {
    /// Evaluate the interpolant at target points.
    ///
    /// # Arguments
    ///
    /// * `targets` - Query points, shape [m, d]
    ///
    /// # Returns
    ///
    /// Values, uncertainties and status, each of length m. Targets outside
    /// the hull or in a degenerate simplex get NaN outputs.
    pub fn evaluate(&self, targets: MatRef<'_, f64>) -> InterpolateResult<UncertainValues> {
        evaluate_uncertain_impl(
            &self.provider,
            &self.tri,
            self.points.as_ref(),
            &self.values,
            &self.uncertainties,
            targets,
            &self.options,
        )
    }

    /// Barycentric coordinates of each target in its containing simplex.
    pub fn barycentric(&self, targets: MatRef<'_, f64>) -> InterpolateResult<BarycentricBatch> {
        barycentric_batch_impl(
            &self.provider,
            &self.tri,
            self.points.as_ref(),
            targets,
            &self.options,
        )
    }
}
