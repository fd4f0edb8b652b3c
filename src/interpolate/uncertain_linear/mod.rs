//! Session interpolator over a fixed scattered sample set.
//!
//! The sample set is validated and triangulated once in
//! [`UncertainLinearNd::new`]; every later [`UncertainLinearNd::evaluate`]
//! call only locates and weighs its targets.
//!
//! # Example
//!
//! ```
//! use uncertain_interp::interpolate::{TargetStatus, UncertainLinearNd};
//!
//! let points = faer::mat![[0.0], [1.0]];
//! let interp = UncertainLinearNd::new(points.as_ref(), &[10.0, 20.0], &[1.0, 2.0])?;
//!
//! let out = interp.evaluate(faer::mat![[0.5], [5.0]].as_ref())?;
//! assert!((out.values[0] - 15.0).abs() < 1e-12);
//! assert!((out.uncertainties[0] - 1.25f64.sqrt()).abs() < 1e-12);
//! assert_eq!(out.status[1], TargetStatus::OutsideHull);
//! # Ok::<(), uncertain_interp::interpolate::InterpolateError>(())
//! ```

mod evaluate;

use crate::interpolate::error::InterpolateResult;
use crate::interpolate::impl_generic::validate_sample_set;
use crate::interpolate::traits::uncertain_linear::{UncertainInterpOptions, UncertainValues};
use crate::spatial::{BowyerWatson, TriangulationProvider};
use faer::{Mat, MatRef};

/// Piecewise-linear interpolator carrying per-sample uncertainties.
///
/// Generic over the [`TriangulationProvider`]; [`BowyerWatson`] is used by
/// [`UncertainLinearNd::new`].
pub struct UncertainLinearNd<P: TriangulationProvider = BowyerWatson> {
    pub(crate) provider: P,
    pub(crate) tri: P::Triangulation,
    /// Sample coordinates [n, d].
    pub(crate) points: Mat<f64>,
    pub(crate) values: Vec<f64>,
    pub(crate) uncertainties: Vec<f64>,
    pub(crate) options: UncertainInterpOptions,
}

impl UncertainLinearNd<BowyerWatson> {
    /// Build an interpolator with the default provider and options.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - `values` or `uncertainties` length differs from the number of points
    /// - Any coordinate is non-finite or any uncertainty is negative
    /// - The points cannot be triangulated (fewer than d+1, or affinely degenerate)
    pub fn new(
        points: MatRef<'_, f64>,
        values: &[f64],
        uncertainties: &[f64],
    ) -> InterpolateResult<Self> {
        Self::with_options(points, values, uncertainties, UncertainInterpOptions::default())
    }

    /// Build an interpolator with the default provider and custom options.
    ///
    /// The provider locates in parallel exactly when `options.parallel` is set.
    pub fn with_options(
        points: MatRef<'_, f64>,
        values: &[f64],
        uncertainties: &[f64],
        options: UncertainInterpOptions,
    ) -> InterpolateResult<Self> {
        let provider = BowyerWatson {
            parallel: options.parallel,
            ..BowyerWatson::default()
        };
        Self::with_provider(provider, points, values, uncertainties, options)
    }
}

impl<P: TriangulationProvider> UncertainLinearNd<P> {
    /// Build an interpolator with a custom provider and options.
    ///
    /// `options.parallel` governs the per-target solves only; the provider
    /// decides how it locates.
    pub fn with_provider(
        provider: P,
        points: MatRef<'_, f64>,
        values: &[f64],
        uncertainties: &[f64],
        options: UncertainInterpOptions,
    ) -> InterpolateResult<Self> {
        validate_sample_set(points, values, uncertainties)?;
        let tri = provider.build(points)?;
        log::debug!(
            "uncertain interpolator ready: {} samples in {}-D",
            points.nrows(),
            points.ncols()
        );

        Ok(Self {
            provider,
            tri,
            points: Mat::from_fn(points.nrows(), points.ncols(), |i, j| points[(i, j)]),
            values: values.to_vec(),
            uncertainties: uncertainties.to_vec(),
            options,
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Dimension of the point space.
    pub fn ndim(&self) -> usize {
        self.points.ncols()
    }

    /// Triangulation built from the samples.
    pub fn triangulation(&self) -> &P::Triangulation {
        &self.tri
    }

    /// Options used by [`evaluate`](Self::evaluate).
    pub fn options(&self) -> &UncertainInterpOptions {
        &self.options
    }
}

/// Interpolate with the default provider in a single call.
///
/// Equivalent to `UncertainLinearNd::new(points, values, uncertainties)?.evaluate(targets)`.
pub fn interpolate(
    points: MatRef<'_, f64>,
    values: &[f64],
    uncertainties: &[f64],
    targets: MatRef<'_, f64>,
) -> InterpolateResult<UncertainValues> {
    UncertainLinearNd::new(points, values, uncertainties)?.evaluate(targets)
}

/// Interpolate with a caller-supplied triangulation provider.
pub fn interpolate_with_provider<P: TriangulationProvider>(
    provider: P,
    points: MatRef<'_, f64>,
    values: &[f64],
    uncertainties: &[f64],
    targets: MatRef<'_, f64>,
    options: UncertainInterpOptions,
) -> InterpolateResult<UncertainValues> {
    UncertainLinearNd::with_provider(provider, points, values, uncertainties, options)?
        .evaluate(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolate::error::InterpolateError;
    use crate::interpolate::traits::uncertain_linear::TargetStatus;
    use crate::spatial::{LocateTolerance, SpatialError};
    use faer::mat;

    fn setup() -> UncertainLinearNd {
        let points = mat![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [1.0, 1.0]];
        let values = [0.0, 2.0, 4.0, 2.0, 2.0];
        let uncertainties = [0.5, 0.5, 0.5, 0.5, 0.1];
        UncertainLinearNd::new(points.as_ref(), &values, &uncertainties).unwrap()
    }

    #[test]
    fn test_new() {
        let interp = setup();
        assert_eq!(interp.len(), 5);
        assert!(!interp.is_empty());
        assert_eq!(interp.ndim(), 2);
        assert_eq!(interp.triangulation().n_simplices(), 4);
    }

    #[test]
    fn test_new_rejects_mismatched_lengths() {
        let points = mat![[0.0], [1.0], [2.0]];
        let result = UncertainLinearNd::new(points.as_ref(), &[1.0, 2.0, 3.0], &[0.1, 0.1]);
        assert!(matches!(
            result,
            Err(InterpolateError::ShapeMismatch { expected: 3, actual: 2, .. })
        ));
    }

    #[test]
    fn test_new_rejects_collinear() {
        let points = mat![[0.0, 0.0], [1.0, 0.5], [2.0, 1.0]];
        let result = UncertainLinearNd::new(points.as_ref(), &[1.0; 3], &[0.0; 3]);
        assert!(matches!(
            result,
            Err(InterpolateError::Spatial(SpatialError::InsufficientPoints { .. }))
        ));
    }

    #[test]
    fn test_with_provider() {
        let points = mat![[0.0], [1.0], [3.0]];
        let interp = UncertainLinearNd::with_provider(
            BowyerWatson::with_tolerance(LocateTolerance::HIGH_PRECISION),
            points.as_ref(),
            &[0.0, 1.0, 5.0],
            &[0.0, 0.0, 0.0],
            UncertainInterpOptions::sequential(),
        )
        .unwrap();
        assert!(!interp.options().parallel);

        let out = interp.evaluate(mat![[2.0]].as_ref()).unwrap();
        assert!((out.values[0] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_with_options_sets_provider_parallelism() {
        let points = mat![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let seq = UncertainLinearNd::with_options(
            points.as_ref(),
            &[0.0, 1.0, 1.0],
            &[0.0; 3],
            UncertainInterpOptions::sequential(),
        )
        .unwrap();
        assert!(!seq.provider.parallel);
        assert!(!seq.options().parallel);

        let par = UncertainLinearNd::new(points.as_ref(), &[0.0, 1.0, 1.0], &[0.0; 3]).unwrap();
        assert!(par.provider.parallel);
        assert!(par.options().parallel);
    }

    #[test]
    fn test_interpolate_free_fn() {
        let points = mat![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let targets = mat![[1.0 / 3.0, 1.0 / 3.0], [1.0, 1.0]];
        let out = interpolate(points.as_ref(), &[0.0, 1.0, 1.0], &[0.0; 3], targets.as_ref())
            .unwrap();

        assert_eq!(out.len(), 2);
        assert!((out.values[0] - 2.0 / 3.0).abs() < 1e-10);
        assert_eq!(out.status[1], TargetStatus::OutsideHull);
    }
}
