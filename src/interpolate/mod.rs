//! Interpolation with uncertainty propagation.
//!
//! Scattered samples carry a value and an independent uncertainty. A target
//! is located in a simplex of the samples' triangulation, its value is the
//! barycentric-weighted sum of the vertex values and its uncertainty is the
//! quadrature sum `sqrt(sum(b_i^2 * u_i^2))`.
//!
//! # Module Organization
//!
//! - [`UncertainLinearNd`] - Session interpolator: triangulate once, evaluate many batches
//! - [`interpolate`] / [`interpolate_with_provider`] - One-shot interpolation
//! - [`UncertainInterpAlgorithms`] - Trait form, implemented for [`BowyerWatson`](crate::spatial::BowyerWatson)
//! - [`impl_generic`] - Provider-generic building blocks (locate, barycentric batch, weighting)
//!
//! Targets outside the convex hull of the samples are not errors: their
//! outputs are `f64::NAN` and their [`TargetStatus`] says why.
//!
//! # Example
//!
//! ```
//! use uncertain_interp::interpolate::{interpolate, TargetStatus};
//!
//! let points = faer::mat![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
//! let targets = faer::mat![[1.0 / 3.0, 1.0 / 3.0], [2.0, 2.0]];
//! let out = interpolate(points.as_ref(), &[0.0, 1.0, 1.0], &[0.0, 0.0, 0.0], targets.as_ref())?;
//!
//! assert!((out.values[0] - 2.0 / 3.0).abs() < 1e-10);
//! assert_eq!(out.status[1], TargetStatus::OutsideHull);
//! # Ok::<(), uncertain_interp::interpolate::InterpolateError>(())
//! ```

mod cpu;
mod error;
pub mod impl_generic;
pub mod traits;
mod uncertain_linear;

pub use error::{InterpolateError, InterpolateResult};
pub use traits::uncertain_linear::{
    BarycentricBatch, SimplexLocation, TargetStatus, UncertainInterpAlgorithms,
    UncertainInterpOptions, UncertainValues,
};
pub use uncertain_linear::{UncertainLinearNd, interpolate, interpolate_with_provider};
