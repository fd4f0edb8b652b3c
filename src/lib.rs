//! uncertain-interp - Piecewise-linear interpolation with uncertainty propagation
//!
//! Scattered samples in N dimensions, each with a value and an independent
//! uncertainty, are triangulated into simplices. A target point is located in
//! its containing simplex, expressed in barycentric coordinates, and assigned
//!
//! - value `sum(b_i * v_i)`
//! - uncertainty `sqrt(sum(b_i^2 * u_i^2))`
//!
//! Targets outside the convex hull of the samples get `f64::NAN` outputs
//! rather than an error.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     interpolate                          │
//! │   (session interpolator, batched barycentrics, weights) │
//! └──────────────────────────┬──────────────────────────────┘
//!                            │ TriangulationProvider
//! ┌──────────────────────────▼──────────────────────────────┐
//! │                       spatial                            │
//! │   (barycentric solve, N-D Delaunay, point location)     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`interpolate`] - Uncertainty-carrying linear interpolation
//! - [`spatial`] - Barycentric coordinates, triangulation provider trait, Bowyer-Watson
//!
//! The triangulation is pluggable: implement
//! [`TriangulationProvider`](spatial::TriangulationProvider) and pass it to
//! [`UncertainLinearNd::with_provider`].
//!
//! # Logging
//!
//! The crate emits records through the [`log`] facade (triangulation
//! statistics and batch summaries at `debug`, per-target events at `trace`)
//! and never installs a logger.
//!
//! # Example
//!
//! ```
//! use uncertain_interp::UncertainLinearNd;
//!
//! let points = faer::mat![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
//! let values = [0.0, 1.0, 2.0, 1.0];
//! let uncertainties = [0.1, 0.1, 0.1, 0.1];
//!
//! let interp = UncertainLinearNd::new(points.as_ref(), &values, &uncertainties)?;
//! let out = interp.evaluate(faer::mat![[0.5, 0.5], [3.0, 3.0]].as_ref())?;
//!
//! assert!((out.values[0] - 1.0).abs() < 1e-10);
//! assert!(out.values[1].is_nan());
//! # Ok::<(), uncertain_interp::InterpolateError>(())
//! ```

pub mod interpolate;
pub mod spatial;

// Re-export main types for convenience
pub use interpolate::{
    BarycentricBatch, InterpolateError, InterpolateResult, SimplexLocation, TargetStatus,
    UncertainInterpAlgorithms, UncertainInterpOptions, UncertainLinearNd, UncertainValues,
    interpolate, interpolate_with_provider,
};
pub use spatial::{
    BowyerWatson, Delaunay, LocateTolerance, SpatialError, SpatialResult, TriangulationProvider,
    to_barycentric, to_cartesian,
};
