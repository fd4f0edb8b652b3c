//! Spatial algorithms and data structures.
//!
//! This module provides the geometry the interpolators are built on:
//! - Barycentric coordinates relative to an N-simplex
//! - The triangulation provider contract
//! - A d-dimensional Delaunay triangulation (Bowyer-Watson) with point location
//!
//! # Provider-Generic Architecture
//!
//! ```text
//! spatial/
//! ├── mod.rs                # Exports only
//! ├── error.rs              # SpatialError / SpatialResult
//! ├── validation.rs         # Input validation helpers
//! ├── traits/               # Algorithm contracts
//! │   └── delaunay.rs       # Delaunay, LocateTolerance, TriangulationProvider
//! ├── impl_generic/         # Generic implementations (written once)
//! │   ├── barycentric.rs
//! │   └── delaunay.rs
//! └── cpu/                  # Provider impls (pure delegation)
//!     └── delaunay.rs       # BowyerWatson
//! ```

pub mod cpu;
mod error;
pub mod impl_generic;
pub mod traits;
mod validation;

pub use error::{SpatialError, SpatialResult};

// Re-export validation helpers
pub use validation::{
    validate_matching_dims, validate_min_points, validate_points, validate_simplex_shape,
};

// Re-export traits and types
pub use cpu::BowyerWatson;
pub use impl_generic::{BARYCENTRIC_SUM_TOL, to_barycentric, to_cartesian};
pub use traits::delaunay::{Delaunay, LocateTolerance, TriangulationProvider, gather_rows};
