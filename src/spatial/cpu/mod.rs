//! CPU implementation of spatial algorithms.
//!
//! This module implements the spatial algorithm traits for CPU
//! by delegating to the generic implementations in `impl_generic/`.

mod delaunay;

pub use delaunay::BowyerWatson;
