//! CPU implementation of interpolation algorithms.
//!
//! Implements the interpolation traits for the default triangulation
//! provider by delegating to the generic implementations in `impl_generic/`.

mod uncertain_linear;
