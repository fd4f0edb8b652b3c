//! Generic spatial algorithm implementations.
//!
//! Provider-independent geometry: barycentric solves and the d-dimensional
//! Bowyer-Watson triangulator. Providers in [`crate::spatial::cpu`] are thin
//! delegations to these functions.

mod barycentric;
mod delaunay;

pub use barycentric::{
    BARYCENTRIC_SUM_TOL, edge_matrix, to_barycentric, to_cartesian, volume_ratio,
};
pub use delaunay::{delaunay_impl, delaunay_locate_impl};
