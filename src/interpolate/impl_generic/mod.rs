pub mod uncertain_linear;

pub use uncertain_linear::{
    barycentric_batch_impl, evaluate_uncertain_impl, interpolate_uncertain_impl,
    locate_simplices_impl, validate_sample_set,
};
