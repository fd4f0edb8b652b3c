pub mod uncertain_linear;

pub use uncertain_linear::{
    BarycentricBatch, SimplexLocation, TargetStatus, UncertainInterpAlgorithms,
    UncertainInterpOptions, UncertainValues,
};
