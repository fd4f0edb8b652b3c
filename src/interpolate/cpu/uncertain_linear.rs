use crate::interpolate::error::InterpolateResult;
use crate::interpolate::impl_generic::interpolate_uncertain_impl;
use crate::interpolate::traits::uncertain_linear::{
    UncertainInterpAlgorithms, UncertainInterpOptions, UncertainValues,
};
use crate::spatial::BowyerWatson;
use faer::MatRef;

impl UncertainInterpAlgorithms for BowyerWatson {
    fn interpolate_uncertain(
        &self,
        points: MatRef<'_, f64>,
        values: &[f64],
        uncertainties: &[f64],
        targets: MatRef<'_, f64>,
        options: &UncertainInterpOptions,
    ) -> InterpolateResult<UncertainValues> {
        interpolate_uncertain_impl(self, points, values, uncertainties, targets, options)
    }
}
