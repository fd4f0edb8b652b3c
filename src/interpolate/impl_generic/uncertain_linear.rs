//! Generic uncertainty-carrying linear interpolation.
//!
//! Written once against [`TriangulationProvider`]; any provider that can
//! build, locate and enumerate simplex vertices gets the full pipeline:
//! locate, barycentric solve, weighted sum and quadrature of uncertainties.

use crate::interpolate::error::{InterpolateError, InterpolateResult};
use crate::interpolate::traits::uncertain_linear::{
    BarycentricBatch, SimplexLocation, TargetStatus, UncertainInterpOptions, UncertainValues,
};
use crate::spatial::{
    SpatialError, TriangulationProvider, gather_rows, to_barycentric, validate_min_points,
    validate_points,
};
use faer::MatRef;
use rayon::prelude::*;

/// Validate a sample set before triangulation.
///
/// Checks finite coordinates with at least one dimension, one value and one
/// non-negative uncertainty per point, and at least `d + 1` points.
pub fn validate_sample_set(
    points: MatRef<'_, f64>,
    values: &[f64],
    uncertainties: &[f64],
) -> InterpolateResult<()> {
    validate_points(points, "interpolate (samples)")?;
    let n = points.nrows();
    if n == 0 {
        return Err(InterpolateError::InsufficientData {
            required: points.ncols() + 1,
            actual: 0,
            context: "interpolate (samples)".to_string(),
        });
    }

    if values.len() != n {
        return Err(InterpolateError::ShapeMismatch {
            expected: n,
            actual: values.len(),
            context: "interpolate (values)".to_string(),
        });
    }
    if uncertainties.len() != n {
        return Err(InterpolateError::ShapeMismatch {
            expected: n,
            actual: uncertainties.len(),
            context: "interpolate (uncertainties)".to_string(),
        });
    }
    if let Some((i, u)) = uncertainties
        .iter()
        .enumerate()
        .find(|(_, u)| !(u.is_finite() && **u >= 0.0))
    {
        return Err(InterpolateError::InvalidParameter {
            parameter: "uncertainties".to_string(),
            message: format!("uncertainty at sample {i} is {u}, must be finite and non-negative"),
        });
    }

    validate_min_points(n, points.ncols())?;
    Ok(())
}

fn validate_targets(targets: MatRef<'_, f64>, ndim: usize) -> InterpolateResult<()> {
    if targets.ncols() != ndim {
        return Err(InterpolateError::DimensionMismatch {
            expected: ndim,
            actual: targets.ncols(),
            context: "interpolate (targets)".to_string(),
        });
    }
    Ok(())
}

fn simplex_vertices<'t, P: TriangulationProvider>(
    provider: &P,
    tri: &'t P::Triangulation,
    simplex: usize,
    ndim: usize,
) -> InterpolateResult<&'t [usize]> {
    provider
        .vertices_of(tri, simplex)
        .filter(|v| v.len() == ndim + 1)
        .ok_or_else(|| {
            SpatialError::InvalidArgument {
                arg: "simplex",
                reason: format!("provider has no {}-vertex simplex with id {simplex}", ndim + 1),
            }
            .into()
        })
}

/// Locate the simplex of every target.
///
/// Targets the provider cannot place are assigned the sentinel simplex 0
/// with `contained == false`, so the vertex table is always rectangular.
pub fn locate_simplices_impl<P: TriangulationProvider>(
    provider: &P,
    tri: &P::Triangulation,
    targets: MatRef<'_, f64>,
) -> InterpolateResult<SimplexLocation> {
    let ndim = targets.ncols();
    let m = targets.nrows();
    let found = provider.locate(tri, targets)?;
    if found.len() != m {
        return Err(InterpolateError::ShapeMismatch {
            expected: m,
            actual: found.len(),
            context: "locate (provider result)".to_string(),
        });
    }

    let mut simplices = Vec::with_capacity(m * (ndim + 1));
    let mut contained = Vec::with_capacity(m);
    for s in found {
        let verts = simplex_vertices(provider, tri, s.unwrap_or(0), ndim)?;
        simplices.extend_from_slice(verts);
        contained.push(s.is_some());
    }

    Ok(SimplexLocation {
        simplices,
        contained,
        ndim,
    })
}

/// Barycentric coordinates of every target in its located simplex.
///
/// Targets outside the hull and targets whose simplex is degenerate get a
/// NaN row and the matching [`TargetStatus`]; neither is an error.
pub fn barycentric_batch_impl<P: TriangulationProvider>(
    provider: &P,
    tri: &P::Triangulation,
    points: MatRef<'_, f64>,
    targets: MatRef<'_, f64>,
    options: &UncertainInterpOptions,
) -> InterpolateResult<BarycentricBatch> {
    let d = points.ncols();
    validate_targets(targets, d)?;

    let location = locate_simplices_impl(provider, tri, targets)?;
    let n = points.nrows();
    if let Some(&bad) = location.simplices.iter().find(|&&v| v >= n) {
        return Err(SpatialError::InvalidArgument {
            arg: "simplex",
            reason: format!("vertex index {bad} out of range for {n} samples"),
        }
        .into());
    }

    let k = d + 1;
    let solve = |i: usize| -> InterpolateResult<(Vec<f64>, TargetStatus)> {
        if !location.contained[i] {
            return Ok((vec![f64::NAN; k], TargetStatus::OutsideHull));
        }
        let simplex = gather_rows(points, &location.simplices[i * k..(i + 1) * k]);
        let p: Vec<f64> = (0..d).map(|j| targets[(i, j)]).collect();
        match to_barycentric(&p, simplex.as_ref(), options.degenerate_tol) {
            Ok(b) => Ok((b, TargetStatus::Interpolated)),
            Err(SpatialError::DegenerateSimplex { volume_ratio }) => {
                log::trace!("target {i}: degenerate simplex (volume ratio {volume_ratio:e})");
                Ok((vec![f64::NAN; k], TargetStatus::DegenerateSimplex))
            }
            Err(e) => Err(e.into()),
        }
    };

    let m = targets.nrows();
    let rows: Vec<(Vec<f64>, TargetStatus)> = if options.parallel {
        (0..m).into_par_iter().map(solve).collect::<InterpolateResult<_>>()?
    } else {
        (0..m).map(solve).collect::<InterpolateResult<_>>()?
    };

    let mut coords = Vec::with_capacity(m * k);
    let mut status = Vec::with_capacity(m);
    for (b, s) in rows {
        coords.extend(b);
        status.push(s);
    }

    Ok(BarycentricBatch {
        coords,
        status,
        location,
    })
}

/// Apply barycentric weights to sample values and uncertainties.
///
/// value = sum(b_i * v_i), uncertainty = sqrt(sum(b_i^2 * u_i^2)).
/// `values` and `uncertainties` must cover every vertex index in `batch`.
pub(crate) fn weigh_batch(
    batch: &BarycentricBatch,
    values: &[f64],
    uncertainties: &[f64],
) -> UncertainValues {
    let m = batch.len();
    let mut out_values = Vec::with_capacity(m);
    let mut out_uncertainties = Vec::with_capacity(m);

    for i in 0..m {
        let weights = batch
            .coords_of(i)
            .zip(batch.location.vertices(i))
            .filter(|_| batch.status[i].is_interpolated());
        let Some((b, verts)) = weights else {
            out_values.push(f64::NAN);
            out_uncertainties.push(f64::NAN);
            continue;
        };

        let mut value = 0.0;
        let mut variance = 0.0;
        for (&w, &v) in b.iter().zip(verts) {
            value += w * values[v];
            let wu = w * uncertainties[v];
            variance += wu * wu;
        }
        out_values.push(value);
        out_uncertainties.push(variance.sqrt());
    }

    UncertainValues {
        values: out_values,
        uncertainties: out_uncertainties,
        status: batch.status.clone(),
    }
}

/// Evaluate a query batch against an existing triangulation.
///
/// `values` and `uncertainties` must have one entry per sample point; the
/// remaining sample-set checks are those of [`validate_sample_set`].
pub fn evaluate_uncertain_impl<P: TriangulationProvider>(
    provider: &P,
    tri: &P::Triangulation,
    points: MatRef<'_, f64>,
    values: &[f64],
    uncertainties: &[f64],
    targets: MatRef<'_, f64>,
    options: &UncertainInterpOptions,
) -> InterpolateResult<UncertainValues> {
    let n = points.nrows();
    for (len, context) in [
        (values.len(), "evaluate (values)"),
        (uncertainties.len(), "evaluate (uncertainties)"),
    ] {
        if len != n {
            return Err(InterpolateError::ShapeMismatch {
                expected: n,
                actual: len,
                context: context.to_string(),
            });
        }
    }

    let batch = barycentric_batch_impl(provider, tri, points, targets, options)?;
    let result = weigh_batch(&batch, values, uncertainties);

    let outside = count_status(&result.status, TargetStatus::OutsideHull);
    let degenerate = count_status(&result.status, TargetStatus::DegenerateSimplex);
    log::debug!(
        "uncertain interpolation: {} targets, {outside} outside hull, {degenerate} degenerate",
        result.len()
    );
    Ok(result)
}

fn count_status(status: &[TargetStatus], which: TargetStatus) -> usize {
    status.iter().filter(|&&s| s == which).count()
}

/// Validate, triangulate and evaluate in one call.
pub fn interpolate_uncertain_impl<P: TriangulationProvider>(
    provider: &P,
    points: MatRef<'_, f64>,
    values: &[f64],
    uncertainties: &[f64],
    targets: MatRef<'_, f64>,
    options: &UncertainInterpOptions,
) -> InterpolateResult<UncertainValues> {
    validate_sample_set(points, values, uncertainties)?;
    validate_targets(targets, points.ncols())?;
    let tri = provider.build(points)?;
    evaluate_uncertain_impl(provider, &tri, points, values, uncertainties, targets, options)
}
