//! Generic Delaunay triangulation implementation.
//!
//! Bowyer-Watson incremental algorithm in d dimensions, and visibility-walk
//! point location with a linear-scan fallback.

use crate::spatial::error::{SpatialError, SpatialResult};
use crate::spatial::impl_generic::barycentric::{to_barycentric, volume_ratio};
use crate::spatial::traits::delaunay::{Delaunay, LocateTolerance};
use crate::spatial::validation::{validate_matching_dims, validate_min_points, validate_points};
use faer::linalg::solvers::Solve;
use faer::{Mat, MatRef};
use rayon::prelude::*;
use std::collections::HashMap;

/// Distance of the super-simplex from the data, in bounding-box extents.
const SUPER_SIMPLEX_SCALE: f64 = 100.0;

/// Relative slack of the circumsphere conflict test.
const CIRCUMSPHERE_EPS: f64 = 1e-12;

/// A simplex under construction with its cached circumsphere.
struct Cell {
    vertices: Vec<usize>,
    /// Circumcentre and squared radius; `None` for a flat cell.
    sphere: Option<(Vec<f64>, f64)>,
}

impl Cell {
    fn new(vertices: Vec<usize>, coords: &[f64], d: usize, degenerate_tol: f64) -> Self {
        let sphere = circumsphere(&vertices, coords, d, degenerate_tol);
        Self { vertices, sphere }
    }

    fn in_circumsphere(&self, p: &[f64]) -> bool {
        match &self.sphere {
            Some((center, radius_sq)) => {
                let d_sq: f64 = center
                    .iter()
                    .zip(p)
                    .map(|(c, x)| (x - c) * (x - c))
                    .sum();
                d_sq < radius_sq * (1.0 - CIRCUMSPHERE_EPS)
            }
            None => false,
        }
    }
}

#[inline]
fn coord(points: &[f64], d: usize, i: usize) -> &[f64] {
    &points[i * d..(i + 1) * d]
}

/// Circumsphere of the simplex `vertices` in the flat coordinate table.
///
/// With `e_i = v_i - v_0`, the centre offset c solves `2 e_i . c = |e_i|^2`.
fn circumsphere(
    vertices: &[usize],
    coords: &[f64],
    d: usize,
    degenerate_tol: f64,
) -> Option<(Vec<f64>, f64)> {
    let v0 = coord(coords, d, vertices[0]);
    let edges = Mat::from_fn(d, d, |row, col| {
        coord(coords, d, vertices[row + 1])[col] - v0[col]
    });
    if !(volume_ratio(edges.as_ref().transpose()) >= degenerate_tol) {
        return None;
    }

    let lhs = Mat::from_fn(d, d, |row, col| 2.0 * edges[(row, col)]);
    let rhs = Mat::from_fn(d, 1, |row, _| {
        (0..d).map(|j| edges[(row, j)] * edges[(row, j)]).sum::<f64>()
    });
    let offset = lhs.partial_piv_lu().solve(&rhs);

    let center: Vec<f64> = (0..d).map(|j| v0[j] + offset[(j, 0)]).collect();
    let radius_sq = (0..d).map(|j| offset[(j, 0)] * offset[(j, 0)]).sum();
    if !center.iter().all(|c| c.is_finite()) {
        return None;
    }
    Some((center, radius_sq))
}

/// Sorted facet of `vertices` opposite vertex `k`.
fn facet(vertices: &[usize], k: usize) -> Vec<usize> {
    let mut f: Vec<usize> = vertices
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != k)
        .map(|(_, &v)| v)
        .collect();
    f.sort_unstable();
    f
}

/// Append the vertices of a super-simplex enclosing all `n` points.
///
/// The super-simplex is `{x : x_j >= base_j, sum_j (x_j - base_j) <= side}`
/// with the bounding box strictly inside it.
fn push_super_simplex(coords: &mut Vec<f64>, n: usize, d: usize) {
    let mut lo = vec![f64::INFINITY; d];
    let mut hi = vec![f64::NEG_INFINITY; d];
    for i in 0..n {
        for j in 0..d {
            let x = coords[i * d + j];
            lo[j] = lo[j].min(x);
            hi[j] = hi[j].max(x);
        }
    }

    let extent = (0..d).map(|j| hi[j] - lo[j]).fold(0.0, f64::max);
    let extent = if extent > 0.0 { extent } else { 1.0 };
    let margin = SUPER_SIMPLEX_SCALE * extent;
    let side = 2.0 * d as f64 * (extent + margin);

    let base: Vec<f64> = lo.iter().map(|l| l - margin).collect();
    coords.extend_from_slice(&base);
    for k in 0..d {
        let mut v = base.clone();
        v[k] += side;
        coords.extend_from_slice(&v);
    }
}

/// Compute the Delaunay triangulation using the Bowyer-Watson algorithm.
///
/// Points are inserted one at a time into a super-simplex; each insertion
/// removes the simplices whose circumsphere contains the new point and cones
/// the boundary of that cavity to it. Simplices touching the super-simplex
/// are dropped at the end.
///
/// Complexity: O(n^2) for this straightforward cavity search.
pub fn delaunay_impl(
    points: MatRef<'_, f64>,
    tolerance: LocateTolerance,
) -> SpatialResult<Delaunay> {
    validate_points(points, "delaunay")?;
    let n = points.nrows();
    let d = points.ncols();
    validate_min_points(n, d)?;

    let mut coords: Vec<f64> = Vec::with_capacity((n + d + 1) * d);
    for i in 0..n {
        for j in 0..d {
            coords.push(points[(i, j)]);
        }
    }
    push_super_simplex(&mut coords, n, d);

    // Start with the super-simplex (virtual points n..=n+d)
    let mut cells = vec![Cell::new(
        (n..=n + d).collect(),
        &coords,
        d,
        tolerance.degenerate_tol,
    )];
    let mut skipped = 0usize;

    for i in 0..n {
        let p = coord(&coords, d, i);

        let bad: Vec<usize> = cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.in_circumsphere(p))
            .map(|(ci, _)| ci)
            .collect();

        if bad.is_empty() {
            // Only a (near-)duplicate of an existing vertex has an empty cavity
            log::trace!("delaunay: skipping duplicate point {i}");
            skipped += 1;
            continue;
        }

        // Cavity boundary: facets owned by exactly one bad cell
        let mut facet_count: HashMap<Vec<usize>, usize> = HashMap::new();
        for &ci in &bad {
            for k in 0..=d {
                *facet_count
                    .entry(facet(&cells[ci].vertices, k))
                    .or_insert(0) += 1;
            }
        }
        let mut boundary: Vec<Vec<usize>> = Vec::new();
        for &ci in &bad {
            for k in 0..=d {
                let f = facet(&cells[ci].vertices, k);
                if facet_count.get(&f) == Some(&1) {
                    boundary.push(f);
                }
            }
        }

        let mut is_bad = vec![false; cells.len()];
        for &ci in &bad {
            is_bad[ci] = true;
        }
        let mut new_cells: Vec<Cell> = cells
            .into_iter()
            .zip(is_bad)
            .filter(|(_, b)| !b)
            .map(|(c, _)| c)
            .collect();

        for mut f in boundary {
            f.push(i);
            new_cells.push(Cell::new(f, &coords, d, tolerance.degenerate_tol));
        }
        cells = new_cells;
    }

    // Remove simplices containing super-simplex vertices, then flat ones
    let mut flat = 0usize;
    let final_cells: Vec<Vec<usize>> = cells
        .into_iter()
        .filter(|c| c.vertices.iter().all(|&v| v < n))
        .filter(|c| {
            let keep = c.sphere.is_some();
            if !keep {
                flat += 1;
            }
            keep
        })
        .map(|c| c.vertices)
        .collect();

    if flat > 0 {
        log::warn!("delaunay: discarded {flat} flat simplices");
    }

    let n_simplices = final_cells.len();
    if n_simplices == 0 {
        return Err(SpatialError::InsufficientPoints {
            dim: d,
            count: n,
            reason: "points are affinely degenerate (no full-dimensional simplex)".to_string(),
        });
    }

    let k = d + 1;
    let simplices: Vec<usize> = final_cells.iter().flatten().copied().collect();

    // Build neighbor relationships
    let mut facet_to_simplex: HashMap<Vec<usize>, Vec<usize>> = HashMap::new();
    for (s, verts) in final_cells.iter().enumerate() {
        for j in 0..k {
            facet_to_simplex.entry(facet(verts, j)).or_default().push(s);
        }
    }

    let mut neighbors: Vec<Option<usize>> = vec![None; n_simplices * k];
    for (s, verts) in final_cells.iter().enumerate() {
        for j in 0..k {
            if let Some(owners) = facet_to_simplex.get(&facet(verts, j)) {
                neighbors[s * k + j] = owners.iter().copied().find(|&o| o != s);
            }
        }
    }

    log::debug!(
        "delaunay: {n} points in {d}-D -> {n_simplices} simplices ({skipped} duplicates skipped)"
    );

    Ok(Delaunay {
        points: Mat::from_fn(n, d, |i, j| points[(i, j)]),
        simplices,
        neighbors,
    })
}

/// Axis-aligned bounds of every simplex, flattened [n_simplices, 2d].
fn simplex_bounds(tri: &Delaunay) -> Vec<f64> {
    let d = tri.ndim();
    let mut bounds = Vec::with_capacity(tri.n_simplices() * 2 * d);
    for verts in tri.simplices.chunks_exact(d + 1) {
        for j in 0..d {
            let (lo, hi) = verts.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                let x = tri.points[(v, j)];
                (lo.min(x), hi.max(x))
            });
            bounds.push(lo);
            bounds.push(hi);
        }
    }
    bounds
}

/// Barycentric coordinates of `p` in simplex `s`, `None` if degenerate.
fn simplex_barycentric(
    tri: &Delaunay,
    s: usize,
    p: &[f64],
    tolerance: LocateTolerance,
) -> Option<Vec<f64>> {
    let coords = tri.simplex_coords(s)?;
    to_barycentric(p, coords.as_ref(), tolerance.degenerate_tol).ok()
}

/// Walk from simplex 0 towards `p`, stepping across the facet opposite the
/// most negative barycentric coordinate.
fn walk(tri: &Delaunay, p: &[f64], tolerance: LocateTolerance) -> Option<usize> {
    let mut s = 0;
    for _ in 0..tri.n_simplices() {
        let b = simplex_barycentric(tri, s, p, tolerance)?;
        let (k, &min) = b
            .iter()
            .enumerate()
            .min_by(|x, y| x.1.total_cmp(y.1))?;
        if min >= -tolerance.inside_tol {
            return Some(s);
        }
        s = tri.neighbors_of(s)?[k]?;
    }
    None
}

fn scan(tri: &Delaunay, bounds: &[f64], p: &[f64], tolerance: LocateTolerance) -> Option<usize> {
    let d = tri.ndim();
    (0..tri.n_simplices()).find(|&s| {
        let b = &bounds[s * 2 * d..(s + 1) * 2 * d];
        let in_box = (0..d).all(|j| {
            let (lo, hi) = (b[2 * j], b[2 * j + 1]);
            let slack = tolerance.inside_tol * (1.0 + (hi - lo));
            p[j] >= lo - slack && p[j] <= hi + slack
        });
        in_box
            && simplex_barycentric(tri, s, p, tolerance)
                .is_some_and(|w| w.iter().all(|&x| x >= -tolerance.inside_tol))
    })
}

fn locate_point(
    tri: &Delaunay,
    bounds: &[f64],
    p: &[f64],
    tolerance: LocateTolerance,
) -> Option<usize> {
    if !p.iter().all(|x| x.is_finite()) {
        return None;
    }
    walk(tri, p, tolerance).or_else(|| {
        log::trace!("delaunay: walk failed for {p:?}, scanning");
        scan(tri, bounds, p, tolerance)
    })
}

/// Find the simplex containing each query point.
///
/// Returns one entry per row of `query`: the simplex index, or `None` for
/// points outside the convex hull. Non-finite query points are never found.
pub fn delaunay_locate_impl(
    tri: &Delaunay,
    query: MatRef<'_, f64>,
    tolerance: LocateTolerance,
    parallel: bool,
) -> SpatialResult<Vec<Option<usize>>> {
    validate_matching_dims(tri.ndim(), query.ncols(), "delaunay_locate (query dimensions)")?;

    let d = tri.ndim();
    let bounds = simplex_bounds(tri);
    let locate_row = |i: usize| {
        let p: Vec<f64> = (0..d).map(|j| query[(i, j)]).collect();
        locate_point(tri, &bounds, &p, tolerance)
    };

    let m = query.nrows();
    Ok(if parallel {
        (0..m).into_par_iter().map(locate_row).collect()
    } else {
        (0..m).map(locate_row).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::impl_generic::barycentric::edge_matrix;
    use faer::mat;

    fn tol() -> LocateTolerance {
        LocateTolerance::default()
    }

    /// Sum of simplex volumes: |det T| / d!.
    fn total_volume(tri: &Delaunay) -> f64 {
        let d = tri.ndim();
        let factorial: f64 = (1..=d).map(|i| i as f64).product();
        (0..tri.n_simplices())
            .map(|s| {
                let coords = tri.simplex_coords(s).unwrap();
                edge_matrix(coords.as_ref()).determinant().abs() / factorial
            })
            .sum()
    }

    #[test]
    fn test_delaunay_square() {
        let points = mat![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let tri = delaunay_impl(points.as_ref(), tol()).unwrap();

        // Square should have 2 triangles
        assert_eq!(tri.n_simplices(), 2);
        assert_eq!(tri.simplices.len(), 6);
        assert!((total_volume(&tri) - 1.0).abs() < 1e-12);

        // The two triangles share exactly one facet
        let shared = tri.neighbors.iter().filter(|n| n.is_some()).count();
        assert_eq!(shared, 2);
    }

    #[test]
    fn test_delaunay_1d_segments() {
        let points = mat![[3.0], [0.0], [2.0], [1.0]];
        let tri = delaunay_impl(points.as_ref(), tol()).unwrap();

        assert_eq!(tri.n_simplices(), 3);
        assert!((total_volume(&tri) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_delaunay_3d_volume() {
        let points = mat![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.2, 0.25, 0.3],
        ];
        let tri = delaunay_impl(points.as_ref(), tol()).unwrap();

        // Interior point splits the tetrahedron into 4
        assert_eq!(tri.n_simplices(), 4);
        assert!((total_volume(&tri) - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_delaunay_scattered_2d_covers_hull() {
        let points = mat![
            [0.0, 0.0],
            [4.0, 0.0],
            [4.0, 3.0],
            [0.0, 3.0],
            [1.0, 1.0],
            [2.5, 0.7],
            [3.1, 2.2],
            [1.4, 2.1],
            [2.0, 1.5],
        ];
        let tri = delaunay_impl(points.as_ref(), tol()).unwrap();
        assert!((total_volume(&tri) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_delaunay_collinear_is_insufficient() {
        let points = mat![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]];
        let result = delaunay_impl(points.as_ref(), tol());
        assert!(matches!(
            result,
            Err(SpatialError::InsufficientPoints { dim: 2, count: 4, .. })
        ));
    }

    #[test]
    fn test_delaunay_too_few_points() {
        let points = mat![[0.0, 0.0], [1.0, 0.0]];
        let result = delaunay_impl(points.as_ref(), tol());
        assert!(matches!(result, Err(SpatialError::InsufficientPoints { .. })));
    }

    #[test]
    fn test_delaunay_duplicate_point_skipped() {
        let points = mat![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 0.0]];
        let tri = delaunay_impl(points.as_ref(), tol()).unwrap();
        assert_eq!(tri.n_simplices(), 1);
        assert!(tri.simplices.iter().all(|&v| v != 3));
    }

    #[test]
    fn test_delaunay_flat_cone_discarded() {
        // The last point sits on the shared edge (0,0)-(2,0), so close to
        // (0,0) that it conflicts with the upper triangle only. Coning the
        // cavity then produces a flat cell on that edge.
        let points = mat![[0.0, 0.0], [2.0, 0.0], [1.0, 1.0], [1.0, -1.5], [5.4e-13, 0.0]];
        let tri = delaunay_impl(points.as_ref(), tol()).unwrap();

        assert_eq!(tri.n_simplices(), 3);
        for s in 0..tri.n_simplices() {
            let coords = tri.simplex_coords(s).unwrap();
            let ratio = volume_ratio(edge_matrix(coords.as_ref()).as_ref());
            assert!(ratio >= tol().degenerate_tol, "simplex {s} is flat");
        }
        // The diamond is still covered without holes.
        assert!((total_volume(&tri) - 2.5).abs() < 1e-12);

        let query = mat![[1.0, -0.5], [1.0, 0.5], [0.5, 0.0], [1.5, -0.01]];
        for parallel in [false, true] {
            let found = delaunay_locate_impl(&tri, query.as_ref(), tol(), parallel).unwrap();
            assert!(found.iter().all(Option::is_some), "{found:?}");
        }
    }

    #[test]
    fn test_delaunay_locate() {
        let points = mat![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let tri = delaunay_impl(points.as_ref(), tol()).unwrap();

        let query = mat![[0.5, 0.5], [0.9, 0.1], [0.1, 0.9], [2.0, 2.0], [-0.1, 0.5]];
        for parallel in [false, true] {
            let found = delaunay_locate_impl(&tri, query.as_ref(), tol(), parallel).unwrap();
            assert_eq!(found.len(), 5);
            assert!(found[0].is_some());
            assert!(found[1].is_some());
            assert!(found[2].is_some());
            assert_eq!(found[3], None);
            assert_eq!(found[4], None);
        }
    }

    #[test]
    fn test_delaunay_locate_returns_containing_simplex() {
        let points = mat![
            [0.0, 0.0],
            [4.0, 0.0],
            [4.0, 3.0],
            [0.0, 3.0],
            [1.0, 1.0],
            [2.5, 0.7],
            [3.1, 2.2],
        ];
        let tri = delaunay_impl(points.as_ref(), tol()).unwrap();
        let query = mat![[0.3, 0.2], [3.9, 2.9], [2.0, 1.0], [1.0, 2.5]];
        let found = delaunay_locate_impl(&tri, query.as_ref(), tol(), false).unwrap();

        for (i, s) in found.iter().enumerate() {
            let s = s.expect("inside point must be located");
            let coords = tri.simplex_coords(s).unwrap();
            let p = [query[(i, 0)], query[(i, 1)]];
            let b = to_barycentric(&p, coords.as_ref(), 1e-12).unwrap();
            assert!(b.iter().all(|&w| w >= -1e-10), "target {i}: {b:?}");
        }
    }

    #[test]
    fn test_delaunay_locate_non_finite_and_dims() {
        let points = mat![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let tri = delaunay_impl(points.as_ref(), tol()).unwrap();

        let query = mat![[f64::NAN, 0.1]];
        let found = delaunay_locate_impl(&tri, query.as_ref(), tol(), false).unwrap();
        assert_eq!(found, vec![None]);

        let wrong = mat![[0.1, 0.1, 0.1]];
        let result = delaunay_locate_impl(&tri, wrong.as_ref(), tol(), false);
        assert!(matches!(result, Err(SpatialError::DimensionMismatch { .. })));
    }
}
