//! Per-triangle affine color ramps.
//!
//! The three vertex values of a triangle, normalized through the color scale,
//! define a plane `t = A·x + B·y + C` over screen space. A linear gradient whose
//! ramp runs from the point where `t = 0` to the point where `t = 1` along
//! `(A, B)` reproduces that plane exactly inside the triangle.

use contourmesh_render::{ColorScale, Fill, LinearGradient};
use glam::{DVec2, DVec3};

/// Relative values closer than this are treated as equal.
pub const FLAT_EPSILON: f64 = 1e-4;

/// Reduces an augmented matrix to reduced row echelon form in place.
///
/// Uses partial pivoting. A column with no non-zero entry at or below the
/// diagonal is cleared and reported as singular. Returns one flag per column,
/// true where the column was singular.
pub fn reduced_row_echelon<const R: usize, const C: usize>(m: &mut [[f64; C]; R]) -> [bool; C] {
    let mut singular = [false; C];

    for col in 0..C.min(R) {
        let mut best_row = None;
        let mut best_val = 0.0;
        for (row, values) in m.iter().enumerate().skip(col) {
            if values[col].abs() > best_val {
                best_row = Some(row);
                best_val = values[col].abs();
            }
        }

        let Some(best_row) = best_row else {
            for row in m.iter_mut() {
                row[col] = 0.0;
            }
            singular[col] = true;
            continue;
        };

        m.swap(col, best_row);

        let pivot_row = m[col];
        for (row, values) in m.iter_mut().enumerate() {
            if row == col {
                continue;
            }
            let k = values[col] / pivot_row[col];
            for (value, pivot) in values[col..].iter_mut().zip(&pivot_row[col..]) {
                *value -= k * pivot;
            }
        }

        let k = m[col][col];
        for value in &mut m[col][col..] {
            *value /= k;
        }

        for (row, values) in m.iter_mut().enumerate() {
            values[col] = if row == col { 1.0 } else { 0.0 };
        }
    }

    singular
}

/// Solves `A·x + B·y + C = t` through three points.
///
/// Returns `(A, B, C)`. Coefficients whose column is singular are zero.
pub fn solve_plane(points: [DVec2; 3], values: [f64; 3]) -> DVec3 {
    let mut m = [
        [points[0].x, points[0].y, 1.0, values[0]],
        [points[1].x, points[1].y, 1.0, values[1]],
        [points[2].x, points[2].y, 1.0, values[2]],
    ];
    let singular = reduced_row_echelon(&mut m);
    let coefficient = |i: usize| if singular[i] { 0.0 } else { m[i][3] };
    DVec3::new(coefficient(0), coefficient(1), coefficient(2))
}

/// Places the gradient endpoints for a plane `(A, B, C)`.
///
/// Each endpoint is `(k·A, k·B)` with `k = (t − C) / (A² + B²)` for `t = 0`
/// and `t = 1`. Returns `None` when the plane has no slope.
pub fn gradient_endpoints(plane: DVec3) -> Option<(DVec2, DVec2)> {
    let slope = plane.truncate();
    let norm = slope.length_squared();
    if norm == 0.0 || !norm.is_finite() {
        return None;
    }
    let endpoint = |t: f64| slope * ((t - plane.z) / norm);
    let (start, end) = (endpoint(0.0), endpoint(1.0));
    (start.is_finite() && end.is_finite()).then_some((start, end))
}

/// Returns true if three relative values are all within [`FLAT_EPSILON`].
pub fn is_flat(relative: [f64; 3]) -> bool {
    (relative[0] - relative[1]).abs() < FLAT_EPSILON
        && (relative[0] - relative[2]).abs() < FLAT_EPSILON
}

/// Computes the fill of a triangle from its raw vertex values and screen points.
///
/// Nearly equal values, or a rank-deficient system, give a solid fill with the
/// color of the mean raw value. Otherwise the fill is a linear gradient using
/// the scale's stops verbatim.
pub fn triangle_fill(values: [f64; 3], points: [DVec2; 3], scale: &dyn ColorScale) -> Fill {
    let relative = values.map(|v| scale.to_relative(v));
    let solid = || Fill::Solid(scale.to_color((values[0] + values[1] + values[2]) / 3.0));

    if is_flat(relative) {
        return solid();
    }

    match gradient_endpoints(solve_plane(points, relative)) {
        Some((start, end)) => {
            Fill::LinearGradient(LinearGradient::new(start, end, scale.stops().to_vec()))
        }
        None => solid(),
    }
}
