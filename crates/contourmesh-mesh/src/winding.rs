//! Triangle orientation.

use contourmesh_core::Layout;
use glam::DVec2;

/// Returns twice the signed area of a triangle (shoelace formula).
pub fn signed_area(points: [DVec2; 3]) -> f64 {
    let [a, b, c] = points;
    (b - a).perp_dot(c - a)
}

/// Returns true if the triangle has the orientation required by `layout`.
///
/// Flat layouts require a non-positive signed area, pseudo-3D layouts a
/// non-negative one.
pub fn is_normalized(points: [DVec2; 3], layout: Layout) -> bool {
    let area = signed_area(points);
    match layout {
        Layout::Flat => area <= 0.0,
        Layout::Pseudo3d => area >= 0.0,
    }
}

/// Orients a triangle for `layout`, swapping its second and third vertices when
/// needed. `points` are the screen positions of `triangle`'s vertices.
pub fn normalize(triangle: [u32; 3], points: [DVec2; 3], layout: Layout) -> ([u32; 3], [DVec2; 3]) {
    if is_normalized(points, layout) {
        (triangle, points)
    } else {
        let [a, b, c] = triangle;
        let [pa, pb, pc] = points;
        ([a, c, b], [pa, pc, pb])
    }
}
