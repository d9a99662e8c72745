//! Planar geometry helpers for ground collision
//!
//! Road collision works in the (x, z) ground plane.

use glam::Vec2;

/// Signed area of the parallelogram spanned by (b - a) and (c - a)
#[inline]
fn edge_sign(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
}

/// Check if point `p` lies inside (or on an edge of) triangle `a, b, c`
///
/// Winding order does not matter.
pub fn is_inside_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = edge_sign(p, a, b);
    let d2 = edge_sign(p, b, c);
    let d3 = edge_sign(p, c, a);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

    !(has_neg && has_pos)
}
