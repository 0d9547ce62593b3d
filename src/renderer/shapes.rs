//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in tank pixel coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, Vec2::splat(radius), color, segments)
}

/// Generate vertices for a filled axis-aligned ellipse
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());
        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Generate vertices for a single triangle
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Generate vertices for a rectangle shaded from `top` to `bottom`
pub fn vertical_gradient(min: Vec2, max: Vec2, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, top),
        Vertex::new(max.x, min.y, top),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(max.x, min.y, top),
        Vertex::new(max.x, max.y, bottom),
    ]
}

/// Generate vertices for a rectangle shaded from its top-left corner
/// (`from`) to its bottom-right corner (`to`)
pub fn diagonal_gradient(min: Vec2, max: Vec2, from: [f32; 4], to: [f32; 4]) -> Vec<Vertex> {
    let mid = lerp_color(from, to, 0.5);
    vec![
        Vertex::new(min.x, min.y, from),
        Vertex::new(max.x, min.y, mid),
        Vertex::new(min.x, max.y, mid),
        Vertex::new(min.x, max.y, mid),
        Vertex::new(max.x, min.y, mid),
        Vertex::new(max.x, max.y, to),
    ]
}

/// Generate vertices for a tapered strand rising from `base`.
///
/// `sway(t)` gives the horizontal offset at height fraction `t` (0 at the
/// base, 1 at the tip). The tip is rounded off with a half circle.
pub fn strand(
    base: Vec2,
    width: f32,
    height: f32,
    color: [f32; 4],
    segments: u32,
    sway: impl Fn(f32) -> f32,
) -> Vec<Vertex> {
    let segments = segments.max(1);
    let mut vertices = Vec::with_capacity((segments * 6) as usize + 24);
    let half = width / 2.0;

    for i in 0..segments {
        let t1 = i as f32 / segments as f32;
        let t2 = (i + 1) as f32 / segments as f32;

        let c1 = Vec2::new(base.x + sway(t1), base.y - height * t1);
        let c2 = Vec2::new(base.x + sway(t2), base.y - height * t2);

        let l1 = c1 - Vec2::X * half;
        let r1 = c1 + Vec2::X * half;
        let l2 = c2 - Vec2::X * half;
        let r2 = c2 + Vec2::X * half;

        vertices.push(Vertex::new(l1.x, l1.y, color));
        vertices.push(Vertex::new(r1.x, r1.y, color));
        vertices.push(Vertex::new(l2.x, l2.y, color));

        vertices.push(Vertex::new(l2.x, l2.y, color));
        vertices.push(Vertex::new(r1.x, r1.y, color));
        vertices.push(Vertex::new(r2.x, r2.y, color));
    }

    // Rounded tip
    let tip = Vec2::new(base.x + sway(1.0), base.y - height);
    for i in 0..8 {
        let theta1 = PI + (i as f32 / 8.0) * PI;
        let theta2 = PI + ((i + 1) as f32 / 8.0) * PI;
        vertices.push(Vertex::new(tip.x, tip.y, color));
        vertices.push(Vertex::new(
            tip.x + half * theta1.cos(),
            tip.y + half * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            tip.x + half * theta2.cos(),
            tip.y + half * theta2.sin(),
            color,
        ));
    }

    vertices
}

fn lerp_color(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_circle_vertex_count_and_extent() {
        let center = Vec2::new(50.0, 40.0);
        let verts = circle(center, 10.0, WHITE, 16);
        assert_eq!(verts.len(), 16 * 3);
        for v in &verts {
            let p = Vec2::from(v.position);
            assert!(p.distance(center) <= 10.0 + 1e-3);
        }
    }

    #[test]
    fn test_ellipse_respects_radii() {
        let verts = ellipse(Vec2::ZERO, Vec2::new(20.0, 5.0), WHITE, 24);
        let max_x = verts.iter().map(|v| v.position[0].abs()).fold(0.0, f32::max);
        let max_y = verts.iter().map(|v| v.position[1].abs()).fold(0.0, f32::max);
        assert!((max_x - 20.0).abs() < 1e-3);
        assert!(max_y <= 5.0 + 1e-3);
    }

    #[test]
    fn test_degenerate_segment_counts() {
        assert_eq!(circle(Vec2::ZERO, 1.0, WHITE, 0).len(), 9);
        assert_eq!(ring(Vec2::ZERO, 1.0, 2.0, WHITE, 1).len(), 18);
    }

    #[test]
    fn test_vertical_gradient_colors() {
        let top = [1.0, 0.0, 0.0, 1.0];
        let bottom = [0.0, 0.0, 1.0, 1.0];
        let verts = vertical_gradient(Vec2::ZERO, Vec2::new(10.0, 10.0), top, bottom);
        assert_eq!(verts.len(), 6);
        for v in &verts {
            let expected = if v.position[1] == 0.0 { top } else { bottom };
            assert_eq!(v.color, expected);
        }
    }

    #[test]
    fn test_strand_rises_from_base() {
        let base = Vec2::new(100.0, 500.0);
        let verts = strand(base, 10.0, 120.0, WHITE, 6, |t| t * 5.0);
        assert_eq!(verts.len(), 6 * 6 + 8 * 3);
        let min_y = verts.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        assert!((min_y - (500.0 - 120.0 - 5.0)).abs() < 1e-3);
        assert!(verts.iter().all(|v| v.position[1] <= 500.0));
    }
}
