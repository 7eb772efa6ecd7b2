//! CPU tessellation of the built-in shapes into renderer vertex lists.
//!
//! Everything here is pure geometry in model space; color and state are
//! applied by `Graphics`.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::backend::Primitive;

/// Angular step used when sampling arcs (radians).
pub const ARC_STEP: f32 = 0.02;

const MIN_SEGMENTS: usize = 16;
const MAX_SEGMENTS: usize = 512;

/// Segment count for a curve of the given radius, about one per 3 px of
/// circumference.
pub fn segments_for(radius: f32) -> usize {
    let r = radius.abs();
    if !r.is_finite() {
        return MIN_SEGMENTS;
    }
    ((r * TAU / 3.0).ceil() as usize).clamp(MIN_SEGMENTS, MAX_SEGMENTS)
}

/// Points on an ellipse, counter-clockwise from angle 0, not closed.
pub fn ellipse_outline(cx: f32, cy: f32, rx: f32, ry: f32) -> Vec<Vec3> {
    let n = segments_for(rx.abs().max(ry.abs()));
    (0..n)
        .map(|i| {
            let a = i as f32 / n as f32 * TAU;
            Vec3::new(cx + a.cos() * rx, cy + a.sin() * ry, 0.0)
        })
        .collect()
}

/// Triangle-fan vertices: center, then the outline closed back on itself.
pub fn ellipse_fan(cx: f32, cy: f32, rx: f32, ry: f32) -> Vec<Vec3> {
    let outline = ellipse_outline(cx, cy, rx, ry);
    let mut fan = Vec::with_capacity(outline.len() + 2);
    fan.push(Vec3::new(cx, cy, 0.0));
    fan.extend_from_slice(&outline);
    if let Some(&first) = outline.first() {
        fan.push(first);
    }
    fan
}

/// Points along an elliptical arc from `start` to `end` (radians), inclusive.
///
/// `end < start` yields nothing.
pub fn arc_points(cx: f32, cy: f32, rx: f32, ry: f32, start: f32, end: f32) -> Vec<Vec3> {
    if !start.is_finite() || !end.is_finite() || end < start {
        return Vec::new();
    }

    let steps = (((end - start) / ARC_STEP).floor() as usize).min(MAX_SEGMENTS * 8);
    let mut out: Vec<Vec3> = (0..=steps)
        .map(|i| {
            let a = start + i as f32 * ARC_STEP;
            Vec3::new(cx + a.cos() * rx, cy + a.sin() * ry, 0.0)
        })
        .collect();

    // Land exactly on `end` when the step does not divide the sweep.
    let last = start + steps as f32 * ARC_STEP;
    if end - last > f32::EPSILON {
        out.push(Vec3::new(cx + end.cos() * rx, cy + end.sin() * ry, 0.0));
    }
    out
}

/// Quad covering a line segment of the given width in the XY plane.
pub fn wide_segment(a: Vec3, b: Vec3, width: f32) -> [Vec3; 4] {
    let dir = b - a;
    let normal = Vec3::new(-dir.y, dir.x, 0.0)
        .try_normalize()
        .unwrap_or(Vec3::X)
        * (width * 0.5);
    [a + normal, b + normal, b - normal, a - normal]
}

/// Square of side `size` centered on `p` in the XY plane.
pub fn point_square(p: Vec3, size: f32) -> [Vec3; 4] {
    let h = size * 0.5;
    [
        p + Vec3::new(-h, -h, 0.0),
        p + Vec3::new(h, -h, 0.0),
        p + Vec3::new(h, h, 0.0),
        p + Vec3::new(-h, h, 0.0),
    ]
}

/// Outline of a polyline at the given stroke weight.
///
/// Weight 1 (or less) uses hairline strips; wider strokes become one quad per
/// segment.
pub fn stroke_path(points: &[Vec3], closed: bool, weight: f32) -> (Primitive, Vec<Vec3>) {
    if weight <= 1.0 {
        let primitive = if closed { Primitive::LineLoop } else { Primitive::LineStrip };
        return (primitive, points.to_vec());
    }

    let mut quads = Vec::with_capacity(points.len() * 4);
    for pair in points.windows(2) {
        quads.extend_from_slice(&wide_segment(pair[0], pair[1], weight));
    }
    if closed && points.len() > 2 {
        if let (Some(&last), Some(&first)) = (points.last(), points.first()) {
            quads.extend_from_slice(&wide_segment(last, first, weight));
        }
    }
    (Primitive::Quads, quads)
}

/// Faces of an axis-aligned box spanning `[-hw, hw] × [-hh, hh] × [-hd, hd]`,
/// as six quads.
pub fn box_faces(hw: f32, hh: f32, hd: f32) -> [Vec3; 24] {
    let v = |x: f32, y: f32, z: f32| Vec3::new(x * hw, y * hh, z * hd);
    [
        // front
        v(1.0, 1.0, 1.0), v(-1.0, 1.0, 1.0), v(-1.0, -1.0, 1.0), v(1.0, -1.0, 1.0),
        // left
        v(-1.0, 1.0, 1.0), v(-1.0, 1.0, -1.0), v(-1.0, -1.0, -1.0), v(-1.0, -1.0, 1.0),
        // back
        v(1.0, 1.0, -1.0), v(-1.0, 1.0, -1.0), v(-1.0, -1.0, -1.0), v(1.0, -1.0, -1.0),
        // right
        v(1.0, 1.0, -1.0), v(1.0, 1.0, 1.0), v(1.0, -1.0, 1.0), v(1.0, -1.0, -1.0),
        // top
        v(1.0, 1.0, 1.0), v(-1.0, 1.0, 1.0), v(-1.0, 1.0, -1.0), v(1.0, 1.0, -1.0),
        // bottom
        v(1.0, -1.0, 1.0), v(-1.0, -1.0, 1.0), v(-1.0, -1.0, -1.0), v(1.0, -1.0, -1.0),
    ]
}

/// The twelve edges of the same box, as a line list.
pub fn box_edges(hw: f32, hh: f32, hd: f32) -> [Vec3; 24] {
    let c = |x: f32, y: f32, z: f32| Vec3::new(x * hw, y * hh, z * hd);
    let (p, n) = (1.0, -1.0);
    [
        // front ring
        c(p, p, p), c(n, p, p),
        c(n, p, p), c(n, n, p),
        c(n, n, p), c(p, n, p),
        c(p, n, p), c(p, p, p),
        // back ring
        c(p, p, n), c(n, p, n),
        c(n, p, n), c(n, n, n),
        c(n, n, n), c(p, n, n),
        c(p, n, n), c(p, p, n),
        // connectors
        c(p, p, p), c(p, p, n),
        c(n, p, p), c(n, p, n),
        c(n, n, p), c(n, n, n),
        c(p, n, p), c(p, n, n),
    ]
}

// ── solids ────────────────────────────────────────────────────────────────

pub const SPHERE_SLICES: usize = 24;
pub const SPHERE_STACKS: usize = 16;
pub const TORUS_MAJOR_SEGMENTS: usize = 61;
pub const TORUS_MINOR_SEGMENTS: usize = 37;
pub const ROUND_SLICES: usize = 32;

fn push_quad(out: &mut Vec<Vec3>, a: Vec3, b: Vec3, c: Vec3, d: Vec3) {
    out.extend_from_slice(&[a, b, c, a, c, d]);
}

/// `w × h` rectangle centered on the origin in the XY plane, as a triangle
/// list.
pub fn plane(w: f32, h: f32) -> Vec<Vec3> {
    let (x, y) = (w * 0.5, h * 0.5);
    let mut out = Vec::with_capacity(6);
    push_quad(
        &mut out,
        Vec3::new(x, y, 0.0),
        Vec3::new(-x, y, 0.0),
        Vec3::new(-x, -y, 0.0),
        Vec3::new(x, -y, 0.0),
    );
    out
}

/// UV sphere around the origin with poles on the Z axis.
///
/// The pole rows are single triangles; every other cell is a quad.
pub fn sphere(radius: f32, slices: usize, stacks: usize) -> Vec<Vec3> {
    let slices = slices.max(3);
    let stacks = stacks.max(2);
    let at = |i: usize, j: usize| {
        let rho = PI * i as f32 / stacks as f32;
        let theta = TAU * (j % slices) as f32 / slices as f32;
        Vec3::new(-theta.sin() * rho.sin(), theta.cos() * rho.sin(), rho.cos()) * radius
    };

    let mut out = Vec::with_capacity(slices * (stacks - 1) * 6);
    for i in 0..stacks {
        for j in 0..slices {
            let (a, b, c, d) = (at(i, j), at(i + 1, j), at(i + 1, j + 1), at(i, j + 1));
            if i == 0 {
                out.extend_from_slice(&[a, b, c]);
            } else if i == stacks - 1 {
                out.extend_from_slice(&[a, b, d]);
            } else {
                push_quad(&mut out, a, b, c, d);
            }
        }
    }
    out
}

/// Torus around the Z axis: a tube of radius `minor` swept along a circle of
/// radius `major` in the XY plane.
pub fn torus(major: f32, minor: f32, major_segments: usize, minor_segments: usize) -> Vec<Vec3> {
    let nu = major_segments.max(3);
    let nv = minor_segments.max(3);
    let at = |i: usize, j: usize| {
        let a = TAU * (i % nu) as f32 / nu as f32;
        let b = TAU * (j % nv) as f32 / nv as f32;
        let r = major + minor * b.cos();
        Vec3::new(a.cos() * r, a.sin() * r, minor * b.sin())
    };

    let mut out = Vec::with_capacity(nu * nv * 6);
    for i in 0..nu {
        for j in 0..nv {
            push_quad(&mut out, at(i, j), at(i + 1, j), at(i + 1, j + 1), at(i, j + 1));
        }
    }
    out
}

fn rim(radius: f32, z: f32, j: usize, slices: usize) -> Vec3 {
    let theta = TAU * (j % slices) as f32 / slices as f32;
    Vec3::new(theta.sin() * radius, theta.cos() * radius, z)
}

/// Open tube of `radius` running from `z = 0` to `z = height`. No caps.
pub fn cylinder(radius: f32, height: f32, slices: usize) -> Vec<Vec3> {
    let slices = slices.max(3);
    let mut out = Vec::with_capacity(slices * 6);
    for j in 0..slices {
        push_quad(
            &mut out,
            rim(radius, 0.0, j, slices),
            rim(radius, 0.0, j + 1, slices),
            rim(radius, height, j + 1, slices),
            rim(radius, height, j, slices),
        );
    }
    out
}

/// Cone with its base disk of `radius` at `z = 0` and its apex at
/// `z = height`.
pub fn cone(radius: f32, height: f32, slices: usize) -> Vec<Vec3> {
    let slices = slices.max(3);
    let apex = Vec3::new(0.0, 0.0, height);
    let mut out = Vec::with_capacity(slices * 6);
    for j in 0..slices {
        let (a, b) = (rim(radius, 0.0, j, slices), rim(radius, 0.0, j + 1, slices));
        out.extend_from_slice(&[a, b, apex]);
        out.extend_from_slice(&[Vec3::ZERO, b, a]);
    }
    out
}

/// Square pyramid: apex at `(0, h, 0)`, base corners at `(±w, -w, ±w)`.
pub fn pyramid(w: f32, h: f32) -> Vec<Vec3> {
    let apex = Vec3::new(0.0, h, 0.0);
    let c = |x: f32, z: f32| Vec3::new(x * w, -w, z * w);
    let mut out = vec![
        apex, c(-1.0, 1.0), c(1.0, 1.0),
        apex, c(1.0, 1.0), c(1.0, -1.0),
        apex, c(1.0, -1.0), c(-1.0, -1.0),
        apex, c(-1.0, -1.0), c(-1.0, 1.0),
    ];
    push_quad(&mut out, c(1.0, 1.0), c(-1.0, 1.0), c(-1.0, -1.0), c(1.0, -1.0));
    out
}

/// Wireframe of a triangle list: each triangle's three edges as a line list.
pub fn triangle_edges(triangles: &[Vec3]) -> Vec<Vec3> {
    let mut out = Vec::with_capacity(triangles.len() * 2);
    for t in triangles.chunks_exact(3) {
        out.extend_from_slice(&[t[0], t[1], t[1], t[2], t[2], t[0]]);
    }
    out
}

/// Expands a primitive into a list topology (points, line list or triangle
/// list) so backends only need three pipelines.
pub fn expand_to_list(primitive: Primitive, vertices: &[Vec3]) -> Vec<Vec3> {
    expand_attrs(primitive, vertices)
}

/// List expansion for any per-vertex attribute (positions, texture coordinates).
pub fn expand_attrs<T: Copy>(primitive: Primitive, attrs: &[T]) -> Vec<T> {
    let n = attrs.len();
    match primitive {
        Primitive::Points => attrs.to_vec(),
        Primitive::Lines => attrs[..n - n % 2].to_vec(),
        Primitive::Triangles => attrs[..n - n % 3].to_vec(),
        Primitive::LineStrip | Primitive::LineLoop => {
            if n < 2 {
                return Vec::new();
            }
            let mut out = Vec::with_capacity(n * 2);
            for pair in attrs.windows(2) {
                out.push(pair[0]);
                out.push(pair[1]);
            }
            if primitive == Primitive::LineLoop && n > 2 {
                out.push(attrs[n - 1]);
                out.push(attrs[0]);
            }
            out
        }
        Primitive::TriangleFan => {
            if n < 3 {
                return Vec::new();
            }
            let mut out = Vec::with_capacity((n - 2) * 3);
            for i in 1..n - 1 {
                out.extend_from_slice(&[attrs[0], attrs[i], attrs[i + 1]]);
            }
            out
        }
        Primitive::Quads => {
            let mut out = Vec::with_capacity(n / 4 * 6);
            for q in attrs.chunks_exact(4) {
                out.extend_from_slice(&[q[0], q[1], q[2], q[0], q[2], q[3]]);
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_is_closed() {
        let fan = ellipse_fan(10.0, 10.0, 5.0, 5.0);
        assert_eq!(fan[0], Vec3::new(10.0, 10.0, 0.0));
        assert_eq!(fan[1], fan[fan.len() - 1]);
    }

    #[test]
    fn outline_stays_on_the_ellipse() {
        for p in ellipse_outline(0.0, 0.0, 40.0, 20.0) {
            let d = (p.x / 40.0).powi(2) + (p.y / 20.0).powi(2);
            assert!((d - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn arc_hits_both_ends() {
        let pts = arc_points(0.0, 0.0, 10.0, 10.0, 0.0, 1.0);
        let first = pts[0];
        let last = pts[pts.len() - 1];
        assert!((first - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-4);
        assert!((last - Vec3::new(1f32.cos() * 10.0, 1f32.sin() * 10.0, 0.0)).length() < 1e-3);
        assert!(arc_points(0.0, 0.0, 1.0, 1.0, 1.0, 0.0).is_empty());
    }

    #[test]
    fn list_expansion_counts() {
        let v = [Vec3::ZERO; 5];
        assert_eq!(expand_to_list(Primitive::LineStrip, &v).len(), 8);
        assert_eq!(expand_to_list(Primitive::LineLoop, &v).len(), 10);
        assert_eq!(expand_to_list(Primitive::TriangleFan, &v).len(), 9);
        assert_eq!(expand_to_list(Primitive::Quads, &[Vec3::ZERO; 8]).len(), 12);
        assert_eq!(expand_to_list(Primitive::Lines, &v).len(), 4);
        assert!(expand_to_list(Primitive::TriangleFan, &v[..2]).is_empty());
    }

    #[test]
    fn attrs_expand_like_positions() {
        let uv = [[0.0f32, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let out = expand_attrs(Primitive::Quads, &uv);
        assert_eq!(out, vec![uv[0], uv[1], uv[2], uv[0], uv[2], uv[3]]);
    }

    #[test]
    fn wide_strokes_become_quads() {
        let pts = [Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Vec3::new(10.0, 10.0, 0.0)];
        let (prim, v) = stroke_path(&pts, true, 4.0);
        assert_eq!(prim, Primitive::Quads);
        assert_eq!(v.len(), 12);

        let (prim, v) = stroke_path(&pts, false, 1.0);
        assert_eq!(prim, Primitive::LineStrip);
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn sphere_vertices_sit_on_the_surface() {
        let tris = sphere(5.0, SPHERE_SLICES, SPHERE_STACKS);
        assert_eq!(tris.len(), SPHERE_SLICES * (2 * SPHERE_STACKS - 2) * 3);
        for p in &tris {
            assert!((p.length() - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn torus_vertices_sit_on_the_tube() {
        let tris = torus(10.0, 2.0, 12, 8);
        assert_eq!(tris.len(), 12 * 8 * 6);
        for p in &tris {
            let ring = (p.x * p.x + p.y * p.y).sqrt() - 10.0;
            assert!((ring * ring + p.z * p.z - 4.0).abs() < 1e-3);
        }
    }

    #[test]
    fn cylinder_is_an_open_tube_along_z() {
        let tris = cylinder(3.0, 7.0, ROUND_SLICES);
        assert_eq!(tris.len(), ROUND_SLICES * 6);
        for p in &tris {
            assert!((p.truncate().length() - 3.0).abs() < 1e-4);
            assert!(p.z == 0.0 || p.z == 7.0);
        }
    }

    #[test]
    fn cone_has_an_apex_and_a_base() {
        let tris = cone(2.0, 5.0, 8);
        assert_eq!(tris.len(), 8 * 6);
        assert!(tris.contains(&Vec3::new(0.0, 0.0, 5.0)));
        assert!(tris.iter().all(|p| p.z == 0.0 || p.z == 5.0));
    }

    #[test]
    fn pyramid_and_plane_shapes() {
        let p = pyramid(1.0, 2.0);
        assert_eq!(p.len(), 18);
        assert_eq!(p[0], Vec3::new(0.0, 2.0, 0.0));
        assert!(p[12..].iter().all(|v| v.y == -1.0));

        let q = plane(4.0, 2.0);
        assert_eq!(q.len(), 6);
        assert!(q.iter().all(|v| v.x.abs() == 2.0 && v.y.abs() == 1.0 && v.z == 0.0));
    }

    #[test]
    fn wireframe_has_three_edges_per_triangle() {
        let edges = triangle_edges(&pyramid(1.0, 1.0));
        assert_eq!(edges.len(), 6 * 6);
        assert_eq!(edges[0], edges[5]);
    }

    #[test]
    fn wide_segment_has_requested_width() {
        let q = wide_segment(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 4.0);
        assert!(((q[0] - q[3]).length() - 4.0).abs() < 1e-5);
    }
}
