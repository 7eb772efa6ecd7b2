//! Simple lighting and fog.
//!
//! One light at most: a scene ambient term plus a directional diffuse term,
//! evaluated per face (flat shading) in eye space. Fog is linear in eye
//! distance and blends towards a fixed color.

use glam::Vec3;

use crate::paint::Rgba;

/// Directional light plus ambient.
///
/// `ambient` already includes the scene-wide ambient level. `direction` points
/// from the scene towards the light, in eye space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Light {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub direction: Vec3,
}

impl Default for Light {
    /// Gray light from above and in front of the camera.
    fn default() -> Self {
        Self {
            ambient: Vec3::splat(0.7),
            diffuse: Vec3::splat(0.5),
            direction: Vec3::new(0.0, 50.0, 100.0).normalize(),
        }
    }
}

impl Light {
    /// Ambient light only; faces are not shaded by orientation.
    pub fn ambient(color: Rgba) -> Self {
        Self {
            ambient: Vec3::new(color.r, color.g, color.b),
            diffuse: Vec3::ZERO,
            direction: Vec3::Z,
        }
    }

    /// Light of `color` arriving from `towards`, over a dim ambient base.
    pub fn directional(color: Rgba, towards: Vec3) -> Self {
        Self {
            ambient: Vec3::splat(0.5),
            diffuse: Vec3::new(color.r, color.g, color.b),
            direction: towards.try_normalize().unwrap_or(Vec3::Z),
        }
    }

    /// Lit color of a face with the given unit normal. Alpha is unchanged.
    pub fn shade(&self, color: Rgba, normal: Vec3) -> Rgba {
        let lambert = normal.dot(self.direction).max(0.0);
        let k = (self.ambient + self.diffuse * lambert).min(Vec3::ONE);
        Rgba::new(color.r * k.x, color.g * k.y, color.b * k.z, color.a)
    }
}

/// Linear fog between `start` and `end` eye-space distances.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Fog {
    pub start: f32,
    pub end: f32,
    pub color: Rgba,
}

impl Fog {
    /// How much of the fog color replaces the surface color at `distance`:
    /// 0 at or before `start`, 1 at or beyond `end`.
    pub fn amount(&self, distance: f32) -> f32 {
        let span = self.end - self.start;
        if span.abs() <= f32::EPSILON {
            return if distance >= self.end { 1.0 } else { 0.0 };
        }
        (1.0 - (self.end - distance) / span).clamp(0.0, 1.0)
    }

    /// Per-vertex fog term: fog color in rgb, amount in alpha.
    pub fn term(&self, eye: Vec3) -> [f32; 4] {
        [self.color.r, self.color.g, self.color.b, self.amount(eye.z.abs())]
    }
}

/// Unit normal of triangle `(a, b, c)`, flipped to face `towards_eye` so both
/// sides of a surface light the same way. Degenerate triangles face the eye.
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3, towards_eye: Vec3) -> Vec3 {
    let n = (b - a).cross(c - a).try_normalize().unwrap_or(towards_eye);
    if n.dot(towards_eye) < 0.0 { -n } else { n }
}

/// Flat-shaded colors for a triangle list given in eye space.
///
/// `perspective` selects the view direction: towards the origin for a
/// perspective camera, +Z for the orthographic canvas.
pub fn shade_triangles(light: &Light, eye: &[Vec3], color: Rgba, perspective: bool) -> Vec<Rgba> {
    let mut out = Vec::with_capacity(eye.len());
    for tri in eye.chunks_exact(3) {
        let towards_eye = if perspective {
            (-(tri[0] + tri[1] + tri[2]) / 3.0).try_normalize().unwrap_or(Vec3::Z)
        } else {
            Vec3::Z
        };
        let lit = light.shade(color, face_normal(tri[0], tri[1], tri[2], towards_eye));
        out.extend_from_slice(&[lit; 3]);
    }
    out
}
