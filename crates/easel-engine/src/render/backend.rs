use glam::{Mat4, Vec3};

use crate::coords::Canvas;
use crate::core::FatalError;
use crate::paint::Rgba;

use super::matrix::MatrixStack;
use super::shading::{Fog, Light};

/// How a vertex list is assembled.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Primitive {
    Points,
    Lines,
    LineStrip,
    /// Line strip closed back to the first vertex.
    LineLoop,
    Triangles,
    TriangleFan,
    /// Independent quads, four vertices each.
    Quads,
}

impl Primitive {
    /// Smallest vertex count that draws anything.
    pub fn min_vertices(self) -> usize {
        match self {
            Primitive::Points => 1,
            Primitive::Lines | Primitive::LineStrip | Primitive::LineLoop => 2,
            Primitive::Triangles | Primitive::TriangleFan => 3,
            Primitive::Quads => 4,
        }
    }
}

/// Perspective camera parameters (degrees, positive clip distances).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Perspective {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 1.0,
            far: 500.0,
        }
    }
}

/// Active projection.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum Projection {
    /// Orthographic, canvas pixels, top-left origin, +Y down.
    #[default]
    TwoD,
    /// Perspective camera at the origin looking down -Z.
    ThreeD(Perspective),
}

impl Projection {
    pub fn three_d() -> Self {
        Projection::ThreeD(Perspective::default())
    }

    #[inline]
    pub fn is_3d(&self) -> bool {
        matches!(self, Projection::ThreeD(_))
    }

    /// Projection matrix for `canvas` in wgpu clip space (depth `0..1`).
    pub fn matrix(&self, canvas: Canvas) -> Mat4 {
        let w = canvas.width.max(1) as f32;
        let h = canvas.height.max(1) as f32;
        match self {
            Projection::TwoD => Mat4::orthographic_rh(0.0, w, h, 0.0, -1.0, 1.0),
            Projection::ThreeD(p) => {
                let near = p.near.max(f32::EPSILON);
                let far = p.far.max(near + f32::EPSILON);
                Mat4::perspective_rh(p.fov_y_degrees.to_radians(), w / h, near, far)
            }
        }
    }
}

/// Blend equation applied while blending is enabled.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum BlendMode {
    /// `src * src_alpha + dst * (1 - src_alpha)`
    #[default]
    Alpha,
    /// `src * src_alpha + dst`
    Additive,
    /// `src * dst + dst * (1 - src_alpha)`
    Multiply,
}

/// How a finished frame reaches the screen.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PresentMode {
    /// Swap buffers; may wait for vsync.
    Swap,
    /// Submit and show immediately.
    Flush,
}

/// Handle to a renderer-owned RGBA8 texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub u32);

/// Byte length of a tightly packed RGBA8 region, or `None` for an empty or
/// overflowing size.
pub fn rgba_len(width: u32, height: u32) -> Option<usize> {
    if width == 0 || height == 0 {
        return None;
    }
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(4)
}

/// Render collaborator driven by the frame loop and the drawing API.
///
/// Vertices are in model space; the renderer applies the current model-view
/// matrix and the projection. All calls are infallible except `present`.
pub trait Renderer {
    fn set_projection(&mut self, projection: Projection, canvas: Canvas);

    fn set_depth_test(&mut self, enabled: bool);

    /// `None` disables blending.
    fn set_blending(&mut self, mode: Option<BlendMode>);

    /// Clears color and depth.
    fn clear(&mut self, color: Rgba);

    /// `None` turns lighting off. Applies to filled geometry drawn afterwards.
    fn set_light(&mut self, light: Option<Light>);

    /// `None` turns fog off.
    fn set_fog(&mut self, fog: Option<Fog>);

    fn matrices(&mut self) -> &mut MatrixStack;

    fn draw(&mut self, primitive: Primitive, vertices: &[Vec3], color: Rgba);

    /// Draws with a texture modulated by `tint`; `uvs` pairs with `vertices`.
    fn draw_textured(
        &mut self,
        texture: TextureId,
        primitive: Primitive,
        vertices: &[Vec3],
        uvs: &[[f32; 2]],
        tint: Rgba,
    );

    /// Uploads tightly packed RGBA8 pixels. `None` if the size is invalid or
    /// `pixels` is too short.
    fn create_texture(&mut self, width: u32, height: u32, pixels: &[u8]) -> Option<TextureId>;

    /// Replaces a sub-rectangle. Out-of-bounds regions and unknown ids are
    /// ignored.
    fn update_texture(&mut self, id: TextureId, x: u32, y: u32, width: u32, height: u32, pixels: &[u8]);

    fn release_texture(&mut self, id: TextureId);

    /// Tightly packed RGBA8 copy of a texture's pixels, `None` for an unknown
    /// id or a failed read.
    fn read_texture(&mut self, id: TextureId) -> Option<Vec<u8>>;

    fn set_double_buffer(&mut self, enabled: bool);

    /// Window client area changed (physical pixels).
    fn resize(&mut self, width: u32, height: u32);

    fn present(&mut self, mode: PresentMode) -> Result<(), FatalError>;

    // Matrix stack helpers.

    fn load_identity(&mut self) {
        self.matrices().load_identity();
    }

    fn push_matrix(&mut self) {
        if !self.matrices().push() {
            log::warn!("push_matrix: stack full, ignored");
        }
    }

    fn pop_matrix(&mut self) {
        if !self.matrices().pop() {
            log::debug!("pop_matrix: nothing to pop");
        }
    }

    fn translate(&mut self, v: Vec3) {
        self.matrices().translate(v);
    }

    fn rotate(&mut self, radians: f32, axis: Vec3) {
        self.matrices().rotate(radians, axis);
    }

    fn scale(&mut self, v: Vec3) {
        self.matrices().scale(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ortho_maps_canvas_corners_to_clip_corners() {
        let m = Projection::TwoD.matrix(Canvas::new(200, 100));
        let tl = m.project_point3(Vec3::new(0.0, 0.0, 0.0));
        let br = m.project_point3(Vec3::new(200.0, 100.0, 0.0));
        assert!((tl.x + 1.0).abs() < 1e-5 && (tl.y - 1.0).abs() < 1e-5);
        assert!((br.x - 1.0).abs() < 1e-5 && (br.y + 1.0).abs() < 1e-5);
        assert!(tl.z >= 0.0 && tl.z <= 1.0);
    }

    #[test]
    fn perspective_keeps_points_in_front_inside_depth_range() {
        let m = Projection::three_d().matrix(Canvas::new(960, 540));
        let p = m.project_point3(Vec3::new(0.0, 0.0, -10.0));
        assert!(p.z > 0.0 && p.z < 1.0);
    }

    #[test]
    fn rgba_len_rejects_empty_sizes() {
        assert_eq!(rgba_len(0, 4), None);
        assert_eq!(rgba_len(2, 3), Some(24));
    }
}
