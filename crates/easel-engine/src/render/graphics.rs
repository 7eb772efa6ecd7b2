use glam::{Mat4, Vec3};

use crate::paint::{Color, ColorSpace, Rgba};

use super::backend::{BlendMode, Primitive, Projection, Renderer, TextureId};
use super::shading::{Fog, Light};
use super::state::{RectMode, RenderState};
use super::tessellate;

/// Texture created through [`Graphics::create_texture`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Texture {
    id: TextureId,
    width: u32,
    height: u32,
}

impl Texture {
    #[inline]
    pub fn id(&self) -> TextureId {
        self.id
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }
}

const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Vertices collected between `begin_shape` and `end_shape`.
#[derive(Debug, Default)]
pub(crate) struct ShapeBuffer {
    open: bool,
    close: bool,
    vertices: Vec<Vec3>,
}

/// Pushes the projection-coupled pipeline flags of `state` to `renderer` and
/// resets the model-view transform.
pub(crate) fn apply_pipeline_state(state: &RenderState, renderer: &mut dyn Renderer) {
    renderer.set_projection(state.projection(), state.canvas());
    renderer.set_depth_test(state.depth_test());
    renderer.set_blending(state.active_blend());
    renderer.set_light(state.light());
    renderer.set_fog(state.fog());
    renderer.load_identity();
}

/// Immediate-mode drawing API.
///
/// Every call reads the [`RenderState`] at the moment it is made: shapes are
/// filled in the fill color (when filling is enabled) and then outlined in
/// the stroke color (when the stroke weight is positive).
pub struct Graphics<'a> {
    state: &'a mut RenderState,
    renderer: &'a mut dyn Renderer,
    shape: &'a mut ShapeBuffer,
}

impl<'a> Graphics<'a> {
    pub(crate) fn new(
        state: &'a mut RenderState,
        renderer: &'a mut dyn Renderer,
        shape: &'a mut ShapeBuffer,
    ) -> Self {
        Self { state, renderer, shape }
    }

    #[inline]
    pub fn state(&self) -> &RenderState {
        self.state
    }

    /// Direct access to the backend for calls the drawing API does not wrap.
    #[inline]
    pub fn renderer(&mut self) -> &mut dyn Renderer {
        &mut *self.renderer
    }

    /// Logical canvas width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.state.canvas().width
    }

    /// Logical canvas height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.state.canvas().height
    }

    // ── state ────────────────────────────────────────────────────────────

    pub fn color_mode(&mut self, space: ColorSpace) {
        self.state.set_color_mode(space);
    }

    pub fn stroke(&mut self, color: impl Into<Color>) {
        self.state.set_stroke(color);
    }

    pub fn fill(&mut self, color: impl Into<Color>) {
        self.state.set_fill(color);
    }

    pub fn no_stroke(&mut self) {
        self.state.set_no_stroke();
    }

    pub fn no_fill(&mut self) {
        self.state.set_no_fill();
    }

    pub fn stroke_weight(&mut self, weight: i32) {
        self.state.set_stroke_weight(weight);
    }

    pub fn point_size(&mut self, size: f32) {
        self.state.set_point_size(size);
    }

    pub fn rect_mode(&mut self, mode: RectMode) {
        self.state.set_rect_mode(mode);
    }

    pub fn blend_mode(&mut self, mode: BlendMode) {
        self.state.set_blend_mode(mode);
        self.renderer.set_blending(self.state.active_blend());
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.state.set_projection(projection);
        log::debug!("projection set to {:?}", projection);
        apply_pipeline_state(self.state, self.renderer);
    }

    /// Orthographic canvas-pixel projection; blending on, depth test off.
    pub fn set_2d(&mut self) {
        self.set_projection(Projection::TwoD);
    }

    /// Default perspective (60° fov, near 1, far 500); depth test on,
    /// blending off.
    pub fn set_3d(&mut self) {
        self.set_projection(Projection::three_d());
    }

    pub fn disable_double_buffer(&mut self) {
        self.state.disable_double_buffer();
        self.renderer.set_double_buffer(false);
    }

    // ── lighting and fog ─────────────────────────────────────────────────

    fn set_light(&mut self, light: Option<Light>) {
        self.state.set_light(light);
        self.renderer.set_light(light);
    }

    /// Gray light from above and in front of the camera. Only filled
    /// triangles (shapes, solids) are lit; lines and points keep their color.
    pub fn lights(&mut self) {
        self.set_light(Some(Light::default()));
    }

    pub fn no_lights(&mut self) {
        self.set_light(None);
    }

    /// Uniform light in `color` with no direction.
    pub fn ambient_light(&mut self, color: impl Into<Color>) {
        let c = self.state.resolve(color);
        self.set_light(Some(Light::ambient(c)));
    }

    /// Light in `color` arriving from `(x, y, z)` in eye space.
    pub fn directional_light(&mut self, color: impl Into<Color>, x: f32, y: f32, z: f32) {
        let c = self.state.resolve(color);
        self.set_light(Some(Light::directional(c, Vec3::new(x, y, z))));
    }

    /// Linear fog: none at eye distance `start`, solid `color` at `end`.
    pub fn enable_fog(&mut self, start: f32, end: f32, color: impl Into<Color>) {
        let fog = Fog {
            start,
            end,
            color: self.state.resolve(color),
        };
        self.state.set_fog(Some(fog));
        self.renderer.set_fog(Some(fog));
    }

    pub fn disable_fog(&mut self) {
        self.state.set_fog(None);
        self.renderer.set_fog(None);
    }

    // ── clearing ─────────────────────────────────────────────────────────

    /// Clears the canvas (color and depth).
    pub fn background(&mut self, color: impl Into<Color>) {
        let c = self.state.resolve(color);
        self.renderer.clear(c);
    }

    /// Same as [`background`](Self::background).
    pub fn clear(&mut self, color: impl Into<Color>) {
        self.background(color);
    }

    // ── primitives ───────────────────────────────────────────────────────

    fn draw_fill(&mut self, primitive: Primitive, vertices: &[Vec3]) {
        if self.state.fill_enabled() {
            let fill = self.state.fill();
            self.renderer.draw(primitive, vertices, fill);
        }
    }

    fn draw_outline(&mut self, points: &[Vec3], closed: bool) {
        if !self.state.stroke_enabled() {
            return;
        }
        let (primitive, vertices) =
            tessellate::stroke_path(points, closed, self.state.stroke_weight() as f32);
        let stroke = self.state.stroke();
        self.renderer.draw(primitive, &vertices, stroke);
    }

    fn draw_point(&mut self, p: Vec3) {
        if !self.state.stroke_enabled() {
            return;
        }
        let stroke = self.state.stroke();
        let size = self.state.point_size();
        if size > 1.0 {
            self.renderer
                .draw(Primitive::Quads, &tessellate::point_square(p, size), stroke);
        } else {
            self.renderer.draw(Primitive::Points, &[p], stroke);
        }
    }

    /// Point in the stroke color, `point_size` wide.
    pub fn point(&mut self, x: f32, y: f32) {
        self.draw_point(Vec3::new(x, y, 0.0));
    }

    pub fn point_3d(&mut self, x: f32, y: f32, z: f32) {
        self.draw_point(Vec3::new(x, y, z));
    }

    pub fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) {
        self.draw_outline(&[Vec3::new(x0, y0, 0.0), Vec3::new(x1, y1, 0.0)], false);
    }

    /// Hairline segment in 3D space.
    pub fn line_3d(&mut self, from: Vec3, to: Vec3) {
        if self.state.stroke_enabled() {
            let stroke = self.state.stroke();
            self.renderer.draw(Primitive::Lines, &[from, to], stroke);
        }
    }

    /// Rectangle positioned according to the current rect mode.
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let corners = self
            .state
            .rect_bounds(x, y, w, h)
            .corners()
            .map(|c| Vec3::new(c.x, c.y, 0.0));
        self.draw_fill(Primitive::Quads, &corners);
        self.draw_outline(&corners, true);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn quad(
        &mut self,
        x1: f32, y1: f32,
        x2: f32, y2: f32,
        x3: f32, y3: f32,
        x4: f32, y4: f32,
    ) {
        let corners = [
            Vec3::new(x1, y1, 0.0),
            Vec3::new(x2, y2, 0.0),
            Vec3::new(x3, y3, 0.0),
            Vec3::new(x4, y4, 0.0),
        ];
        self.draw_fill(Primitive::Quads, &corners);
        self.draw_outline(&corners, true);
    }

    pub fn triangle(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) {
        let corners = [
            Vec3::new(x1, y1, 0.0),
            Vec3::new(x2, y2, 0.0),
            Vec3::new(x3, y3, 0.0),
        ];
        self.draw_fill(Primitive::Triangles, &corners);
        self.draw_outline(&corners, true);
    }

    pub fn circle(&mut self, x: f32, y: f32, radius: f32) {
        self.ellipse(x, y, radius, radius);
    }

    /// Ellipse centered on `(x, y)` with radii `rx`, `ry`.
    pub fn ellipse(&mut self, x: f32, y: f32, rx: f32, ry: f32) {
        if self.state.fill_enabled() {
            let fan = tessellate::ellipse_fan(x, y, rx, ry);
            self.draw_fill(Primitive::TriangleFan, &fan);
        }
        if self.state.stroke_enabled() {
            let outline = tessellate::ellipse_outline(x, y, rx, ry);
            self.draw_outline(&outline, true);
        }
    }

    /// Open elliptical arc from `start` to `end` radians, stroke only.
    pub fn arc(&mut self, x: f32, y: f32, rx: f32, ry: f32, start: f32, end: f32) {
        if self.state.stroke_enabled() {
            let points = tessellate::arc_points(x, y, rx, ry, start, end);
            self.draw_outline(&points, false);
        }
    }

    // ── free-form shapes ─────────────────────────────────────────────────

    /// Starts collecting vertices. With `close`, an unfilled shape is drawn as
    /// a closed loop.
    pub fn begin_shape(&mut self, close: bool) {
        if self.shape.open {
            log::debug!("begin_shape: previous shape discarded");
        }
        self.shape.open = true;
        self.shape.close = close;
        self.shape.vertices.clear();
    }

    pub fn vertex(&mut self, x: f32, y: f32) {
        self.vertex_3d(x, y, 0.0);
    }

    pub fn vertex_3d(&mut self, x: f32, y: f32, z: f32) {
        if self.shape.open {
            self.shape.vertices.push(Vec3::new(x, y, z));
        }
    }

    /// Draws the collected vertices: a filled fan when filling is enabled,
    /// otherwise a line strip (or loop) in the stroke color.
    pub fn end_shape(&mut self) {
        if !self.shape.open {
            return;
        }
        self.shape.open = false;
        let vertices = std::mem::take(&mut self.shape.vertices);

        if self.state.fill_enabled() {
            let fill = self.state.fill();
            self.renderer.draw(Primitive::TriangleFan, &vertices, fill);
        } else {
            let primitive = if self.shape.close { Primitive::LineLoop } else { Primitive::LineStrip };
            let stroke = self.state.stroke();
            self.renderer.draw(primitive, &vertices, stroke);
        }

        // Hand the allocation back for the next shape.
        self.shape.vertices = vertices;
        self.shape.vertices.clear();
    }

    // ── solids ───────────────────────────────────────────────────────────

    /// Cube spanning `[-size, size]` on every axis.
    pub fn cube(&mut self, size: f32) {
        self.box3d(size, size, size);
    }

    /// Box spanning `[-w, w] × [-h, h] × [-d, d]`. A zero `h` and `d` make a
    /// cube of `w`.
    pub fn box3d(&mut self, w: f32, h: f32, d: f32) {
        let (h, d) = if h == 0.0 && d == 0.0 { (w, w) } else { (h, d) };

        self.draw_fill(Primitive::Quads, &tessellate::box_faces(w, h, d));
        if self.state.stroke_enabled() {
            let stroke = self.state.stroke();
            self.renderer
                .draw(Primitive::Lines, &tessellate::box_edges(w, h, d), stroke);
        }
    }

    /// Filled in the fill color, or drawn as a wireframe in the stroke color
    /// when filling is off.
    fn draw_solid(&mut self, triangles: &[Vec3]) {
        if self.state.fill_enabled() {
            let fill = self.state.fill();
            self.renderer.draw(Primitive::Triangles, triangles, fill);
        } else if self.state.stroke_enabled() {
            let stroke = self.state.stroke();
            self.renderer
                .draw(Primitive::Lines, &tessellate::triangle_edges(triangles), stroke);
        }
    }

    /// `w × h` rectangle centered on the origin in the XY plane.
    pub fn plane(&mut self, w: f32, h: f32) {
        self.draw_solid(&tessellate::plane(w, h));
    }

    pub fn sphere(&mut self, radius: f32) {
        self.draw_solid(&tessellate::sphere(
            radius,
            tessellate::SPHERE_SLICES,
            tessellate::SPHERE_STACKS,
        ));
    }

    /// Ring around the Z axis.
    pub fn torus(&mut self, major_radius: f32, minor_radius: f32) {
        self.draw_solid(&tessellate::torus(
            major_radius,
            minor_radius,
            tessellate::TORUS_MAJOR_SEGMENTS,
            tessellate::TORUS_MINOR_SEGMENTS,
        ));
    }

    /// Open tube along +Z from the origin to `height`.
    pub fn cylinder(&mut self, radius: f32, height: f32) {
        self.draw_solid(&tessellate::cylinder(radius, height, tessellate::ROUND_SLICES));
    }

    /// Base at the origin, apex at `(0, 0, height)`.
    pub fn cone(&mut self, radius: f32, height: f32) {
        self.draw_solid(&tessellate::cone(radius, height, tessellate::ROUND_SLICES));
    }

    pub fn pyramid(&mut self, w: f32, h: f32) {
        self.draw_solid(&tessellate::pyramid(w, h));
    }

    // ── textures ─────────────────────────────────────────────────────────

    /// Uploads tightly packed RGBA8 pixels.
    pub fn create_texture(&mut self, width: u32, height: u32, pixels: &[u8]) -> Option<Texture> {
        let id = self.renderer.create_texture(width, height, pixels)?;
        Some(Texture { id, width, height })
    }

    pub fn update_texture(
        &mut self,
        texture: &Texture,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) {
        self.renderer
            .update_texture(texture.id, x, y, width, height, pixels);
    }

    pub fn release_texture(&mut self, texture: Texture) {
        self.renderer.release_texture(texture.id);
    }

    /// Current RGBA8 contents of `texture`, or `None` if the backend cannot
    /// read it back.
    pub fn read_texture(&mut self, texture: &Texture) -> Option<Vec<u8>> {
        self.renderer.read_texture(texture.id)
    }

    /// Draws `texture` untinted with its top-left at `(x, y)`. A non-positive
    /// `w` or `h` uses the texture's own size.
    pub fn image(&mut self, texture: &Texture, x: f32, y: f32, w: f32, h: f32) {
        let w = if w > 0.0 { w } else { texture.width as f32 };
        let h = if h > 0.0 { h } else { texture.height as f32 };

        let corners = [
            Vec3::new(x, y, 0.0),
            Vec3::new(x + w, y, 0.0),
            Vec3::new(x + w, y + h, 0.0),
            Vec3::new(x, y + h, 0.0),
        ];
        self.renderer
            .draw_textured(texture.id, Primitive::Quads, &corners, &QUAD_UVS, Rgba::white());
    }

    /// `w × h` textured quad at `(x, y)` in canvas space. The current
    /// transform is ignored and left as it was.
    pub fn sprite(&mut self, texture: &Texture, x: f32, y: f32, w: f32, h: f32) {
        let saved = self.renderer.matrices().replace(Mat4::IDENTITY);
        self.image(texture, x, y, w, h);
        self.renderer.matrices().replace(saved);
    }

    /// `w × h` textured quad with a corner at `pos`, under the current
    /// transform, lifted one unit towards +Z.
    pub fn sprite_3d(&mut self, texture: &Texture, pos: Vec3, w: f32, h: f32) {
        let corners = [
            pos + Vec3::new(0.0, 0.0, 1.0),
            pos + Vec3::new(w, 0.0, 1.0),
            pos + Vec3::new(w, h, 1.0),
            pos + Vec3::new(0.0, h, 1.0),
        ];
        self.renderer
            .draw_textured(texture.id, Primitive::Quads, &corners, &QUAD_UVS, Rgba::white());
    }

    // ── transforms ───────────────────────────────────────────────────────

    pub fn push_matrix(&mut self) {
        self.renderer.push_matrix();
    }

    pub fn pop_matrix(&mut self) {
        self.renderer.pop_matrix();
    }

    pub fn load_identity(&mut self) {
        self.renderer.load_identity();
    }

    pub fn translate(&mut self, x: f32, y: f32) {
        self.renderer.translate(Vec3::new(x, y, 0.0));
    }

    pub fn translate_3d(&mut self, x: f32, y: f32, z: f32) {
        self.renderer.translate(Vec3::new(x, y, z));
    }

    /// Rotation about Z, in radians.
    pub fn rotate(&mut self, radians: f32) {
        self.renderer.rotate(radians, Vec3::Z);
    }

    /// Rotation about X, in degrees.
    pub fn rotate_x(&mut self, degrees: f32) {
        self.renderer.rotate(degrees.to_radians(), Vec3::X);
    }

    /// Rotation about Y, in degrees.
    pub fn rotate_y(&mut self, degrees: f32) {
        self.renderer.rotate(degrees.to_radians(), Vec3::Y);
    }

    /// Rotation about Z, in degrees.
    pub fn rotate_z(&mut self, degrees: f32) {
        self.renderer.rotate(degrees.to_radians(), Vec3::Z);
    }

    pub fn scale(&mut self, x: f32, y: f32) {
        self.renderer.scale(Vec3::new(x, y, 1.0));
    }

    pub fn scale_3d(&mut self, x: f32, y: f32, z: f32) {
        self.renderer.scale(Vec3::new(x, y, z));
    }
}
