use std::collections::HashMap;

use glam::Vec3;

use crate::coords::Canvas;
use crate::core::FatalError;
use crate::paint::Rgba;

use super::backend::{
    rgba_len, BlendMode, PresentMode, Primitive, Projection, Renderer, TextureId,
};
use super::matrix::MatrixStack;
use super::shading::{Fog, Light};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub primitive: Primitive,
    /// Vertices after the model-view transform.
    pub vertices: Vec<Vec3>,
    pub color: Rgba,
    pub texture: Option<TextureId>,
    pub depth_test: bool,
    pub blending: Option<BlendMode>,
    pub light: Option<Light>,
    pub fog: Option<Fog>,
}

/// Renderer that records calls instead of drawing.
///
/// Used by tests and for running sketches without a GPU. Textures are kept as
/// plain byte buffers so updates can be inspected.
#[derive(Debug)]
pub struct HeadlessRenderer {
    pub projection: Projection,
    pub canvas: Canvas,
    pub depth_test: bool,
    pub blending: Option<BlendMode>,
    pub light: Option<Light>,
    pub fog: Option<Fog>,
    pub double_buffer: bool,
    pub surface_size: (u32, u32),
    pub clears: Vec<Rgba>,
    pub draws: Vec<DrawCall>,
    pub presents: Vec<PresentMode>,
    /// Matrix stack depth observed at each `present`.
    pub depth_at_present: Vec<usize>,
    textures: HashMap<TextureId, (u32, u32, Vec<u8>)>,
    next_texture: u32,
    matrices: MatrixStack,
    fail_present: Option<String>,
}

impl HeadlessRenderer {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            projection: Projection::TwoD,
            canvas,
            depth_test: false,
            blending: Some(BlendMode::Alpha),
            light: None,
            fog: None,
            double_buffer: true,
            surface_size: (canvas.physical_width, canvas.physical_height),
            clears: Vec::new(),
            draws: Vec::new(),
            presents: Vec::new(),
            depth_at_present: Vec::new(),
            textures: HashMap::new(),
            next_texture: 1,
            matrices: MatrixStack::new(),
            fail_present: None,
        }
    }

    /// Makes every following `present` fail with a surface error.
    pub fn fail_presents(&mut self, reason: impl Into<String>) {
        self.fail_present = Some(reason.into());
    }

    pub fn texture_pixels(&self, id: TextureId) -> Option<&[u8]> {
        self.textures.get(&id).map(|(_, _, px)| px.as_slice())
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn current_matrix_depth(&self) -> usize {
        self.matrices.depth()
    }

    fn record(&mut self, primitive: Primitive, vertices: &[Vec3], color: Rgba, texture: Option<TextureId>) {
        if vertices.len() < primitive.min_vertices() {
            return;
        }
        let vertices = vertices
            .iter()
            .map(|&v| self.matrices.transform_point(v))
            .collect();
        self.draws.push(DrawCall {
            primitive,
            vertices,
            color,
            texture,
            depth_test: self.depth_test,
            blending: self.blending,
            light: self.light,
            fog: self.fog,
        });
    }
}

impl Renderer for HeadlessRenderer {
    fn set_projection(&mut self, projection: Projection, canvas: Canvas) {
        self.projection = projection;
        self.canvas = canvas;
    }

    fn set_depth_test(&mut self, enabled: bool) {
        self.depth_test = enabled;
    }

    fn set_blending(&mut self, mode: Option<BlendMode>) {
        self.blending = mode;
    }

    fn clear(&mut self, color: Rgba) {
        self.clears.push(color);
    }

    fn set_light(&mut self, light: Option<Light>) {
        self.light = light;
    }

    fn set_fog(&mut self, fog: Option<Fog>) {
        self.fog = fog;
    }

    fn matrices(&mut self) -> &mut MatrixStack {
        &mut self.matrices
    }

    fn draw(&mut self, primitive: Primitive, vertices: &[Vec3], color: Rgba) {
        self.record(primitive, vertices, color, None);
    }

    fn draw_textured(
        &mut self,
        texture: TextureId,
        primitive: Primitive,
        vertices: &[Vec3],
        _uvs: &[[f32; 2]],
        tint: Rgba,
    ) {
        if self.textures.contains_key(&texture) {
            self.record(primitive, vertices, tint, Some(texture));
        }
    }

    fn create_texture(&mut self, width: u32, height: u32, pixels: &[u8]) -> Option<TextureId> {
        let len = rgba_len(width, height)?;
        if pixels.len() < len {
            return None;
        }
        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        self.textures
            .insert(id, (width, height, pixels[..len].to_vec()));
        Some(id)
    }

    fn update_texture(&mut self, id: TextureId, x: u32, y: u32, width: u32, height: u32, pixels: &[u8]) {
        let Some((tw, th, data)) = self.textures.get_mut(&id) else {
            return;
        };
        let Some(len) = rgba_len(width, height) else {
            return;
        };
        let in_bounds = x.checked_add(width).is_some_and(|r| r <= *tw)
            && y.checked_add(height).is_some_and(|b| b <= *th);
        if !in_bounds || pixels.len() < len {
            return;
        }

        let row = width as usize * 4;
        for j in 0..height as usize {
            let dst = ((y as usize + j) * *tw as usize + x as usize) * 4;
            data[dst..dst + row].copy_from_slice(&pixels[j * row..(j + 1) * row]);
        }
    }

    fn release_texture(&mut self, id: TextureId) {
        self.textures.remove(&id);
    }

    fn read_texture(&mut self, id: TextureId) -> Option<Vec<u8>> {
        self.textures.get(&id).map(|(_, _, px)| px.clone())
    }

    fn set_double_buffer(&mut self, enabled: bool) {
        self.double_buffer = enabled;
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.surface_size = (width, height);
    }

    fn present(&mut self, mode: PresentMode) -> Result<(), FatalError> {
        if let Some(reason) = &self.fail_present {
            return Err(FatalError::Surface(reason.clone()));
        }
        self.presents.push(mode);
        self.depth_at_present.push(self.matrices.depth());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_are_recorded_transformed() {
        let mut r = HeadlessRenderer::new(Canvas::new(100, 100));
        r.translate(Vec3::new(5.0, 0.0, 0.0));
        r.draw(Primitive::Points, &[Vec3::ZERO], Rgba::white());
        assert_eq!(r.draws[0].vertices, vec![Vec3::new(5.0, 0.0, 0.0)]);
    }

    #[test]
    fn degenerate_draws_are_dropped() {
        let mut r = HeadlessRenderer::new(Canvas::new(100, 100));
        r.draw(Primitive::Triangles, &[Vec3::ZERO; 2], Rgba::white());
        assert!(r.draws.is_empty());
    }

    #[test]
    fn texture_lifecycle() {
        let mut r = HeadlessRenderer::new(Canvas::new(100, 100));
        assert_eq!(r.create_texture(0, 2, &[]), None);
        assert_eq!(r.create_texture(2, 2, &[0; 4]), None);

        let id = r.create_texture(2, 2, &[0; 16]).unwrap();
        r.update_texture(id, 1, 1, 1, 1, &[9, 9, 9, 9]);
        assert_eq!(&r.texture_pixels(id).unwrap()[12..16], &[9, 9, 9, 9]);

        // Out of bounds: ignored.
        r.update_texture(id, 2, 0, 1, 1, &[1, 1, 1, 1]);
        assert_eq!(r.texture_pixels(id).unwrap()[..4], [0, 0, 0, 0]);

        assert_eq!(r.read_texture(id).as_deref(), r.texture_pixels(id));

        r.release_texture(id);
        assert_eq!(r.texture_count(), 0);
        assert_eq!(r.read_texture(id), None);
    }

    #[test]
    fn draws_remember_light_and_fog() {
        let mut r = HeadlessRenderer::new(Canvas::new(100, 100));
        r.set_light(Some(Light::default()));
        r.draw(Primitive::Points, &[Vec3::ZERO], Rgba::white());
        r.set_light(None);
        r.set_fog(Some(Fog { start: 1.0, end: 2.0, color: Rgba::black() }));
        r.draw(Primitive::Points, &[Vec3::ZERO], Rgba::white());

        assert!(r.draws[0].light.is_some() && r.draws[0].fog.is_none());
        assert!(r.draws[1].light.is_none() && r.draws[1].fog.is_some());
    }
}
