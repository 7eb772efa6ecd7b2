use std::collections::HashMap;
use std::ops::Range;
use std::sync::{mpsc, Arc};

use anyhow::Result;
use glam::{Mat4, Vec3};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::coords::Canvas;
use crate::core::FatalError;
use crate::paint::Rgba;
use crate::render::tessellate::expand_attrs;
use crate::render::{
    rgba_len, shade_triangles, BlendMode, Fog, Light, MatrixStack, PresentMode, Primitive,
    Projection, Renderer, TextureId,
};

use super::error::SurfaceErrorAction;
use super::gpu::Gpu;
use super::pipeline::{
    topology_for, BlitPipeline, DrawPipelines, DrawVertex, PipelineKey, CANVAS_FORMAT,
    DEPTH_FORMAT,
};

/// [`Renderer`] on top of wgpu.
///
/// Draw calls are transformed on the CPU, expanded to list topologies and
/// queued for the frame. `present` replays them into an offscreen canvas
/// texture sized to the logical canvas, then scales that texture into the
/// top-left of the window by the canvas' integer factor.
///
/// The canvas texture persists across frames, so a sketch that never calls
/// `background` keeps accumulating what it draws.
pub struct WgpuRenderer {
    gpu: Gpu,
    pipelines: DrawPipelines,
    blit: BlitPipeline,
    sampler: wgpu::Sampler,
    blit_sampler: wgpu::Sampler,

    canvas: Canvas,
    target: Option<CanvasTarget>,

    projection: Mat4,
    perspective: bool,
    matrices: MatrixStack,
    depth_test: bool,
    blending: Option<BlendMode>,
    light: Option<Light>,
    fog: Option<Fog>,

    textures: HashMap<TextureId, GpuTexture>,
    next_texture: u32,
    white: TextureId,

    passes: Vec<QueuedPass>,
    vertices: Vec<DrawVertex>,
    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,
}

struct CanvasTarget {
    width: u32,
    height: u32,
    color_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
    blit_bind_group: wgpu::BindGroup,
}

struct GpuTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
}

/// Work between two clears.
struct QueuedPass {
    clear: Option<Rgba>,
    batches: Vec<Batch>,
}

struct Batch {
    key: PipelineKey,
    texture: TextureId,
    range: Range<u32>,
}

impl WgpuRenderer {
    pub async fn new(window: Arc<Window>, prefer_srgb: bool, canvas: Canvas) -> Result<Self> {
        let gpu = Gpu::new(window, prefer_srgb).await?;
        let device = gpu.device();

        let pipelines = DrawPipelines::new(device);
        let blit = BlitPipeline::new(device, gpu.surface_format());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("easel texture sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        // Integer upscale; keep pixels sharp.
        let blit_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("easel blit sampler"),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        log::info!(
            "wgpu renderer ready: surface {:?}, canvas {}x{}",
            blit.format(),
            canvas.width,
            canvas.height
        );

        let mut renderer = Self {
            gpu,
            pipelines,
            blit,
            sampler,
            blit_sampler,
            canvas,
            target: None,
            projection: Projection::TwoD.matrix(canvas),
            perspective: false,
            matrices: MatrixStack::new(),
            depth_test: false,
            blending: Some(BlendMode::Alpha),
            light: None,
            fog: None,
            textures: HashMap::new(),
            next_texture: 0,
            white: TextureId(0),
            passes: Vec::new(),
            vertices: Vec::new(),
            vbo: None,
            vbo_capacity: 0,
        };

        renderer.white = renderer
            .create_texture(1, 1, &[255, 255, 255, 255])
            .ok_or_else(|| anyhow::anyhow!("failed to create white texture"))?;
        renderer.ensure_target();

        Ok(renderer)
    }

    fn ensure_target(&mut self) {
        let width = self.canvas.width.max(1);
        let height = self.canvas.height.max(1);
        if self
            .target
            .as_ref()
            .is_some_and(|t| t.width == width && t.height == height)
        {
            return;
        }

        let device = self.gpu.device();
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let color = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("easel canvas color"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: CANVAS_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let depth = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("easel canvas depth"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());
        let depth_view = depth.create_view(&wgpu::TextureViewDescriptor::default());

        let blit_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("easel blit bind group"),
            layout: &self.blit.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&color_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.blit_sampler),
                },
            ],
        });

        log::debug!("canvas target {}x{}", width, height);
        self.target = Some(CanvasTarget {
            width,
            height,
            color_view,
            depth_view,
            blit_bind_group,
        });

        // A fresh target has undefined contents.
        if self.passes.first().is_none_or(|p| p.clear.is_none()) {
            self.passes.insert(
                0,
                QueuedPass {
                    clear: Some(Rgba::black()),
                    batches: Vec::new(),
                },
            );
        }
    }

    fn queue(&mut self, primitive: Primitive, texture: TextureId, positions: &[Vec3], uvs: &[[f32; 2]], color: Rgba) {
        if positions.len() < primitive.min_vertices() {
            return;
        }

        let model_view = self.matrices.current();
        let eye: Vec<Vec3> = expand_attrs(primitive, positions)
            .iter()
            .map(|&p| model_view.transform_point3(p))
            .collect();
        let uvs = if uvs.is_empty() {
            Vec::new()
        } else {
            expand_attrs(primitive, uvs)
        };
        if eye.is_empty() {
            return;
        }

        let topology = topology_for(primitive);
        let lit = match self.light {
            Some(light) if topology == wgpu::PrimitiveTopology::TriangleList => {
                shade_triangles(&light, &eye, color, self.perspective)
            }
            _ => Vec::new(),
        };

        let start = self.vertices.len() as u32;
        for (i, p) in eye.iter().enumerate() {
            let clip = self.projection * p.extend(1.0);
            self.vertices.push(DrawVertex {
                pos: clip.to_array(),
                color: lit.get(i).copied().unwrap_or(color).to_array(),
                uv: uvs.get(i).copied().unwrap_or([0.0, 0.0]),
                fog: self.fog.map_or([0.0; 4], |fog| fog.term(*p)),
            });
        }
        let end = self.vertices.len() as u32;

        let key = PipelineKey {
            topology,
            depth_test: self.depth_test,
            blend: self.blending,
        };

        if self.passes.is_empty() {
            self.passes.push(QueuedPass {
                clear: None,
                batches: Vec::new(),
            });
        }
        let Some(pass) = self.passes.last_mut() else { return };

        // Merge with the previous batch when nothing but the range differs.
        if let Some(last) = pass.batches.last_mut() {
            if last.key == key && last.texture == texture && last.range.end == start {
                last.range.end = end;
                return;
            }
        }
        pass.batches.push(Batch {
            key,
            texture,
            range: start..end,
        });
    }

    fn ensure_vertex_capacity(&mut self, required: usize) {
        if required <= self.vbo_capacity && self.vbo.is_some() {
            return;
        }

        let new_cap = required.next_power_of_two().max(1024);
        self.vbo = Some(self.gpu.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some("easel vertex buffer"),
            size: (new_cap * std::mem::size_of::<DrawVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vbo_capacity = new_cap;
    }

    /// Replays the queued passes into the canvas texture.
    fn flush_canvas(&mut self) {
        if self.passes.is_empty() {
            return;
        }

        if !self.vertices.is_empty() {
            self.ensure_vertex_capacity(self.vertices.len());
            if let Some(vbo) = self.vbo.as_ref() {
                self.gpu
                    .queue()
                    .write_buffer(vbo, 0, bytemuck::cast_slice(&self.vertices));
            }
        }

        for pass in &self.passes {
            for batch in &pass.batches {
                self.pipelines.ensure(self.gpu.device(), batch.key);
            }
        }

        let Some(target) = self.target.as_ref() else { return };
        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("easel canvas encoder"),
            });

        for (i, pass) in self.passes.iter().enumerate() {
            let color_load = match pass.clear {
                Some(c) => wgpu::LoadOp::Clear(wgpu::Color {
                    r: c.r as f64,
                    g: c.g as f64,
                    b: c.b as f64,
                    a: c.a as f64,
                }),
                None => wgpu::LoadOp::Load,
            };
            // Depth starts fresh each frame and after every clear.
            let depth_load = if i == 0 || pass.clear.is_some() {
                wgpu::LoadOp::Clear(1.0)
            } else {
                wgpu::LoadOp::Load
            };

            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("easel canvas pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: color_load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &target.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: depth_load,
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let Some(vbo) = self.vbo.as_ref() else { continue };
            rpass.set_vertex_buffer(0, vbo.slice(..));

            for batch in &pass.batches {
                let Some(pipeline) = self.pipelines.get(&batch.key) else { continue };
                let texture = self
                    .textures
                    .get(&batch.texture)
                    .or_else(|| self.textures.get(&self.white));
                let Some(texture) = texture else { continue };

                rpass.set_pipeline(pipeline);
                rpass.set_bind_group(0, &texture.bind_group, &[]);
                rpass.draw(batch.range.clone(), 0..1);
            }
        }

        self.gpu.queue().submit(std::iter::once(encoder.finish()));
        self.passes.clear();
        self.vertices.clear();
    }

    /// Scales the canvas texture onto the window surface and presents it.
    fn present_canvas(&mut self) -> Result<(), FatalError> {
        let size = self.gpu.size();
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                return match self.gpu.handle_surface_error(&err) {
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        log::debug!("skipping frame: {err}");
                        Ok(())
                    }
                    SurfaceErrorAction::Fatal => Err(FatalError::Surface(err.to_string())),
                };
            }
        };

        let Some(target) = self.target.as_ref() else { return Ok(()) };
        let (vw, vh) = self.canvas.scaled_size();
        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("easel blit pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_viewport(
                0.0,
                0.0,
                vw.min(size.width) as f32,
                vh.min(size.height) as f32,
                0.0,
                1.0,
            );
            rpass.set_pipeline(self.blit.pipeline());
            rpass.set_bind_group(0, &target.blit_bind_group, &[]);
            rpass.draw(0..3, 0..1);
        }

        self.gpu.submit(frame);
        Ok(())
    }

    fn write_pixels(&self, texture: &wgpu::Texture, x: u32, y: u32, width: u32, height: u32, pixels: &[u8]) {
        self.gpu.queue().write_texture(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Copies a texture back to the CPU, blocking until the GPU is done.
    fn read_pixels(&self, tex: &GpuTexture) -> Option<Vec<u8>> {
        let row = tex.width as usize * 4;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT as usize;
        let padded_row = row.div_ceil(align) * align;

        let device = self.gpu.device();
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("easel readback buffer"),
            size: (padded_row * tex.height as usize) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("easel readback encoder"),
        });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &tex.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row as u32),
                    rows_per_image: Some(tex.height),
                },
            },
            wgpu::Extent3d {
                width: tex.width,
                height: tex.height,
                depth_or_array_layers: 1,
            },
        );
        self.gpu.queue().submit(std::iter::once(encoder.finish()));

        let slice = buffer.slice(..);
        let (tx, rx) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        if let Err(err) = device.poll(wgpu::PollType::wait_indefinitely()) {
            log::warn!("read_texture: poll failed: {err}");
            return None;
        }
        match rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                log::warn!("read_texture: map failed: {err}");
                return None;
            }
            Err(_) => return None,
        }

        let mut pixels = Vec::with_capacity(row * tex.height as usize);
        {
            let data = slice.get_mapped_range();
            for chunk in data.chunks(padded_row) {
                pixels.extend_from_slice(&chunk[..row]);
            }
        }
        buffer.unmap();
        Some(pixels)
    }
}

impl Renderer for WgpuRenderer {
    fn set_projection(&mut self, projection: Projection, canvas: Canvas) {
        self.projection = projection.matrix(canvas);
        self.perspective = projection.is_3d();
        self.canvas = canvas;
        self.ensure_target();
    }

    fn set_depth_test(&mut self, enabled: bool) {
        self.depth_test = enabled;
    }

    fn set_blending(&mut self, mode: Option<BlendMode>) {
        self.blending = mode;
    }

    fn clear(&mut self, color: Rgba) {
        // Everything queued before a full clear would be overwritten.
        self.passes.clear();
        self.passes.push(QueuedPass {
            clear: Some(color),
            batches: Vec::new(),
        });
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
        let white = self.white;
        self.queue(primitive, white, vertices, &[], color);
    }

    fn draw_textured(
        &mut self,
        texture: TextureId,
        primitive: Primitive,
        vertices: &[Vec3],
        uvs: &[[f32; 2]],
        tint: Rgba,
    ) {
        if !self.textures.contains_key(&texture) {
            log::debug!("draw_textured: unknown texture {:?}", texture);
            return;
        }
        self.queue(primitive, texture, vertices, uvs, tint);
    }

    fn create_texture(&mut self, width: u32, height: u32, pixels: &[u8]) -> Option<TextureId> {
        let len = rgba_len(width, height)?;
        if pixels.len() < len {
            log::warn!(
                "create_texture: {} bytes given, {}x{} needs {}",
                pixels.len(),
                width,
                height,
                len
            );
            return None;
        }

        let device = self.gpu.device();
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("easel texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("easel texture bind group"),
            layout: &self.pipelines.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        self.write_pixels(&texture, 0, 0, width, height, &pixels[..len]);

        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(
            id,
            GpuTexture {
                texture,
                bind_group,
                width,
                height,
            },
        );
        Some(id)
    }

    fn update_texture(&mut self, id: TextureId, x: u32, y: u32, width: u32, height: u32, pixels: &[u8]) {
        let Some(tex) = self.textures.get(&id) else {
            log::debug!("update_texture: unknown texture {:?}", id);
            return;
        };
        let Some(len) = rgba_len(width, height) else { return };
        let in_bounds = x.checked_add(width).is_some_and(|r| r <= tex.width)
            && y.checked_add(height).is_some_and(|b| b <= tex.height);
        if !in_bounds || pixels.len() < len {
            log::warn!("update_texture: region {}x{} at ({}, {}) rejected", width, height, x, y);
            return;
        }
        self.write_pixels(&tex.texture, x, y, width, height, &pixels[..len]);
    }

    fn release_texture(&mut self, id: TextureId) {
        if id == self.white {
            return;
        }
        // Queued draws fall back to white if their texture is gone.
        self.textures.remove(&id);
    }

    fn read_texture(&mut self, id: TextureId) -> Option<Vec<u8>> {
        let Some(tex) = self.textures.get(&id) else {
            log::debug!("read_texture: unknown texture {:?}", id);
            return None;
        };
        self.read_pixels(tex)
    }

    fn set_double_buffer(&mut self, enabled: bool) {
        self.gpu.set_vsync(enabled);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(PhysicalSize::new(width, height));
        self.canvas.set_physical(width, height);
    }

    /// Both modes show the canvas; single buffering only drops vsync (see
    /// `set_double_buffer`).
    fn present(&mut self, _mode: PresentMode) -> Result<(), FatalError> {
        self.flush_canvas();
        self.present_canvas()
    }
}
