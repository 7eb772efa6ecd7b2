//! Pipelines for immediate-mode geometry and the canvas blit.

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};

use crate::render::{BlendMode, Primitive};

/// Offscreen canvas color format.
pub(crate) const CANVAS_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Offscreen canvas depth format.
pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

// ── vertex ────────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct DrawVertex {
    /// Clip-space position.
    pub pos: [f32; 4],
    pub color: [f32; 4],
    pub uv: [f32; 2],
    /// Fog color in rgb, fog amount in alpha.
    pub fog: [f32; 4],
}

impl DrawVertex {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x4, // pos
        1 => Float32x4, // color
        2 => Float32x2, // uv
        3 => Float32x4  // fog
    ];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<DrawVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

// ── topology ──────────────────────────────────────────────────────────────

/// GPU topology a primitive is drawn with after list expansion.
pub(crate) fn topology_for(primitive: Primitive) -> wgpu::PrimitiveTopology {
    match primitive {
        Primitive::Points => wgpu::PrimitiveTopology::PointList,
        Primitive::Lines | Primitive::LineStrip | Primitive::LineLoop => {
            wgpu::PrimitiveTopology::LineList
        }
        Primitive::Triangles | Primitive::TriangleFan | Primitive::Quads => {
            wgpu::PrimitiveTopology::TriangleList
        }
    }
}

// ── blend ─────────────────────────────────────────────────────────────────

/// Straight-alpha blend equations for each mode.
pub(crate) fn blend_state(mode: BlendMode) -> wgpu::BlendState {
    let (src, dst) = match mode {
        BlendMode::Alpha => (wgpu::BlendFactor::SrcAlpha, wgpu::BlendFactor::OneMinusSrcAlpha),
        BlendMode::Additive => (wgpu::BlendFactor::SrcAlpha, wgpu::BlendFactor::One),
        BlendMode::Multiply => (wgpu::BlendFactor::Dst, wgpu::BlendFactor::OneMinusSrcAlpha),
    };
    let component = wgpu::BlendComponent {
        src_factor: src,
        dst_factor: dst,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

// ── pipeline cache ────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub(crate) struct PipelineKey {
    pub topology: wgpu::PrimitiveTopology,
    pub depth_test: bool,
    pub blend: Option<BlendMode>,
}

/// Draw pipelines, built on first use per (topology, depth, blend) combination.
pub(crate) struct DrawPipelines {
    shader: wgpu::ShaderModule,
    layout: wgpu::PipelineLayout,
    pub(crate) texture_layout: wgpu::BindGroupLayout,
    cache: HashMap<PipelineKey, wgpu::RenderPipeline>,
}

impl DrawPipelines {
    pub(crate) fn new(device: &wgpu::Device) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("easel draw shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/draw.wgsl").into()),
        });

        let texture_layout = texture_bind_group_layout(device, "easel texture bgl");

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("easel draw pipeline layout"),
            bind_group_layouts: &[&texture_layout],
            immediate_size: 0,
        });

        Self {
            shader,
            layout,
            texture_layout,
            cache: HashMap::new(),
        }
    }

    pub(crate) fn ensure(&mut self, device: &wgpu::Device, key: PipelineKey) {
        if self.cache.contains_key(&key) {
            return;
        }

        log::debug!("building draw pipeline {:?}", key);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("easel draw pipeline"),
            layout: Some(&self.layout),

            vertex: wgpu::VertexState {
                module: &self.shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[DrawVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &self.shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: CANVAS_FORMAT,
                    blend: key.blend.map(blend_state),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: key.topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: key.depth_test,
                depth_compare: if key.depth_test {
                    wgpu::CompareFunction::Less
                } else {
                    wgpu::CompareFunction::Always
                },
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        self.cache.insert(key, pipeline);
    }

    pub(crate) fn get(&self, key: &PipelineKey) -> Option<&wgpu::RenderPipeline> {
        self.cache.get(key)
    }
}

// ── blit ──────────────────────────────────────────────────────────────────

/// Copies the offscreen canvas onto the window surface.
pub(crate) struct BlitPipeline {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    pub(crate) bind_group_layout: wgpu::BindGroupLayout,
}

impl BlitPipeline {
    pub(crate) fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("easel blit shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/blit.wgsl").into()),
        });

        let bind_group_layout = texture_bind_group_layout(device, "easel blit bgl");

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("easel blit pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("easel blit pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Self {
            format,
            pipeline,
            bind_group_layout,
        }
    }

    #[inline]
    pub(crate) fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    #[inline]
    pub(crate) fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }
}

fn texture_bind_group_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_and_fans_map_to_list_topologies() {
        assert_eq!(topology_for(Primitive::LineLoop), wgpu::PrimitiveTopology::LineList);
        assert_eq!(topology_for(Primitive::TriangleFan), wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(topology_for(Primitive::Quads), wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(topology_for(Primitive::Points), wgpu::PrimitiveTopology::PointList);
    }

    #[test]
    fn additive_blend_adds_destination() {
        let b = blend_state(BlendMode::Additive);
        assert_eq!(b.color.src_factor, wgpu::BlendFactor::SrcAlpha);
        assert_eq!(b.color.dst_factor, wgpu::BlendFactor::One);
    }

    #[test]
    fn vertex_layout_matches_struct() {
        assert_eq!(std::mem::size_of::<DrawVertex>(), 56);
        assert_eq!(DrawVertex::layout().array_stride, 56);
    }
}
