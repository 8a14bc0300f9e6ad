use crate::mesh::VertexLayout;

use super::gpu_mesh::vertex_buffer_layout;
use super::shader::{self, CompiledShader, ShaderPaths, ShaderSource, ShaderStage};
use super::{RenderCtx, ShaderError};

/// Render pipeline for the interleaved position + color mesh.
pub struct MeshPipeline {
    pipeline: wgpu::RenderPipeline,
}

impl MeshPipeline {
    /// Loads, compiles and links the two stages from disk, then builds the pipeline.
    pub fn new(ctx: &RenderCtx<'_>, paths: &ShaderPaths) -> Result<Self, ShaderError> {
        let vertex = CompiledShader::compile(ShaderSource::load(
            &paths.vertex_path(),
            ShaderStage::Vertex,
        )?)?;
        let fragment = CompiledShader::compile(ShaderSource::load(
            &paths.fragment_path(),
            ShaderStage::Fragment,
        )?)?;

        Self::from_shaders(ctx, &vertex, &fragment)
    }

    pub fn from_shaders(
        ctx: &RenderCtx<'_>,
        vertex: &CompiledShader,
        fragment: &CompiledShader,
    ) -> Result<Self, ShaderError> {
        shader::link(vertex, fragment, &VertexLayout::interleaved())?;

        let vs_module = create_module(ctx.device, vertex);
        let fs_module = create_module(ctx.device, fragment);

        let layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("cracking mesh pipeline layout"),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("cracking mesh pipeline"),
            layout: Some(&layout),

            vertex: wgpu::VertexState {
                module: &vs_module,
                entry_point: Some(ShaderStage::Vertex.entry_point()),
                compilation_options: Default::default(),
                buffers: &[vertex_buffer_layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs_module,
                entry_point: Some(ShaderStage::Fragment.entry_point()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Corner order is caller-defined; draw both windings.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("mesh pipeline built for {:?}", ctx.surface_format);

        Ok(Self { pipeline })
    }

    #[inline]
    pub(crate) fn raw(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }
}

fn create_module(device: &wgpu::Device, shader: &CompiledShader) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(shader.label()),
        source: wgpu::ShaderSource::Wgsl(shader.code().into()),
    })
}
