//! Fullscreen galaxy pass: one triangle covering the surface, shaded by the
//! star-field fragment program.

use stardust_field::shader::{FRAGMENT_ENTRY, VERTEX_ENTRY};
use stardust_field::{GALAXY_SHADER_SOURCE, GalaxyUniforms, GpuGalaxyUniforms};
use wgpu::util::DeviceExt;

use crate::pass::RenderPassBuilder;

/// GPU pipeline, uniform buffer, and bind group for the galaxy pass.
pub struct GalaxyPipeline {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    transparent: bool,
}

impl GalaxyPipeline {
    /// Build the pipeline for `target_format`.
    ///
    /// Transparent output blends source-over onto a cleared target, so the
    /// stored color is premultiplied; opaque output replaces the target.
    pub fn new(device: &wgpu::Device, target_format: wgpu::TextureFormat, transparent: bool) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("galaxy-shader"),
            source: wgpu::ShaderSource::Wgsl(GALAXY_SHADER_SOURCE.into()),
        });

        let uniform_size = std::mem::size_of::<GpuGalaxyUniforms>() as u64;
        let uniform_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("galaxy-uniform-bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: std::num::NonZeroU64::new(uniform_size),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("galaxy-pipeline-layout"),
            bind_group_layouts: &[&uniform_bgl],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("galaxy-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(VERTEX_ENTRY),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(FRAGMENT_ENTRY),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: blend_state(transparent),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("galaxy-uniform"),
            contents: bytemuck::bytes_of(&GalaxyUniforms::default().to_gpu()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("galaxy-uniform-bg"),
            layout: &uniform_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        log::info!(
            "Galaxy pipeline initialized: {target_format:?}, {}",
            if transparent { "transparent" } else { "opaque" }
        );

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            transparent,
        }
    }

    /// Upload this frame's uniform snapshot.
    pub fn update(&self, queue: &wgpu::Queue, uniforms: &GalaxyUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms.to_gpu()));
    }

    /// Pass configuration matching this pipeline's output mode.
    pub fn pass_builder(&self) -> RenderPassBuilder {
        RenderPassBuilder::for_output(self.transparent).label("galaxy-pass")
    }

    /// Draw the fullscreen triangle.
    pub fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

fn blend_state(transparent: bool) -> Option<wgpu::BlendState> {
    transparent.then_some(wgpu::BlendState::ALPHA_BLENDING)
}
