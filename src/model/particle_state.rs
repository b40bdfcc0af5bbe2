use super::{
    camera::Camera,
    compute::ComputeState,
    mesh::{ParticleGeometry, ParticleMesh},
    uniform::RenderUniform,
};
use crate::error::GfxError;
use crate::shaders::ShaderSources;
use crate::traits::CustomShader;
use crate::util::CommonBuffer;

pub struct CreateRenderOptions<'a> {
    pub device: &'a wgpu::Device,
    pub surface_format: wgpu::TextureFormat,
    pub shaders: &'a ShaderSources,
    pub camera: &'a Camera,
    pub compute: &'a ComputeState,
    pub render_buffer: &'a wgpu::Buffer,
    pub render_uniform: &'a RenderUniform,
}

impl<'a> CreateRenderOptions<'a> {
    /// One bind group per ping-pong texture: uniform at 0, positions at 1.
    pub fn position_bind_groups(
        &self,
        layout: &wgpu::BindGroupLayout,
        label: &str,
    ) -> [wgpu::BindGroup; 2] {
        let create = |idx: usize| {
            self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("{} {}", label, idx)),
                layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: self.render_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(
                            &self.compute.positions[idx].view,
                        ),
                    },
                ],
            })
        };

        [create(0), create(1)]
    }

    pub fn position_layout(
        &self,
        visibility: wgpu::ShaderStages,
        label: &str,
    ) -> wgpu::BindGroupLayout {
        self.device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(label),
                entries: &[
                    CommonBuffer::uniform_entry(0, visibility, bytemuck::bytes_of(self.render_uniform)),
                    CommonBuffer::texture_entry(1, visibility),
                ],
            })
    }
}

/// Billboard quads placed by the vertex shader from the position texture,
/// blended additively so overlapping particles brighten.
pub struct ParticleState {
    pipeline: wgpu::RenderPipeline,
    mesh: ParticleMesh,
    bind_groups: [wgpu::BindGroup; 2],
}

impl ParticleState {
    pub const BLEND: wgpu::BlendState = wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
    };

    pub fn new(options: &CreateRenderOptions, geometry: &ParticleGeometry) -> Result<Self, GfxError> {
        let device = options.device;

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let mesh = geometry.upload(device);
        let layout = options.position_layout(wgpu::ShaderStages::VERTEX, "Particle layout");
        let bind_groups = options.position_bind_groups(&layout, "Particle bind group");

        let shader = device.create_shader(&options.shaders.particle, "Particle shader");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Particle pipeline layout"),
            bind_group_layouts: &[&options.camera.uniform.bg_layout, &layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Particle pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &ParticleMesh::desc(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: options.surface_format,
                    blend: Some(Self::BLEND),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            multiview: None,
        });

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(GfxError::Pipeline {
                label: "Particle".to_string(),
                message: err.to_string(),
            });
        }

        Ok(Self {
            pipeline,
            mesh,
            bind_groups,
        })
    }

    /// `position_idx` selects the texture holding the latest step.
    pub fn render<'a>(
        &'a self,
        camera: &'a Camera,
        position_idx: usize,
        r_pass: &mut wgpu::RenderPass<'a>,
    ) {
        r_pass.set_pipeline(&self.pipeline);
        r_pass.set_bind_group(0, &camera.uniform.bg, &[]);
        r_pass.set_bind_group(1, &self.bind_groups[position_idx], &[]);
        self.mesh.bind(r_pass);
        r_pass.draw(0..self.mesh.vertex_count, 0..1);
    }
}
