use super::particle_state::CreateRenderOptions;
use crate::error::GfxError;
use crate::traits::CustomShader;

/// Full-screen density field. Every fragment sums the smoothing kernel over
/// all particles, so this pass is O(pixels * particles).
pub struct BackgroundState {
    pipeline: wgpu::RenderPipeline,
    bind_groups: [wgpu::BindGroup; 2],
}

impl BackgroundState {
    const VERTEX_COUNT: u32 = 4;

    pub fn new(options: &CreateRenderOptions) -> Result<Self, GfxError> {
        let device = options.device;

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let layout = options.position_layout(wgpu::ShaderStages::FRAGMENT, "Background layout");
        let bind_groups = options.position_bind_groups(&layout, "Background bind group");

        let shader = device.create_shader(&options.shaders.background, "Background shader");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Background pipeline layout"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Background pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[],
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
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
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            multiview: None,
        });

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(GfxError::Pipeline {
                label: "Background".to_string(),
                message: err.to_string(),
            });
        }

        Ok(Self {
            pipeline,
            bind_groups,
        })
    }

    pub fn render<'a>(&'a self, position_idx: usize, r_pass: &mut wgpu::RenderPass<'a>) {
        r_pass.set_pipeline(&self.pipeline);
        r_pass.set_bind_group(0, &self.bind_groups[position_idx], &[]);
        r_pass.draw(0..Self::VERTEX_COUNT, 0..1);
    }
}
