use super::{ping_pong::PingPongState, uniform::SimUniform};
use crate::error::GfxError;
use crate::shaders::ShaderSources;
use crate::texture::{SimTexture, Texel, SIM_TEXTURE_FORMAT};
use crate::traits::CustomShader;
use crate::util::CommonBuffer;

const WORKGROUP_SIZE: u32 = 8;

/// Double-buffered position and velocity textures advanced by two compute
/// passes per frame: velocity first, then position from that same-frame
/// velocity.
pub struct ComputeState {
    velocity_pipeline: wgpu::ComputePipeline,
    position_pipeline: wgpu::ComputePipeline,
    /// Indexed by the read side of `ping_pong`.
    velocity_bind_groups: [wgpu::BindGroup; 2],
    position_bind_groups: [wgpu::BindGroup; 2],
    sim_buffer: wgpu::Buffer,

    pub sim_uniform: SimUniform,
    pub positions: [SimTexture; 2],
    pub velocities: [SimTexture; 2],
    pub ping_pong: PingPongState,
    pub dispatch_count: u32,
}

pub struct CreateComputeOptions<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub shaders: &'a ShaderSources,
    pub sim_uniform: SimUniform,
    pub position_data: &'a [Texel],
    pub velocity_data: &'a [Texel],
}

impl ComputeState {
    pub fn new(options: CreateComputeOptions) -> Result<Self, GfxError> {
        let CreateComputeOptions {
            device,
            queue,
            shaders,
            sim_uniform,
            position_data,
            velocity_data,
        } = options;

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let width = sim_uniform.texture_width;
        let positions = SimTexture::pair(device, queue, width, position_data, "Position texture");
        let velocities = SimTexture::pair(device, queue, width, velocity_data, "Velocity texture");

        let sim_content = bytemuck::bytes_of(&sim_uniform);
        let sim_buffer = CommonBuffer::uniform(sim_content, device, "Sim uniform");

        // Both passes share one layout: uniform, two inputs, one output.
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Sim compute layout"),
            entries: &[
                CommonBuffer::uniform_entry(0, wgpu::ShaderStages::COMPUTE, sim_content),
                CommonBuffer::texture_entry(1, wgpu::ShaderStages::COMPUTE),
                CommonBuffer::texture_entry(2, wgpu::ShaderStages::COMPUTE),
                CommonBuffer::storage_texture_entry(3, SIM_TEXTURE_FORMAT),
            ],
        });

        let create_bind_group = |label: &str, inputs: [&SimTexture; 2], output: &SimTexture| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: sim_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(&inputs[0].view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::TextureView(&inputs[1].view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 3,
                        resource: wgpu::BindingResource::TextureView(&output.view),
                    },
                ],
            })
        };

        let bind_groups_for = |read_idx: usize| {
            let write_idx = (read_idx + 1) % 2;

            let velocity = create_bind_group(
                &format!("Velocity bind group {}", read_idx),
                [&positions[read_idx], &velocities[read_idx]],
                &velocities[write_idx],
            );

            // Velocity input is the texture the velocity pass just wrote.
            let position = create_bind_group(
                &format!("Position bind group {}", read_idx),
                [&positions[read_idx], &velocities[write_idx]],
                &positions[write_idx],
            );

            (velocity, position)
        };

        let (velocity_0, position_0) = bind_groups_for(0);
        let (velocity_1, position_1) = bind_groups_for(1);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sim compute pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let create_pipeline = |source: &str, label: &str| {
            let shader = device.create_shader(source, label);

            device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                module: &shader,
                entry_point: "main",
            })
        };

        let velocity_pipeline = create_pipeline(&shaders.velocity, "Velocity pipeline");
        let position_pipeline = create_pipeline(&shaders.position, "Position pipeline");

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(GfxError::Pipeline {
                label: "Sim compute".to_string(),
                message: err.to_string(),
            });
        }

        let dispatch_count = (width + WORKGROUP_SIZE - 1) / WORKGROUP_SIZE;

        log::info!(
            "Compute ready: {} particles, {}x{} workgroups",
            width * width,
            dispatch_count,
            dispatch_count
        );

        Ok(Self {
            velocity_pipeline,
            position_pipeline,
            velocity_bind_groups: [velocity_0, velocity_1],
            position_bind_groups: [position_0, position_1],
            sim_buffer,
            sim_uniform,
            positions,
            velocities,
            ping_pong: PingPongState::new(),
            dispatch_count,
        })
    }

    pub fn update(&mut self, queue: &wgpu::Queue, delta_sec: f32) {
        self.sim_uniform.delta_time = delta_sec;

        queue.write_buffer(&self.sim_buffer, 0, bytemuck::bytes_of(&self.sim_uniform));
    }

    /// Encodes one simulation step and swaps the ping-pong roles.
    pub fn compute(&mut self, encoder: &mut wgpu::CommandEncoder) {
        let read_idx = self.ping_pong.read_idx();

        {
            let mut c_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Sim compute pass"),
            });

            c_pass.set_pipeline(&self.velocity_pipeline);
            c_pass.set_bind_group(0, &self.velocity_bind_groups[read_idx], &[]);
            c_pass.dispatch_workgroups(self.dispatch_count, self.dispatch_count, 1);

            c_pass.set_pipeline(&self.position_pipeline);
            c_pass.set_bind_group(0, &self.position_bind_groups[read_idx], &[]);
            c_pass.dispatch_workgroups(self.dispatch_count, self.dispatch_count, 1);
        }

        self.ping_pong.swap();
    }

    /// Position texture holding the latest step.
    pub fn current_positions(&self) -> &SimTexture {
        self.ping_pong.split(&self.positions).0
    }

    pub fn current_velocities(&self) -> &SimTexture {
        self.ping_pong.split(&self.velocities).0
    }
}
