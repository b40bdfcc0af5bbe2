use super::{
    background::BackgroundState,
    camera::Camera,
    clock::Clock,
    compute::{ComputeState, CreateComputeOptions},
    gfx_state::GfxState,
    mesh::ParticleGeometry,
    particle_state::{CreateRenderOptions, ParticleState},
    uniform::{RenderUniform, SimUniform},
};
use crate::init::InitApp;
use crate::texture::{fill_position_data, fill_velocity_data};
use crate::util::CommonBuffer;
use rand::{rngs::StdRng, SeedableRng};
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// What the event loop should do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Presented,
    Skipped,
    Exit,
}

pub struct State {
    pub clock: Clock,
    pub camera: Camera,
    pub compute: ComputeState,
    pub particles: ParticleState,
    pub background: BackgroundState,
    pub gfx_state: GfxState,
    show_stats: bool,
    /// Kept alive for the render bind groups.
    _render_buffer: wgpu::Buffer,
}

impl State {
    pub fn new(init_app: InitApp, window: Window) -> anyhow::Result<Self> {
        let logical = window.inner_size().to_logical::<f32>(window.scale_factor());
        let gfx_state = pollster::block_on(GfxState::new(window))?;
        let device = &gfx_state.device;

        let settings = init_app.sim;
        let bounds_half = settings.bounds_half_for(logical);
        let half_resolution = [logical.width / 2., logical.height / 2.];

        log::info!(
            "Starting {} particles in bounds ±{:.1}",
            settings.particle_count(),
            bounds_half
        );

        let position_data = match init_app.seed {
            Some(seed) => {
                fill_position_data(settings.width, bounds_half, &mut StdRng::seed_from_u64(seed))
            }
            None => fill_position_data(settings.width, bounds_half, &mut rand::thread_rng()),
        };
        let velocity_data = fill_velocity_data(settings.width);

        let compute = ComputeState::new(CreateComputeOptions {
            device,
            queue: &gfx_state.queue,
            shaders: &init_app.shaders,
            sim_uniform: SimUniform::new(&settings, bounds_half),
            position_data: &position_data,
            velocity_data: &velocity_data,
        })?;

        let camera = Camera::new(device, half_resolution);

        let render_uniform = RenderUniform::new(&settings, half_resolution);
        let render_buffer =
            CommonBuffer::uniform(bytemuck::bytes_of(&render_uniform), device, "Render uniform");

        let options = CreateRenderOptions {
            device,
            surface_format: gfx_state.surface_format(),
            shaders: &init_app.shaders,
            camera: &camera,
            compute: &compute,
            render_buffer: &render_buffer,
            render_uniform: &render_uniform,
        };

        let geometry = ParticleGeometry::new(settings.width, settings.radius);
        let particles = ParticleState::new(&options, &geometry)?;
        let background = BackgroundState::new(&options)?;

        Ok(Self {
            clock: Clock::new(settings.max_delta_sec),
            camera,
            compute,
            particles,
            background,
            gfx_state,
            show_stats: init_app.show_stats,
            _render_buffer: render_buffer,
        })
    }

    pub fn update(&mut self) {
        self.clock.update();
        self.compute
            .update(&self.gfx_state.queue, self.clock.delta_sec());

        if self.show_stats && self.clock.stats_refreshed() {
            let stats = format!("{} | {}", self.clock.fps_text, self.clock.cpu_time_text);

            self.gfx_state.set_title(&format!("sph_field | {}", stats));
            log::debug!("Frame {}: {}", self.clock.frame(), stats);
        }
    }

    /// Runs one simulation step, then draws the density field and the
    /// particles from the freshly written positions.
    pub fn render(&mut self) -> FrameStatus {
        let output_frame = match self.gfx_state.current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gfx_state.reconfigure();
                return FrameStatus::Skipped;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Surface out of memory");
                return FrameStatus::Exit;
            }
            Err(err) => {
                log::warn!("Dropped frame with error: {}", err);
                return FrameStatus::Skipped;
            }
        };

        let output_view = output_frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gfx_state
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame encoder"),
            });

        self.compute.compute(&mut encoder);

        let position_idx = self.compute.ping_pong.read_idx();

        {
            let mut r_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Frame render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: true,
                    },
                })],
                depth_stencil_attachment: None,
            });

            self.background.render(position_idx, &mut r_pass);
            self.particles
                .render(&self.camera, position_idx, &mut r_pass);
        }

        self.gfx_state.queue.submit(Some(encoder.finish()));
        output_frame.present();

        FrameStatus::Presented
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.gfx_state.resize(size);
    }
}
