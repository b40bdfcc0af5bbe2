use crate::error::GfxError;
use winit::dpi::PhysicalSize;
use winit::window;

/**
GfxState is used to pass around to others modules.
See for example particle_state.rs
*/
pub struct GfxState {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface_config: wgpu::SurfaceConfiguration,
    surface: wgpu::Surface,
    window: window::Window,
}

impl GfxState {
    pub async fn new(window: window::Window) -> Result<Self, GfxError> {
        let instance = wgpu::Instance::new(wgpu::Backends::all());
        let surface = unsafe { instance.create_surface(&window) };

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GfxError::AdapterNotFound)?;

        log::info!("Using adapter: {:?}", adapter.get_info());

        let (device, queue) = Self::request_device(&adapter).await?;

        let size = window.inner_size();
        let formats = surface.get_supported_formats(&adapter);

        let surface_format = formats
            .iter()
            .find(|f| f.describe().srgb)
            .or_else(|| formats.first())
            .copied()
            .ok_or(GfxError::SurfaceNotSupported)?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
        };

        surface.configure(&device, &surface_config);

        Ok(Self {
            device,
            queue,
            surface_config,
            surface,
            window,
        })
    }

    /// Device without a surface, `None` when the machine has no adapter.
    pub async fn request_headless() -> Result<Option<(wgpu::Device, wgpu::Queue)>, GfxError> {
        let instance = wgpu::Instance::new(wgpu::Backends::all());

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await;

        match adapter {
            Some(adapter) => Ok(Some(Self::request_device(&adapter).await?)),
            None => Ok(None),
        }
    }

    async fn request_device(
        adapter: &wgpu::Adapter,
    ) -> Result<(wgpu::Device, wgpu::Queue), GfxError> {
        let device_queue = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Sim device"),
                    features: wgpu::Features::empty(),
                    limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        Ok(device_queue)
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    pub fn current_texture(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width > 0 && size.height > 0 {
            self.surface_config.width = size.width;
            self.surface_config.height = size.height;
            self.reconfigure();
        }
    }

    pub fn window_id(&self) -> window::WindowId {
        self.window.id()
    }

    pub fn window(&self) -> &window::Window {
        &self.window
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }
}
