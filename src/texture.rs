use crate::error::GfxError;
use crate::traits::DefaultView;
use rand::Rng;
use std::num::NonZeroU32;

/// One simulation texel: `xy` carries the value, `z` is unused, `w` stays 1.
pub type Texel = [f32; 4];

pub const SIM_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba32Float;

const TEXEL_SIZE: u32 = std::mem::size_of::<Texel>() as u32;

/// Uniform random positions inside the centered square of half extent
/// `bounds_half`.
pub fn fill_position_data(width: u32, bounds_half: f32, rng: &mut impl Rng) -> Vec<Texel> {
    (0..width * width)
        .map(|_| {
            let x = (rng.gen::<f32>() * 2. - 1.) * bounds_half;
            let y = (rng.gen::<f32>() * 2. - 1.) * bounds_half;

            [x, y, 0., 1.]
        })
        .collect()
}

pub fn fill_velocity_data(width: u32) -> Vec<Texel> {
    vec![[0., 0., 0., 1.]; (width * width) as usize]
}

pub struct SimTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub width: u32,
}

impl SimTexture {
    pub fn new(device: &wgpu::Device, width: u32, label: &str) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: Self::extent(width),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: SIM_TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::STORAGE_BINDING
                | wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::COPY_SRC,
        });

        let view = texture.default_view();

        Self {
            texture,
            view,
            width,
        }
    }

    /// Pair of textures for ping-ponging, only the first one is filled.
    pub fn pair(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        width: u32,
        data: &[Texel],
        label: &str,
    ) -> [Self; 2] {
        let first = Self::new(device, width, &format!("{} 0", label));
        let second = Self::new(device, width, &format!("{} 1", label));

        first.write(queue, data);

        [first, second]
    }

    fn extent(width: u32) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width,
            height: width,
            depth_or_array_layers: 1,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue, data: &[Texel]) {
        assert_eq!(
            data.len(),
            (self.width * self.width) as usize,
            "Texel count must match the texture"
        );

        queue.write_texture(
            self.texture.as_image_copy(),
            bytemuck::cast_slice(data),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: NonZeroU32::new(TEXEL_SIZE * self.width),
                rows_per_image: NonZeroU32::new(self.width),
            },
            Self::extent(self.width),
        );
    }

    /// Copies the texture back to the host. Blocks until the GPU is done.
    pub fn read(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> Result<Vec<Texel>, GfxError> {
        let unpadded_row = TEXEL_SIZE * self.width;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_row = (unpadded_row + align - 1) / align * align;

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sim texture readback"),
            size: (padded_row * self.width) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Readback encoder"),
        });

        encoder.copy_texture_to_buffer(
            self.texture.as_image_copy(),
            wgpu::ImageCopyBuffer {
                buffer: &buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: NonZeroU32::new(padded_row),
                    rows_per_image: NonZeroU32::new(self.width),
                },
            },
            Self::extent(self.width),
        );

        queue.submit(std::iter::once(encoder.finish()));

        let slice = buffer.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            sender.send(result).ok();
        });
        device.poll(wgpu::Maintain::Wait);

        match receiver.recv() {
            Ok(result) => result?,
            Err(_) => return Err(GfxError::ReadbackDropped),
        }

        let mut texels = Vec::with_capacity((self.width * self.width) as usize);

        {
            let data = slice.get_mapped_range();

            for row in data.chunks(padded_row as usize) {
                let row: &[Texel] = bytemuck::cast_slice(&row[..unpadded_row as usize]);
                texels.extend_from_slice(row);
            }
        }

        buffer.unmap();

        Ok(texels)
    }
}

impl DefaultView for wgpu::Texture {
    fn default_view(&self) -> wgpu::TextureView {
        self.create_view(&wgpu::TextureViewDescriptor::default())
    }
}
