use crate::traits::CalculateBufferSize;
use wgpu::util::DeviceExt;

/// A single uniform buffer with its own bind group.
pub struct UniformContext {
    pub buf: wgpu::Buffer,
    pub bg: wgpu::BindGroup,
    pub bg_layout: wgpu::BindGroupLayout,
}

impl UniformContext {
    pub fn from_content(
        contents: &[u8],
        device: &wgpu::Device,
        label: &str,
        visibility: wgpu::ShaderStages,
    ) -> Self {
        let buf = CommonBuffer::uniform(contents, device, label);

        let bg_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{} uniform layout", label)),
            entries: &[CommonBuffer::uniform_entry(0, visibility, contents)],
        });

        let bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} uniform bindgroup", label)),
            layout: &bg_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buf.as_entire_binding(),
            }],
        });

        Self { buf, bg, bg_layout }
    }
}

pub struct CommonBuffer;

impl CommonBuffer {
    pub fn uniform(contents: &[u8], device: &wgpu::Device, label: &str) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })
    }

    pub fn uniform_entry(
        binding: u32,
        visibility: wgpu::ShaderStages,
        contents: &[u8],
    ) -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: contents.cal_buffer_size(),
            },
            count: None,
        }
    }

    /// Float textures read with `textureLoad`, never filtered.
    pub fn texture_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Texture {
                view_dimension: wgpu::TextureViewDimension::D2,
                sample_type: wgpu::TextureSampleType::Float { filterable: false },
                multisampled: false,
            },
            count: None,
        }
    }

    pub fn storage_texture_entry(
        binding: u32,
        format: wgpu::TextureFormat,
    ) -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::COMPUTE,
            ty: wgpu::BindingType::StorageTexture {
                view_dimension: wgpu::TextureViewDimension::D2,
                format,
                access: wgpu::StorageTextureAccess::WriteOnly,
            },
            count: None,
        }
    }
}
