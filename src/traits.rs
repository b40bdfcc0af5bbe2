use std::num::NonZeroU64;

pub trait CustomShader {
    /// Prepends the shared declarations before compiling.
    fn create_shader(&self, shader_str_raw: &str, label: &str) -> wgpu::ShaderModule;
}

pub trait DefaultView {
    fn default_view(&self) -> wgpu::TextureView;
}

pub trait CalculateBufferSize {
    fn cal_buffer_size(&self) -> Option<NonZeroU64>;
}

impl CalculateBufferSize for [u8] {
    fn cal_buffer_size(&self) -> Option<NonZeroU64> {
        NonZeroU64::new(self.len() as u64)
    }
}
