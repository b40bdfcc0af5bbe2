use crate::init::SimSettings;
use bytemuck::{Pod, Zeroable};

/// Mirrors `SimUniform` in declarations.wgsl.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SimUniform {
    pub delta_time: f32,
    pub boundaries: f32,
    /// Signed, negative pulls down.
    pub gravity: f32,
    pub smoothing_radius: f32,
    pub damping_factor: f32,
    pub texture_width: u32,
    pub repulsion: f32,
    _pad: f32,
}

impl SimUniform {
    pub fn new(settings: &SimSettings, bounds_half: f32) -> Self {
        Self {
            delta_time: 0.,
            boundaries: bounds_half,
            gravity: -settings.gravity,
            smoothing_radius: settings.smoothing_radius,
            damping_factor: settings.damping_factor,
            texture_width: settings.width,
            repulsion: settings.repulsion,
            _pad: 0.,
        }
    }
}

/// Mirrors `RenderUniform`, shared by the particle and background passes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct RenderUniform {
    pub texture_width: u32,
    pub smoothing_radius: f32,
    pub half_resolution: [f32; 2],
}

impl RenderUniform {
    pub fn new(settings: &SimSettings, half_resolution: [f32; 2]) -> Self {
        Self {
            texture_width: settings.width,
            smoothing_radius: settings.smoothing_radius,
            half_resolution,
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<SimUniform>(), 32);
        assert_eq!(std::mem::size_of::<RenderUniform>(), 16);
        assert_eq!(std::mem::size_of::<CameraUniform>(), 64);
    }

    #[test]
    fn gravity_points_down() {
        let uniform = SimUniform::new(&SimSettings::default(), 100.);

        assert_eq!(uniform.gravity, -900.);
        assert_eq!(uniform.boundaries, 100.);
        assert_eq!(uniform.texture_width, 10);
    }
}
