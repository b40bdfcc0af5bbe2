use crate::shaders::ShaderSources;
use winit::dpi::LogicalSize;

/// Side of the particle grid, particle count is `WIDTH * WIDTH`.
pub const WIDTH: u32 = 10;
/// Half-width of a particle quad in world units (logical pixels).
pub const RADIUS: f32 = 2.;
pub const GRAVITY: f32 = 900.;
pub const SMOOTHING_RADIUS: f32 = 100.;
/// Velocity kept after bouncing off a boundary.
pub const DAMPING_FACTOR: f32 = 0.9;
pub const REPULSION: f32 = 2. * GRAVITY;
pub const MAX_DELTA_SEC: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimSettings {
    pub width: u32,
    pub radius: f32,
    /// Magnitude, applied downwards.
    pub gravity: f32,
    pub smoothing_radius: f32,
    pub damping_factor: f32,
    pub repulsion: f32,
    /// Upper bound for a single frame delta, `None` passes stalls through.
    pub max_delta_sec: Option<f32>,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            width: WIDTH,
            radius: RADIUS,
            gravity: GRAVITY,
            smoothing_radius: SMOOTHING_RADIUS,
            damping_factor: DAMPING_FACTOR,
            repulsion: REPULSION,
            max_delta_sec: Some(MAX_DELTA_SEC),
        }
    }
}

impl SimSettings {
    pub fn particle_count(&self) -> u32 {
        self.width * self.width
    }

    /// Half extent of the square the particles live in, fitted to the
    /// smallest side of the viewport minus one particle diameter.
    pub fn bounds_half_for(&self, size: LogicalSize<f32>) -> f32 {
        let bounds = size.width.min(size.height) - 2. * self.radius;
        (bounds / 2.).max(0.)
    }
}

pub struct InitApp {
    pub sim: SimSettings,
    /// Seeds the initial positions, random per run when empty.
    pub seed: Option<u64>,
    pub shaders: ShaderSources,
    /// Shows fps and frame time in the window title.
    pub show_stats: bool,
}

impl Default for InitApp {
    fn default() -> Self {
        Self {
            sim: SimSettings::default(),
            seed: None,
            shaders: ShaderSources::builtin(),
            show_stats: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_fit_smallest_side() {
        let settings = SimSettings::default();
        let bounds_half = settings.bounds_half_for(LogicalSize::new(1280., 720.));

        assert_eq!(bounds_half, (720. - 4.) / 2.);
    }

    #[test]
    fn bounds_never_negative() {
        let settings = SimSettings::default();

        assert_eq!(settings.bounds_half_for(LogicalSize::new(1., 1.)), 0.);
    }

    #[test]
    fn default_grid_has_hundred_particles() {
        assert_eq!(SimSettings::default().particle_count(), 100);
    }
}
