use super::kernels::{density_intensity, repulsion_falloff, smoothing_kernel};
use crate::init::SimSettings;
use crate::model::{PingPongState, SimUniform};
use crate::texture::Texel;
use cgmath::{InnerSpace, Vector2};

#[inline]
fn xy(texel: &Texel) -> Vector2<f32> {
    Vector2::new(texel[0], texel[1])
}

#[inline]
fn texel(v: Vector2<f32>) -> Texel {
    [v.x, v.y, 0., 1.]
}

/// Same two passes as the compute shaders, over plain texel buffers laid
/// out like the textures (row major, `width * width`).
pub struct CpuSimulation {
    pub uniform: SimUniform,
    positions: [Vec<Texel>; 2],
    velocities: [Vec<Texel>; 2],
    ping_pong: PingPongState,
}

impl CpuSimulation {
    pub fn new(
        settings: &SimSettings,
        bounds_half: f32,
        positions: Vec<Texel>,
        velocities: Vec<Texel>,
    ) -> Self {
        let count = settings.particle_count() as usize;
        assert_eq!(positions.len(), count, "position data doesn't match grid");
        assert_eq!(velocities.len(), count, "velocity data doesn't match grid");

        Self {
            uniform: SimUniform::new(settings, bounds_half),
            positions: [positions, vec![[0.; 4]; count]],
            velocities: [velocities, vec![[0.; 4]; count]],
            ping_pong: PingPongState::new(),
        }
    }

    pub fn step(&mut self, delta_sec: f32) {
        self.uniform.delta_time = delta_sec;

        let (pos_in, _) = self.ping_pong.split(&self.positions);
        let (vel_in, vel_out) = self.ping_pong.split_mut(&mut self.velocities);
        Self::velocity_pass(&self.uniform, pos_in, vel_in, vel_out);

        let vel_new = &self.velocities[self.ping_pong.write_idx()];
        let (pos_in, pos_out) = self.ping_pong.split_mut(&mut self.positions);
        Self::position_pass(&self.uniform, pos_in, vel_new, pos_out);

        self.ping_pong.swap();
    }

    fn velocity_pass(sim: &SimUniform, pos_in: &[Texel], vel_in: &[Texel], vel_out: &mut [Texel]) {
        let h = sim.smoothing_radius;
        let dt = sim.delta_time;
        let bounds = sim.boundaries;

        for (i, out) in vel_out.iter_mut().enumerate() {
            let pos = xy(&pos_in[i]);
            let mut vel = xy(&vel_in[i]);
            let mut acc = Vector2::new(0., sim.gravity);

            for (j, other) in pos_in.iter().enumerate() {
                if i == j {
                    continue;
                }

                let diff = pos - xy(other);
                let dst = diff.magnitude();
                let falloff = repulsion_falloff(dst, h);

                if falloff > 0. {
                    acc += diff / dst * sim.repulsion * falloff;
                }
            }

            vel += acc * dt;

            let next = pos + vel * dt;

            if (next.x > bounds && vel.x > 0.) || (next.x < -bounds && vel.x < 0.) {
                vel.x = -vel.x * sim.damping_factor;
            }

            if (next.y > bounds && vel.y > 0.) || (next.y < -bounds && vel.y < 0.) {
                vel.y = -vel.y * sim.damping_factor;
            }

            *out = texel(vel);
        }
    }

    fn position_pass(sim: &SimUniform, pos_in: &[Texel], vel: &[Texel], pos_out: &mut [Texel]) {
        let bounds = sim.boundaries;

        for (i, out) in pos_out.iter_mut().enumerate() {
            let next = xy(&pos_in[i]) + xy(&vel[i]) * sim.delta_time;

            *out = [
                next.x.clamp(-bounds, bounds),
                next.y.clamp(-bounds, bounds),
                0.,
                1.,
            ];
        }
    }

    pub fn positions(&self) -> &[Texel] {
        self.ping_pong.split(&self.positions).0
    }

    pub fn velocities(&self) -> &[Texel] {
        self.ping_pong.split(&self.velocities).0
    }

    /// Kernel density at `point`, as the background pass samples it.
    pub fn density_at(&self, point: [f32; 2]) -> f32 {
        let point = Vector2::new(point[0], point[1]);
        let h = self.uniform.smoothing_radius;

        self.positions()
            .iter()
            .map(|p| smoothing_kernel((point - xy(p)).magnitude(), h))
            .sum()
    }

    pub fn intensity_at(&self, point: [f32; 2]) -> f32 {
        density_intensity(self.density_at(point), self.uniform.smoothing_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(width: u32) -> SimSettings {
        SimSettings {
            width,
            ..Default::default()
        }
    }

    #[test]
    fn free_fall_uses_same_frame_velocity() {
        let sim_settings = settings(1);
        let mut sim = CpuSimulation::new(
            &sim_settings,
            300.,
            vec![[0., 0., 0., 1.]],
            vec![[0., 0., 0., 1.]],
        );

        sim.step(0.01);

        let vy = sim.velocities()[0][1];
        let y = sim.positions()[0][1];

        assert!((vy + 9.).abs() < 1e-4);
        assert!((y + 0.09).abs() < 1e-5);
    }

    #[test]
    fn outward_velocity_reflects_with_damping() {
        let sim_settings = SimSettings {
            width: 1,
            gravity: 0.,
            ..Default::default()
        };
        let mut sim = CpuSimulation::new(
            &sim_settings,
            100.,
            vec![[99., 0., 0., 1.]],
            vec![[200., 0., 0., 1.]],
        );

        sim.step(0.01);

        assert!((sim.velocities()[0][0] + 180.).abs() < 1e-3);
        assert!(sim.positions()[0][0] < 99.);
    }

    #[test]
    fn positions_clamped_to_bounds() {
        let sim_settings = SimSettings {
            width: 1,
            gravity: 0.,
            damping_factor: 1.,
            ..Default::default()
        };
        // Reflected velocity is still large enough to overshoot the far side.
        let mut sim = CpuSimulation::new(
            &sim_settings,
            50.,
            vec![[40., 0., 0., 1.]],
            vec![[-10_000., 0., 0., 1.]],
        );

        sim.step(0.1);

        assert_eq!(sim.velocities()[0][0], 10_000.);
        assert_eq!(sim.positions()[0][0], 50.);
    }

    #[test]
    fn close_particles_push_apart() {
        let sim_settings = SimSettings {
            width: 2,
            gravity: 0.,
            ..Default::default()
        };
        let positions = vec![
            [-5., 0., 0., 1.],
            [5., 0., 0., 1.],
            [-200., 200., 0., 1.],
            [200., 200., 0., 1.],
        ];
        let mut sim = CpuSimulation::new(&sim_settings, 300., positions, vec![[0., 0., 0., 1.]; 4]);

        sim.step(0.01);

        assert!(sim.velocities()[0][0] < 0.);
        assert!(sim.velocities()[1][0] > 0.);
        assert_eq!(sim.velocities()[2][0], 0.);
    }

    #[test]
    fn density_is_highest_on_particles() {
        let sim_settings = settings(1);
        let sim = CpuSimulation::new(&sim_settings, 300., vec![[10., 10., 0., 1.]], vec![[0.; 4]]);

        assert!(sim.density_at([10., 10.]) > sim.density_at([40., 10.]));
        assert_eq!(sim.density_at([200., 10.]), 0.);
        assert!(sim.intensity_at([10., 10.]) > 0.);
    }
}
