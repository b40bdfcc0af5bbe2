use rand::{rngs::StdRng, SeedableRng};
use sph_field::cpu::CpuSimulation;
use sph_field::init::SimSettings;
use sph_field::model::{ComputeState, CreateComputeOptions, GfxState, SimUniform};
use sph_field::shaders::ShaderSources;
use sph_field::texture::{fill_position_data, fill_velocity_data};

/// Runs on machines with an adapter, passes trivially elsewhere.
fn headless() -> Option<(wgpu::Device, wgpu::Queue)> {
    match pollster::block_on(GfxState::request_headless()) {
        Ok(Some(device_queue)) => Some(device_queue),
        Ok(None) => {
            eprintln!("No adapter, skipping GPU test");
            None
        }
        Err(err) => {
            eprintln!("No device ({}), skipping GPU test", err);
            None
        }
    }
}

#[test]
fn compute_step_matches_cpu_reference() {
    let (device, queue) = match headless() {
        Some(device_queue) => device_queue,
        None => return,
    };

    let settings = SimSettings::default();
    let bounds_half = 300.;
    let positions = fill_position_data(settings.width, bounds_half, &mut StdRng::seed_from_u64(5));
    let velocities = fill_velocity_data(settings.width);
    let shaders = ShaderSources::builtin();

    let mut compute = ComputeState::new(CreateComputeOptions {
        device: &device,
        queue: &queue,
        shaders: &shaders,
        sim_uniform: SimUniform::new(&settings, bounds_half),
        position_data: &positions,
        velocity_data: &velocities,
    })
    .expect("compute pipelines build");

    let mut cpu = CpuSimulation::new(&settings, bounds_half, positions, velocities);

    for _ in 0..3 {
        compute.update(&queue, 0.016);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Test encoder"),
        });
        compute.compute(&mut encoder);
        queue.submit(Some(encoder.finish()));

        cpu.step(0.016);
    }

    let gpu_positions = compute
        .current_positions()
        .read(&device, &queue)
        .expect("readback");

    assert_eq!(gpu_positions.len(), 100);

    for (gpu, cpu) in gpu_positions.iter().zip(cpu.positions()) {
        assert!(gpu[0].abs() <= bounds_half && gpu[1].abs() <= bounds_half);
        assert!((gpu[0] - cpu[0]).abs() < 0.05, "{:?} vs {:?}", gpu, cpu);
        assert!((gpu[1] - cpu[1]).abs() < 0.05, "{:?} vs {:?}", gpu, cpu);
        assert_eq!(gpu[3], 1.);
    }
}

#[test]
fn broken_shader_reports_pipeline_error() {
    let (device, queue) = match headless() {
        Some(device_queue) => device_queue,
        None => return,
    };

    let settings = SimSettings::default();
    let mut shaders = ShaderSources::builtin();
    shaders.velocity = "@compute @workgroup_size(8, 8) fn not_main() {}".to_string();

    let result = ComputeState::new(CreateComputeOptions {
        device: &device,
        queue: &queue,
        shaders: &shaders,
        sim_uniform: SimUniform::new(&settings, 100.),
        position_data: &fill_position_data(settings.width, 100., &mut rand::thread_rng()),
        velocity_data: &fill_velocity_data(settings.width),
    });

    assert!(matches!(
        result,
        Err(sph_field::error::GfxError::Pipeline { .. })
    ));
}
