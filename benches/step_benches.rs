use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use sph_field::cpu::CpuSimulation;
use sph_field::init::SimSettings;
use sph_field::texture::{fill_position_data, fill_velocity_data};

fn simulation(width: u32) -> CpuSimulation {
    let settings = SimSettings {
        width,
        ..Default::default()
    };
    let bounds_half = 358.;
    let positions = fill_position_data(width, bounds_half, &mut StdRng::seed_from_u64(1));

    CpuSimulation::new(&settings, bounds_half, positions, fill_velocity_data(width))
}

fn bench_step(c: &mut Criterion) {
    let mut sim = simulation(10);
    c.bench_function("step_100", |b| b.iter(|| sim.step(0.016)));

    let mut sim = simulation(32);
    c.bench_function("step_1k", |b| b.iter(|| sim.step(0.016)));
}

fn bench_density(c: &mut Criterion) {
    let sim = simulation(10);
    c.bench_function("density_100", |b| b.iter(|| sim.density_at([12., -40.])));
}

criterion_group!(benches, bench_step, bench_density);
criterion_main!(benches);
