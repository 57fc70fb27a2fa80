use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use rand::{rngs::StdRng, SeedableRng};
use stickbox::{
    scene,
    simulator::{Simulator, SimulatorBuilder},
};

const TEXTILE_SIDE: [usize; 5] = [5, 10, 20, 50, 100];

fn running() -> Simulator {
    SimulatorBuilder::new().paused(false).stress(false).build()
}

fn textile_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("Textile update");
    for side in TEXTILE_SIDE {
        let mut sim = running();
        scene::textile(&mut sim, Vec2::new(50.0, 50.0), side, side, 5.0);

        group.throughput(criterion::Throughput::Elements(sim.stick_count() as u64));
        group.bench_function(BenchmarkId::new("Textile", side), |b| {
            b.iter(|| sim.update(black_box(0.016)));
        });
    }
}

fn sample_scene_update(c: &mut Criterion) {
    let mut sim = running();
    scene::sample(&mut sim, &mut StdRng::seed_from_u64(0));

    let mut group = c.benchmark_group("Sample scene");
    group.bench_function("update", |b| {
        b.iter(|| sim.update(black_box(0.016)));
    });
}

fn nearest_node(c: &mut Criterion) {
    let mut sim = running();
    scene::sample(&mut sim, &mut StdRng::seed_from_u64(0));

    let mut group = c.benchmark_group("Nearest node");
    group.bench_function("snap", |b| {
        b.iter(|| sim.nearest_node(black_box(Vec2::new(200.0, 300.0)), 20.0));
    });
}

criterion_group!(simulation, textile_update, sample_scene_update, nearest_node);
criterion_main!(simulation);
