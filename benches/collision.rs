//! Collision pass benchmarks
//!
//! Compares swarm sizes on seeded layouts, with and without a full frame.
//!
//! Run with: cargo bench --bench collision

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use piranha_swarm::core::rng::DeterministicRng;
use piranha_swarm::core::vec2::Vec2;
use piranha_swarm::game::cleanup::run_cleanup;
use piranha_swarm::game::collision::detect_collisions;
use piranha_swarm::game::config::GameConfig;
use piranha_swarm::game::render::NullSink;
use piranha_swarm::game::state::{Pursuer, SimulationState};
use piranha_swarm::game::tick::run_frame;

/// Pursuers spread uniformly over the field, evader parked in a corner so
/// the capture check never short-circuits.
fn layout(count: u32, seed: u64) -> SimulationState {
    let config = GameConfig::default();
    let mut rng = DeterministicRng::new(seed);
    let pursuers = (0..count)
        .map(|id| {
            let x = rng.next_range(0.0, config.field_width);
            let y = rng.next_range(0.0, config.field_height);
            Pursuer::new(id, Vec2::new(x, y))
        })
        .collect();

    let mut state = SimulationState::with_layout(Vec2::new(-1000.0, -1000.0), pursuers, 0.0);
    run_cleanup(&mut state);
    state
}

fn bench_collision_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("collision_pass");
    let radius = GameConfig::default().collision_radius;

    for count in [18u32, 100, 500, 2000] {
        let state = layout(count, 12345);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &state, |b, state| {
            b.iter_batched(
                || state.clone(),
                |mut state| black_box(detect_collisions(&mut state, radius)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_full_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_frame");
    let config = GameConfig::default();

    for count in [18u32, 500] {
        let state = layout(count, 777);
        group.bench_with_input(BenchmarkId::from_parameter(count), &state, |b, state| {
            b.iter_batched(
                || state.clone(),
                |mut state| black_box(run_frame(&mut state, &config, 16.0, &mut NullSink)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_collision_pass, bench_full_frame);
criterion_main!(benches);
