//! # World Churn Benchmark
//!
//! Particle workloads spawn and retire thousands of entities per second
//! while every system filters the live set each tick.
//!
//! Run with: `cargo bench --package symphony_core`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use symphony_core::{
    mask, Acceleration, Color, EntityBuilder, Lifetime, Particle, Position, Size, Velocity, World,
};

const CAPACITY: usize = 16_384;

fn particle(i: usize) -> EntityBuilder {
    let f = i as f32;
    EntityBuilder::new()
        .with(Position::new().with(f, f * 0.5))
        .with(Velocity::new().with(1.0, -1.0))
        .with(Acceleration::new())
        .with(Color::new())
        .with(Lifetime::new())
        .with(Size::new())
        .with(Particle)
}

fn filled_world(count: usize) -> World {
    let mut world = World::new(CAPACITY);
    for i in 0..count {
        world.spawn_with(particle(i));
    }
    world
}

/// Benchmark: mask filtering at several population sizes.
fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_by_mask");

    for count in [1_000, 7_000, 12_000] {
        let world = filled_world(count);
        let mut scratch = Vec::with_capacity(CAPACITY);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                world.filter_by_mask_into(black_box(mask::FULL_PARTICLE), &mut scratch);
                scratch.len()
            });
        });
    }

    group.finish();
}

/// Benchmark: retire and replace 10% of the population, as a busy emitter does.
fn bench_churn(c: &mut Criterion) {
    c.bench_function("churn_10_percent_of_12k", |b| {
        let mut world = filled_world(12_000);
        let mut scratch = Vec::with_capacity(CAPACITY);
        b.iter(|| {
            world.filter_by_mask_into(mask::PARTICLE, &mut scratch);
            for id in scratch.iter().take(1_200) {
                world.despawn(*id);
            }
            for i in 0..1_200 {
                black_box(world.spawn_with(particle(i)));
            }
            world.alive_count()
        });
    });
}

criterion_group!(benches, bench_filter, bench_churn);
criterion_main!(benches);
