//! Benchmark for the particle field tick.
//!
//! TARGET: a full pool (100 particles) ticks well under 1ms on the CPU
//! rasterizer, leaving the frame budget to the rest of the page.
//!
//! Run with: cargo bench --package yielder_effects --bench field_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use yielder_effects::{CommandRecorder, DrawSurface, FieldConfig, ParticleField, PixelCanvas, Viewport};

fn full_field(rng: &mut ChaCha8Rng) -> ParticleField {
    let mut field = ParticleField::new(FieldConfig::default());
    for i in 0..50 {
        field.emit(400.0 + i as f32, 300.0, rng);
    }
    field
}

fn benchmark_emit(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut field = ParticleField::default();

    c.bench_function("emit_burst", |b| {
        b.iter(|| field.emit(black_box(320.0), black_box(240.0), &mut rng));
    });
}

fn benchmark_step_recorded(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut surface = CommandRecorder::new(Viewport::new(800, 600));

    let mut group = c.benchmark_group("step");
    group.throughput(Throughput::Elements(100));

    group.bench_function("full_pool_recorded", |b| {
        b.iter_batched(
            || full_field(&mut rng),
            |mut field| {
                surface.take();
                black_box(field.step(&mut surface))
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn benchmark_step_rasterized(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut canvas = PixelCanvas::new(Viewport::new(800, 600));

    c.bench_function("full_pool_rasterized", |b| {
        b.iter_batched(
            || full_field(&mut rng),
            |mut field| {
                canvas.clear();
                black_box(field.step(&mut canvas))
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    benchmark_emit,
    benchmark_step_recorded,
    benchmark_step_rasterized
);
criterion_main!(benches);
