//! Benchmark for point generation and flower rendering.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use phyllo_viz::prelude::*;

fn spiral_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("spiral");

    for size in [500, 2_000, 20_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| Spiral::golden(black_box(size)).to_frame().unwrap());
        });
    }

    group.finish();
}

fn render_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.sample_size(20);

    for preset in [Preset::Golden, Preset::Sunflower, Preset::Final] {
        let plot = preset.plot().unwrap().build().unwrap();

        group.bench_with_input(BenchmarkId::new("png", preset), &plot, |b, plot| {
            b.iter(|| PngEncoder::to_bytes(&plot.to_framebuffer().unwrap()).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("svg", preset), &plot, |b, plot| {
            b.iter(|| plot.to_svg().unwrap().render());
        });
    }

    group.finish();
}

criterion_group!(benches, spiral_benchmark, render_benchmark);
criterion_main!(benches);
