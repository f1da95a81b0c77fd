//! Criterion benchmarks for Greiner–Hormann clipping.
//! Focus sizes: vertices per ring n in {8, 32, 128, 512}.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p ringclip

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use ringclip::api::{
    clip, draw_ring_radial, Point, RingRadialCfg, RingReplay, Shape, VertexCount,
};

fn star(n: usize, center: Point, seed: u64) -> Shape {
    let cfg = RingRadialCfg {
        vertex_count: VertexCount::Fixed(n),
        base_radius: 400.0,
        center,
        ..RingRadialCfg::default()
    };
    let ring = draw_ring_radial(cfg, RingReplay { seed, index: n as u64 })
        .expect("radius 400 never collapses");
    Shape::new(ring)
}

/// Scale a shape's outer ring towards its center by `1/k`.
fn shrink(s: &Shape, k: i32) -> Shape {
    let c = s.center().expect("non-empty");
    Shape::new(
        s.outer
            .vertices
            .iter()
            .map(|p| Point::new(c.x + (p.x - c.x) / k, c.y + (p.y - c.y) / k))
            .collect(),
    )
}

fn bench_clip(c: &mut Criterion) {
    let mut group = c.benchmark_group("clip");
    for &n in &[8usize, 32, 128, 512] {
        group.bench_with_input(BenchmarkId::new("overlapping_stars", n), &n, |b, &n| {
            b.iter_batched(
                || (star(n, Point::new(0, 0), 1), star(n, Point::new(200, 100), 2)),
                |(a, s)| {
                    let _out = clip(&a, &s);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("holed_vs_frame", n), &n, |b, &n| {
            let mut shape = star(n, Point::new(300, 300), 3);
            shape.inners.push(shrink(&star(n, Point::new(300, 300), 4), 4).outer);
            let frame = Shape::new(vec![
                Point::new(0, 0),
                Point::new(640, 0),
                Point::new(640, 480),
                Point::new(0, 480),
            ]);
            b.iter(|| {
                let _out = clip(&shape, &frame);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_clip);
criterion_main!(benches);
