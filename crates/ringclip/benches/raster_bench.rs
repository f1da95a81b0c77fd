//! Criterion benchmarks for the scanline rasterizer.
//! Focus sizes: radius r in {50, 200, 800} pixels, 64-vertex rings.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ringclip::api::{
    draw_ring_radial, fill_spans, fill_spans_in_frame, Frame, Point, RingRadialCfg, RingReplay,
    Shape, VertexCount,
};

fn holed_star(r: f64) -> Shape {
    let cfg = RingRadialCfg {
        vertex_count: VertexCount::Fixed(64),
        base_radius: r,
        center: Point::new(400, 300),
        ..RingRadialCfg::default()
    };
    let outer = draw_ring_radial(cfg, RingReplay { seed: 7, index: 0 }).expect("outer");
    let hole = draw_ring_radial(
        RingRadialCfg {
            base_radius: r / 3.0,
            ..cfg
        },
        RingReplay { seed: 7, index: 1 },
    )
    .expect("hole");
    Shape::with_holes(outer, vec![hole])
}

fn bench_raster(c: &mut Criterion) {
    let mut group = c.benchmark_group("raster");
    let frame = Frame::new(800, 600);
    for &r in &[50.0f64, 200.0, 800.0] {
        let shape = holed_star(r);
        group.bench_with_input(BenchmarkId::new("fill_spans", r as u32), &shape, |b, s| {
            b.iter(|| fill_spans(s))
        });
        group.bench_with_input(
            BenchmarkId::new("fill_spans_in_frame", r as u32),
            &shape,
            |b, s| b.iter(|| fill_spans_in_frame(s, frame)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_raster);
criterion_main!(benches);
