//! Property tests across ring, shape, clip and raster.

use proptest::prelude::*;

use crate::clip::clip;
use crate::geom::rand::{draw_ring_radial, RadialCfg, ReplayToken, VertexCount};
use crate::geom::cfg::MERGE_DISTANCE;
use crate::geom::{Point, ZoomRange};
use crate::raster::{fill_spans, fill_spans_in_frame, Frame};
use crate::ring::Ring;
use crate::shape::{FlipAxis, Shape};

fn star(seed: u64, index: u64, radius: f64, center: Point) -> Vec<Point> {
    let cfg = RadialCfg {
        vertex_count: VertexCount::Uniform { min: 4, max: 16 },
        base_radius: radius,
        center,
        ..RadialCfg::default()
    };
    draw_ring_radial(cfg, ReplayToken { seed, index }).expect("star ring")
}

fn regular(n: usize, r: f64, phase: f64, cx: i32, cy: i32) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(n);
    for k in 0..n {
        let th = phase + std::f64::consts::TAU * k as f64 / n as f64;
        let p = Point::from_f64(cx as f64 + th.cos() * r, cy as f64 + th.sin() * r);
        if out.last() != Some(&p) {
            out.push(p);
        }
    }
    out
}

fn area(r: &Ring) -> f64 {
    r.signed_area2().abs() as f64 / 2.0
}

fn perimeter(v: &[Point]) -> f64 {
    (0..v.len())
        .map(|i| (v[(i + 1) % v.len()] - v[i]).norm())
        .sum()
}

fn near(got: &[Point], want: &[Point], tol: i64) -> bool {
    want.iter()
        .all(|w| got.iter().any(|g| g.manhattan(*w) <= tol))
}

proptest! {
    #[test]
    fn reversal_flips_orientation(seed in any::<u64>(), index in 0u64..1_000) {
        let mut ring = Ring::new(star(seed, index, 120.0, Point::new(0, 0)));
        let before = ring.orientation().expect("non-degenerate");
        ring.reverse();
        prop_assert_eq!(ring.orientation(), Some(before.opposite()));
    }

    #[test]
    fn containment_commutes_with_translation(
        seed in any::<u64>(),
        holed in any::<bool>(),
        dx in -1_000i32..1_000,
        dy in -1_000i32..1_000,
        px in -150i32..150,
        py in -150i32..150,
    ) {
        let c = Point::new(0, 0);
        let inners = if holed { vec![star(seed, 1, 30.0, c)] } else { Vec::new() };
        let base = Shape::with_holes(star(seed, 0, 100.0, c), inners);
        let mut moved = base.clone();
        moved.translate(dx, dy);
        let p = Point::new(px, py);
        prop_assert_eq!(base.contains(p), moved.contains(Point::new(px + dx, py + dy)));
    }

    #[test]
    fn self_clip_of_convex_shape_is_congruent(
        n in 3usize..=12,
        r in 50.0f64..200.0,
        phase in 0.0f64..std::f64::consts::TAU,
        cx in -300i32..300,
        cy in -300i32..300,
    ) {
        let ring = regular(n, r, phase, cx, cy);
        let s = Shape::new(ring.clone());
        let out = clip(&s, &s);
        prop_assert_eq!(out.len(), 1);
        prop_assert!(out[0].inners.is_empty());
        prop_assert_eq!(out[0].outer.len(), ring.len());
        prop_assert!(near(&out[0].outer.vertices, &ring, MERGE_DISTANCE));
        prop_assert!(near(&ring, &out[0].outer.vertices, MERGE_DISTANCE));
        let da = (area(&out[0].outer) - area(&s.outer)).abs();
        prop_assert!(da <= MERGE_DISTANCE as f64 * perimeter(&ring), "area drift {}", da);
    }

    #[test]
    fn far_apart_shapes_do_not_intersect(
        seed in any::<u64>(),
        dx in 300i32..2_000,
        dy in -2_000i32..2_000,
    ) {
        let a = Shape::new(star(seed, 0, 100.0, Point::new(0, 0)));
        let b = Shape::new(star(seed, 1, 100.0, Point::new(dx, dy)));
        prop_assert!(clip(&a, &b).is_empty());
    }

    #[test]
    fn half_offset_rectangles_overlap_in_a_rectangle(
        hw in 5i32..150,
        hh in 5i32..150,
        x0 in -300i32..300,
        y0 in -300i32..300,
        along_y in any::<bool>(),
    ) {
        let (w, h) = (2 * hw, 2 * hh);
        let rect = |x0: i32, y0: i32| Shape::new(vec![
            Point::new(x0, y0),
            Point::new(x0 + w, y0),
            Point::new(x0 + w, y0 + h),
            Point::new(x0, y0 + h),
        ]);
        let a = rect(x0, y0);
        let (b, want) = if along_y {
            (rect(x0, y0 + hh), [(x0, y0 + hh), (x0 + w, y0 + hh), (x0 + w, y0 + h), (x0, y0 + h)])
        } else {
            (rect(x0 + hw, y0), [(x0 + hw, y0), (x0 + w, y0), (x0 + w, y0 + h), (x0 + hw, y0 + h)])
        };
        let want: Vec<Point> = want.iter().map(|&p| p.into()).collect();
        let out = clip(&a, &b);
        prop_assert_eq!(out.len(), 1);
        prop_assert!(out[0].inners.is_empty());
        prop_assert_eq!(out[0].outer.len(), 4);
        prop_assert!(near(&out[0].outer.vertices, &want, 2));
    }

    #[test]
    fn one_hole_gives_two_spans_per_crossing_scanline(
        (w, h, a, b, c, d) in (6i32..200, 6i32..200)
            .prop_flat_map(|(w, h)| (Just(w), Just(h), 1..w - 3, 1..h - 3))
            .prop_flat_map(|(w, h, a, b)| (Just(w), Just(h), Just(a), Just(b), a + 2..w, b + 2..h))
    ) {
        let rect = |x0: i32, y0: i32, x1: i32, y1: i32| vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ];
        let s = Shape::with_holes(rect(0, 0, w, h), vec![rect(a, b, c, d)]);
        let spans = fill_spans(&s);
        for y in b..d {
            prop_assert_eq!(spans.iter().filter(|sp| sp.y == y).count(), 2, "scanline {}", y);
        }
    }

    #[test]
    fn framed_output_stays_inside_the_frame(
        seed in any::<u64>(),
        r in 50.0f64..400.0,
        cx in -100i32..740,
        cy in -100i32..580,
    ) {
        let frame = Frame::new(640, 480);
        let s = Shape::new(star(seed, 0, r, Point::new(cx, cy)));
        for piece in clip(&s, &frame.to_shape()) {
            for p in piece.rings().flat_map(|ring| ring.vertices.iter()) {
                prop_assert!(p.x >= 0 && p.x <= 640 && p.y >= 0 && p.y <= 480, "{:?}", p);
            }
        }
        for sp in fill_spans_in_frame(&s, frame) {
            prop_assert!(sp.y >= 0 && sp.y <= 480, "{:?}", sp);
            prop_assert!(sp.x_start >= 0 && sp.x_start <= sp.x_end && sp.x_end <= 640, "{:?}", sp);
        }
    }

    #[test]
    fn resolving_changes_no_query(
        seed in any::<u64>(),
        dx in -200i32..200,
        degrees in -180.0f64..180.0,
        factor in 0.5f64..2.0,
        flip in any::<bool>(),
        px in -300i32..300,
        py in -300i32..300,
    ) {
        let mut s = Shape::new(star(seed, 0, 100.0, Point::new(0, 0)));
        s.translate(dx, 0);
        let (sin, cos) = degrees.to_radians().sin_cos();
        s.rotate(sin, cos);
        s.zoom(factor, ZoomRange::default());
        if flip {
            s.flip(FlipAxis::Horizontal);
        }
        let r = s.resolved();
        let p = Point::new(px, py);
        prop_assert_eq!(s.contains(p), r.contains(p));
        prop_assert_eq!(fill_spans(&s), fill_spans(&r));
    }

    #[test]
    fn zoom_is_clamped_monotonically(factors in prop::collection::vec(0.05f64..20.0, 1..24)) {
        let range = ZoomRange::default();
        let mut s = Shape::new(vec![Point::new(0, 0), Point::new(400, 0), Point::new(0, 400)]);
        let mut prev = s.effective_scale();
        for f in factors {
            s.zoom(f, range);
            let now = s.effective_scale();
            prop_assert!(now >= range.min - 1e-9 && now <= range.max + 1e-9, "scale {}", now);
            if f >= 1.0 {
                prop_assert!(now >= prev - 1e-9);
            } else {
                prop_assert!(now <= prev + 1e-9);
            }
            prev = now;
        }
    }
}
