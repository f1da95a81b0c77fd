//! Scanline fill of a polygon-with-holes into horizontal pixel spans.
//!
//! Model
//! - New edge table (NET): every non-horizontal edge of every ring, bucketed
//!   by its lower y, storing x at that y and Δx per scanline. Edges are
//!   half-open in y: an edge covers `[y_min, y_max)`.
//! - Active edge table (AET): edges crossing the current scanline, sorted by
//!   current x (ties: smaller Δx first). Consecutive pairs bound filled runs;
//!   hole edges sit in the same table, so even-odd parity punches holes.
//! - Sweep order per scanline: merge bucket, drop edges whose `y_max` is
//!   reached, sort, emit, advance x. Retiring before pairing means a vertex
//!   is counted by the edge that starts there and never by the one that
//!   ends there, which keeps the crossing count even on every row,
//!   horizontal edges included.
//! - Row indices are computed in `i64`, so extreme coordinates cannot wrap.

use crate::clip::clip;
use crate::geom::Point;
use crate::shape::Shape;

/// Inclusive run of pixels `[x_start, x_end]` on scanline `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub y: i32,
    pub x_start: i32,
    pub x_end: i32,
}

/// Canvas rectangle `[0, width] × [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: i32,
    pub height: i32,
}

impl Frame {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// The frame as an outer-only shape.
    pub fn to_shape(self) -> Shape {
        Shape::new(vec![
            Point::new(0, 0),
            Point::new(self.width, 0),
            Point::new(self.width, self.height),
            Point::new(0, self.height),
        ])
    }
}

#[derive(Clone, Copy, Debug)]
struct Edge {
    x: f64,
    dx: f64,
    y_max: i32,
}

/// Fill spans of the resolved shape, in scanline order.
pub fn fill_spans(shape: &Shape) -> Vec<Span> {
    let shape = shape.resolved();
    if shape.outer.is_degenerate() {
        return Vec::new();
    }
    let rings: Vec<&[Point]> = shape
        .rings()
        .filter(|r| !r.is_degenerate())
        .map(|r| r.vertices.as_slice())
        .collect();
    let (y_lo, y_hi) = rings
        .iter()
        .flat_map(|r| r.iter())
        .fold((i32::MAX, i32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
    if y_lo >= y_hi {
        return Vec::new();
    }
    let row = |y: i32| (i64::from(y) - i64::from(y_lo)) as usize;

    let mut net: Vec<Vec<Edge>> = vec![Vec::new(); row(y_hi)];
    for ring in &rings {
        for (i, &a) in ring.iter().enumerate() {
            let b = ring[(i + 1) % ring.len()];
            if a.y == b.y {
                continue;
            }
            let (lo, hi) = if a.y < b.y { (a, b) } else { (b, a) };
            let dx = (i64::from(hi.x) - i64::from(lo.x)) as f64
                / (i64::from(hi.y) - i64::from(lo.y)) as f64;
            net[row(lo.y)].push(Edge {
                x: lo.x as f64,
                dx,
                y_max: hi.y,
            });
        }
    }

    let mut aet: Vec<Edge> = Vec::new();
    let mut spans = Vec::new();
    for y in y_lo..y_hi {
        aet.append(&mut net[row(y)]);
        aet.retain(|e| e.y_max > y);
        aet.sort_by(|l, r| {
            l.x.partial_cmp(&r.x)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(l.dx.partial_cmp(&r.dx).unwrap_or(std::cmp::Ordering::Equal))
        });
        for pair in aet.chunks_exact(2) {
            let x_start = pair[0].x.ceil() as i32;
            let x_end = pair[1].x.floor() as i32;
            if x_start <= x_end {
                spans.push(Span { y, x_start, x_end });
            }
        }
        for e in aet.iter_mut() {
            e.x += e.dx;
        }
    }
    spans
}

/// Spans of `shape` bounded to `frame`: the shape is clipped against the
/// frame rectangle first, then each piece is filled and its spans are
/// clamped to `[0, width] × [0, height]`. Invisible shapes produce nothing.
pub fn fill_spans_in_frame(shape: &Shape, frame: Frame) -> Vec<Span> {
    if !shape.visible || frame.width <= 0 || frame.height <= 0 {
        return Vec::new();
    }
    clip(shape, &frame.to_shape())
        .iter()
        .flat_map(fill_spans)
        .filter(|sp| (0..=frame.height).contains(&sp.y))
        .filter_map(|sp| {
            let x_start = sp.x_start.max(0);
            let x_end = sp.x_end.min(frame.width);
            (x_start <= x_end).then_some(Span { x_start, x_end, ..sp })
        })
        .collect()
}
