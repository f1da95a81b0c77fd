//! Closed polygonal boundaries: orientation and ray-cast containment.
//!
//! Conventions
//! - A ring is the vertex sequence in boundary order; the closing edge from
//!   the last vertex back to the first is implicit. Vertices are never
//!   deduplicated or collapsed behind the caller's back.
//! - Fewer than 3 vertices is degenerate: orientation is `None`, every point
//!   is `Outside`.
//! - Orientation is read in a y-up frame (positive cross product means a
//!   counter-clockwise turn).
//! - Containment casts a ray towards +x with the half-open straddle rule
//!   (`a.y >= p.y > b.y` or `a.y < p.y <= b.y`), so a vertex on the ray is
//!   counted once. Crossings within `BOUNDARY_SNAP` of the query, or a query
//!   equal to a vertex, report `Boundary`.

use crate::geom::cfg::BOUNDARY_SNAP;
use crate::geom::{Point, Rgba};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
}

impl Orientation {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::CounterClockwise => Orientation::Clockwise,
        }
    }
}

/// Point-versus-region classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Containment {
    Inside,
    Outside,
    Boundary,
}

/// Ray-cast classifier over `n` vertices supplied by `vertex(i)`.
///
/// Shared by integer rings and the `f64` working rings of the clipper so both
/// apply the same predicate and snap distance.
pub(crate) fn classify_by<F>(n: usize, vertex: F, p: (f64, f64)) -> Containment
where
    F: Fn(usize) -> (f64, f64),
{
    if n < 3 {
        return Containment::Outside;
    }
    let (px, py) = p;
    let mut inside = false;
    for i in 0..n {
        let (ax, ay) = vertex(i);
        let (bx, by) = vertex((i + 1) % n);
        if (px == ax && py == ay) || (px == bx && py == by) {
            return Containment::Boundary;
        }
        if (ay >= py && by < py) || (ay < py && by >= py) {
            let ix = ax + (py - ay) * (ax - bx) / (ay - by);
            if (ix - px).abs() < BOUNDARY_SNAP {
                return Containment::Boundary;
            }
            if ix > px {
                inside = !inside;
            }
        }
    }
    if inside {
        Containment::Inside
    } else {
        Containment::Outside
    }
}

/// A closed polygonal boundary with its stroke color.
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    pub vertices: Vec<Point>,
    pub edge_color: Rgba,
}

impl Default for Ring {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            edge_color: Rgba::BLACK,
        }
    }
}

impl From<Vec<Point>> for Ring {
    fn from(vertices: Vec<Point>) -> Self {
        Self::new(vertices)
    }
}

impl Ring {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self {
            vertices,
            edge_color: Rgba::BLACK,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Orientation from the turn at the leftmost vertex (earliest index on ties).
    ///
    /// The leftmost vertex is always convex on a simple ring, so the sign of
    /// `incoming × outgoing` there is the ring's orientation. A zero turn
    /// (collinear neighbours, vertical through the leftmost point) falls back
    /// to comparing the neighbours' heights.
    pub fn orientation(&self) -> Option<Orientation> {
        let n = self.vertices.len();
        if n < 3 {
            return None;
        }
        let mut k = 0;
        for (i, v) in self.vertices.iter().enumerate().skip(1) {
            if v.x < self.vertices[k].x {
                k = i;
            }
        }
        let prev = self.vertices[(k + n - 1) % n];
        let cur = self.vertices[k];
        let next = self.vertices[(k + 1) % n];
        let turn = (cur - prev).cross(next - cur);
        Some(if turn > 0 {
            Orientation::CounterClockwise
        } else if turn < 0 {
            Orientation::Clockwise
        } else if prev.y < next.y {
            Orientation::Clockwise
        } else {
            Orientation::CounterClockwise
        })
    }

    #[inline]
    pub fn reverse(&mut self) {
        self.vertices.reverse();
    }

    /// Reverse in place if the ring is determinately of the other orientation.
    pub fn ensure_orientation(&mut self, want: Orientation) {
        if self.orientation() == Some(want.opposite()) {
            self.reverse();
        }
    }

    pub fn classify(&self, p: Point) -> Containment {
        let v = &self.vertices;
        classify_by(
            v.len(),
            |i| (v[i].x as f64, v[i].y as f64),
            (p.x as f64, p.y as f64),
        )
    }

    /// Strictly inside; boundary touches count as outside.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.classify(p) == Containment::Inside
    }

    /// Twice the signed area (shoelace), positive for counter-clockwise rings.
    pub fn signed_area2(&self) -> i64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0;
        }
        (0..n)
            .map(|i| {
                let a = self.vertices[i];
                let b = self.vertices[(i + 1) % n];
                a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64
            })
            .sum()
    }

    /// Inclusive `(min, max)` corners, `None` when empty.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(pts: &[(i32, i32)]) -> Ring {
        Ring::new(pts.iter().map(|&p| p.into()).collect())
    }

    fn square() -> Ring {
        ring(&[(0, 0), (100, 0), (100, 100), (0, 100)])
    }

    #[test]
    fn orientation_of_square_and_reverse() {
        let mut r = square();
        assert_eq!(r.orientation(), Some(Orientation::CounterClockwise));
        assert!(r.signed_area2() > 0);
        r.reverse();
        assert_eq!(r.orientation(), Some(Orientation::Clockwise));
        assert!(r.signed_area2() < 0);
    }

    #[test]
    fn degenerate_ring() {
        let r = ring(&[(0, 0), (5, 5)]);
        assert_eq!(r.orientation(), None);
        assert_eq!(r.classify(Point::new(1, 1)), Containment::Outside);
        assert!(Ring::default().bounds().is_none());
    }

    #[test]
    fn collinear_leftmost_uses_neighbour_heights() {
        // leftmost vertex sits in the middle of a vertical edge
        let r = ring(&[(0, 50), (0, 0), (100, 0), (100, 100), (0, 100)]);
        assert_eq!(r.orientation(), Some(Orientation::CounterClockwise));
        let r = ring(&[(0, 50), (0, 100), (100, 100), (100, 0), (0, 0)]);
        assert_eq!(r.orientation(), Some(Orientation::Clockwise));
    }

    #[test]
    fn ensure_orientation_only_flips_when_needed() {
        let mut r = square();
        r.ensure_orientation(Orientation::CounterClockwise);
        assert_eq!(r, square());
        r.ensure_orientation(Orientation::Clockwise);
        assert_eq!(r.orientation(), Some(Orientation::Clockwise));
    }

    #[test]
    fn ray_cast_classification() {
        let r = square();
        assert_eq!(r.classify(Point::new(50, 50)), Containment::Inside);
        assert_eq!(r.classify(Point::new(150, 50)), Containment::Outside);
        assert_eq!(r.classify(Point::new(-1, 50)), Containment::Outside);
        assert_eq!(r.classify(Point::new(0, 0)), Containment::Boundary);
        assert_eq!(r.classify(Point::new(100, 50)), Containment::Boundary);
        assert_eq!(r.classify(Point::new(0, 50)), Containment::Boundary);
        assert!(r.contains(Point::new(1, 1)));
        assert!(!r.contains(Point::new(0, 50)));
    }

    #[test]
    fn ray_through_vertex_counts_once() {
        let diamond = ring(&[(50, 0), (100, 50), (50, 100), (0, 50)]);
        assert!(diamond.contains(Point::new(10, 50)));
        assert!(!diamond.contains(Point::new(-10, 50)));
        assert!(!diamond.contains(Point::new(-10, 0)));
    }

    #[test]
    fn bounds_cover_all_vertices() {
        let r = ring(&[(3, -2), (10, 4), (-1, 7)]);
        assert_eq!(r.bounds(), Some((Point::new(-1, -2), Point::new(10, 7))));
    }
}
