//! Polygons with holes: one outer ring, zero or more inner rings, a pending
//! affine edit and style.
//!
//! Purpose
//! - The unit the layer stack edits, the clipper intersects and the
//!   rasterizer fills.
//!
//! Why this design
//! - Edits never touch vertices. They left-multiply onto `transform`, so a
//!   long chain of rotations keeps `f64` precision until `resolve` truncates
//!   once. Every query (`classify`, `center`, clipping, filling) works on the
//!   resolved shape, which makes it invariant under the pending edit.
//! - `base_scale` remembers the linear scale already baked into the
//!   vertices, so zoom clamping still holds across resolves.

use nalgebra::Matrix2;

use crate::geom::{Affine2, Point, Rgba, ZoomRange};
use crate::ring::{Containment, Orientation, Ring};

/// Mirror axis for `Shape::flip`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlipAxis {
    /// Mirror across the horizontal line through the center (`y ↦ 2c.y − y`).
    Horizontal,
    /// Mirror across the vertical line through the center (`x ↦ 2c.x − x`).
    Vertical,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub outer: Ring,
    pub inners: Vec<Ring>,
    pub transform: Affine2,
    pub fill_color: Rgba,
    pub visible: bool,
    base_scale: f64,
}

impl Default for Shape {
    fn default() -> Self {
        Self::empty()
    }
}

impl Shape {
    pub fn empty() -> Self {
        Self {
            outer: Ring::default(),
            inners: Vec::new(),
            transform: Affine2::identity(),
            fill_color: Rgba::CLEAR,
            visible: true,
            base_scale: 1.0,
        }
    }

    /// Outer-only shape.
    pub fn new(outer: Vec<Point>) -> Self {
        Self {
            outer: Ring::new(outer),
            ..Self::empty()
        }
    }

    pub fn with_holes(outer: Vec<Point>, inners: Vec<Vec<Point>>) -> Self {
        Self {
            outer: Ring::new(outer),
            inners: inners.into_iter().map(Ring::new).collect(),
            ..Self::empty()
        }
    }

    /// Resolved shape from finished rings, default style.
    pub fn from_rings(outer: Ring, inners: Vec<Ring>) -> Self {
        Self {
            outer,
            inners,
            ..Self::empty()
        }
    }

    /// Outer ring followed by the holes.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.outer).chain(self.inners.iter())
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.transform.is_identity()
    }

    /// Copy with the pending transform baked into the vertices.
    pub fn resolved(&self) -> Shape {
        let mut out = self.clone();
        out.resolve();
        out
    }

    /// Commit the pending transform: vertices move to world space (truncated
    /// toward zero) and the transform resets to identity.
    pub fn resolve(&mut self) {
        if self.is_resolved() {
            return;
        }
        let t = self.transform;
        for ring in std::iter::once(&mut self.outer).chain(self.inners.iter_mut()) {
            for v in ring.vertices.iter_mut() {
                *v = t.apply(*v);
            }
        }
        self.base_scale *= t.linear_scale();
        self.transform = Affine2::identity();
    }

    /// Linear scale relative to the vertices as first drawn.
    #[inline]
    pub fn effective_scale(&self) -> f64 {
        self.base_scale * self.transform.linear_scale()
    }

    /// Integer mean of the resolved outer ring, `None` when it is empty.
    pub fn center(&self) -> Option<Point> {
        let n = self.outer.len();
        if n == 0 {
            return None;
        }
        let (sx, sy) = self.outer.vertices.iter().fold((0.0, 0.0), |(sx, sy), v| {
            let w = self.transform.apply(*v);
            (sx + w.x as f64, sy + w.y as f64)
        });
        Some(Point::from_f64(sx / n as f64, sy / n as f64))
    }

    #[inline]
    fn push_edit(&mut self, edit: Affine2) {
        self.transform = self.transform.then(&edit);
    }

    #[inline]
    fn push_about_center(&mut self, l: Matrix2<f64>) {
        if let Some(c) = self.center() {
            self.push_edit(Affine2::about(c, l));
        }
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.push_edit(Affine2::translation(dx as f64, dy as f64));
    }

    /// Rotate about the center by the angle with the given sine and cosine.
    pub fn rotate(&mut self, sin: f64, cos: f64) {
        self.push_about_center(Matrix2::new(cos, -sin, sin, cos));
    }

    /// Uniform scale about the center, adjusted so the effective scale stays in `range`.
    ///
    /// Non-positive or non-finite factors are ignored.
    pub fn zoom(&mut self, factor: f64, range: ZoomRange) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let now = self.effective_scale();
        if !(now.is_finite() && now > 0.0) {
            return;
        }
        let s = range.adjust(now, factor);
        self.push_about_center(Matrix2::new(s, 0.0, 0.0, s));
    }

    pub fn flip(&mut self, axis: FlipAxis) {
        let l = match axis {
            FlipAxis::Horizontal => Matrix2::new(1.0, 0.0, 0.0, -1.0),
            FlipAxis::Vertical => Matrix2::new(-1.0, 0.0, 0.0, 1.0),
        };
        self.push_about_center(l);
    }

    /// Stroke color for every ring.
    pub fn set_edge_color(&mut self, color: Rgba) {
        self.outer.edge_color = color;
        for r in self.inners.iter_mut() {
            r.edge_color = color;
        }
    }

    /// Normalize winding: outer counter-clockwise, holes clockwise.
    pub fn normalize_orientation(&mut self) {
        self.outer.ensure_orientation(Orientation::CounterClockwise);
        for r in self.inners.iter_mut() {
            r.ensure_orientation(Orientation::Clockwise);
        }
    }

    /// Classify against the resolved shape.
    ///
    /// Inside the outer ring and not inside or on any hole is `Inside`. A
    /// boundary touch on any ring is `Boundary`; a point inside a hole is
    /// `Outside`.
    pub fn classify(&self, p: Point) -> Containment {
        if self.is_resolved() {
            classify_resolved(self, p)
        } else {
            classify_resolved(&self.resolved(), p)
        }
    }

    /// Strictly inside the filled region; boundary touches report outside.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.classify(p) == Containment::Inside
    }
}

fn classify_resolved(shape: &Shape, p: Point) -> Containment {
    match shape.outer.classify(p) {
        Containment::Inside => {}
        other => return other,
    }
    for hole in &shape.inners {
        match hole.classify(p) {
            Containment::Boundary => return Containment::Boundary,
            Containment::Inside => return Containment::Outside,
            Containment::Outside => {}
        }
    }
    Containment::Inside
}
