//! Integer points, deltas and colors.
//!
//! - `Point`: a vertex on the integer grid.
//! - `Vector`: an integer delta; products are widened to `i64`.
//! - `Rgba`: 8-bit color attached to rings and shapes.

use std::ops::{Add, Sub};

/// Integer grid point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Integer delta between two points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vector {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shift by `delta`, saturating at the `i32` bounds.
    #[inline]
    pub fn translate(&mut self, delta: Vector) {
        self.translate_by(delta.x, delta.y);
    }

    #[inline]
    pub fn translate_by(&mut self, dx: i32, dy: i32) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
    }

    /// Manhattan distance, used by the post-clip vertex merge.
    #[inline]
    pub fn manhattan(&self, other: Point) -> i64 {
        (self.x as i64 - other.x as i64).abs() + (self.y as i64 - other.y as i64).abs()
    }

    /// Materialize real coordinates by truncating toward zero.
    #[inline]
    pub fn from_f64(x: f64, y: f64) -> Self {
        Self {
            x: x as i32,
            y: y as i32,
        }
    }
}

impl Vector {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(&self, other: Vector) -> i64 {
        self.x as i64 * other.x as i64 + self.y as i64 * other.y as i64
    }

    /// Signed 2D cross product; positive for a counter-clockwise turn from `self` to `other`.
    #[inline]
    pub fn cross(&self, other: Vector) -> i64 {
        self.x as i64 * other.y as i64 - self.y as i64 * other.x as i64
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        (self.dot(*self) as f64).sqrt()
    }

    /// Rotate by the angle whose sine and cosine are given; components truncate toward zero.
    ///
    /// Callers usually derive `(sin, cos)` from two other vectors, e.g.
    /// `a.cross(b) / (|a||b|)` and `a.dot(b) / (|a||b|)`, to avoid trigonometry.
    pub fn rotate(&mut self, sin: f64, cos: f64) {
        let (x, y) = (self.x as f64, self.y as f64);
        self.x = (x * cos - y * sin) as i32;
        self.y = (x * sin + y * cos) as i32;
    }

    #[inline]
    pub fn scale(&self, a: f64) -> Vector {
        Vector {
            x: (a * self.x as f64) as i32,
            y: (a * self.y as f64) as i32,
        }
    }

    /// `(sin, cos)` of the angle turning `self` onto `other`, if both are non-zero.
    pub fn sin_cos_to(&self, other: Vector) -> Option<(f64, f64)> {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            return None;
        }
        Some((self.cross(other) as f64 / denom, self.dot(other) as f64 / denom))
    }
}

impl Add<Vector> for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for Point {
    type Output = Vector;
    #[inline]
    fn sub(self, rhs: Point) -> Vector {
        Vector::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

/// 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    /// Default fill: white with zero alpha, i.e. unfilled until the user picks a color.
    pub const CLEAR: Rgba = Rgba::new(255, 255, 255, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}
