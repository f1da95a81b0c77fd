//! Homogeneous 2D affine transform (`x ↦ M x`, with `M` a 3×3 matrix).
//!
//! A shape's transform is the *pending* edit: it accumulates every
//! translate/rotate/zoom/flip by left multiplication and is only baked into
//! integer vertices on resolve. Keeping the matrix in `f64` across edits
//! avoids compounding truncation error.

use nalgebra::{Matrix2, Matrix3, Vector3};

use super::types::Point;

/// 2D affine map in homogeneous form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2 {
    pub m: Matrix3<f64>,
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine2 {
    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix3::identity(),
        }
    }

    #[inline]
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            m: Matrix3::new(
                1.0, 0.0, dx, //
                0.0, 1.0, dy, //
                0.0, 0.0, 1.0,
            ),
        }
    }

    /// Pure linear map (no translation).
    #[inline]
    pub fn linear(l: Matrix2<f64>) -> Self {
        Self {
            m: Matrix3::new(
                l[(0, 0)], l[(0, 1)], 0.0, //
                l[(1, 0)], l[(1, 1)], 0.0, //
                0.0, 0.0, 1.0,
            ),
        }
    }

    /// Rotation by the angle with the given sine and cosine.
    #[inline]
    pub fn rotation(sin: f64, cos: f64) -> Self {
        Self::linear(Matrix2::new(cos, -sin, sin, cos))
    }

    /// Uniform scale.
    #[inline]
    pub fn scaling(s: f64) -> Self {
        Self::linear(Matrix2::new(s, 0.0, 0.0, s))
    }

    /// `T(center) · L · T(-center)`: apply the linear map `l` about `center`.
    pub fn about(center: Point, l: Matrix2<f64>) -> Self {
        let (cx, cy) = (center.x as f64, center.y as f64);
        let t1 = Self::translation(-cx, -cy);
        let t2 = Self::translation(cx, cy);
        Self {
            m: t2.m * Self::linear(l).m * t1.m,
        }
    }

    /// Compose `edit` on top of the accumulated map: `edit · self`.
    #[inline]
    pub fn then(&self, edit: &Affine2) -> Affine2 {
        Affine2 { m: edit.m * self.m }
    }

    /// Map a point and truncate the result toward zero.
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        let (x, y) = self.apply_f64(p.x as f64, p.y as f64);
        Point::from_f64(x, y)
    }

    #[inline]
    pub fn apply_f64(&self, x: f64, y: f64) -> (f64, f64) {
        let v = self.m * Vector3::new(x, y, 1.0);
        (v.x, v.y)
    }

    /// Determinant of the 2×2 linear part (signed area scale).
    #[inline]
    pub fn linear_det(&self) -> f64 {
        self.m[(0, 0)] * self.m[(1, 1)] - self.m[(0, 1)] * self.m[(1, 0)]
    }

    /// Linear scale factor `sqrt(|det L|)`; reflections do not change it.
    #[inline]
    pub fn linear_scale(&self) -> f64 {
        self.linear_det().abs().sqrt()
    }

    /// Exact identity check: only a freshly reset transform counts as resolved.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.m == Matrix3::identity()
    }
}
