//! Integer-grid geometry primitives.
//!
//! Purpose
//! - Points and vectors on the integer grid, the homogeneous affine transform
//!   that carries pending shape edits, colors, and the tolerance constants
//!   every other component shares.
//!
//! Why this design
//! - Vertices are `i32` and all products widen to `i64`, so orientation and
//!   side tests are exact. Only the transform and the clip working copy use
//!   `f64`; materialization truncates toward zero.
//!
//! Code cross-refs: `Ring`, `Shape`, `clip`, `fill_spans`.

mod affine;
pub mod cfg;
pub mod rand;
mod types;

pub use affine::Affine2;
pub use cfg::{ClipCfg, ZoomRange};
pub use types::{Point, Rgba, Vector};
