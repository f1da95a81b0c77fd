//! Curated surface for the CLI and benches (UNSTABLE).
//!
//! Important
//! - Convenience re-exports only. Prefer these in workspace code so call
//!   sites stay stable while modules move.

// Primitives and tolerances
pub use crate::geom::cfg::{
    BOUNDARY_SNAP, COLLINEAR_TOLERANCE, MERGE_DISTANCE, PERTURB_EPS, PERTURB_MAX_ATTEMPTS, PERTURB_OFFSET, ZOOM_MAX,
    ZOOM_MIN,
};
pub use crate::geom::{Affine2, ClipCfg, Point, Rgba, Vector, ZoomRange};
// Random rings
pub use crate::geom::rand::{
    draw_ring_radial, RadialCfg as RingRadialCfg, ReplayToken as RingReplay, VertexCount,
};
// Rings and shapes
pub use crate::ring::{Containment, Orientation, Ring};
pub use crate::shape::{FlipAxis, Shape};
// Engine operations
pub use crate::clip::{clip, clip_with_cfg};
pub use crate::raster::{fill_spans, fill_spans_in_frame, Frame, Span};
// Layer stack
pub use crate::layers::{Edit, Layer, LayerError, LayerId, LayerStack};
