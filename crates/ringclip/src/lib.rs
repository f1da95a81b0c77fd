//! Integer-grid 2D geometry engine: polygons with holes, Boolean
//! intersection and scanline fill.
//!
//! Components, leaves first
//! - `geom`: points, vectors, the homogeneous affine transform, colors and
//!   tolerance constants.
//! - `ring`: orientation and ray-cast containment of one closed boundary.
//! - `shape`: outer ring + holes + pending transform + style.
//! - `clip`: Greiner–Hormann intersection of two shapes.
//! - `raster`: active-edge-table fill into pixel spans.
//! - `layers`: the owned layer collection a front end drives.
//!
//! API Policy
//! - The crate is consumed by the workspace CLI and by tests. `api` is the
//!   curated surface; everything else may move between releases.

pub mod api;
pub mod clip;
pub mod geom;
pub mod layers;
pub mod raster;
pub mod ring;
pub mod shape;

#[cfg(test)]
mod props;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use clip::{clip, clip_with_cfg};
pub use geom::{Affine2, ClipCfg, Point, Rgba, Vector, ZoomRange};
pub use layers::{Edit, Layer, LayerError, LayerId, LayerStack};
pub use raster::{fill_spans, fill_spans_in_frame, Frame, Span};
pub use ring::{Containment, Orientation, Ring};
pub use shape::{FlipAxis, Shape};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom::rand::{draw_ring_radial, RadialCfg, ReplayToken, VertexCount};
    pub use crate::{
        clip, clip_with_cfg, fill_spans, fill_spans_in_frame, Affine2, ClipCfg, Containment,
        Edit, FlipAxis, Frame, Layer, LayerError, LayerId, LayerStack, Orientation, Point, Rgba,
        Ring, Shape, Span, Vector, ZoomRange,
    };
}
