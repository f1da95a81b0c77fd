//! Boolean intersection of two shapes (Greiner–Hormann).
//!
//! Purpose
//! - `clip(subject, clip)` returns the polygons-with-holes covering the area
//!   both shapes fill. The same call bounds shapes to the canvas before
//!   rasterization.
//!
//! Algorithm
//! 1) Build one arena with both boundaries (outer ring + holes each).
//! 2) Settle degeneracies by bounded perturbation, then insert every proper
//!    crossing into both boundaries, cross-linked as neighbours.
//! 3) Label crossings entry/exit per ring, walking from an anchor vertex
//!    that is strictly inside or outside the other shape.
//! 4) Trace closed contours: forward from entries, backward from exits,
//!    switching boundary at each crossing.
//! 5) Add rings without crossings that lie inside the other shape.
//! 6) Merge near-duplicate vertices, drop crossings left collinear with
//!    their neighbours, drop contours below 3 vertices, and nest contours
//!    into outer rings and holes.
//!
//! Output coordinates come from the unperturbed input: input vertices are
//! copied and crossings are recomputed on the input edges, so every result
//! vertex lies on the boundary of both inputs up to truncation.
//!
//! Degenerate input (an outer ring with fewer than 3 vertices on either
//! side) yields an empty result. The arena is dropped before returning.
//!
//! References
//! - G. Greiner, K. Hormann, "Efficient clipping of arbitrary polygons",
//!   ACM TOG 17(2), 1998.

mod build;
mod trace;
mod types;

use tracing::debug;

use crate::geom::ClipCfg;
use crate::shape::Shape;
use types::Arena;

/// Intersection of `subject` and `clip` with default tolerances.
pub fn clip(subject: &Shape, clip: &Shape) -> Vec<Shape> {
    clip_with_cfg(subject, clip, &ClipCfg::default())
}

/// Intersection of `subject` and `clip`; both are resolved first.
///
/// Result shapes carry default style; callers copy fill colors as needed.
pub fn clip_with_cfg(subject: &Shape, clip: &Shape, cfg: &ClipCfg) -> Vec<Shape> {
    let subject = subject.resolved();
    let clip = clip.resolved();
    if subject.outer.is_degenerate() || clip.outer.is_degenerate() {
        return Vec::new();
    }

    let mut arena = Arena::from_shapes(&subject, &clip);
    let moves = arena.settle(cfg);
    let crossings = arena.insert_intersections(cfg);
    arena.label();
    let mut contours = arena.trace();
    contours.extend(arena.isolated_rings());
    let nodes = arena.nodes.len();
    drop(arena);

    let contours: Vec<_> = contours
        .into_iter()
        .map(|c| trace::merge_close(c, cfg.merge_distance))
        .map(|c| trace::drop_collinear(c, cfg.collinear_tolerance))
        .filter(|c| c.len() >= 3)
        .collect();
    let contour_count = contours.len();
    let shapes = trace::assemble(contours);
    debug!(
        nodes,
        moves,
        crossings,
        contours = contour_count,
        shapes = shapes.len(),
        "clip"
    );
    shapes
}
