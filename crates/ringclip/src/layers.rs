//! Owned, id-indexed layer collection driven by the surrounding application.
//!
//! Purpose
//! - One place that owns every shape and applies the operations a drawing
//!   front end issues: add/remove layers, complete rings from raw vertex
//!   paths, edit, restyle, clip two layers, render the visible ones.
//!
//! Conventions
//! - `LayerId`s are assigned once and never reused, so ids held by a caller
//!   stay valid (or fail with `UnknownLayer`) across deletions.
//! - Stored shapes keep their pending transform; `apply` returns the
//!   resolved view. Ring completion commits the transform first.
//! - Outer rings are stored counter-clockwise, holes clockwise.

use std::fmt;

use tracing::debug;

use crate::clip::clip;
use crate::geom::{Point, Rgba, ZoomRange};
use crate::raster::{fill_spans_in_frame, Frame, Span};
use crate::ring::{Orientation, Ring};
use crate::shape::{FlipAxis, Shape};

/// Stable layer handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u32);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub shape: Shape,
}

/// One shape edit with explicit numeric deltas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edit {
    Translate { dx: i32, dy: i32 },
    /// Rotation about the shape center, given as the angle's sine and cosine.
    Rotate { sin: f64, cos: f64 },
    Zoom { factor: f64 },
    Flip(FlipAxis),
}

impl Edit {
    /// Rotation by `degrees` (counter-clockwise in a y-up frame).
    pub fn rotate_degrees(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Edit::Rotate { sin, cos }
    }
}

/// Errors raised by layer operations.
#[derive(Clone, Debug, PartialEq)]
pub enum LayerError {
    UnknownLayer(LayerId),
    SameLayer(LayerId),
    DegenerateRing { len: usize },
    MissingOuterRing(LayerId),
    InnerRingOutside { vertex: Point },
}

impl fmt::Display for LayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLayer(id) => write!(f, "unknown layer {id}"),
            Self::SameLayer(id) => write!(f, "cannot clip layer {id} with itself"),
            Self::DegenerateRing { len } => {
                write!(f, "ring needs at least 3 vertices, got {len}")
            }
            Self::MissingOuterRing(id) => write!(f, "layer {id} has no outer ring yet"),
            Self::InnerRingOutside { vertex } => write!(
                f,
                "inner ring vertex ({}, {}) is not inside the shape",
                vertex.x, vertex.y
            ),
        }
    }
}

impl std::error::Error for LayerError {}

#[derive(Clone, Debug, Default)]
pub struct LayerStack {
    layers: Vec<Layer>,
    zoom_range: ZoomRange,
    next_id: u32,
    new_layer_counter: u32,
    clip_layer_counter: u32,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zoom_range(zoom_range: ZoomRange) -> Self {
        Self {
            zoom_range,
            ..Self::default()
        }
    }

    #[inline]
    pub fn zoom_range(&self) -> ZoomRange {
        self.zoom_range
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    /// Ids in layer order.
    pub fn ids(&self) -> Vec<LayerId> {
        self.layers.iter().map(|l| l.id).collect()
    }

    fn position(&self, id: LayerId) -> Result<usize, LayerError> {
        self.layers
            .iter()
            .position(|l| l.id == id)
            .ok_or(LayerError::UnknownLayer(id))
    }

    pub fn layer(&self, id: LayerId) -> Result<&Layer, LayerError> {
        Ok(&self.layers[self.position(id)?])
    }

    fn shape_mut(&mut self, id: LayerId) -> Result<&mut Shape, LayerError> {
        let i = self.position(id)?;
        Ok(&mut self.layers[i].shape)
    }

    fn push(&mut self, name: String, shape: Shape) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.push(Layer { id, name, shape });
        id
    }

    /// Append an empty layer named `New Layer N`.
    pub fn add_layer(&mut self) -> LayerId {
        let name = format!("New Layer {}", self.new_layer_counter);
        self.new_layer_counter += 1;
        let id = self.push(name, Shape::empty());
        debug!(%id, "add layer");
        id
    }

    /// Append a layer holding `shape` under an explicit name.
    pub fn add_named(&mut self, name: impl Into<String>, shape: Shape) -> LayerId {
        self.push(name.into(), shape)
    }

    pub fn remove_layer(&mut self, id: LayerId) -> Result<Layer, LayerError> {
        let i = self.position(id)?;
        debug!(%id, "remove layer");
        Ok(self.layers.remove(i))
    }

    /// Replace the outer ring with `path` (normalized counter-clockwise).
    ///
    /// Holes that no longer lie strictly inside the new outer ring are dropped.
    pub fn complete_outer_ring(&mut self, id: LayerId, path: Vec<Point>) -> Result<(), LayerError> {
        if path.len() < 3 {
            return Err(LayerError::DegenerateRing { len: path.len() });
        }
        let shape = self.shape_mut(id)?;
        shape.resolve();
        let mut outer = Ring {
            vertices: path,
            edge_color: shape.outer.edge_color,
        };
        outer.ensure_orientation(Orientation::CounterClockwise);
        let before = shape.inners.len();
        shape
            .inners
            .retain(|h| h.vertices.iter().all(|&v| outer.contains(v)));
        shape.outer = outer;
        debug!(%id, dropped_holes = before - shape.inners.len(), "outer ring");
        Ok(())
    }

    /// Append `path` as a hole (normalized clockwise).
    ///
    /// Every vertex must lie strictly inside the current filled region.
    pub fn complete_inner_ring(&mut self, id: LayerId, path: Vec<Point>) -> Result<(), LayerError> {
        let shape = self.shape_mut(id)?;
        shape.resolve();
        if shape.outer.is_degenerate() {
            return Err(LayerError::MissingOuterRing(id));
        }
        if path.len() < 3 {
            return Err(LayerError::DegenerateRing { len: path.len() });
        }
        if let Some(&vertex) = path.iter().find(|&&v| !shape.contains(v)) {
            return Err(LayerError::InnerRingOutside { vertex });
        }
        let mut hole = Ring {
            vertices: path,
            edge_color: shape.outer.edge_color,
        };
        hole.ensure_orientation(Orientation::Clockwise);
        shape.inners.push(hole);
        Ok(())
    }

    /// Apply one edit and return the resolved shape.
    pub fn apply(&mut self, id: LayerId, edit: Edit) -> Result<Shape, LayerError> {
        let range = self.zoom_range;
        let shape = self.shape_mut(id)?;
        match edit {
            Edit::Translate { dx, dy } => shape.translate(dx, dy),
            Edit::Rotate { sin, cos } => shape.rotate(sin, cos),
            Edit::Zoom { factor } => shape.zoom(factor, range),
            Edit::Flip(axis) => shape.flip(axis),
        }
        Ok(shape.resolved())
    }

    pub fn set_fill_color(&mut self, id: LayerId, color: Rgba) -> Result<(), LayerError> {
        self.shape_mut(id)?.fill_color = color;
        Ok(())
    }

    /// Stroke color for every ring of the layer.
    pub fn set_edge_color(&mut self, id: LayerId, color: Rgba) -> Result<(), LayerError> {
        self.shape_mut(id)?.set_edge_color(color);
        Ok(())
    }

    pub fn set_visible(&mut self, id: LayerId, visible: bool) -> Result<(), LayerError> {
        self.shape_mut(id)?.visible = visible;
        Ok(())
    }

    /// Intersect two layers; each resulting shape becomes a new layer named
    /// `Clip Layer N` with the subject's colors.
    pub fn clip_layers(
        &mut self,
        subject: LayerId,
        clip_id: LayerId,
    ) -> Result<Vec<LayerId>, LayerError> {
        let s = &self.layers[self.position(subject)?].shape;
        let c = &self.layers[self.position(clip_id)?].shape;
        if subject == clip_id {
            return Err(LayerError::SameLayer(subject));
        }
        let fill = s.fill_color;
        let edge = s.outer.edge_color;
        let pieces = clip(s, c);
        let mut ids = Vec::with_capacity(pieces.len());
        for mut piece in pieces {
            piece.fill_color = fill;
            piece.set_edge_color(edge);
            let name = format!("Clip Layer {}", self.clip_layer_counter);
            self.clip_layer_counter += 1;
            ids.push(self.push(name, piece));
        }
        debug!(%subject, clip = %clip_id, pieces = ids.len(), "clip layers");
        Ok(ids)
    }

    /// Frame-bounded spans of every visible layer, in layer order.
    pub fn render(&self, frame: Frame) -> Vec<(LayerId, Vec<Span>)> {
        self.layers
            .iter()
            .filter(|l| l.shape.visible)
            .map(|l| (l.id, fill_spans_in_frame(&l.shape, frame)))
            .collect()
    }
}
