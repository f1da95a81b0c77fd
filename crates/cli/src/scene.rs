//! JSON scene files: layers with rings, style and edit scripts.
//!
//! Format
//! ```json
//! { "zoom": {"min": 0.2, "max": 5.0},
//!   "layers": [ { "name": "a", "outer": [[0,0],[100,0],[100,100]],
//!                 "inners": [], "fill": [255,0,0,255], "edge": [0,0,0,255],
//!                 "visible": true,
//!                 "edits": [ {"translate": {"dx": 5, "dy": 0}},
//!                            {"rotate": {"degrees": 30}},
//!                            {"zoom": {"factor": 1.5}},
//!                            {"flip": "horizontal"} ] } ] }
//! ```
//! Everything except `layers[].outer` is optional. Layers are built through
//! the `LayerStack` API, so ring completion rules (orientation, holes inside
//! the outer ring) apply to scene files too.

use anyhow::{Context, Result};
use ringclip::api::{
    Edit, FlipAxis, LayerId, LayerStack, Orientation, Point, Rgba, Shape, ZoomRange,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SceneFile {
    #[serde(default)]
    pub zoom: Option<ZoomDto>,
    pub layers: Vec<LayerDto>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct ZoomDto {
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LayerDto {
    #[serde(default)]
    pub name: Option<String>,
    pub outer: Vec<[i32; 2]>,
    #[serde(default)]
    pub inners: Vec<Vec<[i32; 2]>>,
    #[serde(default)]
    pub fill: Option<[u8; 4]>,
    #[serde(default)]
    pub edge: Option<[u8; 4]>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub edits: Vec<EditDto>,
}

fn default_visible() -> bool {
    true
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum EditDto {
    Translate { dx: i32, dy: i32 },
    Rotate { degrees: f64 },
    Zoom { factor: f64 },
    Flip(FlipDto),
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlipDto {
    Horizontal,
    Vertical,
}

impl From<EditDto> for Edit {
    fn from(e: EditDto) -> Self {
        match e {
            EditDto::Translate { dx, dy } => Edit::Translate { dx, dy },
            EditDto::Rotate { degrees } => Edit::rotate_degrees(degrees),
            EditDto::Zoom { factor } => Edit::Zoom { factor },
            EditDto::Flip(FlipDto::Horizontal) => Edit::Flip(FlipAxis::Horizontal),
            EditDto::Flip(FlipDto::Vertical) => Edit::Flip(FlipAxis::Vertical),
        }
    }
}

/// Resolved shape as written to result files.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ShapeDto {
    pub outer: Vec<[i32; 2]>,
    pub inners: Vec<Vec<[i32; 2]>>,
    pub fill: [u8; 4],
}

impl From<&Shape> for ShapeDto {
    fn from(s: &Shape) -> Self {
        fn ring(v: &[Point]) -> Vec<[i32; 2]> {
            v.iter().map(|p| [p.x, p.y]).collect()
        }
        let s = s.resolved();
        let f = s.fill_color;
        Self {
            outer: ring(&s.outer.vertices),
            inners: s.inners.iter().map(|r| ring(&r.vertices)).collect(),
            fill: [f.r, f.g, f.b, f.a],
        }
    }
}

fn points(v: &[[i32; 2]]) -> Vec<Point> {
    v.iter().map(|&[x, y]| Point::new(x, y)).collect()
}

fn rgba([r, g, b, a]: [u8; 4]) -> Rgba {
    Rgba::new(r, g, b, a)
}

pub fn orientation_name(o: Option<Orientation>) -> &'static str {
    match o {
        Some(Orientation::Clockwise) => "clockwise",
        Some(Orientation::CounterClockwise) => "counter_clockwise",
        None => "degenerate",
    }
}

impl SceneFile {
    pub fn read(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading scene {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing scene {}", path.display()))
    }

    /// Build the layer stack; returns the ids in scene order.
    pub fn build(&self) -> Result<(LayerStack, Vec<LayerId>)> {
        let range = self
            .zoom
            .map(|z| ZoomRange::new(z.min, z.max))
            .unwrap_or_default();
        let mut stack = LayerStack::with_zoom_range(range);
        let mut ids = Vec::with_capacity(self.layers.len());
        for (i, layer) in self.layers.iter().enumerate() {
            let id = match &layer.name {
                Some(name) => stack.add_named(name.clone(), Shape::empty()),
                None => stack.add_layer(),
            };
            stack
                .complete_outer_ring(id, points(&layer.outer))
                .with_context(|| format!("layer {i}: outer ring"))?;
            for (k, hole) in layer.inners.iter().enumerate() {
                stack
                    .complete_inner_ring(id, points(hole))
                    .with_context(|| format!("layer {i}: inner ring {k}"))?;
            }
            if let Some(fill) = layer.fill {
                stack.set_fill_color(id, rgba(fill))?;
            }
            if let Some(edge) = layer.edge {
                stack.set_edge_color(id, rgba(edge))?;
            }
            for &edit in &layer.edits {
                stack.apply(id, edit.into())?;
            }
            stack.set_visible(id, layer.visible)?;
            ids.push(id);
        }
        tracing::debug!(layers = ids.len(), "scene built");
        Ok((stack, ids))
    }
}

/// Id of the `index`-th layer of the scene.
pub fn nth(ids: &[LayerId], index: usize) -> Result<LayerId> {
    ids.get(index)
        .copied()
        .with_context(|| format!("scene has {} layers, no layer {index}", ids.len()))
}
