//! Arena-backed vertex lists for one clip call.
//!
//! Both boundaries live in a single `Vec<Node>`; `next`/`prev`, `neighbour`
//! and `next_ring` are plain indices. Original vertices of one ring are
//! pushed contiguously, so `head + i` addresses the i-th original vertex
//! even after intersection nodes have been spliced in (those are appended
//! at the end of the arena).
//! - `origin` keeps each vertex's integer input position. Output is read
//!   from there, so perturbation never leaks into clip results.

use crate::geom::Point;

/// Traversal direction assigned to an intersection node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Label {
    /// Entering the other shape: walk forward.
    Entry,
    /// Leaving the other shape: walk backward.
    Exit,
}

impl Label {
    #[inline]
    pub(crate) fn toggled(self) -> Self {
        match self {
            Label::Entry => Label::Exit,
            Label::Exit => Label::Entry,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    /// Working coordinates; original vertices may be perturbed off the grid.
    pub x: f64,
    pub y: f64,
    /// Input position (original vertices only).
    pub origin: Point,
    pub next: usize,
    pub prev: usize,
    pub intersect: bool,
    /// Parameter along the source edge (intersection nodes only).
    pub alpha: f64,
    pub neighbour: Option<usize>,
    pub label: Option<Label>,
    pub processed: bool,
    /// Perturbations applied so far.
    pub bumps: u32,
    /// Head of the following ring of the same boundary (set on ring heads).
    pub next_ring: Option<usize>,
    /// Original vertex count of this ring (set on ring heads).
    pub ring_len: usize,
}

impl Node {
    pub(crate) fn vertex(origin: Point) -> Self {
        Self {
            x: origin.x as f64,
            y: origin.y as f64,
            origin,
            next: 0,
            prev: 0,
            intersect: false,
            alpha: 0.0,
            neighbour: None,
            label: None,
            processed: false,
            bumps: 0,
            next_ring: None,
            ring_len: 0,
        }
    }

    pub(crate) fn intersection(alpha: f64) -> Self {
        Self {
            intersect: true,
            alpha,
            ..Self::vertex(Point::default())
        }
    }
}

/// Output vertex of a traced contour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Traced {
    pub at: Point,
    /// Produced by a crossing rather than copied from an input vertex.
    pub crossing: bool,
}

/// Which side of the clip a boundary belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Subject,
    Clip,
}

/// Both boundaries of one clip call.
#[derive(Debug, Default)]
pub(crate) struct Arena {
    pub nodes: Vec<Node>,
    /// Head of the subject's outer ring.
    pub subject: Option<usize>,
    /// Head of the clip shape's outer ring.
    pub clip: Option<usize>,
}

impl Arena {
    #[inline]
    pub(crate) fn first(&self, side: Side) -> Option<usize> {
        match side {
            Side::Subject => self.subject,
            Side::Clip => self.clip,
        }
    }

    /// Ring heads of one boundary, outer ring first.
    pub(crate) fn ring_heads(&self, side: Side) -> Vec<usize> {
        let mut out = Vec::new();
        let mut cur = self.first(side);
        while let Some(h) = cur {
            out.push(h);
            cur = self.nodes[h].next_ring;
        }
        out
    }

    /// Original edges `(start, end)` of every ring of one boundary.
    pub(crate) fn original_edges(&self, side: Side) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for h in self.ring_heads(side) {
            let n = self.nodes[h].ring_len;
            out.extend((0..n).map(|i| (h + i, h + (i + 1) % n)));
        }
        out
    }

    /// Node indices of one ring in list order, starting at `start`.
    pub(crate) fn ring_from(&self, start: usize) -> Vec<usize> {
        let mut out = vec![start];
        let mut j = self.nodes[start].next;
        while j != start {
            out.push(j);
            j = self.nodes[j].next;
        }
        out
    }

    #[inline]
    pub(crate) fn xy(&self, i: usize) -> (f64, f64) {
        (self.nodes[i].x, self.nodes[i].y)
    }
}
