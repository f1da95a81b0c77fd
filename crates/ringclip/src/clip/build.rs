//! Arena construction, degeneracy settling and intersection insertion.
//!
//! Phase order
//! 1) `push_shape` for subject and clip (outer ring, then every hole with at
//!    least 3 vertices, chained via `next_ring`).
//! 2) `settle`: scan all subject × clip edge pairs; on the first degenerate
//!    pair nudge one vertex and rescan. Each vertex is nudged at most
//!    `perturb_max_attempts` times, so the loop terminates; pairs that stay
//!    degenerate are skipped by insertion.
//! 3) `insert_intersections`: one node per crossing on each side, sorted by
//!    α after the edge start, cross-linked as neighbours.

use tracing::{trace, warn};

use super::types::{Arena, Node, Side};
use crate::geom::{ClipCfg, Point};
use crate::shape::Shape;

/// Result of the dual weighted-edge-crossing test for one edge pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Crossing {
    /// Proper crossing at `alpha` along the subject edge, `beta` along the clip edge.
    Hit { alpha: f64, beta: f64 },
    /// Crossing lands on an endpoint, or the edges are collinear: nudge
    /// `vertex` off the line through `along`.
    Degenerate { vertex: usize, along: (usize, usize) },
}

impl Arena {
    /// Build an arena from two resolved shapes.
    pub(crate) fn from_shapes(subject: &Shape, clip: &Shape) -> Arena {
        let mut arena = Arena::default();
        arena.subject = arena.push_shape(subject);
        arena.clip = arena.push_shape(clip);
        arena
    }

    fn push_shape(&mut self, shape: &Shape) -> Option<usize> {
        let mut first = None;
        let mut last: Option<usize> = None;
        let rings = std::iter::once(&shape.outer)
            .chain(shape.inners.iter().filter(|r| !r.is_degenerate()));
        for ring in rings {
            let head = self.nodes.len();
            let n = ring.len();
            if n == 0 {
                continue;
            }
            for v in &ring.vertices {
                self.nodes.push(Node::vertex(*v));
            }
            for i in 0..n {
                self.nodes[head + i].next = head + (i + 1) % n;
                self.nodes[head + i].prev = head + (i + n - 1) % n;
            }
            self.nodes[head].ring_len = n;
            match last {
                Some(prev) => self.nodes[prev].next_ring = Some(head),
                None => first = Some(head),
            }
            last = Some(head);
        }
        first
    }

    /// Weighted-edge-crossing test of subject edge `p1→p2` against clip edge `q1→q2`.
    ///
    /// Touching (a zero weight) counts as crossing, so endpoint contacts are
    /// reported as degenerate rather than missed.
    pub(crate) fn wec(&self, p: (usize, usize), q: (usize, usize), eps: f64) -> Option<Crossing> {
        let (p1, p2) = p;
        let (q1, q2) = q;
        let (p1x, p1y) = self.xy(p1);
        let (p2x, p2y) = self.xy(p2);
        let (q1x, q1y) = self.xy(q1);
        let (q2x, q2y) = self.xy(q2);
        let (px, py) = (p2x - p1x, p2y - p1y);
        let (qx, qy) = (q2x - q1x, q2y - q1y);

        let wp1 = (p1x - q1x) * qy - (p1y - q1y) * qx;
        let wp2 = (p2x - q1x) * qy - (p2y - q1y) * qx;
        if wp1 * wp2 > 0.0 {
            return None;
        }
        let wq1 = (q1x - p1x) * py - (q1y - p1y) * px;
        let wq2 = (q2x - p1x) * py - (q2y - p1y) * px;
        if wq1 * wq2 > 0.0 {
            return None;
        }

        let dp = wp1 - wp2;
        let dq = wq1 - wq2;
        if dp == 0.0 || dq == 0.0 {
            return Some(Crossing::Degenerate {
                vertex: p1,
                along: q,
            });
        }
        let alpha = wp1 / dp;
        let beta = wq1 / dq;
        let degenerate = if alpha.abs() < eps {
            Some((p1, q))
        } else if (1.0 - alpha).abs() < eps {
            Some((p2, q))
        } else if beta.abs() < eps {
            Some((q1, p))
        } else if (1.0 - beta).abs() < eps {
            Some((q2, p))
        } else {
            None
        };
        Some(match degenerate {
            Some((vertex, along)) => Crossing::Degenerate { vertex, along },
            None => Crossing::Hit { alpha, beta },
        })
    }

    /// Move `v` by `offset` along the unit perpendicular of edge `along`.
    /// Returns `false` for a zero-length edge.
    pub(crate) fn perturb(&mut self, v: usize, along: (usize, usize), offset: f64) -> bool {
        let (ax, ay) = self.xy(along.0);
        let (bx, by) = self.xy(along.1);
        let (dx, dy) = (bx - ax, by - ay);
        let len = (dx * dx + dy * dy).sqrt();
        if len == 0.0 {
            return false;
        }
        let node = &mut self.nodes[v];
        node.x += offset * dy / len;
        node.y -= offset * dx / len;
        true
    }

    /// Nudge vertices until no edge pair is degenerate or every candidate
    /// vertex has used up its attempts. Returns the number of nudges.
    pub(crate) fn settle(&mut self, cfg: &ClipCfg) -> usize {
        let subject = self.original_edges(Side::Subject);
        let clip = self.original_edges(Side::Clip);
        let mut moves = 0usize;
        'scan: loop {
            for &p in &subject {
                for &q in &clip {
                    let Some(Crossing::Degenerate { vertex, along }) =
                        self.wec(p, q, cfg.perturb_eps)
                    else {
                        continue;
                    };
                    if self.nodes[vertex].bumps >= cfg.perturb_max_attempts {
                        continue;
                    }
                    if self.perturb(vertex, along, cfg.perturb_offset) {
                        self.nodes[vertex].bumps += 1;
                        moves += 1;
                        trace!(vertex, bumps = self.nodes[vertex].bumps, "perturb");
                        continue 'scan;
                    }
                }
            }
            break;
        }
        let exhausted = self
            .nodes
            .iter()
            .filter(|n| n.bumps >= cfg.perturb_max_attempts)
            .count();
        if exhausted > 0 {
            warn!(exhausted, "perturbation attempts exhausted; degenerate pairs skipped");
        }
        moves
    }

    /// Splice an intersection node after `v`, keeping intersection nodes on
    /// the same edge sorted by increasing α.
    pub(crate) fn insert_after(&mut self, v: usize, alpha: f64) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(Node::intersection(alpha));
        let mut prev = v;
        let mut next = self.nodes[v].next;
        while self.nodes[next].intersect && self.nodes[next].alpha < alpha {
            prev = next;
            next = self.nodes[next].next;
        }
        self.nodes[idx].prev = prev;
        self.nodes[idx].next = next;
        self.nodes[prev].next = idx;
        self.nodes[next].prev = idx;
        idx
    }

    /// Insert every proper crossing between the two boundaries. Returns the
    /// number of crossings.
    pub(crate) fn insert_intersections(&mut self, cfg: &ClipCfg) -> usize {
        let subject = self.original_edges(Side::Subject);
        let clip = self.original_edges(Side::Clip);
        let mut hits = Vec::new();
        for &p in &subject {
            for &q in &clip {
                if let Some(Crossing::Hit { alpha, beta }) = self.wec(p, q, cfg.perturb_eps) {
                    hits.push((p.0, q.0, alpha, beta));
                }
            }
        }
        for &(s, c, alpha, beta) in &hits {
            let a = self.insert_after(s, alpha);
            let b = self.insert_after(c, beta);
            self.nodes[a].neighbour = Some(b);
            self.nodes[b].neighbour = Some(a);
        }
        hits.len()
    }

    /// Original vertices `(l, r)` bounding the edge that node `i` lies on.
    /// For an original vertex both are `i`.
    pub(crate) fn original_edge(&self, i: usize) -> (usize, usize) {
        let mut l = i;
        while self.nodes[l].intersect {
            l = self.nodes[l].prev;
        }
        let mut r = i;
        while self.nodes[r].intersect {
            r = self.nodes[r].next;
        }
        (l, r)
    }

    /// Output position of node `i`.
    ///
    /// Original vertices report their input position. A crossing is
    /// recomputed on the unperturbed edges of both boundaries and clamped to
    /// its own edge, so it lands on segments of both inputs up to truncation.
    /// Parallel input edges (the crossing only exists after perturbation)
    /// fall back to `alpha`.
    pub(crate) fn output_point(&self, i: usize) -> Point {
        let node = &self.nodes[i];
        if !node.intersect {
            return node.origin;
        }
        let (l, r) = self.original_edge(i);
        let (p1, p2) = (self.nodes[l].origin, self.nodes[r].origin);
        let (px, py) = ((p2.x as f64) - p1.x as f64, (p2.y as f64) - p1.y as f64);
        let mut t = node.alpha;
        if let Some(nb) = node.neighbour {
            let (l2, r2) = self.original_edge(nb);
            let (q1, q2) = (self.nodes[l2].origin, self.nodes[r2].origin);
            let (qx, qy) = ((q2.x as f64) - q1.x as f64, (q2.y as f64) - q1.y as f64);
            let den = px * qy - py * qx;
            if den != 0.0 {
                let (dx, dy) = ((q1.x as f64) - p1.x as f64, (q1.y as f64) - p1.y as f64);
                t = (dx * qy - dy * qx) / den;
            }
        }
        let t = t.clamp(0.0, 1.0);
        Point::from_f64(p1.x as f64 + t * px, p1.y as f64 + t * py)
    }
}
