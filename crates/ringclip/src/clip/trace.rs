//! Entry/exit labeling, contour tracing and hierarchy assembly.
//!
//! Anchoring
//! - A ring's inside/outside status is read at its first original vertex
//!   that does not sit on the other boundary (classified against the other
//!   side's *working* rings, i.e. after perturbation). Labels are assigned
//!   walking the ring from that anchor, so a head vertex that happens to
//!   touch the other shape cannot invert every label of the ring.
//! - If every vertex touches, an edge midpoint decides instead.

use tracing::warn;

use super::types::{Arena, Label, Side, Traced};
use crate::geom::Point;
use crate::ring::{classify_by, Containment, Ring};
use crate::shape::Shape;

impl Arena {
    /// Classify `p` against the working rings of `side` (outer ring, then holes).
    pub(crate) fn classify_working(&self, side: Side, p: (f64, f64)) -> Containment {
        let heads = self.ring_heads(side);
        let Some((&outer, holes)) = heads.split_first() else {
            return Containment::Outside;
        };
        let ring = |h: usize| {
            let n = self.nodes[h].ring_len;
            classify_by(n, |i| self.xy(h + i), p)
        };
        match ring(outer) {
            Containment::Inside => {}
            other => return other,
        }
        for &h in holes {
            match ring(h) {
                Containment::Boundary => return Containment::Boundary,
                Containment::Inside => return Containment::Outside,
                Containment::Outside => {}
            }
        }
        Containment::Inside
    }

    /// First original vertex of the ring at `head` not on the boundary of
    /// `other`, with whether it lies inside.
    ///
    /// When every vertex touches the other boundary (a perturbed copy of the
    /// same ring), the midpoint of an edge free of crossings stands in for
    /// its start vertex. Falls back to `(head, false)`.
    pub(crate) fn anchor(&self, head: usize, other: Side) -> (usize, bool) {
        let ring = self.ring_from(head);
        for &j in &ring {
            if self.nodes[j].intersect {
                continue;
            }
            match self.classify_working(other, self.xy(j)) {
                Containment::Boundary => continue,
                c => return (j, c == Containment::Inside),
            }
        }
        for &j in &ring {
            let k = self.nodes[j].next;
            if self.nodes[j].intersect || self.nodes[k].intersect {
                continue;
            }
            let ((ax, ay), (bx, by)) = (self.xy(j), self.xy(k));
            match self.classify_working(other, ((ax + bx) / 2.0, (ay + by) / 2.0)) {
                Containment::Boundary => continue,
                c => return (j, c == Containment::Inside),
            }
        }
        (head, false)
    }

    /// Assign entry/exit labels to every intersection node of both boundaries.
    pub(crate) fn label(&mut self) {
        for (side, other) in [(Side::Subject, Side::Clip), (Side::Clip, Side::Subject)] {
            for head in self.ring_heads(side) {
                let (start, inside) = self.anchor(head, other);
                let mut status = if inside { Label::Exit } else { Label::Entry };
                for j in self.ring_from(start) {
                    if self.nodes[j].intersect {
                        self.nodes[j].label = Some(status);
                        status = status.toggled();
                    }
                }
            }
        }
    }

    fn emit(&mut self, j: usize, out: &mut Vec<Traced>) {
        out.push(Traced {
            at: self.output_point(j),
            crossing: self.nodes[j].intersect,
        });
        self.nodes[j].processed = true;
        if let Some(nb) = self.nodes[j].neighbour {
            self.nodes[nb].processed = true;
        }
    }

    /// Trace every closed contour through the intersection nodes.
    ///
    /// Each traversal is bounded by `2 * nodes + 2` steps; a contour that
    /// overruns is abandoned. Returns the raw contours (closing duplicate
    /// already dropped).
    pub(crate) fn trace(&mut self) -> Vec<Vec<Traced>> {
        let budget = 2 * self.nodes.len() + 2;
        let mut contours = Vec::new();
        for head in self.ring_heads(Side::Subject) {
            loop {
                let start = self
                    .ring_from(head)
                    .into_iter()
                    .find(|&j| self.nodes[j].intersect && !self.nodes[j].processed);
                let Some(start) = start else { break };

                let mut pts = Vec::new();
                self.emit(start, &mut pts);
                let mut cur = start;
                let mut steps = 0usize;
                let mut closed = false;
                'walk: loop {
                    let forward = self.nodes[cur].label != Some(Label::Exit);
                    loop {
                        cur = if forward {
                            self.nodes[cur].next
                        } else {
                            self.nodes[cur].prev
                        };
                        self.emit(cur, &mut pts);
                        steps += 1;
                        if steps > budget {
                            break 'walk;
                        }
                        if self.nodes[cur].intersect {
                            break;
                        }
                    }
                    match self.nodes[cur].neighbour {
                        Some(nb) => cur = nb,
                        None => break 'walk,
                    }
                    if cur == start {
                        closed = true;
                        break;
                    }
                }
                if closed {
                    pts.remove(0);
                    contours.push(pts);
                } else {
                    warn!(start, steps, budget, "contour trace abandoned");
                }
            }
        }
        contours
    }

    /// Rings without intersection nodes that lie inside the other shape,
    /// emitted whole.
    pub(crate) fn isolated_rings(&self) -> Vec<Vec<Traced>> {
        let mut out = Vec::new();
        for (side, other) in [(Side::Subject, Side::Clip), (Side::Clip, Side::Subject)] {
            for head in self.ring_heads(side) {
                let ring = self.ring_from(head);
                if ring.iter().any(|&j| self.nodes[j].intersect) {
                    continue;
                }
                if self.anchor(head, other).1 {
                    out.push(
                        ring.iter()
                            .map(|&j| Traced {
                                at: self.nodes[j].origin,
                                crossing: false,
                            })
                            .collect(),
                    );
                }
            }
        }
        out
    }
}

/// Drop vertices within `distance` (Manhattan) of their successor, closing edge included.
pub(crate) fn merge_close(mut contour: Vec<Traced>, distance: i64) -> Vec<Traced> {
    let mut j = 0;
    while j < contour.len() {
        let next = contour[(j + 1) % contour.len()].at;
        if contour[j].at.manhattan(next) <= distance {
            contour.remove(j);
        } else {
            j += 1;
        }
    }
    contour
}

/// Drop crossing vertices that lie within `tolerance` of the chord between
/// their neighbours (and strictly between them along it). Input vertices
/// are always kept.
pub(crate) fn drop_collinear(mut contour: Vec<Traced>, tolerance: f64) -> Vec<Point> {
    let mut j = 0;
    while contour.len() >= 3 && j < contour.len() {
        let n = contour.len();
        let a = contour[(j + n - 1) % n].at;
        let b = contour[j];
        let d = contour[(j + 1) % n].at;
        let chord = d - a;
        let len2 = chord.dot(chord) as f64;
        let off = (b.at - a).cross(chord) as f64;
        let along = (b.at - a).dot(chord) as f64;
        if b.crossing && off * off < tolerance * tolerance * len2 && along > 0.0 && along < len2 {
            contour.remove(j);
            j = j.saturating_sub(1);
        } else {
            j += 1;
        }
    }
    contour.into_iter().map(|t| t.at).collect()
}

/// Nest contours into shapes: a contour whose first vertex lies inside
/// another contour becomes one of its holes.
pub(crate) fn assemble(contours: Vec<Vec<Point>>) -> Vec<Shape> {
    let rings: Vec<Ring> = contours.into_iter().map(Ring::new).collect();
    let n = rings.len();
    let mut top = vec![true; n];
    let mut holes: Vec<Vec<usize>> = vec![Vec::new(); n];
    for i in 0..n {
        for j in (i + 1)..n {
            if rings[i].contains(rings[j].vertices[0]) {
                holes[i].push(j);
                top[j] = false;
            }
            if rings[j].contains(rings[i].vertices[0]) {
                holes[j].push(i);
                top[i] = false;
            }
        }
    }
    (0..n)
        .filter(|&i| top[i])
        .map(|i| {
            Shape::from_rings(
                rings[i].clone(),
                holes[i].iter().map(|&k| rings[k].clone()).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().map(|&p| p.into()).collect()
    }

    fn traced(v: &[(i32, i32, bool)]) -> Vec<Traced> {
        v.iter()
            .map(|&(x, y, crossing)| Traced {
                at: Point::new(x, y),
                crossing,
            })
            .collect()
    }

    fn inputs(v: &[(i32, i32)]) -> Vec<Traced> {
        traced(&v.iter().map(|&(x, y)| (x, y, false)).collect::<Vec<_>>())
    }

    #[test]
    fn merge_close_collapses_near_duplicates() {
        let c = inputs(&[(0, 0), (1, 1), (100, 0), (100, 100), (0, 100), (0, 1)]);
        let merged = merge_close(c, 2);
        assert_eq!(merged, inputs(&[(1, 1), (100, 0), (100, 100), (0, 100)]));
        assert!(merge_close(inputs(&[(0, 0), (1, 0)]), 2).is_empty());
    }

    #[test]
    fn drop_collinear_removes_only_crossings_on_a_chord() {
        // (100,49) is a crossing one unit off the right edge
        let c = traced(&[
            (0, 0, false),
            (100, 0, false),
            (101, 49, true),
            (100, 100, false),
            (0, 100, false),
        ]);
        assert_eq!(
            drop_collinear(c, 1.5),
            pts(&[(0, 0), (100, 0), (100, 100), (0, 100)])
        );

        // input vertices stay even when collinear
        let c = traced(&[(0, 0, false), (50, 0, false), (100, 0, false), (50, 50, false)]);
        assert_eq!(drop_collinear(c, 1.5).len(), 4);

        // a real corner made by a crossing survives
        let c = traced(&[(0, 0, false), (100, 0, true), (100, 100, false)]);
        assert_eq!(drop_collinear(c, 1.5).len(), 3);

        // a crossing past the end of the chord is a spike, not a midpoint
        let c = traced(&[(0, 0, false), (20, 0, true), (10, 0, false), (5, 50, false)]);
        assert_eq!(drop_collinear(c, 1.5).len(), 4);
    }

    #[test]
    fn assemble_nests_holes() {
        let outer = pts(&[(0, 0), (100, 0), (100, 100), (0, 100)]);
        let hole = pts(&[(25, 25), (25, 75), (75, 75), (75, 25)]);
        let apart = pts(&[(200, 0), (300, 0), (300, 100)]);
        let shapes = assemble(vec![hole.clone(), apart.clone(), outer.clone()]);
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].outer.vertices, apart);
        assert!(shapes[0].inners.is_empty());
        assert_eq!(shapes[1].outer.vertices, outer);
        assert_eq!(shapes[1].inners.len(), 1);
        assert_eq!(shapes[1].inners[0].vertices, hole);
    }
}
