//! Random star-shaped integer rings for benches and property tests.
//!
//! A ring of `n` vertices walks once around `center`: vertex `k` sits at
//! angle `phase + k·Δ` (Δ = 2π/n) nudged by up to `angle_jitter_frac·Δ`,
//! at radius `base_radius·(1 + u)` with `|u| ≤ radial_jitter`. Because the
//! angle jitter stays below Δ/2 the angles are already increasing, so the
//! ring is simple, star-shaped about `center` and counter-clockwise (y up).
//!
//! Draws are keyed by a `ReplayToken` `(seed, index)`: the same token
//! always yields the same ring, and neighbouring indices are independent.

use std::f64::consts::TAU;
use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::Point;

/// How many vertices a draw asks for (never fewer than 3).
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    /// Admissible counts after applying the floor of 3.
    pub fn range(&self) -> RangeInclusive<usize> {
        let (min, max) = match *self {
            VertexCount::Fixed(n) => (n, n),
            VertexCount::Uniform { min, max } => (min, max),
        };
        let min = min.max(3);
        min..=max.max(min)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Fraction of the angular step; used clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Used clamped to [0, 0.95] so radii stay positive.
    pub radial_jitter: f64,
    pub base_radius: f64,
    pub center: Point,
    pub random_phase: bool,
}

impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 100.0,
            center: Point::default(),
            random_phase: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

/// One SplitMix64 output for `state`.
fn splitmix64(state: u64) -> u64 {
    let mut z = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

impl ReplayToken {
    /// Generator for this token.
    pub fn rng(self) -> StdRng {
        StdRng::seed_from_u64(splitmix64(self.seed ^ splitmix64(self.index)))
    }
}

/// Draw one star-shaped ring.
///
/// `None` when truncation to the grid leaves fewer than 3 distinct
/// vertices, which only happens for radii of a few units.
pub fn draw_ring_radial(cfg: RadialCfg, tok: ReplayToken) -> Option<Vec<Point>> {
    let mut rng = tok.rng();
    let n = rng.gen_range(cfg.vertex_count.range());
    let step = TAU / n as f64;
    let wobble = cfg.angle_jitter_frac.clamp(0.0, 0.49) * step;
    let spread = cfg.radial_jitter.clamp(0.0, 0.95);
    let radius = cfg.base_radius.max(1.0);
    let phase = if cfg.random_phase {
        rng.gen_range(0.0..TAU)
    } else {
        0.0
    };

    let angles: Vec<f64> = (0..n)
        .map(|k| phase + k as f64 * step + rng.gen_range(-1.0..=1.0) * wobble)
        .collect();
    let (cx, cy) = (cfg.center.x as f64, cfg.center.y as f64);
    let mut ring: Vec<Point> = angles
        .into_iter()
        .map(|th| {
            let r = radius * (1.0 + rng.gen_range(-1.0..=1.0) * spread);
            Point::from_f64(cx + r * th.cos(), cy + r * th.sin())
        })
        .collect();
    ring.dedup();
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    (ring.len() >= 3).then_some(ring)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::{Orientation, Ring};

    #[test]
    fn same_token_same_ring() {
        let tok = ReplayToken { seed: 42, index: 7 };
        let a = draw_ring_radial(RadialCfg::default(), tok).expect("ring");
        assert_eq!(draw_ring_radial(RadialCfg::default(), tok), Some(a.clone()));
        let next = ReplayToken { index: 8, ..tok };
        assert_ne!(draw_ring_radial(RadialCfg::default(), next), Some(a));
    }

    #[test]
    fn vertex_count_range_has_a_floor_of_three() {
        assert_eq!(VertexCount::Fixed(1).range(), 3..=3);
        assert_eq!(VertexCount::Uniform { min: 5, max: 2 }.range(), 5..=5);
        assert_eq!(VertexCount::Uniform { min: 0, max: 9 }.range(), 3..=9);
    }

    #[test]
    fn rings_stay_in_the_radial_band_and_wind_counter_clockwise() {
        let cfg = RadialCfg {
            vertex_count: VertexCount::Uniform { min: 5, max: 20 },
            center: Point::new(300, 200),
            ..RadialCfg::default()
        };
        for index in 0..32 {
            let ring = draw_ring_radial(cfg, ReplayToken { seed: 3, index }).expect("ring");
            assert!(ring.len() >= 3);
            for p in &ring {
                let d = (((p.x - 300) as f64).powi(2) + ((p.y - 200) as f64).powi(2)).sqrt();
                assert!((73.0..=127.0).contains(&d), "radius {d}");
            }
            assert_eq!(Ring::new(ring).orientation(), Some(Orientation::CounterClockwise));
        }
    }
}
