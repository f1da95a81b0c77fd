//! Tolerance and range defaults for the integer-grid engine.
//!
//! Policy
//! - The values below were tuned empirically; changing any of them changes
//!   observable clip output. `ClipCfg` and `ZoomRange` carry them into the
//!   engine and default to these constants.

/// Horizontal distance under which a ray crossing counts as touching the boundary.
pub const BOUNDARY_SNAP: f64 = 0.5;
/// Intersection parameter distance to an edge endpoint treated as "on the vertex".
pub const PERTURB_EPS: f64 = 1e-5;
/// Length of the perpendicular nudge applied to a degenerate vertex.
pub const PERTURB_OFFSET: f64 = 2.0;
/// Maximum number of nudges a single vertex may receive during one clip call.
pub const PERTURB_MAX_ATTEMPTS: u32 = 3;
/// Consecutive output vertices within this Manhattan distance are merged.
pub const MERGE_DISTANCE: i64 = 2;
/// Distance from the chord under which a clip-generated vertex counts as
/// collinear with its neighbours and is dropped (covers truncation to the grid).
pub const COLLINEAR_TOLERANCE: f64 = 1.5;
/// Smallest linear scale a shape may be zoomed to.
pub const ZOOM_MIN: f64 = 0.2;
/// Largest linear scale a shape may be zoomed to.
pub const ZOOM_MAX: f64 = 5.0;

/// Clipping tolerances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipCfg {
    pub perturb_eps: f64,
    pub perturb_offset: f64,
    pub perturb_max_attempts: u32,
    pub merge_distance: i64,
    pub collinear_tolerance: f64,
}

impl Default for ClipCfg {
    fn default() -> Self {
        Self {
            perturb_eps: PERTURB_EPS,
            perturb_offset: PERTURB_OFFSET,
            perturb_max_attempts: PERTURB_MAX_ATTEMPTS,
            merge_distance: MERGE_DISTANCE,
            collinear_tolerance: COLLINEAR_TOLERANCE,
        }
    }
}

/// Closed interval of admissible linear scales for zoom edits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self {
            min: ZOOM_MIN,
            max: ZOOM_MAX,
        }
    }
}

impl ZoomRange {
    /// Range with swapped bounds repaired and non-positive bounds lifted to the defaults.
    pub fn new(min: f64, max: f64) -> Self {
        let min = if min.is_finite() && min > 0.0 { min } else { ZOOM_MIN };
        let max = if max.is_finite() && max > 0.0 { max } else { ZOOM_MAX };
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Factor to apply to a shape currently at `scale_now` so that the result lands in range.
    #[inline]
    pub fn adjust(&self, scale_now: f64, factor: f64) -> f64 {
        let target = scale_now * factor;
        if target > self.max {
            self.max / scale_now
        } else if target < self.min {
            self.min / scale_now
        } else {
            factor
        }
    }
}
