//! Walking a ray across the integer grid lines of a scene.
//!
//! A ray is carried as a window of two points `(p1, p2)` on it; each step
//! produces the next point past `p2` that lies on a vertical or horizontal
//! grid line, whichever comes first.

use crate::scene::CellPos;
use crate::vec2::Vec2;

/// Tolerance used to push a point that already sits on a grid line over to
/// the next one.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// `-1`, `0` or `1`. Unlike `f64::signum`, zero maps to zero.
#[inline]
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Next grid coordinate after `v` when moving with velocity `dv`.
///
/// `v` is nudged by `eps` in the direction of travel before rounding, so a
/// value that is already on a grid line advances to the following line.
#[inline]
pub fn snap(v: f64, dv: f64, eps: f64) -> f64 {
    if dv > 0.0 {
        (v + eps).ceil()
    } else if dv < 0.0 {
        (v - eps).floor()
    } else {
        v
    }
}

/// Cell the ray `p1 -> p2` is entering at `p2`.
///
/// A point on a cell boundary belongs to the cell on the far side of the
/// boundary in the direction of travel.
#[inline]
pub fn hit_cell(p1: Vec2, p2: Vec2, eps: f64) -> CellPos {
    let d = p2 - p1;
    CellPos::new(
        (p2.x + sign(d.x) * eps).floor() as i64,
        (p2.y + sign(d.y) * eps).floor() as i64,
    )
}

/// Next point past `p2`, on the line through `p1` and `p2`, with an integer
/// x or y coordinate.
///
/// When both a vertical and a horizontal grid line are ahead, the crossing
/// nearer to `p2` wins; on a tie the vertical crossing is kept. A degenerate
/// window (`p1 == p2`) returns `p2`.
pub fn ray_step(p1: Vec2, p2: Vec2, eps: f64) -> Vec2 {
    let d = p2 - p1;

    if d.x == 0.0 {
        return Vec2::new(p2.x, snap(p2.y, d.y, eps));
    }

    let k = d.y / d.x;
    let c = p1.y - k * p1.x;

    let x3 = snap(p2.x, d.x, eps);
    let mut p3 = Vec2::new(x3, k * x3 + c);

    if k != 0.0 {
        let y3 = snap(p2.y, d.y, eps);
        let candidate = Vec2::new((y3 - c) / k, y3);
        if p2.squaredist(&candidate) < p2.squaredist(&p3) {
            p3 = candidate;
        }
    }

    p3
}

/// Lazy sequence of grid crossings along a ray, starting after `p2`.
///
/// Ends only if a step fails to advance, which happens for a degenerate
/// window; otherwise it is unbounded and callers cut it off by distance.
#[derive(Debug, Clone)]
pub struct RaySteps {
    p1: Vec2,
    p2: Vec2,
    eps: f64,
}

impl RaySteps {
    pub fn new(p1: Vec2, p2: Vec2, eps: f64) -> Self {
        Self { p1, p2, eps }
    }

    /// Crossings of the ray that leaves `origin` heading towards `aim`,
    /// beginning with the first grid line after `origin`.
    pub fn from_origin(origin: Vec2, aim: Vec2, eps: f64) -> Self {
        Self::new(origin - (aim - origin), origin, eps)
    }

    /// The current window `(p1, p2)`.
    pub fn window(&self) -> (Vec2, Vec2) {
        (self.p1, self.p2)
    }
}

impl Iterator for RaySteps {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        let p3 = ray_step(self.p1, self.p2, self.eps);
        if p3 == self.p2 {
            return None;
        }
        self.p1 = self.p2;
        self.p2 = p3;
        Some(p3)
    }
}
