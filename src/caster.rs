//! Casting a single ray through a scene until it strikes an occupied cell
//! or runs past the far clipping distance.

use crate::raystep::{DEFAULT_EPSILON, RaySteps, hit_cell, ray_step};
use crate::scene::{CellPos, Scene};
use crate::vec2::Vec2;

/// Numeric knobs of a cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Grid-line snapping tolerance.
    pub epsilon: f64,
    /// Far clipping distance; rays never travel further than this.
    pub far: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            far: 10.0,
        }
    }
}

impl Tuning {
    /// Upper bound on the grid crossings a ray can make within `far`: at most
    /// one per vertical and one per horizontal grid line, plus slack.
    pub fn max_steps(&self) -> usize {
        // Float-to-int casts saturate; NaN becomes 0.
        let lines = (self.far.ceil().max(0.0) as usize).saturating_add(1);
        lines.saturating_mul(2).saturating_add(2)
    }
}

/// How a cast ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cast {
    /// The ray entered the occupied `cell` at `point`.
    Hit { point: Vec2, cell: CellPos },
    /// Nothing was struck within range; `point` lies at the far clip distance
    /// (or on the origin for a ray without direction).
    Clipped { point: Vec2 },
}

impl Cast {
    pub fn point(&self) -> Vec2 {
        match *self {
            Cast::Hit { point, .. } | Cast::Clipped { point } => point,
        }
    }

}

/// A ray that struck an occupied cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit<'a, P> {
    pub point: Vec2,
    pub cell: CellPos,
    pub payload: &'a P,
}

/// Walk the ray leaving `origin` towards `aim` one grid crossing at a time.
///
/// The walk starts at `origin` itself, so a cell the origin is entering is
/// checked before any step is taken; `aim` only contributes the direction.
pub fn cast<P>(scene: &Scene<P>, origin: Vec2, aim: Vec2, tuning: &Tuning) -> Cast {
    let dir = aim - origin;
    if dir.sqrlen() == 0.0 {
        return Cast::Clipped { point: origin };
    }

    let far_sq = tuning.far * tuning.far;
    let clip = origin + dir.norm().scale(tuning.far);

    let mut p1 = origin - dir;
    let mut p2 = origin;
    for _ in 0..tuning.max_steps() {
        // Also catches NaN coordinates, which never compare below `far_sq`.
        if !(origin.squaredist(&p2) < far_sq) {
            return Cast::Clipped { point: clip };
        }

        let cell = hit_cell(p1, p2, tuning.epsilon);
        if scene.is_occupied(cell) {
            return Cast::Hit { point: p2, cell };
        }

        let p3 = ray_step(p1, p2, tuning.epsilon);
        p1 = p2;
        p2 = p3;
    }

    log::debug!(
        "ray from {:?} towards {:?} exceeded {} steps",
        origin,
        aim,
        tuning.max_steps()
    );
    Cast::Clipped { point: clip }
}

/// Final point of the ray leaving `origin` towards `aim`: the hit point on
/// an occupied cell, otherwise the point at the far clip distance.
pub fn cast_ray<P>(scene: &Scene<P>, origin: Vec2, aim: Vec2, tuning: &Tuning) -> Vec2 {
    cast(scene, origin, aim, tuning).point()
}

/// Like [`cast_ray`], resolving the struck cell and its payload.
pub fn trace<'a, P>(
    scene: &'a Scene<P>,
    origin: Vec2,
    aim: Vec2,
    tuning: &Tuning,
) -> Option<RayHit<'a, P>> {
    match cast(scene, origin, aim, tuning) {
        Cast::Hit { point, cell } => scene.payload(cell).map(|payload| RayHit {
            point,
            cell,
            payload,
        }),
        Cast::Clipped { .. } => None,
    }
}

/// Every grid crossing a cast passes through, in order. The last point is
/// the hit point when the ray strikes a cell; crossings beyond the far clip
/// distance are left out.
pub fn crossings<P>(scene: &Scene<P>, origin: Vec2, aim: Vec2, tuning: &Tuning) -> Vec<Vec2> {
    let far_sq = tuning.far * tuning.far;
    let mut steps = RaySteps::from_origin(origin, aim, tuning.epsilon);
    let mut points = Vec::new();

    for _ in 0..tuning.max_steps() {
        let (p1, p2) = steps.window();
        if scene.is_occupied(hit_cell(p1, p2, tuning.epsilon)) {
            break;
        }
        match steps.next() {
            Some(p) if origin.squaredist(&p) < far_sq => points.push(p),
            _ => break,
        }
    }
    points
}
