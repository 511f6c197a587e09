//! Per-frame scene query: one ray per sample column across the field of
//! view, reduced to what a drawing backend needs.

use rayon::prelude::*;

use crate::camera::{Player, Wedge};
use crate::caster::{Tuning, trace};
use crate::config::RenderConfig;
use crate::scene::{CellPos, Scene};
use crate::vec2::Vec2;

/// A wall slice seen through one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strip<'a, P> {
    pub payload: &'a P,
    pub cell: CellPos,
    pub point: Vec2,
    /// Distance from the player's eye plane, not from the player, so walls
    /// do not bow outwards at the screen edges.
    pub distance: f64,
    /// Strip height as a fraction of the screen height.
    pub height: f64,
    /// Shading factor in `[0, 1]`.
    pub brightness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column<'a, P> {
    pub index: usize,
    /// `None` when the ray struck nothing within the far clip distance.
    pub hit: Option<Strip<'a, P>>,
}

/// Everything a drawing backend needs for one frame: the perspective columns
/// in screen order and the camera wedge for the minimap.
#[derive(Debug, Clone)]
pub struct Frame<'a, P> {
    pub columns: Vec<Column<'a, P>>,
    pub wedge: Wedge,
    pub player: Player,
}

impl<'a, P> Frame<'a, P> {
    pub fn hits(&self) -> impl Iterator<Item = (usize, &Strip<'a, P>)> {
        self.columns
            .iter()
            .filter_map(|c| c.hit.as_ref().map(|h| (c.index, h)))
    }
}

/// Cast one column's ray and shade whatever it struck.
fn column<'a, P>(
    scene: &'a Scene<P>,
    player: &Player,
    wedge: &Wedge,
    index: usize,
    config: &RenderConfig,
    tuning: &Tuning,
) -> Column<'a, P> {
    let aim = wedge.sample(index, config.resolution);
    let hit = trace(scene, player.position, aim, tuning).map(|hit| {
        let distance = player.depth(hit.point);
        // Nothing can be seen in front of the near plane.
        let visible = distance.max(config.near);
        Strip {
            payload: hit.payload,
            cell: hit.cell,
            point: hit.point,
            distance,
            height: 1.0 / visible,
            brightness: 1.0 / visible,
        }
    });
    Column { index, hit }
}

/// Cast `config.resolution` rays from `player` across its field of view.
///
/// Columns only read the scene, so they are cast in parallel; the result is
/// in column order.
pub fn assemble<'a, P: Sync>(
    scene: &'a Scene<P>,
    player: &Player,
    config: &RenderConfig,
) -> Frame<'a, P> {
    let wedge = player.fov(config.fov_radians(), config.near);
    let tuning = config.tuning();

    let columns = (0..config.resolution)
        .into_par_iter()
        .map(|index| column(scene, player, &wedge, index, config, &tuning))
        .collect();

    Frame {
        columns,
        wedge,
        player: *player,
    }
}
