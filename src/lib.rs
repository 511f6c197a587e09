//! First-person view of a 2D occupancy grid, rendered by walking rays from
//! the camera across grid lines.

pub mod camera;
pub mod caster;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod raystep;
pub mod renderer;
pub mod scaler;
pub mod scene;
pub mod vec2;

pub use camera::{InputState, Motion, Player, Wedge};
pub use caster::{RayHit, Tuning, cast_ray, trace};
pub use color::Color;
pub use config::{Config, RenderConfig};
pub use error::{Error, Result};
pub use frame::{Column, Frame, Strip, assemble};
pub use scene::{Cell, CellPos, Scene};
pub use vec2::Vec2;
