use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::camera::{Motion, Player};
use crate::caster::Tuning;
use crate::color::Color;
use crate::error::{Error, Result};
use crate::raystep::DEFAULT_EPSILON;
use crate::scene::Scene;
use crate::vec2::Vec2;

/// Scene shown when the config does not provide one.
pub const DEFAULT_LAYOUT: &str = "
..........
..........
...cp.....
....y.....
..rgb.....
..........
..........
..........
..........
";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub render: RenderConfig,
    pub player: PlayerConfig,
    pub window: WindowConfig,
    pub scene: Option<SceneConfig>,
}

/// Constants of the perspective pass.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Horizontal field of view.
    pub fov_degrees: f64,
    /// Distance from the player to the view plane.
    pub near: f64,
    /// Furthest distance a ray travels.
    pub far: f64,
    /// Sample columns per frame.
    pub resolution: usize,
    /// Grid-line snapping tolerance.
    pub epsilon: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    /// Start position; defaults to 63% of the scene size on each axis.
    pub x: Option<f64>,
    pub y: Option<f64>,
    /// Start facing, radians.
    pub direction: f64,
    pub speed: f64,
    pub turn_speed: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Height of the internal framebuffer; its width follows the window aspect.
    pub internal_height: usize,
    /// Minimap cell size as a fraction of the framebuffer width.
    pub minimap_cell: f64,
}

/// Text layout of the scene. `.` is empty; other glyphs map to colours
/// through `legend`, falling back to the built-in palette.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    pub layout: Vec<String>,
    pub legend: BTreeMap<String, [f32; 3]>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 90.0,
            near: 0.25,
            far: 10.0,
            resolution: 400,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        let motion = Motion::default();
        Self {
            x: None,
            y: None,
            direction: std::f64::consts::PI * 1.25,
            speed: motion.speed,
            turn_speed: motion.turn_speed,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "gridcaster".to_string(),
            width: 1600,
            height: 900,
            internal_height: 450,
            minimap_cell: 0.02,
        }
    }
}

impl RenderConfig {
    pub fn fov_radians(&self) -> f64 {
        self.fov_degrees.to_radians()
    }

    pub fn tuning(&self) -> Tuning {
        Tuning {
            epsilon: self.epsilon,
            far: self.far,
        }
    }

    fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("fov_degrees", self.fov_degrees),
            ("near", self.near),
            ("far", self.far),
            ("epsilon", self.epsilon),
        ] {
            if !value.is_finite() {
                return invalid(format!("render.{key} must be finite, got {value}"));
            }
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return invalid(format!(
                "render.fov_degrees must be in (0, 180), got {}",
                self.fov_degrees
            ));
        }
        if !(self.near > 0.0) {
            return invalid(format!("render.near must be positive, got {}", self.near));
        }
        if !(self.far > self.near) {
            return invalid(format!(
                "render.far ({}) must be greater than render.near ({})",
                self.far, self.near
            ));
        }
        if !(self.epsilon > 0.0 && self.epsilon < 0.5) {
            return invalid(format!(
                "render.epsilon must be in (0, 0.5), got {}",
                self.epsilon
            ));
        }
        if self.resolution == 0 {
            return invalid("render.resolution must be at least 1".to_string());
        }
        Ok(())
    }
}

impl PlayerConfig {
    pub fn motion(&self) -> Motion {
        Motion {
            speed: self.speed,
            turn_speed: self.turn_speed,
        }
    }

    /// Starting player state inside a scene of `(width, height)` cells.
    pub fn spawn(&self, (width, height): (usize, usize)) -> Player {
        let x = self.x.unwrap_or(width as f64 * 0.63);
        let y = self.y.unwrap_or(height as f64 * 0.63);
        Player::new(Vec2::new(x, y), self.direction)
    }
}

impl SceneConfig {
    pub fn build(&self) -> Result<Scene<Color>> {
        let mut legend = BTreeMap::new();
        for (key, rgb) in &self.legend {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(glyph), None) if glyph != crate::scene::EMPTY_GLYPH => {
                    legend.insert(glyph, Color::from(*rgb));
                }
                _ => {
                    return invalid(format!(
                        "scene.legend keys must be single non-'.' characters, got {key:?}"
                    ));
                }
            }
        }

        Scene::parse(&self.layout.join("\n"), |glyph| {
            legend.get(&glyph).copied().or_else(|| Color::from_glyph(glyph))
        })
    }
}

fn invalid<T>(msg: String) -> Result<T> {
    Err(Error::InvalidConfig(msg))
}

impl Config {
    /// Load configuration from a TOML file, or use defaults if the file
    /// doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No {} found, using default configuration", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config = Self::parse(&contents)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.render.validate()?;
        if self.window.internal_height == 0 {
            return invalid("window.internal_height must be at least 1".to_string());
        }
        Ok(())
    }

    /// The configured scene, or the built-in one.
    pub fn scene(&self) -> Result<Scene<Color>> {
        match &self.scene {
            Some(scene) => scene.build(),
            None => Scene::parse(DEFAULT_LAYOUT, Color::from_glyph),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::CellPos;
    use approx::assert_relative_eq;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.render, RenderConfig::default());
        assert_eq!(config.render.resolution, 400);
        assert_eq!(config.render.epsilon, 1e-6);
        assert_eq!(config.window.width, 1600);
        assert!(config.scene.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::parse(
            r#"
            [render]
            epsilon = 1e-3
            near = 0.5

            [player]
            x = 2.5
            "#,
        )
        .unwrap();
        assert_eq!(config.render.epsilon, 1e-3);
        assert_eq!(config.render.near, 0.5);
        assert_eq!(config.render.far, 10.0);
        let player = config.player.spawn((10, 10));
        assert_eq!(player.position.x, 2.5);
        assert_relative_eq!(player.position.y, 6.3, epsilon = 1e-12);
    }

    #[test]
    fn rejects_bad_values() {
        for toml in [
            "[render]\nnear = 0.0",
            "[render]\nnear = 4.0\nfar = 2.0",
            "[render]\nfov_degrees = 180.0",
            "[render]\nresolution = 0",
            "[render]\nepsilon = -1.0",
            "[render]\nfar = inf",
            "[render]\nfar = nan",
            "[render]\nnear = nan",
            "[render]\nepsilon = nan",
            "[render]\nfov_degrees = nan",
        ] {
            assert!(
                matches!(Config::parse(toml), Err(Error::InvalidConfig(_))),
                "{toml}"
            );
        }
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(matches!(
            Config::parse("[render]\nfog = true"),
            Err(Error::ConfigParse(_))
        ));
    }

    #[test]
    fn default_scene_is_built_in_layout() {
        let scene = Config::default().scene().unwrap();
        assert_eq!(scene.size(), (10, 9));
        assert_eq!(scene.payload(CellPos::new(3, 2)), Some(&Color::cyan()));
        assert_eq!(scene.payload(CellPos::new(4, 4)), Some(&Color::blue()));
        assert_eq!(scene.occupied().count(), 6);
    }

    #[test]
    fn scene_legend_overrides_palette() {
        let config = Config::parse(
            r#"
            [scene]
            layout = ["r.", ".w"]
            legend = { w = [0.5, 0.5, 0.5] }
            "#,
        )
        .unwrap();
        let scene = config.scene().unwrap();
        assert_eq!(scene.payload(CellPos::new(0, 0)), Some(&Color::red()));
        assert_eq!(
            scene.payload(CellPos::new(1, 1)),
            Some(&Color::new(0.5, 0.5, 0.5))
        );
    }

    #[test]
    fn scene_legend_keys_are_single_glyphs() {
        let config = Config::parse(
            r#"
            [scene]
            layout = ["ww"]
            legend = { ww = [1.0, 1.0, 1.0] }
            "#,
        )
        .unwrap();
        assert!(matches!(config.scene(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load(Path::new("/nonexistent/gridcaster.toml")).unwrap();
        assert_eq!(config.render, RenderConfig::default());
    }
}
