use crate::vec2::Vec2;

/// Player position and facing, in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub position: Vec2,
    /// Facing angle in radians, measured from +x towards +y. Not wrapped.
    pub direction: f64,
}

/// Movement keys held during a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

/// Movement rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Scene units per second.
    pub speed: f64,
    /// Radians per second.
    pub turn_speed: f64,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            speed: 2.0,
            turn_speed: std::f64::consts::PI,
        }
    }
}

/// The visible wedge: the player position and the two points where the
/// field of view meets the near plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge {
    pub origin: Vec2,
    pub left: Vec2,
    pub right: Vec2,
}

impl Wedge {
    /// Aim point for sample `column` of `resol`, sweeping from `left`
    /// towards `right`.
    #[inline]
    pub fn sample(&self, column: usize, resol: usize) -> Vec2 {
        self.left.lerp(self.right, column as f64 / resol as f64)
    }
}

impl Player {
    pub fn new(position: Vec2, direction: f64) -> Self {
        Self {
            position,
            direction,
        }
    }

    /// Unit vector along the facing direction.
    #[inline]
    pub fn forward(&self) -> Vec2 {
        Vec2::from_angle(self.direction)
    }

    /// Perpendicular distance of `p` from the player's eye plane.
    #[inline]
    pub fn depth(&self, p: Vec2) -> f64 {
        (p - self.position).dot(&self.forward())
    }

    /// Field-of-view wedge for a horizontal angle of `fov` radians, with
    /// the near plane `near` units ahead.
    pub fn fov(&self, fov: f64, near: f64) -> Wedge {
        let half_width = (fov * 0.5).tan() * near;
        let centre = self.position + self.forward().scale(near);
        let offset = (centre - self.position).rot90().norm().scale(half_width);
        Wedge {
            origin: self.position,
            left: centre - offset,
            right: centre + offset,
        }
    }

    /// Integrate one tick of `dt` seconds of held input.
    pub fn update(&mut self, input: &InputState, dt: f64, motion: &Motion) {
        let mut velocity = Vec2::zero();
        if input.forward {
            velocity = velocity + self.forward().scale(motion.speed);
        }
        if input.back {
            velocity = velocity - self.forward().scale(motion.speed);
        }

        let mut angular = 0.0;
        if input.turn_left {
            angular -= motion.turn_speed;
        }
        if input.turn_right {
            angular += motion.turn_speed;
        }

        self.direction += angular * dt;
        self.position = self.position + velocity.scale(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn right_angle_fov_is_symmetric() {
        let player = Player::new(Vec2::new(2.0, 3.0), 0.0);
        let near = 0.25;
        let wedge = player.fov(FRAC_PI_2, near);
        let centre = Vec2::new(2.25, 3.0);

        assert_relative_eq!(wedge.left.x, 2.25, epsilon = 1e-12);
        assert_relative_eq!(wedge.left.y, 2.75, epsilon = 1e-12);
        assert_relative_eq!(wedge.right.x, 2.25, epsilon = 1e-12);
        assert_relative_eq!(wedge.right.y, 3.25, epsilon = 1e-12);
        assert_relative_eq!(
            centre.squaredist(&wedge.left),
            centre.squaredist(&wedge.right),
            epsilon = 1e-12
        );
        assert_eq!(wedge.origin, player.position);
    }

    #[test]
    fn wedge_samples_sweep_left_to_right() {
        let player = Player::new(Vec2::new(0.0, 0.0), 0.0);
        let wedge = player.fov(FRAC_PI_2, 1.0);
        assert_eq!(wedge.sample(0, 4), wedge.left);
        let mid = wedge.sample(2, 4);
        assert_relative_eq!(mid.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(mid.y, 0.0, epsilon = 1e-12);
        // `resol` itself is never sampled, so the right edge is approached only.
        assert!(wedge.sample(3, 4).y < wedge.right.y);
    }

    #[test]
    fn depth_ignores_sideways_offset() {
        let player = Player::new(Vec2::new(1.0, 1.0), FRAC_PI_2);
        assert_relative_eq!(player.depth(Vec2::new(1.0, 4.0)), 3.0);
        assert_relative_eq!(player.depth(Vec2::new(5.0, 4.0)), 3.0, epsilon = 1e-12);
        assert_relative_eq!(player.depth(Vec2::new(0.0, 0.0)), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn update_moves_along_facing() {
        let mut player = Player::new(Vec2::new(1.0, 1.0), 0.0);
        let motion = Motion::default();
        let input = InputState {
            forward: true,
            ..InputState::default()
        };
        player.update(&input, 0.5, &motion);
        assert_relative_eq!(player.position.x, 2.0);
        assert_relative_eq!(player.position.y, 1.0);

        let input = InputState {
            forward: true,
            back: true,
            ..InputState::default()
        };
        player.update(&input, 0.5, &motion);
        assert_relative_eq!(player.position.x, 2.0);
    }

    #[test]
    fn turning_does_not_wrap() {
        let mut player = Player::new(Vec2::zero(), 0.0);
        let input = InputState {
            turn_right: true,
            ..InputState::default()
        };
        for _ in 0..6 {
            player.update(&input, 1.0, &Motion::default());
        }
        assert_relative_eq!(player.direction, 6.0 * PI, epsilon = 1e-9);

        let input = InputState {
            turn_left: true,
            ..InputState::default()
        };
        player.update(&input, 0.5, &Motion::default());
        assert_relative_eq!(player.direction, 5.5 * PI, epsilon = 1e-9);
    }
}
