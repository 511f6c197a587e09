//! A 2-dimensional point/vector in continuous scene coordinates.

use std::ops::{Add, Div, Mul, Neg, Sub};

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Vec2 {
        Vec2 { x, y }
    }

    pub const fn zero() -> Vec2 {
        Vec2 { x: 0.0, y: 0.0 }
    }

    /// Unit vector pointing along `angle` (radians, measured from +x towards +y).
    pub fn from_angle(angle: f64) -> Vec2 {
        Vec2::new(angle.cos(), angle.sin())
    }

    #[must_use = "This function doesn't modify the vector in place"]
    pub fn scale(self, by: f64) -> Vec2 {
        Vec2::new(self.x * by, self.y * by)
    }

    pub fn sqrlen(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(&self) -> f64 {
        self.sqrlen().sqrt()
    }

    /// Unit vector in the same direction. The zero vector maps to itself
    /// instead of producing NaNs.
    #[must_use = "This function doesn't modify the vector in place"]
    pub fn norm(self) -> Vec2 {
        let l = self.length();
        if l == 0.0 {
            return Vec2::zero();
        }
        Vec2::new(self.x / l, self.y / l)
    }

    /// Rotates by 90 degrees: `(x, y) -> (-y, x)`.
    #[must_use = "This function doesn't modify the vector in place"]
    pub fn rot90(self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    pub fn dot(&self, other: &Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn squaredist(&self, other: &Vec2) -> f64 {
        (*other - *self).sqrlen()
    }

    /// `self + (other - self) * t`. `t` is not clamped, so values outside
    /// `[0, 1]` extrapolate along the segment.
    pub fn lerp(self, other: Vec2, t: f64) -> Vec2 {
        self + (other - self).scale(t)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Component-wise product.
impl Mul for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        self.scale(rhs)
    }
}

/// Component-wise quotient.
impl Div for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x / rhs.x, self.y / rhs.y)
    }
}
