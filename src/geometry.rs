//! Planar vector math shared by the codec and the slider path engine.
//!
//! Playfield coordinates are IEEE doubles, x growing right and y growing
//! down, matching the coordinate space the beatmap format stores.

use std::ops::{Add, Mul, Neg, Sub};

/// A 2D vector in playfield coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Vec2 {
    /// Zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a vector from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product.
    #[must_use]
    pub fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y
    }

    /// Z component of the 3D cross product.
    #[must_use]
    pub fn cross(self, rhs: Self) -> f64 {
        self.x * rhs.y - self.y * rhs.x
    }

    /// Squared Euclidean length.
    #[must_use]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Distance to another point.
    #[must_use]
    pub fn distance(self, rhs: Self) -> f64 {
        (self - rhs).length()
    }

    /// Unit vector in the same direction, or `None` for a (near-)zero vector.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        (len > f64::EPSILON).then(|| self * (1.0 / len))
    }

    /// Linear interpolation towards `rhs` by factor `t`.
    #[must_use]
    pub fn lerp(self, rhs: Self, t: f64) -> Self {
        self + (rhs - self) * t
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Center of the circle through three points, or `None` when they are
/// collinear (no unique circumcircle exists).
#[must_use]
pub fn circumcircle_center(a: Vec2, b: Vec2, c: Vec2) -> Option<Vec2> {
    let mid_ab = (a + b) * 0.5;
    let mid_bc = (b + c) * 0.5;

    // Perpendicular bisector of each chord, as a line `ax + by = c`.
    let dir_ab = b - a;
    let dir_bc = c - b;
    let (a1, b1) = (dir_ab.x, dir_ab.y);
    let c1 = a1 * mid_ab.x + b1 * mid_ab.y;
    let (a2, b2) = (dir_bc.x, dir_bc.y);
    let c2 = a2 * mid_bc.x + b2 * mid_bc.y;

    let det = a1 * b2 - a2 * b1;
    if det.abs() < 1e-10 {
        return None;
    }
    Some(Vec2::new(
        (b2 * c1 - b1 * c2) / det,
        (a1 * c2 - a2 * c1) / det,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circumcircle_of_right_triangle() {
        let center = circumcircle_center(
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(0.0, 2.0),
        )
        .expect("not collinear");
        assert!((center.x - 1.0).abs() < 1e-9);
        assert!((center.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn circumcircle_rejects_collinear_points() {
        assert_eq!(
            circumcircle_center(
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(2.0, 2.0),
            ),
            None
        );
    }

    #[test]
    fn normalized_zero_is_none() {
        assert_eq!(Vec2::ZERO.normalized(), None);
        let unit = Vec2::new(3.0, 4.0).normalized().expect("nonzero");
        assert!((unit.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn lerp_midpoint() {
        let mid = Vec2::new(0.0, 0.0).lerp(Vec2::new(10.0, -4.0), 0.5);
        assert_eq!(mid, Vec2::new(5.0, -2.0));
    }
}
