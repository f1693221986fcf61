//! Vector and box primitives. Coordinates are y up.

use serde::{Deserialize, Serialize};

/// Penetration depth below which two touching boxes are not considered overlapping.
pub const CONTACT_EPSILON: f32 = 1e-3;

/// 2D vector type used throughout the simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// True when either component is non-zero.
    pub fn is_moving(&self) -> bool {
        self.x != 0.0 || self.y != 0.0
    }

    /// Returns a vector with component-wise absolute values.
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned box described by its center and half extents.
///
/// The y axis points up: `bottom()` is the smaller coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    /// Create a box from its center and full size.
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    /// Create a box from its four edges.
    pub fn from_edges(left: f32, bottom: f32, right: f32, top: f32) -> Self {
        Self {
            center: Vec2::new((left + right) * 0.5, (bottom + top) * 0.5),
            half: Vec2::new((right - left) * 0.5, (top - bottom) * 0.5),
        }
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.half.x
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.half.x
    }

    pub fn bottom(&self) -> f32 {
        self.center.y - self.half.y
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.half.y
    }

    pub fn size(&self) -> Vec2 {
        self.half * 2.0
    }

    /// Copy of this box moved by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            center: self.center + delta,
            half: self.half,
        }
    }

    /// Strict overlap test. Boxes that merely touch (within [`CONTACT_EPSILON`]) do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let p = self.penetration(other);
        p.x > CONTACT_EPSILON && p.y > CONTACT_EPSILON
    }

    /// Overlap depth along each axis. Negative components mean a gap on that axis.
    pub fn penetration(&self, other: &Aabb) -> Vec2 {
        let diff = (self.center - other.center).abs();
        let combined = self.half + other.half;
        combined - diff
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.bottom() && p.y <= self.top()
    }

    /// A box is usable for collision when its extents are finite and positive.
    pub fn is_valid(&self) -> bool {
        self.center.is_finite() && self.half.is_finite() && self.half.x > 0.0 && self.half.y > 0.0
    }
}
