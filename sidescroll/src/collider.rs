//! Axis-aligned colliders grouped by gameplay role.

use serde::{Deserialize, Serialize};

use crate::math::{Aabb, Vec2};

/// Role a collider plays in the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColliderGroup {
    /// Walls, floors and moving platforms. Blocks the actor and reverses enemies.
    Solid,
    /// Climbable volume. Suspends gravity while overlapped.
    Ladder,
    /// Touching it costs a life.
    Hazard,
    /// Picked up on overlap.
    Collectible,
}

impl ColliderGroup {
    pub const ALL: [ColliderGroup; 4] = [
        ColliderGroup::Solid,
        ColliderGroup::Ladder,
        ColliderGroup::Hazard,
        ColliderGroup::Collectible,
    ];
}

/// Optional per-edge limits for an oscillating collider or a patrolling enemy.
///
/// A limit is crossed when the matching edge of the body passes it while the
/// body is moving toward it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolBounds {
    pub left: Option<f32>,
    pub right: Option<f32>,
    pub bottom: Option<f32>,
    pub top: Option<f32>,
}

impl PatrolBounds {
    pub fn horizontal(left: f32, right: f32) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
            ..Self::default()
        }
    }

    pub fn vertical(bottom: f32, top: f32) -> Self {
        Self {
            bottom: Some(bottom),
            top: Some(top),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none() && self.bottom.is_none() && self.top.is_none()
    }

    /// Flip the velocity component of every axis whose limit `body` has crossed.
    ///
    /// Each axis flips at most once. Returns true when anything was reversed.
    pub fn reflect(&self, body: &Aabb, velocity: &mut Vec2) -> bool {
        let mut reversed = false;

        let past_left = self.left.is_some_and(|l| body.left() < l && velocity.x < 0.0);
        let past_right = self.right.is_some_and(|r| body.right() > r && velocity.x > 0.0);
        if past_left || past_right {
            velocity.x = -velocity.x;
            reversed = true;
        }

        let past_bottom = self.bottom.is_some_and(|b| body.bottom() < b && velocity.y < 0.0);
        let past_top = self.top.is_some_and(|t| body.top() > t && velocity.y > 0.0);
        if past_bottom || past_top {
            velocity.y = -velocity.y;
            reversed = true;
        }

        reversed
    }
}

/// A single collider: a box, optionally moving between patrol bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collider {
    pub body: Aabb,
    /// Displacement per frame. Zero for static tiles.
    pub velocity: Vec2,
    pub bounds: PatrolBounds,
}

impl Collider {
    /// A static tile.
    pub fn fixed(body: Aabb) -> Self {
        Self {
            body,
            velocity: Vec2::ZERO,
            bounds: PatrolBounds::default(),
        }
    }

    /// A platform that moves by `velocity` each frame and reverses at `bounds`.
    pub fn moving(body: Aabb, velocity: Vec2, bounds: PatrolBounds) -> Self {
        Self {
            body,
            velocity,
            bounds,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.velocity.is_moving()
    }

    /// Advance one frame, then apply the boundary reversal rule.
    ///
    /// Returns the displacement applied this frame.
    pub fn advance(&mut self) -> Vec2 {
        let delta = self.velocity;
        self.body = self.body.translated(delta);
        self.bounds.reflect(&self.body, &mut self.velocity);
        delta
    }
}

/// All colliders of a level, partitioned by [`ColliderGroup`].
///
/// Groups are plain vectors so iteration order is insertion order, which keeps
/// the simulation deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColliderSet {
    solids: Vec<Collider>,
    ladders: Vec<Collider>,
    hazards: Vec<Collider>,
    collectibles: Vec<Collider>,
}

impl ColliderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collider to a group.
    pub fn push(&mut self, group: ColliderGroup, collider: Collider) {
        self.group_mut(group).push(collider);
    }

    /// Builder-style variant of [`ColliderSet::push`].
    #[must_use]
    pub fn with(mut self, group: ColliderGroup, collider: Collider) -> Self {
        self.push(group, collider);
        self
    }

    pub fn group(&self, group: ColliderGroup) -> &[Collider] {
        match group {
            ColliderGroup::Solid => &self.solids,
            ColliderGroup::Ladder => &self.ladders,
            ColliderGroup::Hazard => &self.hazards,
            ColliderGroup::Collectible => &self.collectibles,
        }
    }

    pub fn group_mut(&mut self, group: ColliderGroup) -> &mut Vec<Collider> {
        match group {
            ColliderGroup::Solid => &mut self.solids,
            ColliderGroup::Ladder => &mut self.ladders,
            ColliderGroup::Hazard => &mut self.hazards,
            ColliderGroup::Collectible => &mut self.collectibles,
        }
    }

    pub fn solids(&self) -> &[Collider] {
        &self.solids
    }

    /// True when `body` overlaps any collider in `group`.
    pub fn any_overlap(&self, group: ColliderGroup, body: &Aabb) -> bool {
        self.group(group).iter().any(|c| c.body.overlaps(body))
    }

    /// Remove every collider in `group` that overlaps `body`, returning how many were removed.
    pub fn take_overlapping(&mut self, group: ColliderGroup, body: &Aabb) -> usize {
        let colliders = self.group_mut(group);
        let before = colliders.len();
        colliders.retain(|c| !c.body.overlaps(body));
        before - colliders.len()
    }

    /// Total number of colliders across all groups.
    pub fn len(&self) -> usize {
        ColliderGroup::ALL.iter().map(|g| self.group(*g).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_platform_reverses_past_right_limit() {
        let mut platform = Collider::moving(
            Aabb::from_edges(90.0, 0.0, 99.0, 10.0),
            Vec2::new(2.0, 0.0),
            PatrolBounds::horizontal(0.0, 100.0),
        );

        let delta = platform.advance();
        assert_eq!(delta, Vec2::new(2.0, 0.0));
        assert_eq!(platform.body.right(), 101.0);
        assert_eq!(platform.velocity.x, -2.0);

        // Already heading back: no second flip while still past the limit.
        platform.advance();
        assert_eq!(platform.velocity.x, -2.0);
    }

    #[test]
    fn vertical_bounds_flip_vertical_velocity_only() {
        let mut v = Vec2::new(1.0, -3.0);
        let body = Aabb::from_edges(0.0, -1.0, 10.0, 5.0);
        assert!(PatrolBounds::vertical(0.0, 50.0).reflect(&body, &mut v));
        assert_eq!(v, Vec2::new(1.0, 3.0));
    }

    #[test]
    fn take_overlapping_removes_only_hits() {
        let mut set = ColliderSet::new()
            .with(ColliderGroup::Collectible, Collider::fixed(Aabb::from_edges(0.0, 0.0, 10.0, 10.0)))
            .with(ColliderGroup::Collectible, Collider::fixed(Aabb::from_edges(50.0, 0.0, 60.0, 10.0)));

        let probe = Aabb::from_edges(2.0, 2.0, 8.0, 8.0);
        assert_eq!(set.take_overlapping(ColliderGroup::Collectible, &probe), 1);
        assert_eq!(set.take_overlapping(ColliderGroup::Collectible, &probe), 0);
        assert_eq!(set.group(ColliderGroup::Collectible).len(), 1);
    }
}
