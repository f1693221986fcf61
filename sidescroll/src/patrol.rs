//! Enemy patrol: constant horizontal speed, reversing on walls and at boundaries.

use crate::collider::{ColliderGroup, ColliderSet, PatrolBounds};
use crate::math::{Aabb, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Enemy {
    pub body: Aabb,
    /// Signed horizontal speed per frame.
    pub velocity: Vec2,
    pub boundary_left: f32,
    pub boundary_right: f32,
}

/// Why an enemy turned around.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reversal {
    Collision,
    Boundary,
}

impl Enemy {
    pub fn new(position: Vec2, size: Vec2, speed: f32, boundary_left: f32, boundary_right: f32) -> Self {
        Self {
            body: Aabb::new(position, size),
            velocity: Vec2::new(speed, 0.0),
            boundary_left,
            boundary_right,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.x.abs()
    }

    /// Move one frame, then reverse at most once: solids take precedence over boundaries.
    pub fn patrol(&mut self, colliders: &ColliderSet) -> Option<Reversal> {
        self.body = self.body.translated(Vec2::new(self.velocity.x, 0.0));

        if colliders.any_overlap(ColliderGroup::Solid, &self.body) {
            self.velocity.x = -self.velocity.x;
            return Some(Reversal::Collision);
        }

        let bounds = PatrolBounds::horizontal(self.boundary_left, self.boundary_right);
        if bounds.reflect(&self.body, &mut self.velocity) {
            return Some(Reversal::Boundary);
        }
        None
    }
}

/// Advance every enemy by one frame in list order.
pub fn update_enemies(enemies: &mut [Enemy], colliders: &ColliderSet) {
    for enemy in enemies.iter_mut() {
        enemy.patrol(colliders);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::Collider;

    #[test]
    fn enemy_stays_within_one_frame_of_its_boundaries() {
        let empty = ColliderSet::new();
        let mut enemy = Enemy::new(Vec2::new(150.0, 32.0), Vec2::new(32.0, 32.0), 7.0, 100.0, 300.0);
        let speed = enemy.speed();

        for _ in 0..500 {
            enemy.patrol(&empty);
            assert!(enemy.body.left() >= enemy.boundary_left - speed);
            assert!(enemy.body.right() <= enemy.boundary_right + speed);
        }
    }

    #[test]
    fn boundary_reversal_happens_once() {
        let empty = ColliderSet::new();
        let mut enemy = Enemy::new(Vec2::new(280.0, 0.0), Vec2::new(32.0, 32.0), 5.0, 0.0, 300.0);

        let reversals: Vec<_> = (0..4).filter_map(|_| enemy.patrol(&empty)).collect();

        assert_eq!(reversals, vec![Reversal::Boundary]);
        assert!(enemy.velocity.x < 0.0);
    }

    #[test]
    fn wall_reverses_before_boundary() {
        let level = ColliderSet::new().with(
            ColliderGroup::Solid,
            Collider::fixed(Aabb::from_edges(200.0, 0.0, 232.0, 64.0)),
        );
        let mut enemy = Enemy::new(Vec2::new(180.0, 16.0), Vec2::new(32.0, 32.0), 4.0, 0.0, 1000.0);

        assert_eq!(enemy.patrol(&level), None);
        assert_eq!(enemy.patrol(&level), Some(Reversal::Collision));
        assert_eq!(enemy.velocity.x, -4.0);
    }
}
