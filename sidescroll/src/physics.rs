//! Axis-aligned platformer physics.
//!
//! Per frame the engine applies gravity (unless the actor is on a ladder),
//! integrates x then y, and clamps the actor out of every solid it entered.
//! Queries such as [`PhysicsEngine::can_jump`] are pure functions of the
//! current boxes and are re-derived every frame.

use crate::actor::{Actor, ActorMode};
use crate::collider::{Collider, ColliderGroup, ColliderSet};
use crate::config::PhysicsConfig;
use crate::math::{Aabb, Vec2};

/// What happened to the actor during one [`PhysicsEngine::step`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Became grounded this frame after being airborne or climbing.
    pub landed: bool,
    /// Hit a ceiling while moving up.
    pub bonked: bool,
    /// Horizontal motion was stopped by a wall.
    pub blocked: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

#[derive(Clone, Copy, Debug)]
pub struct PhysicsEngine {
    config: PhysicsConfig,
}

impl PhysicsEngine {
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// True iff `body` rests on a solid collider directly below it.
    pub fn can_jump(&self, body: &Aabb, colliders: &ColliderSet) -> bool {
        let probe = self.ground_probe(body);
        colliders.any_overlap(ColliderGroup::Solid, &probe)
    }

    /// True iff `body` overlaps a ladder collider.
    pub fn is_on_ladder(&self, body: &Aabb, colliders: &ColliderSet) -> bool {
        colliders.any_overlap(ColliderGroup::Ladder, body)
    }

    /// Advance every moving solid by one frame and carry the actor along with
    /// the platform it was standing on.
    pub fn advance_platforms(&self, colliders: &mut ColliderSet, actor: &mut Actor) {
        let probe = self.ground_probe(&actor.body);
        let mut carried = false;

        for platform in colliders.group_mut(ColliderGroup::Solid).iter_mut() {
            if !platform.is_moving() {
                continue;
            }
            let riding = !carried && platform.body.overlaps(&probe);
            let delta = platform.advance();
            if riding {
                actor.body = actor.body.translated(delta);
                carried = true;
            }
        }
    }

    /// Apply gravity, integrate the actor's velocity and resolve collisions.
    ///
    /// The actor's mode is re-derived afterwards from the resolved position.
    pub fn step(&self, actor: &mut Actor, colliders: &ColliderSet) -> StepReport {
        let was_grounded = actor.mode == ActorMode::Grounded;

        if self.is_on_ladder(&actor.body, colliders) {
            actor.mode = ActorMode::Climbing;
        } else {
            actor.velocity.y -= self.config.gravity;
        }

        let solids = colliders.solids();
        let mut report = StepReport::default();

        if move_axis(&mut actor.body, &mut actor.velocity, solids, Axis::X) {
            report.blocked = true;
        }
        let moving_up = actor.velocity.y > 0.0;
        if move_axis(&mut actor.body, &mut actor.velocity, solids, Axis::Y) && moving_up {
            report.bonked = true;
        }
        resolve_collisions(&mut actor.body, &mut actor.velocity, solids);

        actor.mode = self.derive_mode(&actor.body, colliders);
        report.landed = !was_grounded && actor.mode == ActorMode::Grounded;
        report
    }

    /// Mode implied by the current position: ladder first, then ground.
    pub fn derive_mode(&self, body: &Aabb, colliders: &ColliderSet) -> ActorMode {
        if self.is_on_ladder(body, colliders) {
            ActorMode::Climbing
        } else if self.can_jump(body, colliders) {
            ActorMode::Grounded
        } else {
            ActorMode::Airborne
        }
    }

    fn ground_probe(&self, body: &Aabb) -> Aabb {
        body.translated(Vec2::new(0.0, -self.config.ground_probe))
    }
}

/// Move `body` along one axis and clamp it against the faces it entered.
///
/// Only solids the body was clear of before the move are clamped here. Overlaps
/// that already existed (a platform pushed into the body) are left to
/// [`resolve_collisions`].
///
/// Returns true when a solid stopped the motion; the velocity component is zeroed.
fn move_axis(body: &mut Aabb, velocity: &mut Vec2, solids: &[Collider], axis: Axis) -> bool {
    let step = match axis {
        Axis::X => velocity.x,
        Axis::Y => velocity.y,
    };
    if step == 0.0 {
        return false;
    }

    let before = *body;
    match axis {
        Axis::X => body.center.x += step,
        Axis::Y => body.center.y += step,
    }

    let mut hit = false;
    for solid in solids {
        if !body.overlaps(&solid.body) || before.overlaps(&solid.body) {
            continue;
        }
        hit = true;
        match (axis, step > 0.0) {
            (Axis::X, true) => body.center.x = solid.body.left() - body.half.x,
            (Axis::X, false) => body.center.x = solid.body.right() + body.half.x,
            (Axis::Y, true) => body.center.y = solid.body.bottom() - body.half.y,
            (Axis::Y, false) => body.center.y = solid.body.top() + body.half.y,
        }
    }

    if hit {
        match axis {
            Axis::X => velocity.x = 0.0,
            Axis::Y => velocity.y = 0.0,
        }
    }
    hit
}

/// Push `body` out of any solid it still overlaps, along the axis of least penetration.
///
/// Handles overlaps that did not come from the body's own motion, such as a
/// platform sliding into it. Resolving an already resolved body is a no-op.
/// Returns true when anything moved.
pub fn resolve_collisions(body: &mut Aabb, velocity: &mut Vec2, solids: &[Collider]) -> bool {
    let mut moved = false;
    for solid in solids {
        if !body.overlaps(&solid.body) {
            continue;
        }
        moved = true;
        let depth = body.penetration(&solid.body);
        if depth.x < depth.y {
            if body.center.x < solid.body.center.x {
                body.center.x = solid.body.left() - body.half.x;
            } else {
                body.center.x = solid.body.right() + body.half.x;
            }
            velocity.x = 0.0;
        } else {
            if body.center.y < solid.body.center.y {
                body.center.y = solid.body.bottom() - body.half.y;
            } else {
                body.center.y = solid.body.top() + body.half.y;
            }
            velocity.y = 0.0;
        }
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::PatrolBounds;

    fn floor_level() -> ColliderSet {
        ColliderSet::new().with(
            ColliderGroup::Solid,
            Collider::fixed(Aabb::from_edges(-1000.0, -64.0, 1000.0, 0.0)),
        )
    }

    fn actor_at(x: f32, y: f32) -> Actor {
        Actor::new(Vec2::new(x, y), Vec2::new(32.0, 64.0), 3, 0.5)
    }

    #[test]
    fn gravity_lowers_vertical_velocity_each_frame() {
        let engine = PhysicsEngine::new(PhysicsConfig::default());
        let empty = ColliderSet::new();
        let mut actor = actor_at(0.0, 500.0);

        let mut last = actor.velocity.y;
        for _ in 0..20 {
            engine.step(&mut actor, &empty);
            assert_eq!(actor.velocity.y, last - engine.config().gravity);
            last = actor.velocity.y;
        }
        assert_eq!(actor.mode, ActorMode::Airborne);
    }

    #[test]
    fn falling_actor_lands_on_floor() {
        let engine = PhysicsEngine::new(PhysicsConfig::default());
        let level = floor_level();
        let mut actor = actor_at(0.0, 100.0);

        let mut landed = 0;
        for _ in 0..60 {
            if engine.step(&mut actor, &level).landed {
                landed += 1;
            }
        }

        assert_eq!(landed, 1);
        assert_eq!(actor.body.bottom(), 0.0);
        assert_eq!(actor.velocity.y, 0.0);
        assert_eq!(actor.mode, ActorMode::Grounded);
        assert!(engine.can_jump(&actor.body, &level));
    }

    #[test]
    fn wall_stops_horizontal_motion() {
        let engine = PhysicsEngine::new(PhysicsConfig::default());
        let level = floor_level().with(
            ColliderGroup::Solid,
            Collider::fixed(Aabb::from_edges(40.0, 0.0, 80.0, 200.0)),
        );
        let mut actor = actor_at(20.0, 32.0);
        actor.velocity.x = 5.0;

        let report = engine.step(&mut actor, &level);

        assert!(report.blocked);
        assert_eq!(actor.body.right(), 40.0);
        assert_eq!(actor.velocity.x, 0.0);
    }

    #[test]
    fn ceiling_reports_bonk() {
        let engine = PhysicsEngine::new(PhysicsConfig::default());
        let level = floor_level().with(
            ColliderGroup::Solid,
            Collider::fixed(Aabb::from_edges(-100.0, 70.0, 100.0, 90.0)),
        );
        let mut actor = actor_at(0.0, 32.0);
        actor.velocity.y = 20.0;

        let report = engine.step(&mut actor, &level);

        assert!(report.bonked);
        assert_eq!(actor.body.top(), 70.0);
        assert_eq!(actor.velocity.y, 0.0);
    }

    #[test]
    fn resolving_twice_matches_resolving_once() {
        let level = floor_level();
        let mut body = Aabb::new(Vec2::new(3.0, 20.0), Vec2::new(32.0, 64.0));
        let mut velocity = Vec2::ZERO;

        assert!(resolve_collisions(&mut body, &mut velocity, level.solids()));
        let once = body;
        assert!(!resolve_collisions(&mut body, &mut velocity, level.solids()));
        assert_eq!(body, once);
        assert_eq!(body.bottom(), 0.0);
    }

    #[test]
    fn ladder_suspends_gravity() {
        let engine = PhysicsEngine::new(PhysicsConfig::default());
        let level = ColliderSet::new().with(
            ColliderGroup::Ladder,
            Collider::fixed(Aabb::from_edges(-20.0, 0.0, 20.0, 400.0)),
        );
        let mut actor = actor_at(0.0, 200.0);

        engine.step(&mut actor, &level);

        assert_eq!(actor.velocity.y, 0.0);
        assert_eq!(actor.position().y, 200.0);
        assert_eq!(actor.mode, ActorMode::Climbing);
        assert!(engine.is_on_ladder(&actor.body, &level));
    }

    #[test]
    fn actor_rides_moving_platform() {
        let engine = PhysicsEngine::new(PhysicsConfig::default());
        let mut level = ColliderSet::new().with(
            ColliderGroup::Solid,
            Collider::moving(
                Aabb::from_edges(0.0, 0.0, 100.0, 16.0),
                Vec2::new(3.0, 0.0),
                PatrolBounds::horizontal(0.0, 400.0),
            ),
        );
        let mut actor = actor_at(50.0, 48.0);

        for _ in 0..10 {
            engine.advance_platforms(&mut level, &mut actor);
            engine.step(&mut actor, &level);
        }

        assert_eq!(actor.position().x, 80.0);
        assert_eq!(actor.body.bottom(), 16.0);
        assert_eq!(actor.mode, ActorMode::Grounded);
    }

    #[test]
    fn platform_sliding_into_standing_actor_pushes_it_sideways() {
        let engine = PhysicsEngine::new(PhysicsConfig::default());
        let mut level = floor_level().with(
            ColliderGroup::Solid,
            Collider::moving(
                Aabb::from_edges(120.0, 0.0, 220.0, 40.0),
                Vec2::new(-6.0, 0.0),
                PatrolBounds::horizontal(-500.0, 500.0),
            ),
        );
        let mut actor = actor_at(100.0, 32.0);
        actor.mode = ActorMode::Grounded;

        engine.advance_platforms(&mut level, &mut actor);
        let report = engine.step(&mut actor, &level);

        let platform = level.solids()[1];
        assert_eq!(platform.body.left(), 114.0);
        assert_eq!(actor.body.right(), 114.0);
        assert_eq!(actor.body.bottom(), 0.0);
        assert_eq!(actor.mode, ActorMode::Grounded);
        assert!(!report.landed);
    }
}
