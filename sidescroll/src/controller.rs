//! Maps held keys to the actor's velocity.

use crate::actor::{Actor, ActorMode};
use crate::collider::ColliderSet;
use crate::input::InputFrame;
use crate::physics::PhysicsEngine;

/// Set the actor's velocity for this frame from `input`.
///
/// Velocity is assigned directly, never ramped. Returns true when a jump started.
pub fn apply_input(actor: &mut Actor, input: InputFrame, physics: &PhysicsEngine, colliders: &ColliderSet) -> bool {
    let config = physics.config();
    let mut jumped = false;

    // The latch only clears once the key is let go.
    if !input.up {
        actor.jump_needs_reset = false;
    }

    if physics.is_on_ladder(&actor.body, colliders) {
        actor.velocity.y = config.climb_speed * input.vertical_axis();
    } else if input.up && !actor.jump_needs_reset && physics.can_jump(&actor.body, colliders) {
        actor.velocity.y = config.jump_speed;
        actor.jump_needs_reset = true;
        actor.mode = ActorMode::Airborne;
        jumped = true;
    }

    actor.velocity.x = config.move_speed * input.horizontal_axis();
    actor.update_facing();
    jumped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Facing;
    use crate::collider::{Collider, ColliderGroup};
    use crate::config::PhysicsConfig;
    use crate::math::{Aabb, Vec2};

    fn level() -> ColliderSet {
        ColliderSet::new()
            .with(ColliderGroup::Solid, Collider::fixed(Aabb::from_edges(-500.0, -64.0, 2000.0, 0.0)))
            .with(ColliderGroup::Ladder, Collider::fixed(Aabb::from_edges(400.0, 0.0, 440.0, 300.0)))
    }

    fn grounded_actor(x: f32) -> Actor {
        let mut actor = Actor::new(Vec2::new(x, 32.0), Vec2::new(32.0, 64.0), 3, 0.5);
        actor.mode = ActorMode::Grounded;
        actor
    }

    #[test]
    fn left_and_right_set_velocity_directly() {
        let physics = PhysicsEngine::new(PhysicsConfig::default());
        let level = level();
        let mut actor = grounded_actor(0.0);

        apply_input(&mut actor, InputFrame::from_letters("L"), &physics, &level);
        assert_eq!(actor.velocity.x, -4.0);
        assert_eq!(actor.facing, Facing::Left);

        apply_input(&mut actor, InputFrame::from_letters("LR"), &physics, &level);
        assert_eq!(actor.velocity.x, 0.0);
        assert_eq!(actor.facing, Facing::Left);

        apply_input(&mut actor, InputFrame::from_letters("R"), &physics, &level);
        assert_eq!(actor.velocity.x, 4.0);
        assert_eq!(actor.facing, Facing::Right);
    }

    #[test]
    fn jump_needs_release_before_next_jump() {
        let physics = PhysicsEngine::new(PhysicsConfig::default());
        let level = level();
        let mut actor = grounded_actor(0.0);

        assert!(apply_input(&mut actor, InputFrame::from_letters("U"), &physics, &level));
        assert_eq!(actor.velocity.y, 17.0);

        // Still held and still touching the ground: no second jump.
        actor.velocity.y = 0.0;
        assert!(!apply_input(&mut actor, InputFrame::from_letters("U"), &physics, &level));

        apply_input(&mut actor, InputFrame::NONE, &physics, &level);
        assert!(!actor.jump_needs_reset);
        assert!(apply_input(&mut actor, InputFrame::from_letters("U"), &physics, &level));
    }

    #[test]
    fn no_jump_in_mid_air() {
        let physics = PhysicsEngine::new(PhysicsConfig::default());
        let level = level();
        let mut actor = grounded_actor(0.0);
        actor.body.center.y = 200.0;

        assert!(!apply_input(&mut actor, InputFrame::from_letters("U"), &physics, &level));
        assert_eq!(actor.velocity.y, 0.0);
    }

    #[test]
    fn ladder_drives_vertical_velocity() {
        let physics = PhysicsEngine::new(PhysicsConfig::default());
        let level = level();
        let mut actor = grounded_actor(420.0);
        actor.body.center.y = 100.0;

        apply_input(&mut actor, InputFrame::from_letters("UR"), &physics, &level);
        assert_eq!(actor.velocity, Vec2::new(4.0, 4.0));

        apply_input(&mut actor, InputFrame::from_letters("D"), &physics, &level);
        assert_eq!(actor.velocity, Vec2::new(0.0, -4.0));

        apply_input(&mut actor, InputFrame::from_letters("UD"), &physics, &level);
        assert_eq!(actor.velocity.y, 0.0);

        apply_input(&mut actor, InputFrame::NONE, &physics, &level);
        assert_eq!(actor.velocity.y, 0.0);
        assert!(!actor.jump_needs_reset);
    }
}
