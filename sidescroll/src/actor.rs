//! The player-controlled actor.

use serde::{Deserialize, Serialize};

use crate::math::{Aabb, Vec2};

/// Direction the actor faces. Presentation only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Movement mode. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorMode {
    Grounded,
    #[default]
    Airborne,
    /// Only entered while overlapping a ladder.
    Climbing,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Actor {
    pub body: Aabb,
    pub velocity: Vec2,
    pub facing: Facing,
    pub mode: ActorMode,
    pub health: u8,
    pub scale: f32,
    /// Set by a jump, cleared when the jump key is released.
    pub jump_needs_reset: bool,
}

impl Actor {
    /// Create an actor standing still at `position` (box center).
    pub fn new(position: Vec2, size: Vec2, health: u8, scale: f32) -> Self {
        Self {
            body: Aabb::new(position, size),
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            mode: ActorMode::Airborne,
            health,
            scale,
            jump_needs_reset: false,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.center
    }

    /// Put the actor back at `position` with no momentum.
    ///
    /// Health, scale and the jump latch survive a respawn.
    pub fn respawn_at(&mut self, position: Vec2) {
        self.body.center = position;
        self.velocity = Vec2::ZERO;
        self.facing = Facing::Right;
        self.mode = ActorMode::Airborne;
    }

    /// Update facing from the current horizontal velocity. Zero keeps the previous facing.
    pub fn update_facing(&mut self) {
        if self.velocity.x < 0.0 {
            self.facing = Facing::Left;
        } else if self.velocity.x > 0.0 {
            self.facing = Facing::Right;
        }
    }
}
