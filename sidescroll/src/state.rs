//! Session state and the level/health/timer state machine.
//!
//! Each frame the engine senses what the actor touched and asks
//! [`GameState::evaluate`] which transition to take. Priority is fixed:
//! level completion, then health depletion once health is already zero, then
//! respawn. Winning is checked right after a level completion.

use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::collider::{ColliderGroup, ColliderSet};
use crate::config::RulesConfig;
use crate::events::HitCause;
use crate::patrol::Enemy;

/// Transition taken during the most recent frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    LevelTransition,
    Respawning,
    HealthDepleted,
    /// Terminal. Control passes to the game-over presentation.
    GameWon,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        self == GamePhase::GameWon
    }
}

/// What the actor ran into this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sensed {
    pub reached_end: bool,
    pub hit: Option<HitCause>,
}

/// Check the actor against the end line, enemies, the fall threshold and hazards.
///
/// Hit causes are checked in that order; the first match wins.
pub fn sense(actor: &Actor, enemies: &[Enemy], colliders: &ColliderSet, end_x: f32, rules: &RulesConfig) -> Sensed {
    let body = &actor.body;
    let hit = if enemies.iter().any(|e| e.body.overlaps(body)) {
        Some(HitCause::Enemy)
    } else if body.center.y < rules.fall_threshold {
        Some(HitCause::Fall)
    } else if colliders.any_overlap(ColliderGroup::Hazard, body) {
        Some(HitCause::Hazard)
    } else {
        None
    };

    Sensed {
        reached_end: body.center.x >= end_x,
        hit,
    }
}

/// Level index, score, health and countdown for one play session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub level: u32,
    pub score: i32,
    /// Score change during the most recent frame.
    pub score_delta: i32,
    pub health: u8,
    /// Seconds remaining. Never negative.
    pub timer: f32,
    pub phase: GamePhase,
    timer_expired: bool,
}

impl GameState {
    /// Level-1 defaults.
    pub fn new(rules: &RulesConfig) -> Self {
        Self {
            level: 1,
            score: 0,
            score_delta: 0,
            health: rules.max_health,
            timer: rules.timer_seconds,
            phase: GamePhase::Playing,
            timer_expired: false,
        }
    }

    pub fn is_won(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn timer_expired(&self) -> bool {
        self.timer_expired
    }

    /// Start-of-frame bookkeeping: clear the per-frame delta and phase.
    pub fn begin_frame(&mut self) {
        self.score_delta = 0;
        self.phase = GamePhase::Playing;
    }

    pub fn add_score(&mut self, amount: i32) {
        self.score += amount;
        self.score_delta += amount;
    }

    /// Count the timer down by `dt` seconds.
    ///
    /// Returns true on the frame the timer first reaches zero. Nothing else reacts to expiry.
    pub fn tick_timer(&mut self, dt: f32) -> bool {
        self.timer = (self.timer - dt).max(0.0);
        if self.timer == 0.0 && !self.timer_expired {
            self.timer_expired = true;
            return true;
        }
        false
    }

    /// Pick this frame's transition. At most one of respawn or depletion applies.
    ///
    /// A hit that empties health respawns first; the continue cycle runs on the
    /// next frame even if the actor is hit again.
    pub fn evaluate(&self, sensed: &Sensed) -> GamePhase {
        if sensed.reached_end {
            GamePhase::LevelTransition
        } else if self.health == 0 {
            GamePhase::HealthDepleted
        } else if sensed.hit.is_some() {
            GamePhase::Respawning
        } else {
            GamePhase::Playing
        }
    }

    /// Move to the next level. Returns `GameWon` when no level is left.
    pub fn complete_level(&mut self, max_level: u32) -> GamePhase {
        self.level += 1;
        self.phase = if self.level > max_level {
            GamePhase::GameWon
        } else {
            GamePhase::LevelTransition
        };
        self.phase
    }

    /// Lose one point of health. Saturates at zero.
    pub fn lose_life(&mut self) {
        self.health = self.health.saturating_sub(1);
        self.phase = GamePhase::Respawning;
    }

    /// The continue cycle: pay the penalty, refill health, restart the timer.
    pub fn deplete(&mut self, rules: &RulesConfig) {
        self.add_score(-rules.depletion_penalty);
        self.health = rules.max_health;
        self.timer = rules.timer_seconds;
        self.timer_expired = false;
        self.phase = GamePhase::HealthDepleted;
    }
}
