//! The per-frame simulation driver.
//!
//! [`Engine::step`] runs one fixed step: input, physics, patrol, pickups,
//! timer, state machine, camera. The frame is computed on a copy of the
//! session and committed only if it completes, so a failed level load leaves
//! the previous state untouched.

use crate::actor::Actor;
use crate::camera::{Viewport, ViewportScroller};
use crate::collider::{ColliderGroup, ColliderSet};
use crate::config::GameConfig;
use crate::controller;
use crate::error::Result;
use crate::events::{EventBus, GameEvent};
use crate::input::InputFrame;
use crate::level::{LevelData, LevelSource};
use crate::patrol::{self, Enemy};
use crate::physics::{PhysicsEngine, StepReport};
use crate::state::{self, GamePhase, GameState};

/// Everything that changes from frame to frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub actor: Actor,
    pub enemies: Vec<Enemy>,
    pub colliders: ColliderSet,
    pub end_x: f32,
    pub state: GameState,
    pub viewport: Viewport,
}

impl Session {
    fn install_level(&mut self, level: LevelData) {
        self.colliders = level.colliders;
        self.enemies = level.enemies;
        self.end_x = level.end_x;
    }
}

/// Outcome of one [`Engine::step`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Index of the frame just simulated, starting at 0.
    pub frame: u64,
    pub phase: GamePhase,
    pub physics: StepReport,
    /// Events emitted this frame, in order. Also published on the event bus.
    pub events: Vec<GameEvent>,
}

/// Owns one play session and advances it frame by frame.
pub struct Engine<L: LevelSource> {
    config: GameConfig,
    levels: L,
    physics: PhysicsEngine,
    scroller: ViewportScroller,
    session: Session,
    events: EventBus,
    frame: u64,
}

impl<L: LevelSource> Engine<L> {
    /// Start a new game on level 1.
    pub fn new(config: GameConfig, levels: L) -> Result<Self> {
        let session = Self::fresh_session(&config, &levels)?;
        Ok(Self {
            physics: PhysicsEngine::new(config.physics),
            scroller: ViewportScroller::new(config.camera),
            config,
            levels,
            session,
            events: EventBus::new(),
            frame: 0,
        })
    }

    fn fresh_session(config: &GameConfig, levels: &L) -> Result<Session> {
        let rules = &config.rules;
        let state = GameState::new(rules);
        let level = levels.load(state.level)?;
        log::info!(
            "starting level {} of {} ({} colliders, {} enemies)",
            state.level,
            levels.max_level(),
            level.colliders.len(),
            level.enemies.len()
        );

        Ok(Session {
            actor: Actor::new(rules.start, rules.actor_box(), rules.max_health, rules.actor_scale),
            enemies: level.enemies,
            colliders: level.colliders,
            end_x: level.end_x,
            state,
            viewport: Viewport::ORIGIN,
        })
    }

    /// Discard the current session and start again from level 1.
    pub fn new_game(&mut self) -> Result<()> {
        self.session = Self::fresh_session(&self.config, &self.levels)?;
        self.frame = 0;
        Ok(())
    }

    /// Advance the simulation by one frame. `dt` only feeds the countdown timer.
    ///
    /// After the game is won this is a no-op that keeps reporting `GameWon`.
    pub fn step(&mut self, input: InputFrame, dt: f32) -> Result<FrameReport> {
        if self.session.state.is_won() {
            return Ok(FrameReport {
                frame: self.frame,
                phase: GamePhase::GameWon,
                ..FrameReport::default()
            });
        }

        let rules = &self.config.rules;
        let mut next = self.session.clone();
        let mut events = Vec::new();
        next.state.begin_frame();

        if controller::apply_input(&mut next.actor, input, &self.physics, &next.colliders) {
            events.push(GameEvent::Jump);
        }

        self.physics.advance_platforms(&mut next.colliders, &mut next.actor);
        let physics = self.physics.step(&mut next.actor, &next.colliders);
        if physics.landed {
            events.push(GameEvent::Landed);
        }

        patrol::update_enemies(&mut next.enemies, &next.colliders);

        let coins = next.colliders.take_overlapping(ColliderGroup::Collectible, &next.actor.body);
        for _ in 0..coins {
            next.state.add_score(rules.coin_value);
            events.push(GameEvent::CoinCollected { score: next.state.score });
        }

        if next.state.tick_timer(dt) {
            log::info!("countdown expired on level {}", next.state.level);
            events.push(GameEvent::TimeExpired);
        }

        let sensed = state::sense(&next.actor, &next.enemies, &next.colliders, next.end_x, rules);
        match next.state.evaluate(&sensed) {
            GamePhase::LevelTransition => {
                if next.state.complete_level(self.levels.max_level()) == GamePhase::GameWon {
                    log::info!("all levels complete, final score {}", next.state.score);
                    events.push(GameEvent::GameOver { score: next.state.score });
                } else {
                    let level = self.levels.load(next.state.level)?;
                    log::info!(
                        "advancing to level {} ({} colliders, {} enemies)",
                        next.state.level,
                        level.colliders.len(),
                        level.enemies.len()
                    );
                    next.install_level(level);
                    next.actor.respawn_at(rules.start);
                    next.viewport = Viewport::ORIGIN;
                    events.push(GameEvent::LevelUp { level: next.state.level });
                }
            }
            GamePhase::Respawning => {
                next.state.lose_life();
                next.actor.respawn_at(rules.start);
                next.viewport = Viewport::ORIGIN;
                if let Some(cause) = sensed.hit {
                    log::debug!("actor hit ({cause:?}), health now {}", next.state.health);
                    events.push(GameEvent::Hit {
                        cause,
                        health: next.state.health,
                    });
                }
            }
            GamePhase::HealthDepleted => {
                next.state.deplete(rules);
                next.viewport = Viewport::ORIGIN;
                log::info!("health depleted, score now {}", next.state.score);
                events.push(GameEvent::HealthDepleted { score: next.state.score });
            }
            GamePhase::Playing | GamePhase::GameWon => {}
        }

        if !next.state.is_won() {
            next.viewport = self.scroller.scroll(next.viewport, &next.actor.body);
        }

        let report = FrameReport {
            frame: self.frame,
            phase: next.state.phase,
            physics,
            events,
        };
        self.session = next;
        self.frame += 1;
        self.events.publish_all(report.events.iter().copied());
        Ok(report)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> &GameState {
        &self.session.state
    }

    pub fn actor(&self) -> &Actor {
        &self.session.actor
    }

    pub fn viewport(&self) -> Viewport {
        self.session.viewport
    }

    pub fn colliders(&self) -> &ColliderSet {
        &self.session.colliders
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.session.enemies
    }

    /// Number of frames simulated since the game started.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Whether the actor may jump right now.
    pub fn can_jump(&self) -> bool {
        self.physics.can_jump(&self.session.actor.body, &self.session.colliders)
    }

    /// Whether the actor overlaps a ladder right now.
    pub fn is_on_ladder(&self) -> bool {
        self.physics.is_on_ladder(&self.session.actor.body, &self.session.colliders)
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Mutable access for registering callbacks.
    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Drain events published since the last drain.
    pub fn drain_events(&self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Test and tooling hook: place the actor directly.
    pub fn actor_mut(&mut self) -> &mut Actor {
        &mut self.session.actor
    }

    /// Test and tooling hook: edit session state directly.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.session.state
    }
}
