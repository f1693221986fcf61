//! Tunable constants for the simulation.
//!
//! Every field has a default, so a JSON config only needs the values it overrides.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Motion constants. Speeds and gravity are in units per frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub move_speed: f32,
    pub climb_speed: f32,
    pub jump_speed: f32,
    /// How far below the actor's feet `can_jump` looks for ground.
    pub ground_probe: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            move_speed: 4.0,
            climb_speed: 4.0,
            jump_speed: 17.0,
            ground_probe: 1.0,
        }
    }
}

/// Screen size and dead-zone margins for the viewport scroller.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    /// Keep scroll offsets at or above the level origin.
    ///
    /// With the clamp off, offsets follow the margins into negative values: an
    /// actor spawned near the left edge pulls `view_left` to about -200 on the
    /// reset frame instead of leaving it at 0.
    pub clamp_to_origin: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            margin_left: 250.0,
            margin_right: 250.0,
            margin_top: 50.0,
            margin_bottom: 100.0,
            clamp_to_origin: true,
        }
    }
}

/// Session rules: spawn point, health, timer and scoring.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub start: Vec2,
    /// Unscaled actor box size.
    pub actor_size: Vec2,
    pub actor_scale: f32,
    pub max_health: u8,
    pub timer_seconds: f32,
    /// Actor center below this y counts as falling out of the world.
    pub fall_threshold: f32,
    pub depletion_penalty: i32,
    pub coin_value: i32,
}

impl RulesConfig {
    /// Actor collision box size after scaling.
    pub fn actor_box(&self) -> Vec2 {
        self.actor_size * self.actor_scale
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            // 1.7 tiles of 38.4 units in from the left edge.
            start: Vec2::new(128.0 * 0.3 * 1.7, 400.0),
            actor_size: Vec2::new(64.0, 128.0),
            actor_scale: 0.5,
            max_health: 3,
            timer_seconds: 301.0,
            fall_threshold: -100.0,
            depletion_penalty: 20,
            coin_value: 1,
        }
    }
}

/// Top-level configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub physics: PhysicsConfig,
    pub camera: CameraConfig,
    pub rules: RulesConfig,
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_physics(mut self, physics: PhysicsConfig) -> Self {
        self.physics = physics;
        self
    }

    #[must_use]
    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Override the actor spawn point.
    #[must_use]
    pub fn with_start(mut self, x: f32, y: f32) -> Self {
        self.rules.start = Vec2::new(x, y);
        self
    }

    /// Override the screen size used by the viewport scroller.
    #[must_use]
    pub fn with_screen_size(mut self, width: f32, height: f32) -> Self {
        self.camera.screen_width = width;
        self.camera.screen_height = height;
        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
