//! Level data, the level-source seam, and the JSON level pack format.
//!
//! Level indices are 1-based. A JSON pack looks like:
//!
//! ```json
//! {
//!   "levels": [
//!     {
//!       "end_x": 2500,
//!       "solids": [{ "x": 0, "y": 0, "w": 3000, "h": 64 }],
//!       "ladders": [],
//!       "hazards": [],
//!       "collectibles": [{ "x": 300, "y": 96, "w": 32, "h": 32 }],
//!       "enemies": [{ "x": 600, "y": 64, "w": 32, "h": 32, "speed": 2,
//!                     "boundary_left": 500, "boundary_right": 800 }]
//!     }
//!   ]
//! }
//! ```
//!
//! Rectangles are given by their bottom-left corner and size, y up.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::collider::{Collider, ColliderGroup, ColliderSet, PatrolBounds};
use crate::error::{LevelError, Result};
use crate::math::{Aabb, Vec2};
use crate::patrol::Enemy;

/// Everything the engine needs to start a level.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelData {
    pub colliders: ColliderSet,
    /// Reaching this x coordinate completes the level.
    pub end_x: f32,
    pub enemies: Vec<Enemy>,
}

impl LevelData {
    pub fn new(colliders: ColliderSet, end_x: f32) -> Self {
        Self {
            colliders,
            end_x,
            enemies: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_enemy(mut self, enemy: Enemy) -> Self {
        self.enemies.push(enemy);
        self
    }

    /// Check the preconditions the engine relies on.
    pub fn validate(&self, index: u32) -> Result<()> {
        if !self.end_x.is_finite() {
            return Err(LevelError::invalid(index, "end_x is not finite"));
        }
        if self.colliders.solids().is_empty() {
            return Err(LevelError::invalid(index, "no solid colliders"));
        }
        for group in ColliderGroup::ALL {
            for (i, collider) in self.colliders.group(group).iter().enumerate() {
                if !collider.body.is_valid() || !collider.velocity.is_finite() {
                    return Err(LevelError::invalid(
                        index,
                        format!("{group:?} collider {i} has a degenerate box or velocity"),
                    ));
                }
            }
        }
        for (i, enemy) in self.enemies.iter().enumerate() {
            if !enemy.body.is_valid() || !enemy.velocity.is_finite() {
                return Err(LevelError::invalid(index, format!("enemy {i} has a degenerate box or speed")));
            }
            if enemy.boundary_left > enemy.boundary_right {
                return Err(LevelError::invalid(
                    index,
                    format!(
                        "enemy {i} boundary_left {} exceeds boundary_right {}",
                        enemy.boundary_left, enemy.boundary_right
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Supplies level data by index. Called once per level start.
pub trait LevelSource {
    /// Load level `index` (1-based).
    fn load(&self, index: u32) -> Result<LevelData>;

    /// Highest defined level index.
    fn max_level(&self) -> u32;
}

/// In-memory collection of validated levels.
#[derive(Clone, Debug, Default)]
pub struct LevelCatalog {
    levels: Vec<LevelData>,
}

impl LevelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a level after validating it. Its index is the new length.
    pub fn push(&mut self, level: LevelData) -> Result<u32> {
        let index = self.levels.len() as u32 + 1;
        if let Err(err) = level.validate(index) {
            log::warn!("rejected level data: {err}");
            return Err(err);
        }
        self.levels.push(level);
        Ok(index)
    }

    /// Builder-style variant of [`LevelCatalog::push`].
    pub fn with_level(mut self, level: LevelData) -> Result<Self> {
        self.push(level)?;
        Ok(self)
    }

    pub fn from_pack(pack: LevelPack) -> Result<Self> {
        let mut catalog = Self::new();
        for def in pack.levels {
            catalog.push(def.into_level())?;
        }
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let pack: LevelPack = serde_json::from_str(json)?;
        Self::from_pack(pack)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        log::debug!("loaded {} levels from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl LevelSource for LevelCatalog {
    fn load(&self, index: u32) -> Result<LevelData> {
        index
            .checked_sub(1)
            .and_then(|i| self.levels.get(i as usize))
            .cloned()
            .ok_or(LevelError::Missing { index })
    }

    fn max_level(&self) -> u32 {
        self.levels.len() as u32
    }
}

// ------------------------------
// Serialized form
// ------------------------------

/// Rectangle by bottom-left corner and size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectDef {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl RectDef {
    pub fn to_aabb(self) -> Aabb {
        Aabb::from_edges(self.x, self.y, self.x + self.w, self.y + self.h)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColliderDef {
    #[serde(flatten)]
    pub rect: RectDef,
    #[serde(default)]
    pub velocity: Vec2,
    #[serde(default)]
    pub bounds: PatrolBounds,
}

impl ColliderDef {
    pub fn to_collider(self) -> Collider {
        Collider::moving(self.rect.to_aabb(), self.velocity, self.bounds)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyDef {
    #[serde(flatten)]
    pub rect: RectDef,
    pub speed: f32,
    pub boundary_left: f32,
    pub boundary_right: f32,
}

impl EnemyDef {
    pub fn to_enemy(self) -> Enemy {
        let body = self.rect.to_aabb();
        Enemy::new(body.center, body.size(), self.speed, self.boundary_left, self.boundary_right)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelDef {
    pub end_x: f32,
    #[serde(default)]
    pub solids: Vec<ColliderDef>,
    #[serde(default)]
    pub ladders: Vec<ColliderDef>,
    #[serde(default)]
    pub hazards: Vec<ColliderDef>,
    #[serde(default)]
    pub collectibles: Vec<ColliderDef>,
    #[serde(default)]
    pub enemies: Vec<EnemyDef>,
}

impl LevelDef {
    pub fn into_level(self) -> LevelData {
        let mut colliders = ColliderSet::new();
        let groups = [
            (ColliderGroup::Solid, self.solids),
            (ColliderGroup::Ladder, self.ladders),
            (ColliderGroup::Hazard, self.hazards),
            (ColliderGroup::Collectible, self.collectibles),
        ];
        for (group, defs) in groups {
            for def in defs {
                colliders.push(group, def.to_collider());
            }
        }

        LevelData {
            colliders,
            end_x: self.end_x,
            enemies: self.enemies.into_iter().map(EnemyDef::to_enemy).collect(),
        }
    }
}

/// Top-level JSON document: an ordered list of levels.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelPack {
    pub levels: Vec<LevelDef>,
}
