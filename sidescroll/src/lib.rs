//! Sidescroll - deterministic per-frame simulation core for side-scrolling platformers.
//!
//! The crate covers platformer physics and collision, the dead-zone camera,
//! enemy patrols and the level/health/timer state machine. Rendering, audio,
//! asset loading and device polling belong to the host: it feeds
//! [`InputFrame`]s in and drains [`GameEvent`]s out.

pub mod actor;
pub mod camera;
pub mod collider;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod events;
pub mod input;
pub mod level;
pub mod math;
pub mod patrol;
pub mod physics;
pub mod state;

pub use crate::actor::{Actor, ActorMode, Facing};
pub use crate::camera::{Viewport, ViewportScroller};
pub use crate::collider::{Collider, ColliderGroup, ColliderSet, PatrolBounds};
pub use crate::config::{CameraConfig, GameConfig, PhysicsConfig, RulesConfig};
pub use crate::engine::{Engine, FrameReport, Session};
pub use crate::error::LevelError;
pub use crate::events::{EventBus, GameEvent, HitCause};
pub use crate::input::{InputFrame, InputState, Key, KeyState};
pub use crate::level::{LevelCatalog, LevelData, LevelPack, LevelSource};
pub use crate::math::{Aabb, Vec2};
pub use crate::patrol::Enemy;
pub use crate::physics::{PhysicsEngine, StepReport};
pub use crate::state::{GamePhase, GameState};
