//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One update per display frame, no wall-clock time
//! - Seeded RNG only
//! - Obstacles kept in spawn order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use spawn::SpawnSchedule;
pub use state::{GameEvent, GameState, Obstacle, ObstacleKind, Player, Snapshot};
pub use tick::update;
