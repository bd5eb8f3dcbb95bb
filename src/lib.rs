//! Dino Dash - an endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `driver`: Per-frame driver that advances the simulation and decides scheduling
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven game balance and presets

pub mod driver;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use driver::{FrameDriver, FrameOutcome};
pub use tuning::{Preset, Tuning, TuningError};

/// Game configuration constants (classic preset values)
pub mod consts {
    /// Logical viewport size in pixels
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 300.0;

    /// Player resting position (top edge sits on the ground line)
    pub const PLAYER_X: f32 = 50.0;
    pub const GROUND_Y: f32 = 240.0;
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;

    /// Downward acceleration, pixels/frame²
    pub const GRAVITY: f32 = 0.9;
    /// Upward velocity applied on jump, pixels/frame
    pub const JUMP_IMPULSE: f32 = -18.75;
    /// Weaker jump used by the flat preset
    pub const FLAT_JUMP_IMPULSE: f32 = -15.0;

    /// Initial scroll speed, pixels/frame
    pub const BASE_SPEED: f32 = 5.0;
    /// Speed is multiplied every time the score reaches a multiple of this
    pub const SPEED_UP_EVERY: u32 = 15;
    pub const SPEED_UP_FACTOR: f32 = 1.5;

    /// No spawns while an obstacle is within this distance of the right edge
    pub const MIN_SPACING: f32 = 200.0;

    /// Rock spawn interval: [100, 200) frames
    pub const ROCK_MIN_INTERVAL: u32 = 100;
    pub const ROCK_SPREAD: u32 = 100;
    /// Cactus spawn interval: [150, 300) frames
    pub const CACTUS_MIN_INTERVAL: u32 = 150;
    pub const CACTUS_SPREAD: u32 = 150;
}
