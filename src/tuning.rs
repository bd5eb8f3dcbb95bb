//! Game balance and presets
//!
//! Everything that can be tweaked without touching simulation code lives here.
//! Tuning can be overridden at startup from JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::ObstacleKind;

/// Built-in tuning presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Rocks and cacti on randomized cadences, strong jump
    #[default]
    Classic,
    /// Rocks only on a fixed cadence, weaker jump, no spacing rule
    Flat,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Classic => "Classic",
            Preset::Flat => "Flat",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Preset::Classic),
            "flat" => Some(Preset::Flat),
            _ => None,
        }
    }

    pub fn tuning(&self) -> Tuning {
        match self {
            Preset::Classic => Tuning::classic(),
            Preset::Flat => Tuning::flat(),
        }
    }
}

/// How spawn intervals are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Cadence {
    /// Draw the next spawn frame once per spawn
    #[default]
    Scheduled,
    /// Draw a fresh modulus every frame and spawn when `frame % modulus == 0`
    Reroll,
}

/// Spawn interval for one obstacle kind, in frames: `[min_interval, min_interval + spread)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRule {
    pub kind: ObstacleKind,
    pub min_interval: u32,
    /// 0 = fixed interval
    pub spread: u32,
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub viewport_width: f32,
    pub viewport_height: f32,

    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Resting y of the player's top edge
    pub ground_y: f32,
    pub gravity: f32,
    pub jump_impulse: f32,

    pub base_speed: f32,
    pub speed_up_every: u32,
    pub speed_up_factor: f32,

    /// `None` disables the spacing rule
    pub min_spacing: Option<f32>,
    pub cadence: Cadence,
    pub spawns: Vec<SpawnRule>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::classic()
    }
}

impl Tuning {
    pub fn classic() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            ground_y: GROUND_Y,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            base_speed: BASE_SPEED,
            speed_up_every: SPEED_UP_EVERY,
            speed_up_factor: SPEED_UP_FACTOR,
            min_spacing: Some(MIN_SPACING),
            cadence: Cadence::Scheduled,
            spawns: vec![
                SpawnRule {
                    kind: ObstacleKind::Rock,
                    min_interval: ROCK_MIN_INTERVAL,
                    spread: ROCK_SPREAD,
                },
                SpawnRule {
                    kind: ObstacleKind::Cactus,
                    min_interval: CACTUS_MIN_INTERVAL,
                    spread: CACTUS_SPREAD,
                },
            ],
        }
    }

    pub fn flat() -> Self {
        Self {
            jump_impulse: FLAT_JUMP_IMPULSE,
            min_spacing: None,
            spawns: vec![SpawnRule {
                kind: ObstacleKind::Rock,
                min_interval: ROCK_MIN_INTERVAL,
                spread: 0,
            }],
            ..Self::classic()
        }
    }

    /// Parse a JSON override; missing fields fall back to the classic preset
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.gravity > 0.0) {
            return Err(TuningError::Invalid("gravity must be positive"));
        }
        if !(self.jump_impulse < 0.0) {
            return Err(TuningError::Invalid("jump_impulse must be negative"));
        }
        if !(self.base_speed > 0.0) {
            return Err(TuningError::Invalid("base_speed must be positive"));
        }
        if self.speed_up_every == 0 {
            return Err(TuningError::Invalid("speed_up_every must be at least 1"));
        }
        if !(self.speed_up_factor >= 1.0) {
            return Err(TuningError::Invalid("speed_up_factor must be >= 1"));
        }
        if !(self.player_width > 0.0 && self.player_height > 0.0) {
            return Err(TuningError::Invalid("player size must be positive"));
        }
        if !(self.player_x.is_finite() && self.ground_y.is_finite()) {
            return Err(TuningError::Invalid("player position must be finite"));
        }
        if !(self.viewport_width > 0.0 && self.viewport_height > 0.0) {
            return Err(TuningError::Invalid("viewport must be non-empty"));
        }
        if self.spawns.iter().any(|rule| rule.min_interval == 0) {
            return Err(TuningError::Invalid("spawn min_interval must be at least 1"));
        }
        Ok(())
    }
}

/// Error type for tuning overrides
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// Malformed JSON or wrong field types
    Parse(String),
    /// Well-formed but out of range
    Invalid(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(msg) => write!(f, "Tuning parse error: {}", msg),
            TuningError::Invalid(msg) => write!(f, "Invalid tuning: {}", msg),
        }
    }
}

impl std::error::Error for TuningError {}
