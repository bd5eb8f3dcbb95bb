//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::spawn::SpawnSchedule;
use crate::tuning::Tuning;

/// The jumping T-Rex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Vertical velocity, pixels/frame (negative = up)
    pub velocity_y: f32,
    pub gravity: f32,
    pub is_jumping: bool,
}

impl Player {
    /// Player standing on the ground
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            rect: Rect::new(
                tuning.player_x,
                tuning.ground_y,
                tuning.player_width,
                tuning.player_height,
            ),
            velocity_y: 0.0,
            gravity: tuning.gravity,
            is_jumping: false,
        }
    }
}

/// Obstacle classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Low and square
    Rock,
    /// Taller, sits slightly higher
    Cactus,
}

impl ObstacleKind {
    pub fn size(&self) -> Vec2 {
        match self {
            ObstacleKind::Rock => Vec2::new(40.0, 40.0),
            ObstacleKind::Cactus => Vec2::new(40.0, 55.0),
        }
    }

    /// Rectangle for a fresh obstacle standing on `floor_y` (bottom edge)
    pub fn rect_at(&self, x: f32, floor_y: f32) -> Rect {
        let size = self.size();
        Rect::new(x, floor_y - size.y, size.x, size.y)
    }
}

/// A scrolling obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub rect: Rect,
}

/// Notable things that happened during an update, drained by the frame driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Jumped,
    Spawned { kind: ObstacleKind },
    /// Obstacle scrolled off the left edge
    Cleared { kind: ObstacleKind, score: u32 },
    SpeedUp { speed: f32 },
    GameOver { score: u32 },
}

/// Events kept when nobody drains the queue; newer ones are dropped
pub const MAX_PENDING_EVENTS: usize = 256;

/// Complete world state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub player: Player,
    /// Live obstacles in spawn order (left to right on screen)
    pub obstacles: Vec<Obstacle>,
    /// Frames driven so far
    pub frame_count: u64,
    pub score: u32,
    /// Scroll speed, pixels/frame
    pub game_speed: f32,
    pub is_game_over: bool,
    /// Right edge where obstacles enter
    pub viewport_width: f32,
    /// One schedule per enabled obstacle kind
    pub schedules: Vec<SpawnSchedule>,
    /// Capped at `MAX_PENDING_EVENTS` until drained
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game with the given tuning and seed
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let schedules = tuning
            .spawns
            .iter()
            .map(|rule| SpawnSchedule::new(*rule, 0, &mut rng))
            .collect();

        Self {
            player: Player::new(&tuning),
            game_speed: tuning.base_speed,
            viewport_width: tuning.viewport_width,
            seed,
            rng,
            obstacles: Vec::new(),
            frame_count: 0,
            score: 0,
            is_game_over: false,
            schedules,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Floor line obstacles stand on (player's bottom edge when grounded)
    pub fn floor_y(&self) -> f32 {
        self.tuning.ground_y + self.tuning.player_height
    }

    /// Start a jump. Ignored while airborne or after game over.
    ///
    /// Returns whether the jump was accepted.
    pub fn jump(&mut self) -> bool {
        if self.player.is_jumping || self.is_game_over {
            return false;
        }
        self.player.is_jumping = true;
        self.player.velocity_y = self.tuning.jump_impulse;
        self.push_event(GameEvent::Jumped);
        true
    }

    /// Push an obstacle of `kind` at the right edge of the viewport
    pub fn spawn_obstacle(&mut self, kind: ObstacleKind) {
        let id = self.next_entity_id();
        let rect = kind.rect_at(self.viewport_width, self.floor_y());
        self.obstacles.push(Obstacle { id, kind, rect });
        self.push_event(GameEvent::Spawned { kind });
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            player: &self.player.rect,
            obstacles: &self.obstacles,
            score: self.score,
            is_game_over: self.is_game_over,
            viewport: Vec2::new(self.viewport_width, self.tuning.viewport_height),
            ground_y: self.floor_y(),
        }
    }

    /// Record an event unless the queue is full
    pub fn push_event(&mut self, event: GameEvent) {
        if self.events.len() < MAX_PENDING_EVENTS {
            self.events.push(event);
        }
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// What the renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub player: &'a Rect,
    pub obstacles: &'a [Obstacle],
    pub score: u32,
    pub is_game_over: bool,
    /// Logical viewport size in pixels
    pub viewport: Vec2,
    /// Floor line to draw
    pub ground_y: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(Tuning::classic(), 1);
        assert_eq!(state.player.rect, Rect::new(50.0, 240.0, 60.0, 60.0));
        assert!(!state.player.is_jumping);
        assert_eq!(state.game_speed, 5.0);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.schedules.len(), 2);
    }

    #[test]
    fn test_jump_sets_impulse() {
        let mut state = GameState::new(Tuning::classic(), 1);
        assert!(state.jump());
        assert!(state.player.is_jumping);
        assert_eq!(state.player.velocity_y, -18.75);
    }

    #[test]
    fn test_jump_ignored_when_airborne_or_over() {
        let mut state = GameState::new(Tuning::classic(), 1);
        state.jump();
        state.player.velocity_y = -3.0;
        let before = state.player.clone();
        assert!(!state.jump());
        assert_eq!(state.player, before);

        let mut state = GameState::new(Tuning::classic(), 1);
        state.is_game_over = true;
        assert!(!state.jump());
        assert!(!state.player.is_jumping);
        assert_eq!(state.player.velocity_y, 0.0);
    }

    #[test]
    fn test_spawned_obstacles_sit_on_floor() {
        let mut state = GameState::new(Tuning::classic(), 1);
        state.spawn_obstacle(ObstacleKind::Rock);
        state.spawn_obstacle(ObstacleKind::Cactus);

        assert_eq!(state.obstacles[0].rect, Rect::new(800.0, 260.0, 40.0, 40.0));
        assert_eq!(state.obstacles[1].rect, Rect::new(800.0, 245.0, 40.0, 55.0));
        assert!(state.obstacles[0].id < state.obstacles[1].id);
    }

    #[test]
    fn test_undrained_events_are_capped() {
        let mut state = GameState::new(Tuning::flat(), 1);
        for frame in 1..=100_000 {
            state.frame_count = frame;
            state.obstacles.clear();
            crate::sim::update(&mut state);
        }
        assert_eq!(state.events.len(), MAX_PENDING_EVENTS);
        assert_eq!(state.drain_events().len(), MAX_PENDING_EVENTS);
        state.jump();
        assert_eq!(state.events, vec![GameEvent::Jumped]);
    }

    #[test]
    fn test_drain_events() {
        let mut state = GameState::new(Tuning::classic(), 1);
        state.jump();
        assert_eq!(state.drain_events(), vec![GameEvent::Jumped]);
        assert!(state.drain_events().is_empty());
    }
}
