//! Frame driver
//!
//! Owns the game state between display frames. Each frame bumps the frame
//! counter, runs one simulation update and tells the host whether to ask for
//! another frame. Once the game is over the driver stops and the state stays
//! frozen for inspection and drawing.

use crate::sim::autopilot;
use crate::sim::{GameEvent, GameState, update};

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Halted,
}

pub struct FrameDriver {
    pub state: GameState,
    /// Let the autopilot press jump (demo/idle mode)
    pub autopilot: bool,
}

impl FrameDriver {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            autopilot: false,
        }
    }

    /// Apply a jump request immediately; dropped if the player can't jump
    pub fn request_jump(&mut self) -> bool {
        self.state.jump()
    }

    /// Run one display frame
    pub fn frame(&mut self) -> FrameOutcome {
        if self.state.is_game_over {
            return FrameOutcome::Halted;
        }

        if self.autopilot && autopilot::should_jump(&self.state) {
            self.state.jump();
        }

        self.state.frame_count += 1;
        update(&mut self.state);
        self.log_events();

        if self.state.is_game_over {
            FrameOutcome::Halted
        } else {
            FrameOutcome::Continue
        }
    }

    /// Drive frames back to back until game over or `max_frames`.
    ///
    /// Returns the number of frames run.
    pub fn run_headless(&mut self, max_frames: u64) -> u64 {
        let mut frames = 0;
        while frames < max_frames {
            frames += 1;
            if self.frame() == FrameOutcome::Halted {
                break;
            }
        }
        frames
    }

    fn log_events(&mut self) {
        let frame = self.state.frame_count;
        for event in self.state.drain_events() {
            match event {
                GameEvent::Jumped => log::debug!("frame {}: jump", frame),
                GameEvent::Spawned { kind } => log::debug!("frame {}: spawned {:?}", frame, kind),
                GameEvent::Cleared { kind, score } => {
                    log::debug!("frame {}: cleared {:?}, score {}", frame, kind, score)
                }
                GameEvent::SpeedUp { speed } => {
                    log::info!("Speed up to {:.2} px/frame", speed)
                }
                GameEvent::GameOver { score } => {
                    log::info!("Game over at frame {} with score {}", frame, score)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Obstacle, ObstacleKind, Rect};
    use crate::tuning::Tuning;

    #[test]
    fn test_frame_increments_counter() {
        let mut driver = FrameDriver::new(GameState::new(Tuning::classic(), 5));
        assert_eq!(driver.frame(), FrameOutcome::Continue);
        assert_eq!(driver.frame(), FrameOutcome::Continue);
        assert_eq!(driver.state.frame_count, 2);
        assert!(driver.state.events.is_empty());
    }

    #[test]
    fn test_halts_on_collision_and_stays_halted() {
        let mut driver = FrameDriver::new(GameState::new(Tuning::classic(), 5));
        driver.state.obstacles.push(Obstacle {
            id: 99,
            kind: ObstacleKind::Cactus,
            rect: Rect::new(60.0, 245.0, 40.0, 55.0),
        });

        assert_eq!(driver.frame(), FrameOutcome::Halted);
        assert!(driver.state.is_game_over);
        let frame_count = driver.state.frame_count;

        assert_eq!(driver.frame(), FrameOutcome::Halted);
        assert_eq!(driver.state.frame_count, frame_count);
        assert!(!driver.request_jump());
    }

    #[test]
    fn test_run_headless_stops_at_cap() {
        let mut driver = FrameDriver::new(GameState::new(Tuning::classic(), 5));
        let frames = driver.run_headless(50);
        assert_eq!(frames, 50);
        assert_eq!(driver.state.frame_count, 50);
    }

    #[test]
    fn test_autopilot_scores() {
        let mut driver = FrameDriver::new(GameState::new(Tuning::classic(), 2024));
        driver.autopilot = true;
        driver.run_headless(2_000);
        assert!(driver.state.score >= 1, "autopilot never cleared an obstacle");
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = FrameDriver::new(GameState::new(Tuning::classic(), 77));
        let mut b = FrameDriver::new(GameState::new(Tuning::classic(), 77));
        a.autopilot = true;
        b.autopilot = true;
        a.run_headless(1_500);
        b.run_headless(1_500);

        assert_eq!(a.state.frame_count, b.state.frame_count);
        assert_eq!(a.state.score, b.state.score);
        assert_eq!(a.state.obstacles, b.state.obstacles);
        assert_eq!(a.state.player, b.state.player);
    }
}
