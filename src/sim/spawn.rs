//! Obstacle spawn cadence

use rand::Rng;
use rand_pcg::Pcg32;

use crate::tuning::{Cadence, SpawnRule};

/// Spawn timing for one obstacle kind
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnSchedule {
    pub rule: SpawnRule,
    /// Frame at or after which the next spawn is due (scheduled cadence only)
    pub next_frame: u64,
}

impl SpawnSchedule {
    pub fn new(rule: SpawnRule, from_frame: u64, rng: &mut Pcg32) -> Self {
        let mut schedule = Self {
            rule,
            next_frame: 0,
        };
        schedule.rearm(from_frame, rng);
        schedule
    }

    /// Draw an interval in `[min_interval, min_interval + spread)`
    pub fn draw_interval(&self, rng: &mut Pcg32) -> u64 {
        let jitter = if self.rule.spread > 0 {
            rng.random_range(0..self.rule.spread)
        } else {
            0
        };
        u64::from(self.rule.min_interval) + u64::from(jitter)
    }

    /// Set the next spawn relative to `frame`
    pub fn rearm(&mut self, frame: u64, rng: &mut Pcg32) {
        self.next_frame = frame + self.draw_interval(rng);
    }

    /// Whether this kind spawns on `frame`. Only call on frames where spawning is allowed.
    ///
    /// A scheduled spawn that was held back stays due until it fires.
    pub fn poll(&mut self, frame: u64, cadence: Cadence, rng: &mut Pcg32) -> bool {
        match cadence {
            Cadence::Scheduled => {
                if frame >= self.next_frame {
                    self.rearm(frame, rng);
                    true
                } else {
                    false
                }
            }
            Cadence::Reroll => frame % self.draw_interval(rng) == 0,
        }
    }
}
