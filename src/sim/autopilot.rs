//! Demo autopilot
//!
//! Jumps when the nearest obstacle ahead is about to reach the player. Good
//! enough to clear isolated obstacles at any speed; tight pairs at high speed
//! will still end the run.

use super::state::GameState;

/// Jump when the gap is at most this many frames of travel away
pub const LEAD_FRAMES: f32 = 8.0;

/// Distance from the player's leading edge to the nearest obstacle not yet passed
pub fn nearest_gap(state: &GameState) -> Option<f32> {
    let player = &state.player.rect;
    state
        .obstacles
        .iter()
        .filter(|o| o.rect.right() > player.left())
        .map(|o| o.rect.left() - player.right())
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}

/// Whether the autopilot wants to jump this frame
pub fn should_jump(state: &GameState) -> bool {
    if state.player.is_jumping || state.is_game_over {
        return false;
    }
    nearest_gap(state).is_some_and(|gap| gap <= state.game_speed * LEAD_FRAMES)
}
