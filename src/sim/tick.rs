//! Per-frame simulation update
//!
//! Advances the world by exactly one display frame. Velocities and speeds are
//! in pixels/frame, so the game runs at whatever rate frames arrive.

use super::state::{GameEvent, GameState};

/// Advance the game state by one frame
///
/// Events accumulate in `state.events` until drained (see `GameState::drain_events`).
pub fn update(state: &mut GameState) {
    if state.is_game_over {
        return;
    }

    integrate_player(state);
    spawn_obstacles(state);
    advance_obstacles(state);
    check_collisions(state);
}

/// Gravity, then clamp to the ground line
fn integrate_player(state: &mut GameState) {
    let ground_y = state.tuning.ground_y;
    let player = &mut state.player;

    player.velocity_y += player.gravity;
    player.rect.pos.y += player.velocity_y;

    if player.rect.pos.y >= ground_y {
        player.rect.pos.y = ground_y;
        player.velocity_y = 0.0;
        player.is_jumping = false;
    }
}

/// True while some obstacle is still too close to the right edge
fn spawn_blocked(state: &GameState) -> bool {
    match state.tuning.min_spacing {
        Some(spacing) => {
            let limit = state.viewport_width - spacing;
            state.obstacles.iter().any(|o| o.rect.left() > limit)
        }
        None => false,
    }
}

fn spawn_obstacles(state: &mut GameState) {
    // Gate is evaluated once, so several kinds may spawn on the same frame
    if spawn_blocked(state) {
        return;
    }

    let frame = state.frame_count;
    let cadence = state.tuning.cadence;
    let mut due = Vec::new();
    for schedule in &mut state.schedules {
        if schedule.poll(frame, cadence, &mut state.rng) {
            due.push(schedule.rule.kind);
        }
    }

    for kind in due {
        state.spawn_obstacle(kind);
    }
}

/// Scroll left, drop obstacles past the left edge, score them
fn advance_obstacles(state: &mut GameState) {
    let speed = state.game_speed;
    let mut cleared = Vec::new();

    state.obstacles.retain_mut(|obstacle| {
        obstacle.rect.pos.x -= speed;
        if obstacle.rect.right() < 0.0 {
            cleared.push(obstacle.kind);
            false
        } else {
            true
        }
    });

    for kind in cleared {
        state.score += 1;
        state.push_event(GameEvent::Cleared {
            kind,
            score: state.score,
        });

        // Checked per increment so each threshold fires exactly once
        if state.score % state.tuning.speed_up_every == 0 {
            state.game_speed *= state.tuning.speed_up_factor;
            state.push_event(GameEvent::SpeedUp {
                speed: state.game_speed,
            });
        }
    }
}

fn check_collisions(state: &mut GameState) {
    let player = state.player.rect;
    if state.obstacles.iter().any(|o| player.overlaps(&o.rect)) {
        state.is_game_over = true;
        state.push_event(GameEvent::GameOver { score: state.score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Rect;
    use crate::sim::state::{Obstacle, ObstacleKind};
    use crate::tuning::{Cadence, Tuning};

    fn obstacle(id: u32, x: f32, width: f32) -> Obstacle {
        Obstacle {
            id,
            kind: ObstacleKind::Rock,
            rect: Rect::new(x, 260.0, width, 40.0),
        }
    }

    #[test]
    fn test_grounded_player_stays_on_ground() {
        let mut state = GameState::new(Tuning::classic(), 1);
        update(&mut state);
        assert_eq!(state.player.rect.pos.y, 240.0);
        assert_eq!(state.player.velocity_y, 0.0);
        assert!(!state.player.is_jumping);
    }

    #[test]
    fn test_jump_arc_lands() {
        let mut state = GameState::new(Tuning::classic(), 1);
        state.jump();
        update(&mut state);
        // -18.75 + 0.9
        assert!((state.player.velocity_y - (-17.85)).abs() < 1e-4);
        assert!(state.player.rect.pos.y < 240.0);

        let mut frames = 1;
        while state.player.is_jumping {
            update(&mut state);
            assert!(state.player.rect.pos.y <= 240.0);
            frames += 1;
            assert!(frames < 100, "player never landed");
        }
        assert_eq!(state.player.rect.pos.y, 240.0);
        assert_eq!(state.player.velocity_y, 0.0);
    }

    #[test]
    fn test_obstacle_moves_by_game_speed() {
        let mut state = GameState::new(Tuning::classic(), 1);
        state.obstacles.push(obstacle(1, 10.0, 40.0));
        // Keep it away from the player
        state.player.rect.pos.y = 100.0;
        state.player.is_jumping = true;

        update(&mut state);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].rect.pos.x, 5.0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_obstacle_past_left_edge_is_removed_and_scored() {
        let mut state = GameState::new(Tuning::classic(), 1);
        state.obstacles.push(obstacle(1, -38.0, 40.0));

        update(&mut state);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 1);
        assert!(
            state
                .events
                .contains(&GameEvent::Cleared { kind: ObstacleKind::Rock, score: 1 })
        );
    }

    #[test]
    fn test_adjacent_removals_are_not_skipped() {
        let mut state = GameState::new(Tuning::classic(), 1);
        state.obstacles.push(obstacle(1, -39.0, 40.0));
        state.obstacles.push(obstacle(2, -38.0, 40.0));
        state.obstacles.push(obstacle(3, 400.0, 40.0));

        update(&mut state);
        assert_eq!(state.score, 2);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].id, 3);
        assert_eq!(state.obstacles[0].rect.pos.x, 395.0);
    }

    #[test]
    fn test_speed_up_once_per_threshold() {
        let mut state = GameState::new(Tuning::classic(), 1);
        state.score = 14;
        state.obstacles.push(obstacle(1, -38.0, 40.0));

        update(&mut state);
        assert_eq!(state.score, 15);
        assert_eq!(state.game_speed, 7.5);

        // Score stays at 15: no further speed-up
        update(&mut state);
        update(&mut state);
        assert_eq!(state.game_speed, 7.5);
    }

    #[test]
    fn test_crossing_two_thresholds_in_one_frame() {
        let mut state = GameState::new(Tuning::classic(), 1);
        state.score = 14;
        // Only possible with huge clears; exercise the per-increment check
        for id in 0..16 {
            state.obstacles.push(obstacle(id, -38.0, 40.0));
        }

        update(&mut state);
        assert_eq!(state.score, 30);
        assert_eq!(state.game_speed, 5.0 * 1.5 * 1.5);
    }

    #[test]
    fn test_collision_ends_game() {
        let mut state = GameState::new(Tuning::classic(), 1);
        state.obstacles.push(Obstacle {
            id: 1,
            kind: ObstacleKind::Rock,
            rect: Rect::new(60.0, 260.0, 40.0, 40.0),
        });

        update(&mut state);
        assert!(state.is_game_over);
        assert!(state.events.contains(&GameEvent::GameOver { score: 0 }));
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut state = GameState::new(Tuning::classic(), 1);
        state.obstacles.push(obstacle(1, 60.0, 40.0));
        state.jump();
        update(&mut state);
        assert!(state.is_game_over);

        let player = state.player.clone();
        let obstacles = state.obstacles.clone();
        let (score, speed) = (state.score, state.game_speed);
        for _ in 0..10 {
            state.frame_count += 1;
            update(&mut state);
        }
        assert_eq!(state.player, player);
        assert_eq!(state.obstacles, obstacles);
        assert_eq!(state.score, score);
        assert_eq!(state.game_speed, speed);
    }

    #[test]
    fn test_spawn_at_viewport_edge() {
        let mut state = GameState::new(Tuning::flat(), 1);
        state.frame_count = 100;
        update(&mut state);
        assert_eq!(state.obstacles.len(), 1);
        // Spawned at 800 then advanced once
        assert_eq!(state.obstacles[0].rect.pos.x, 795.0);
        assert_eq!(state.obstacles[0].kind, ObstacleKind::Rock);
    }

    #[test]
    fn test_spacing_blocks_spawn() {
        let mut state = GameState::new(Tuning::classic(), 1);
        state.obstacles.push(obstacle(1, 700.0, 40.0));
        state.frame_count = 10_000;

        update(&mut state);
        assert_eq!(state.obstacles.len(), 1);

        // Once the right edge is clear, both overdue kinds spawn together
        state.obstacles[0].rect.pos.x = 500.0;
        state.frame_count += 1;
        update(&mut state);
        assert_eq!(state.obstacles.len(), 3);
    }

    #[test]
    fn test_reroll_cadence_spawns_on_frame_zero() {
        let tuning = Tuning {
            cadence: Cadence::Reroll,
            ..Tuning::flat()
        };
        let mut state = GameState::new(tuning, 1);
        update(&mut state);
        assert_eq!(state.obstacles.len(), 1);
    }
}
