//! Enemy pursuit and contact damage
//!
//! Each enemy heads straight for the player's current position and moves
//! through the same axis-separated resolver as the player. There is no path
//! finding: an enemy pressed against a wall only slides along the free axis
//! and can stay stuck behind geometry.

use super::movement::resolve_move;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::{ENEMY_SIZE, PLAYER_SIZE};

/// Distance between centers below which an enemy touches the player
pub const CONTACT_DISTANCE: f32 = (PLAYER_SIZE + ENEMY_SIZE) / 2.0;

pub fn update(state: &mut GameState) {
    let target = state.player.pos;
    let mut contacts = 0u32;

    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        let heading = (target - enemy.pos).normalize_or_zero();
        if heading != glam::Vec2::ZERO {
            enemy.angle = heading.y.atan2(heading.x);
        }
        enemy.pos = resolve_move(
            &state.geometry,
            &state.bounds,
            enemy.pos,
            heading * enemy.speed,
            ENEMY_SIZE,
        );

        if enemy.pos.distance(target) < CONTACT_DISTANCE {
            contacts += 1;
        }
    }

    if contacts == 0 {
        return;
    }

    let amount = state.tuning.contact_damage * contacts as f32;
    state.player.damage(amount);
    state.emit(GameEvent::PlayerDamaged { amount });

    if state.player.health <= 0.0 {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over at {} ms: {} kills, {} currency",
            state.time_ms,
            state.player.kills,
            state.player.currency
        );
        state.emit(GameEvent::GameOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::spawn_enemy_at;
    use glam::Vec2;

    #[test]
    fn test_enemy_pursues_player() {
        let mut state = GameState::with_defaults(1);
        state.player.pos = Vec2::new(1000.0, 900.0);
        let id = spawn_enemy_at(&mut state, Vec2::new(1100.0, 900.0), 0.0);

        update(&mut state);

        let e = state.enemies.get(id).unwrap();
        assert!((e.pos.x - 1099.0).abs() < 1e-4);
        assert!((e.pos.y - 900.0).abs() < 1e-4);
        assert!((e.angle - std::f32::consts::PI).abs() < 1e-4);
    }

    #[test]
    fn test_enemy_blocked_by_wall_does_not_route_around() {
        let mut state = GameState::with_defaults(1);
        // Wall x 900..930, y 300..500; player on the far side, same row
        state.player.pos = Vec2::new(850.0, 400.0);
        let start = Vec2::new(938.0, 400.0);
        let id = spawn_enemy_at(&mut state, start, 0.0);

        for _ in 0..30 {
            update(&mut state);
        }
        assert_eq!(state.enemies.get(id).unwrap().pos, start);
    }

    #[test]
    fn test_contact_damage_per_enemy() {
        let mut state = GameState::with_defaults(1);
        state.player.pos = Vec2::new(1000.0, 900.0);
        spawn_enemy_at(&mut state, Vec2::new(1005.0, 900.0), 0.0);
        spawn_enemy_at(&mut state, Vec2::new(995.0, 900.0), 0.0);

        update(&mut state);
        assert_eq!(state.player.health, 99.0);
        assert!(state.events.contains(&GameEvent::PlayerDamaged { amount: 1.0 }));
    }

    #[test]
    fn test_no_damage_outside_contact() {
        let mut state = GameState::with_defaults(1);
        state.player.pos = Vec2::new(1000.0, 900.0);
        spawn_enemy_at(&mut state, Vec2::new(1020.0, 900.0), 0.0);
        update(&mut state);
        // Moved to 1019: still 19 away
        assert_eq!(state.player.health, 100.0);
    }

    #[test]
    fn test_death_ends_session() {
        let mut state = GameState::with_defaults(1);
        state.player.pos = Vec2::new(1000.0, 900.0);
        state.player.health = 0.4;
        spawn_enemy_at(&mut state, Vec2::new(1000.0, 900.0), 0.0);

        update(&mut state);
        assert_eq!(state.player.health, 0.0);
        assert!(state.is_game_over());
        assert_eq!(state.events.last(), Some(&GameEvent::GameOver));
    }
}
