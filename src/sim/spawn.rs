//! Timed enemy spawning
//!
//! Every interval, if the population is under the cap, a spawn point is
//! sampled in a ring around the player. Blocked candidates are resampled a
//! bounded number of times; if none is found the interval passes silently.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::geometry::{Bounds, Geometry};
use super::state::{Enemy, GameEvent, GameState};
use crate::consts::ENEMY_SIZE;
use crate::tuning::Tuning;

/// Clamp a candidate `margin` inside the world edge
fn clamp_inside(bounds: &Bounds, pos: Vec2, margin: f32) -> Vec2 {
    let clamp_axis = |v: f32, dim: f32| {
        let hi = (dim - margin).max(margin);
        v.clamp(margin.min(hi), hi)
    };
    Vec2::new(clamp_axis(pos.x, bounds.width), clamp_axis(pos.y, bounds.height))
}

/// Sample an unblocked spawn point around `origin`
pub fn pick_spawn_point<R: Rng + ?Sized>(
    rng: &mut R,
    geometry: &Geometry,
    bounds: &Bounds,
    origin: Vec2,
    tuning: &Tuning,
) -> Option<Vec2> {
    let band = tuning.spawn_max_distance - tuning.spawn_min_distance;
    (0..tuning.spawn_attempts).find_map(|_| {
        let angle = rng.random::<f32>() * TAU;
        let distance = tuning.spawn_min_distance + rng.random::<f32>() * band;
        let candidate = origin + Vec2::new(angle.cos(), angle.sin()) * distance;
        let candidate = clamp_inside(bounds, candidate, tuning.spawn_edge_margin);
        (!geometry.is_blocked(candidate, ENEMY_SIZE)).then_some(candidate)
    })
}

/// Insert an enemy at `pos` with baseline health and `base + speed_bonus` speed
pub fn spawn_enemy_at(state: &mut GameState, pos: Vec2, speed_bonus: f32) -> u32 {
    let id = state.next_entity_id();
    let health = state.tuning.enemy_health;
    state.enemies.insert(Enemy {
        id,
        pos,
        health,
        max_health: health,
        speed: state.tuning.enemy_base_speed + speed_bonus,
        angle: 0.0,
        alive: true,
    });
    state.emit(GameEvent::EnemySpawned { enemy: id, pos });
    id
}

/// Spawn step. Returns the new enemy's id if one was placed.
pub fn update(state: &mut GameState) -> Option<u32> {
    let now = state.time_ms;
    if now.saturating_sub(state.last_spawn_ms) < state.tuning.spawn_interval_ms {
        return None;
    }
    state.last_spawn_ms = now;

    if state.enemies.live_count() >= state.tuning.max_enemies {
        log::trace!("Spawn skipped: population cap {}", state.tuning.max_enemies);
        return None;
    }

    let Some(pos) = pick_spawn_point(
        &mut state.rng,
        &state.geometry,
        &state.bounds,
        state.player.pos,
        &state.tuning,
    ) else {
        log::trace!("Spawn skipped: no free point after {} attempts", state.tuning.spawn_attempts);
        return None;
    };

    let bonus = state.rng.random::<f32>() * state.tuning.enemy_speed_jitter;
    Some(spawn_enemy_at(state, pos, bonus))
}
