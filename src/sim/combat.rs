//! Projectile motion, projectile-enemy hits, kills and loot
//!
//! A projectile damages at most one enemy: the first live enemy in id order
//! within the hit radius. Dead projectiles and enemies are marked during the
//! pass and swept afterwards.

use glam::Vec2;
use rand::Rng;

use super::effects;
use super::state::{DropKind, GameEvent, GameState, LootDrop};
use crate::consts::PROJECTILE_SIZE;
use crate::tuning::DropWeights;

/// Roll the loot table for one kill
pub fn roll_drop<R: Rng + ?Sized>(rng: &mut R, chance: f64, weights: &DropWeights) -> Option<DropKind> {
    if !rng.random_bool(chance) {
        return None;
    }
    let total = weights.ammo + weights.money + weights.powerup;
    let roll = rng.random::<f32>() * total;
    if roll < weights.ammo {
        Some(DropKind::Ammo)
    } else if roll < weights.ammo + weights.money {
        Some(DropKind::Money)
    } else {
        Some(DropKind::Powerup)
    }
}

/// Advance projectiles and resolve hits for one tick
pub fn update(state: &mut GameState) {
    let bounds = state.bounds;

    // Motion, world exit and geometry impacts
    for projectile in state.projectiles.iter_mut().filter(|p| p.alive) {
        projectile.pos += projectile.vel;
        if !bounds.contains(projectile.pos) {
            projectile.alive = false;
        } else if state.geometry.is_blocked(projectile.pos, PROJECTILE_SIZE) {
            projectile.alive = false;
            state.events.push(GameEvent::ProjectileBlocked {
                projectile: projectile.id,
                pos: projectile.pos,
            });
        }
    }

    let hit_radius = state.tuning.hit_radius;
    let damage = state.tuning.projectile_damage;
    let mut killed: Vec<(u32, Vec2)> = Vec::new();

    for projectile in state.projectiles.iter_mut().filter(|p| p.alive) {
        let Some(enemy) = state
            .enemies
            .iter_mut()
            .find(|e| e.alive && e.pos.distance(projectile.pos) < hit_radius)
        else {
            continue;
        };

        projectile.alive = false;
        enemy.health = (enemy.health - damage).max(0.0);
        state.events.push(GameEvent::EnemyHit {
            enemy: enemy.id,
            projectile: projectile.id,
            pos: enemy.pos,
        });

        if enemy.health <= 0.0 {
            enemy.alive = false;
            killed.push((enemy.id, enemy.pos));
        }
    }

    for (enemy_id, pos) in killed {
        resolve_kill(state, enemy_id, pos);
    }

    state.projectiles.sweep();
    state.enemies.sweep();
}

/// Credit a kill and maybe leave loot behind
fn resolve_kill(state: &mut GameState, enemy_id: u32, pos: Vec2) {
    state.player.kills += 1;
    state.player.earn(state.tuning.kill_reward);
    state.emit(GameEvent::EnemyKilled { enemy: enemy_id, pos });

    let kind = roll_drop(
        &mut state.rng,
        state.tuning.drop_chance,
        &state.tuning.drop_weights,
    );
    if let Some(kind) = kind {
        spawn_drop(state, kind, pos);
    }
}

/// Place a drop at `pos`, stamped with the current clock
pub fn spawn_drop(state: &mut GameState, kind: DropKind, pos: Vec2) -> u32 {
    let id = state.next_entity_id();
    state.drops.insert(LootDrop {
        id,
        pos,
        kind,
        spawned_ms: state.time_ms,
        alive: true,
    });
    state.emit(GameEvent::DropSpawned { drop: id, kind, pos });
    id
}

/// Expire old drops and apply any the player is touching
pub fn update_drops(state: &mut GameState) {
    let now = state.time_ms;
    let ttl = state.tuning.drop_ttl_ms;
    let radius = state.tuning.drop_pickup_radius;
    let player_pos = state.player.pos;
    let mut picked: Vec<(u32, DropKind, Vec2)> = Vec::new();

    for drop in state.drops.iter_mut().filter(|d| d.alive) {
        if now.saturating_sub(drop.spawned_ms) > ttl {
            drop.alive = false;
            state.events.push(GameEvent::DropExpired { drop: drop.id });
        } else if player_pos.distance(drop.pos) < radius {
            drop.alive = false;
            picked.push((drop.id, drop.kind, drop.pos));
        }
    }
    state.drops.sweep();

    for (id, kind, pos) in picked {
        apply_pickup(state, kind);
        state.emit(GameEvent::DropPickedUp { drop: id, kind, pos });
    }
}

fn apply_pickup(state: &mut GameState, kind: DropKind) {
    match kind {
        DropKind::Ammo => {
            let cap = state.tuning.reserve_cap;
            state.player.arsenal.add_reserve(state.tuning.drop_ammo, cap);
        }
        DropKind::Money => state.player.earn(state.tuning.drop_money),
        DropKind::Powerup => effects::activate_powerup(state),
    }
}
