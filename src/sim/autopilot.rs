//! Autopilot - a simple bot that plays the game
//!
//! Used for demo/attract mode and by the headless runner. It only fills in a
//! [`TickInput`]; all rules still apply to whatever it asks for.

use glam::Vec2;

use super::economy::{InteractionPrompt, interaction_prompt};
use super::state::{GameState, StationKind};
use super::tick::{Aim, TickInput};
use super::weapon::Weapon;

/// Back off when an enemy gets this close
const RETREAT_DISTANCE: f32 = 80.0;

/// Overwrite `input` with the bot's intents for this tick
pub fn drive(state: &GameState, input: &mut TickInput) {
    let player = &state.player;
    let arsenal = &player.arsenal;

    let nearest_enemy = state
        .enemies
        .alive()
        .min_by(|a, b| {
            a.pos
                .distance_squared(player.pos)
                .total_cmp(&b.pos.distance_squared(player.pos))
        })
        .map(|e| e.pos);

    // Out of reserve: fall back to the magazine weapon
    let wanted = if arsenal.reserve > 0 {
        Weapon::Primary
    } else {
        Weapon::Secondary
    };
    input.weapon_select = (arsenal.selected != Some(wanted)).then_some(wanted);
    input.weapon_toggle = false;
    input.reload_pressed = arsenal.magazine == 0 && !arsenal.is_reloading();

    match nearest_enemy {
        Some(target) => {
            input.aim = Some(Aim::Target(target));
            input.fire_held = match arsenal.selected {
                Some(Weapon::Primary) => true,
                // Semi-auto needs a release between shots
                Some(Weapon::Secondary) => !arsenal.trigger_was_down,
                None => false,
            };
        }
        None => input.fire_held = false,
    }

    input.movement = match nearest_enemy {
        Some(enemy) if enemy.distance(player.pos) < RETREAT_DISTANCE => {
            (player.pos - enemy).normalize_or_zero()
        }
        _ => state
            .drops
            .alive()
            .min_by(|a, b| {
                a.pos
                    .distance_squared(player.pos)
                    .total_cmp(&b.pos.distance_squared(player.pos))
            })
            .map_or(Vec2::ZERO, |d| (d.pos - player.pos).normalize_or_zero()),
    };

    input.interact_pressed = match interaction_prompt(state) {
        Some(InteractionPrompt::Door { cost, .. }) => player.currency >= cost,
        Some(InteractionPrompt::Station { kind, cost }) => {
            player.currency >= cost
                && match kind {
                    StationKind::Ammo => arsenal.reserve < state.tuning.reserve_cap / 2,
                    StationKind::Health => player.health < player.max_health,
                }
        }
        None => false,
    };
}
