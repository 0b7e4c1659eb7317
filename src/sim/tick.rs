//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Input intents
//! are sampled once per tick; every subsystem then runs in a fixed order
//! against the shared [`GameState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::movement::resolve_move;
use super::state::{GamePhase, GameState};
use super::weapon::Weapon;
use super::{ai, autopilot, combat, economy, effects, spawn, weapon};
use crate::consts::*;
use crate::heading_to;

/// Where the player is aiming
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aim {
    /// Facing angle in radians
    Angle(f32),
    /// World point to face (e.g. the mouse cursor)
    Target(Vec2),
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickInput {
    /// Movement direction; magnitude above 1 is clamped
    pub movement: Vec2,
    pub aim: Option<Aim>,
    /// Fire button state (level, not edge)
    pub fire_held: bool,
    /// Edge-triggered
    pub interact_pressed: bool,
    /// Edge-triggered
    pub reload_pressed: bool,
    /// Draw a specific weapon
    pub weapon_select: Option<Weapon>,
    /// Swap to the other weapon
    pub weapon_toggle: bool,
    /// Pause toggle
    pub pause: bool,
    /// Demo mode - the autopilot plays the game
    pub autopilot: bool,
}

impl TickInput {
    /// Drop edge-triggered intents once a tick has consumed them
    pub fn clear_one_shots(&mut self) {
        self.interact_pressed = false;
        self.reload_pressed = false;
        self.weapon_select = None;
        self.weapon_toggle = false;
        self.pause = false;
    }
}

/// Advance the game state by one timestep of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u64) {
    state.events.clear();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::debug!("Paused at {} ms", state.time_ms);
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::debug!("Resumed at {} ms", state.time_ms);
            }
            GamePhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    if matches!(state.phase, GamePhase::Paused | GamePhase::GameOver) {
        return;
    }

    let mut input = input.clone();
    if input.autopilot {
        autopilot::drive(state, &mut input);
    }

    state.time_ms += dt_ms;
    state.time_ticks += 1;

    apply_aim(state, input.aim);
    weapon::update(state, &input);
    move_player(state, input.movement);
    spawn::update(state);
    combat::update(state);
    ai::update(state);
    if state.is_game_over() {
        return;
    }
    if input.interact_pressed {
        economy::interact(state);
    }
    effects::update(state);
    combat::update_drops(state);
}

fn apply_aim(state: &mut GameState, aim: Option<Aim>) {
    match aim {
        Some(Aim::Angle(angle)) if angle.is_finite() => state.player.angle = angle,
        Some(Aim::Target(target)) if target.is_finite() && target != state.player.pos => {
            state.player.angle = heading_to(state.player.pos, target);
        }
        _ => {}
    }
}

fn move_player(state: &mut GameState, movement: Vec2) {
    // Ignore garbage from the host rather than poisoning the position
    if !movement.is_finite() || movement == Vec2::ZERO {
        return;
    }
    let delta = movement.clamp_length_max(1.0) * state.player.speed;
    state.player.pos = resolve_move(
        &state.geometry,
        &state.bounds,
        state.player.pos,
        delta,
        PLAYER_SIZE,
    );
}

/// Fixed-step driver: turns variable host frame times into whole ticks
#[derive(Debug, Clone, Default)]
pub struct Stepper {
    accumulator_ms: u64,
}

impl Stepper {
    /// Longest frame accepted before time is dropped
    const MAX_FRAME_MS: u64 = 100;

    /// Run as many ticks as `frame_ms` covers; returns the number run
    pub fn advance(&mut self, state: &mut GameState, input: &mut TickInput, frame_ms: u64) -> u32 {
        self.accumulator_ms += frame_ms.min(Self::MAX_FRAME_MS);

        let mut substeps = 0;
        while self.accumulator_ms >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            tick(state, input, SIM_DT_MS);
            self.accumulator_ms -= SIM_DT_MS;
            substeps += 1;
            input.clear_one_shots();
        }
        substeps
    }

    pub fn reset(&mut self) {
        self.accumulator_ms = 0;
    }
}
