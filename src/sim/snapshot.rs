//! Read-only view of the world for a presentation layer
//!
//! A snapshot owns copies of everything a renderer or HUD needs, so the host
//! can hold it across frames without borrowing the simulation.

use glam::Vec2;
use serde::Serialize;

use super::economy::{InteractionPrompt, interaction_prompt};
use super::geometry::Rect;
use super::state::{DropKind, GameEvent, GamePhase, GameState, StationKind};
use super::weapon::Weapon;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub angle: f32,
    pub health: f32,
    pub max_health: f32,
    pub speed: f32,
    pub weapon: Option<Weapon>,
    pub reserve: u32,
    pub magazine: u32,
    pub max_magazine: u32,
    pub reloading: bool,
    /// 0..=1 while a reload is running
    pub reload_progress: Option<f32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub pos: Vec2,
    pub angle: f32,
    pub health: f32,
    pub max_health: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub id: u32,
    pub pos: Vec2,
    pub weapon: Weapon,
}

#[derive(Debug, Clone, Serialize)]
pub struct DropView {
    pub id: u32,
    pub pos: Vec2,
    pub kind: DropKind,
    /// Past the blink threshold; will vanish soon
    pub expiring: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoorView {
    pub id: u32,
    pub rect: Rect,
    pub cost: u32,
    pub open: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StationView {
    pub pos: Vec2,
    pub kind: StationKind,
    pub cost: u32,
    pub radius: f32,
}

/// Everything observable after a tick
#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    pub time_ms: u64,
    pub tick: u64,
    pub phase: GamePhase,
    pub game_over: bool,
    pub paused: bool,
    pub player: PlayerView,
    pub kills: u32,
    pub currency: u32,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub drops: Vec<DropView>,
    pub walls: Vec<Rect>,
    pub doors: Vec<DoorView>,
    pub stations: Vec<StationView>,
    pub powerup_active: bool,
    pub powerup_remaining_ms: u64,
    pub reload_prompt: bool,
    pub interaction_prompt: Option<InteractionPrompt>,
    pub events: Vec<GameEvent>,
}

impl WorldSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let now = state.time_ms;
        let arsenal = &state.player.arsenal;
        let expiring_after = state.tuning.drop_expiring_ms;

        Self {
            time_ms: now,
            tick: state.time_ticks,
            phase: state.phase,
            game_over: state.phase == GamePhase::GameOver,
            paused: state.phase == GamePhase::Paused,
            player: PlayerView {
                pos: state.player.pos,
                angle: state.player.angle,
                health: state.player.health,
                max_health: state.player.max_health,
                speed: state.player.speed,
                weapon: arsenal.selected,
                reserve: arsenal.reserve,
                magazine: arsenal.magazine,
                max_magazine: arsenal.max_magazine,
                reloading: arsenal.is_reloading(),
                reload_progress: arsenal.reload_progress(now, state.tuning.reload_ms),
            },
            kills: state.player.kills,
            currency: state.player.currency,
            enemies: state
                .enemies
                .alive()
                .map(|e| EnemyView {
                    id: e.id,
                    pos: e.pos,
                    angle: e.angle,
                    health: e.health,
                    max_health: e.max_health,
                })
                .collect(),
            projectiles: state
                .projectiles
                .alive()
                .map(|p| ProjectileView {
                    id: p.id,
                    pos: p.pos,
                    weapon: p.weapon,
                })
                .collect(),
            drops: state
                .drops
                .alive()
                .map(|d| DropView {
                    id: d.id,
                    pos: d.pos,
                    kind: d.kind,
                    expiring: now.saturating_sub(d.spawned_ms) > expiring_after,
                })
                .collect(),
            walls: state.geometry.walls.clone(),
            doors: state
                .geometry
                .doors
                .iter()
                .map(|d| DoorView {
                    id: d.id,
                    rect: d.rect,
                    cost: d.cost,
                    open: d.is_open(),
                })
                .collect(),
            stations: state
                .stations
                .iter()
                .map(|s| StationView {
                    pos: s.pos,
                    kind: s.kind,
                    cost: s.cost,
                    radius: s.radius,
                })
                .collect(),
            powerup_active: state.powerup.is_active(),
            powerup_remaining_ms: state.powerup.remaining_ms(now),
            reload_prompt: state.reload_prompt,
            interaction_prompt: interaction_prompt(state),
            events: state.events.clone(),
        }
    }
}

impl GameState {
    /// Capture the observable world after the last tick
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(self)
    }
}
