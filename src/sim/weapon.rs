//! Weapons, ammunition and the reload state machine
//!
//! The primary weapon draws from a shared reserve and fires continuously
//! while the trigger is held. The secondary weapon fires from a magazine,
//! once per trigger press, and needs an explicit timed reload.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, Projectile};
use super::tick::TickInput;
use crate::tuning::Tuning;
use crate::unit_vector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weapon {
    /// Automatic, reserve-fed
    Primary,
    /// Semi-automatic, magazine-fed
    Secondary,
}

impl Weapon {
    pub fn other(self) -> Self {
        match self {
            Weapon::Primary => Weapon::Secondary,
            Weapon::Secondary => Weapon::Primary,
        }
    }
}

/// Result of pulling (or holding) the trigger for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    /// Nothing happened
    Idle,
    /// A shot left the given weapon; ammo was already deducted
    Fired(Weapon),
    /// Fresh press on an empty magazine
    ReloadNeeded,
}

/// Per-player weapon state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arsenal {
    /// `None` means no weapon is drawn
    pub selected: Option<Weapon>,
    /// Primary reserve
    pub reserve: u32,
    /// Secondary magazine
    pub magazine: u32,
    pub max_magazine: u32,
    /// Clock value a running reload started at
    pub reload_started_ms: Option<u64>,
    pub last_shot_ms: Option<u64>,
    pub last_switch_ms: Option<u64>,
    /// Fire input as seen on the previous tick (edge detection)
    pub trigger_was_down: bool,
}

impl Arsenal {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            selected: Some(Weapon::Primary),
            reserve: tuning.start_reserve,
            magazine: tuning.magazine_size,
            max_magazine: tuning.magazine_size,
            reload_started_ms: None,
            last_shot_ms: None,
            last_switch_ms: None,
            trigger_was_down: false,
        }
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_started_ms.is_some()
    }

    fn switch_allowed(&self, now_ms: u64, debounce_ms: u64) -> bool {
        self.last_switch_ms
            .is_none_or(|t| now_ms.saturating_sub(t) >= debounce_ms)
    }

    /// Draw a specific weapon. Re-selecting the drawn weapon is a no-op.
    pub fn select(&mut self, weapon: Weapon, now_ms: u64, debounce_ms: u64) -> bool {
        if self.selected == Some(weapon) || !self.switch_allowed(now_ms, debounce_ms) {
            return false;
        }
        self.selected = Some(weapon);
        self.last_switch_ms = Some(now_ms);
        true
    }

    /// Swap to the other weapon (or draw the primary if none is drawn)
    pub fn toggle(&mut self, now_ms: u64, debounce_ms: u64) -> bool {
        let next = self.selected.map_or(Weapon::Primary, Weapon::other);
        self.select(next, now_ms, debounce_ms)
    }

    /// Begin a reload if the magazine is not full and none is running
    pub fn start_reload(&mut self, now_ms: u64) -> bool {
        if self.is_reloading() || self.magazine >= self.max_magazine {
            return false;
        }
        self.reload_started_ms = Some(now_ms);
        true
    }

    /// Complete a running reload once `reload_ms` has elapsed
    pub fn finish_reload(&mut self, now_ms: u64, reload_ms: u64) -> bool {
        match self.reload_started_ms {
            Some(start) if now_ms.saturating_sub(start) >= reload_ms => {
                self.magazine = self.max_magazine;
                self.reload_started_ms = None;
                true
            }
            _ => false,
        }
    }

    /// Fraction of the running reload that has elapsed
    pub fn reload_progress(&self, now_ms: u64, reload_ms: u64) -> Option<f32> {
        self.reload_started_ms.map(|start| {
            if reload_ms == 0 {
                1.0
            } else {
                (now_ms.saturating_sub(start) as f32 / reload_ms as f32).min(1.0)
            }
        })
    }

    /// Raise the reserve by `amount`, capped; returns how much was added
    pub fn add_reserve(&mut self, amount: u32, cap: u32) -> u32 {
        let before = self.reserve;
        self.reserve = self.reserve.saturating_add(amount).min(cap.max(before));
        self.reserve - before
    }

    /// Apply this tick's fire input. Updates edge detection every call.
    pub fn try_fire(&mut self, fire_held: bool, now_ms: u64, cooldown_ms: u64) -> FireOutcome {
        let fresh_press = fire_held && !self.trigger_was_down;
        self.trigger_was_down = fire_held;

        if !fire_held {
            return FireOutcome::Idle;
        }
        let Some(weapon) = self.selected else {
            return FireOutcome::Idle;
        };
        let cooled = self
            .last_shot_ms
            .is_none_or(|t| now_ms.saturating_sub(t) >= cooldown_ms);
        if !cooled {
            return FireOutcome::Idle;
        }

        match weapon {
            Weapon::Primary => {
                if self.reserve == 0 {
                    return FireOutcome::Idle;
                }
                self.reserve -= 1;
            }
            Weapon::Secondary => {
                if self.is_reloading() || !fresh_press {
                    return FireOutcome::Idle;
                }
                if self.magazine == 0 {
                    return FireOutcome::ReloadNeeded;
                }
                self.magazine -= 1;
            }
        }

        self.last_shot_ms = Some(now_ms);
        FireOutcome::Fired(weapon)
    }
}

/// Weapon step: reload completion, switching, reload requests, firing
pub fn update(state: &mut GameState, input: &TickInput) {
    let now = state.time_ms;
    let reload_ms = state.tuning.reload_ms;
    let debounce_ms = state.tuning.weapon_switch_debounce_ms;

    if state.player.arsenal.finish_reload(now, reload_ms) {
        state.reload_prompt = false;
        log::debug!("Reload finished at {} ms", now);
        state.emit(GameEvent::ReloadFinished);
    }

    let arsenal = &mut state.player.arsenal;
    let switched = match input.weapon_select {
        Some(weapon) => arsenal.select(weapon, now, debounce_ms),
        None if input.weapon_toggle => arsenal.toggle(now, debounce_ms),
        None => false,
    };
    if switched {
        if let Some(weapon) = arsenal.selected {
            state.emit(GameEvent::WeaponSwitched { weapon });
        }
    }

    if input.reload_pressed && state.player.arsenal.start_reload(now) {
        log::debug!("Reload started at {} ms", now);
        state.emit(GameEvent::ReloadStarted);
    }

    let cooldown_ms = state.tuning.fire_cooldown_ms;
    match state.player.arsenal.try_fire(input.fire_held, now, cooldown_ms) {
        FireOutcome::Idle => {}
        FireOutcome::ReloadNeeded => {
            state.reload_prompt = true;
            state.emit(GameEvent::ReloadNeeded);
        }
        FireOutcome::Fired(weapon) => {
            let id = state.next_entity_id();
            let pos = state.player.pos;
            let vel = unit_vector(state.player.angle) * state.tuning.projectile_speed;
            state.projectiles.insert(Projectile {
                id,
                pos,
                vel,
                weapon,
                alive: true,
            });
            state.emit(GameEvent::ShotFired {
                projectile: id,
                weapon,
                pos,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arsenal() -> Arsenal {
        Arsenal::new(&Tuning::default())
    }

    #[test]
    fn test_primary_fires_continuously_with_cooldown() {
        let mut a = arsenal();
        assert_eq!(a.try_fire(true, 1000, 150), FireOutcome::Fired(Weapon::Primary));
        // Held, but cooldown not elapsed
        assert_eq!(a.try_fire(true, 1100, 150), FireOutcome::Idle);
        // Still held, cooldown elapsed: continuous fire
        assert_eq!(a.try_fire(true, 1150, 150), FireOutcome::Fired(Weapon::Primary));
        assert_eq!(a.reserve, 33);
    }

    #[test]
    fn test_primary_empty_reserve() {
        let mut a = arsenal();
        a.reserve = 0;
        assert_eq!(a.try_fire(true, 1000, 150), FireOutcome::Idle);
        assert_eq!(a.reserve, 0);
    }

    #[test]
    fn test_secondary_one_shot_per_press() {
        let mut a = arsenal();
        a.selected = Some(Weapon::Secondary);
        assert_eq!(a.try_fire(true, 0, 150), FireOutcome::Fired(Weapon::Secondary));
        // Held for a long time: no more shots
        for t in (200..2000).step_by(100) {
            assert_eq!(a.try_fire(true, t, 150), FireOutcome::Idle);
        }
        assert_eq!(a.magazine, 7);
        // Release, press again
        assert_eq!(a.try_fire(false, 2000, 150), FireOutcome::Idle);
        assert_eq!(a.try_fire(true, 2100, 150), FireOutcome::Fired(Weapon::Secondary));
        assert_eq!(a.magazine, 6);
    }

    #[test]
    fn test_cooldown_shared_between_weapons() {
        let mut a = arsenal();
        assert_eq!(a.try_fire(true, 1000, 150), FireOutcome::Fired(Weapon::Primary));
        a.try_fire(false, 1016, 150);
        assert!(a.select(Weapon::Secondary, 1020, 0));
        assert_eq!(a.try_fire(true, 1050, 150), FireOutcome::Idle);
    }

    #[test]
    fn test_empty_magazine_signals_reload() {
        let mut a = arsenal();
        a.selected = Some(Weapon::Secondary);
        a.magazine = 0;
        assert_eq!(a.try_fire(true, 0, 150), FireOutcome::ReloadNeeded);
        // Holding does not repeat the hint
        assert_eq!(a.try_fire(true, 500, 150), FireOutcome::Idle);
    }

    #[test]
    fn test_reload_cycle() {
        let mut a = arsenal();
        assert!(!a.start_reload(0), "full magazine cannot reload");

        a.magazine = 3;
        assert!(a.start_reload(1000));
        assert!(!a.start_reload(1100), "already reloading");
        assert!(!a.finish_reload(2499, 1500));
        assert_eq!(a.reload_progress(1750, 1500), Some(0.5));
        assert!(a.finish_reload(2500, 1500));
        assert_eq!(a.magazine, 8);
        assert!(!a.is_reloading());
        assert!(!a.finish_reload(4000, 1500), "completes exactly once");
    }

    #[test]
    fn test_no_secondary_fire_while_reloading() {
        let mut a = arsenal();
        a.selected = Some(Weapon::Secondary);
        a.magazine = 2;
        assert!(a.start_reload(0));
        assert_eq!(a.try_fire(true, 200, 150), FireOutcome::Idle);
        assert_eq!(a.magazine, 2);
    }

    #[test]
    fn test_switch_debounce() {
        let mut a = arsenal();
        assert!(a.toggle(1000, 200));
        assert_eq!(a.selected, Some(Weapon::Secondary));
        assert!(!a.toggle(1100, 200));
        assert_eq!(a.selected, Some(Weapon::Secondary));
        assert!(a.toggle(1200, 200));
        assert_eq!(a.selected, Some(Weapon::Primary));
        assert!(!a.select(Weapon::Primary, 5000, 200), "already drawn");
    }

    #[test]
    fn test_no_weapon_drawn() {
        let mut a = arsenal();
        a.selected = None;
        assert_eq!(a.try_fire(true, 0, 150), FireOutcome::Idle);
        assert!(a.toggle(0, 200));
        assert_eq!(a.selected, Some(Weapon::Primary));
    }

    #[test]
    fn test_reserve_cap() {
        let mut a = arsenal();
        assert_eq!(a.add_reserve(30, 100), 30);
        assert_eq!(a.add_reserve(100, 100), 35);
        assert_eq!(a.reserve, 100);
    }

    #[test]
    fn test_update_spawns_projectile_along_facing() {
        let mut state = GameState::with_defaults(1);
        state.player.angle = std::f32::consts::FRAC_PI_2;
        let input = TickInput {
            fire_held: true,
            ..Default::default()
        };
        update(&mut state, &input);
        assert_eq!(state.projectiles.len(), 1);
        let p = state.projectiles.iter().next().unwrap();
        assert_eq!(p.pos, state.player.pos);
        assert!(p.vel.x.abs() < 1e-4 && (p.vel.y - 8.0).abs() < 1e-4);
        assert!(matches!(state.events[0], GameEvent::ShotFired { .. }));
    }

    #[test]
    fn test_update_reload_prompt_lifecycle() {
        let mut state = GameState::with_defaults(1);
        state.player.arsenal.selected = Some(Weapon::Secondary);
        state.player.arsenal.magazine = 0;
        let fire = TickInput {
            fire_held: true,
            ..Default::default()
        };
        update(&mut state, &fire);
        assert!(state.reload_prompt);
        assert!(state.events.contains(&GameEvent::ReloadNeeded));

        let reload = TickInput {
            reload_pressed: true,
            ..Default::default()
        };
        state.time_ms = 100;
        update(&mut state, &reload);
        state.time_ms = 1600;
        update(&mut state, &TickInput::default());
        assert!(!state.reload_prompt);
        assert_eq!(state.player.arsenal.magazine, 8);
    }
}
