//! Timed powerup bookkeeping

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState};

/// The single speed powerup. Re-activating resets the expiry (last pickup wins).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Powerup {
    active: bool,
    expires_ms: u64,
}

impl Powerup {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn expires_ms(&self) -> Option<u64> {
        self.active.then_some(self.expires_ms)
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        if self.active {
            self.expires_ms.saturating_sub(now_ms)
        } else {
            0
        }
    }

    pub fn activate(&mut self, now_ms: u64, duration_ms: u64) -> u64 {
        self.active = true;
        self.expires_ms = now_ms.saturating_add(duration_ms);
        self.expires_ms
    }

    /// Deactivate once the clock reaches the expiry; true on the transition
    pub fn expire_if_due(&mut self, now_ms: u64) -> bool {
        if self.active && now_ms >= self.expires_ms {
            self.active = false;
            true
        } else {
            false
        }
    }
}

/// Turn the powerup on (or extend it) and boost player speed
pub fn activate_powerup(state: &mut GameState) {
    let expires_ms = state
        .powerup
        .activate(state.time_ms, state.tuning.powerup_duration_ms);
    state.player.speed = state.tuning.boosted_speed;
    log::debug!("Powerup active until {} ms", expires_ms);
    state.emit(GameEvent::PowerupActivated { expires_ms });
}

/// Expiry check; restores base speed when the powerup runs out
pub fn update(state: &mut GameState) {
    if state.powerup.expire_if_due(state.time_ms) {
        state.player.speed = state.tuning.base_speed;
        log::debug!("Powerup expired at {} ms", state.time_ms);
        state.emit(GameEvent::PowerupExpired);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_exactly_at_duration() {
        let mut state = GameState::with_defaults(1);
        state.time_ms = 10_000;
        activate_powerup(&mut state);
        assert!(state.powerup.is_active());
        assert_eq!(state.player.speed, 5.0);

        state.time_ms = 14_999;
        update(&mut state);
        assert!(state.powerup.is_active());
        assert_eq!(state.player.speed, 5.0);

        state.time_ms = 15_000;
        update(&mut state);
        assert!(!state.powerup.is_active());
        assert_eq!(state.player.speed, 3.0);
        assert_eq!(state.events.last(), Some(&GameEvent::PowerupExpired));
    }

    #[test]
    fn test_last_pickup_wins() {
        let mut p = Powerup::default();
        p.activate(0, 5000);
        p.activate(3000, 5000);
        assert!(!p.expire_if_due(5000));
        assert_eq!(p.remaining_ms(5000), 3000);
        assert!(p.expire_if_due(8000));
        assert!(!p.expire_if_due(9000), "only one transition");
        assert_eq!(p.expires_ms(), None);
    }
}
