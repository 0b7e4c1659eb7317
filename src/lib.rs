//! Arena Shooter - tick simulation core for a top-down arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision, weapons, combat, AI, economy)
//! - `tuning`: Data-driven game balance
//! - `level`: Static level layout (walls, doors, buy stations)
//!
//! Rendering, HUD, menus and raw input polling live outside this crate. A host
//! feeds [`sim::TickInput`] intents into [`sim::tick`] and hands the resulting
//! [`sim::WorldSnapshot`] to its presentation layer.

pub mod level;
pub mod sim;
pub mod tuning;

pub use level::{LevelError, LevelLayout};
pub use tuning::{StationPolicy, Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation timestep in milliseconds (~60 Hz)
    pub const SIM_DT_MS: u64 = 16;
    /// Maximum substeps per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Collision square side of the player
    pub const PLAYER_SIZE: f32 = 16.0;
    /// Collision square side of an enemy
    pub const ENEMY_SIZE: f32 = 16.0;
    /// Collision square side of a projectile (used against geometry only)
    pub const PROJECTILE_SIZE: f32 = 4.0;
    /// Visual/pickup size of a loot drop
    pub const DROP_SIZE: f32 = 12.0;
    /// Default buy station interaction radius
    pub const BUY_STATION_SIZE: f32 = 40.0;
}

/// Angle (radians) of the direction from `from` toward `to`
#[inline]
pub fn heading_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector pointing along `angle`
#[inline]
pub fn unit_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_heading_to() {
        let a = heading_to(Vec2::ZERO, Vec2::new(0.0, 10.0));
        assert!((a - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_unit_vector_is_unit() {
        for i in 0..16 {
            let v = unit_vector(i as f32 * 0.4);
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
    }
}
