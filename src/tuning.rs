//! Data-driven game balance
//!
//! Every number that is a policy rather than a structural constraint lives
//! here. JSON overrides may be partial; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

/// How many buy stations one interact press may purchase from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StationPolicy {
    /// Every affordable station in range is bought, in layout order
    #[default]
    AllInRange,
    /// Only the nearest station in range is considered
    NearestOnly,
}

/// Relative weights of the loot table (need not sum to 1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropWeights {
    pub ammo: f32,
    pub money: f32,
    pub powerup: f32,
}

impl Default for DropWeights {
    fn default() -> Self {
        Self {
            ammo: 0.40,
            money: 0.35,
            powerup: 0.25,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value: {0}")]
    Invalid(&'static str),
}

/// Game balance values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub max_health: f32,
    pub start_currency: u32,
    /// Movement per tick without a powerup
    pub base_speed: f32,
    /// Movement per tick while the powerup is active
    pub boosted_speed: f32,

    // === Weapons ===
    pub start_reserve: u32,
    /// Cap on the primary reserve for pickups and purchases
    pub reserve_cap: u32,
    pub magazine_size: u32,
    /// Minimum time between any two shots
    pub fire_cooldown_ms: u64,
    pub reload_ms: u64,
    pub weapon_switch_debounce_ms: u64,
    /// Projectile travel per tick
    pub projectile_speed: f32,
    pub projectile_damage: f32,
    /// Projectile-to-enemy center distance below which a hit lands
    pub hit_radius: f32,

    // === Loot ===
    pub kill_reward: u32,
    /// Probability that a kill leaves a drop
    pub drop_chance: f64,
    pub drop_weights: DropWeights,
    pub drop_ttl_ms: u64,
    /// Age after which a drop is reported as about to expire
    pub drop_expiring_ms: u64,
    pub drop_pickup_radius: f32,
    pub drop_ammo: u32,
    pub drop_money: u32,
    pub powerup_duration_ms: u64,

    // === Enemies ===
    pub spawn_interval_ms: u64,
    pub max_enemies: usize,
    pub spawn_min_distance: f32,
    pub spawn_max_distance: f32,
    pub spawn_attempts: u32,
    /// Spawn candidates are clamped this far inside the world edge
    pub spawn_edge_margin: f32,
    pub enemy_health: f32,
    pub enemy_base_speed: f32,
    /// Extra speed drawn uniformly from `[0, jitter)`
    pub enemy_speed_jitter: f32,
    /// Health removed from the player per tick of contact, per enemy
    pub contact_damage: f32,

    // === Economy ===
    pub door_interact_radius: f32,
    pub station_ammo_amount: u32,
    pub station_health_amount: f32,
    pub station_policy: StationPolicy,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            start_currency: 100,
            base_speed: 3.0,
            boosted_speed: 5.0,

            start_reserve: 35,
            reserve_cap: 100,
            magazine_size: 8,
            fire_cooldown_ms: 150,
            reload_ms: 1500,
            weapon_switch_debounce_ms: 200,
            projectile_speed: 8.0,
            projectile_damage: 10.0,
            hit_radius: 16.0,

            kill_reward: 25,
            drop_chance: 0.6,
            drop_weights: DropWeights::default(),
            drop_ttl_ms: 7000,
            drop_expiring_ms: 4000,
            drop_pickup_radius: 28.0,
            drop_ammo: 15,
            drop_money: 50,
            powerup_duration_ms: 5000,

            spawn_interval_ms: 2000,
            max_enemies: 15,
            spawn_min_distance: 400.0,
            spawn_max_distance: 600.0,
            spawn_attempts: 50,
            spawn_edge_margin: 30.0,
            enemy_health: 30.0,
            enemy_base_speed: 1.0,
            enemy_speed_jitter: 0.5,
            contact_damage: 0.5,

            door_interact_radius: 50.0,
            station_ammo_amount: 30,
            station_health_amount: 50.0,
            station_policy: StationPolicy::AllInRange,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.max_health <= 0.0 {
            return Err(TuningError::Invalid("max_health must be positive"));
        }
        if self.magazine_size == 0 {
            return Err(TuningError::Invalid("magazine_size must be at least 1"));
        }
        if self.start_reserve > self.reserve_cap {
            return Err(TuningError::Invalid("start_reserve exceeds reserve_cap"));
        }
        if !(0.0..=1.0).contains(&self.drop_chance) {
            return Err(TuningError::Invalid("drop_chance must be within [0, 1]"));
        }
        let w = self.drop_weights;
        if w.ammo < 0.0 || w.money < 0.0 || w.powerup < 0.0 || w.ammo + w.money + w.powerup <= 0.0 {
            return Err(TuningError::Invalid("drop_weights must be non-negative with a positive sum"));
        }
        if self.spawn_min_distance > self.spawn_max_distance {
            return Err(TuningError::Invalid("spawn_min_distance exceeds spawn_max_distance"));
        }
        if self.enemy_health <= 0.0 {
            return Err(TuningError::Invalid("enemy_health must be positive"));
        }
        Ok(())
    }
}
