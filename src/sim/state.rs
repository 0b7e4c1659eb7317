//! Game state and core simulation types
//!
//! `GameState` is the single simulation context. Every subsystem step takes
//! it by mutable reference; nothing keeps a private copy of world state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::Powerup;
use super::geometry::{Bounds, Geometry};
use super::pool::{EntityPool, IdAllocator, PoolEntity};
use super::weapon::{Arsenal, Weapon};
use crate::level::LevelLayout;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Ticks are ignored until unpaused
    Paused,
    /// Player died; only `start()` leaves this phase
    GameOver,
}

/// Loot kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropKind {
    Ammo,
    Money,
    Powerup,
}

/// What a buy station sells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationKind {
    Ammo,
    Health,
}

/// Stateless, inexhaustible shop point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyStation {
    pub pos: Vec2,
    pub kind: StationKind,
    pub cost: u32,
    /// Interaction radius (the player's half-size is added on top)
    pub radius: f32,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    /// Facing angle (radians)
    pub angle: f32,
    pub health: f32,
    pub max_health: f32,
    pub kills: u32,
    /// Movement per tick (base or boosted)
    pub speed: f32,
    pub currency: u32,
    pub arsenal: Arsenal,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            angle: 0.0,
            health: tuning.max_health,
            max_health: tuning.max_health,
            kills: 0,
            speed: tuning.base_speed,
            currency: tuning.start_currency,
            arsenal: Arsenal::new(tuning),
        }
    }

    /// Remove health, never going below zero
    pub fn damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    /// Add health, capped at max health
    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Debit `cost` if affordable. Currency is untouched on failure.
    pub fn try_spend(&mut self, cost: u32) -> bool {
        match self.currency.checked_sub(cost) {
            Some(rest) => {
                self.currency = rest;
                true
            }
            None => false,
        }
    }

    pub fn earn(&mut self, amount: u32) {
        self.currency = self.currency.saturating_add(amount);
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub speed: f32,
    pub angle: f32,
    pub alive: bool,
}

impl PoolEntity for Enemy {
    fn id(&self) -> u32 {
        self.id
    }
    fn is_alive(&self) -> bool {
        self.alive
    }
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub weapon: Weapon,
    pub alive: bool,
}

impl PoolEntity for Projectile {
    fn id(&self) -> u32 {
        self.id
    }
    fn is_alive(&self) -> bool {
        self.alive
    }
}

#[derive(Debug, Clone)]
pub struct LootDrop {
    pub id: u32,
    pub pos: Vec2,
    pub kind: DropKind,
    pub spawned_ms: u64,
    pub alive: bool,
}

impl PoolEntity for LootDrop {
    fn id(&self) -> u32 {
        self.id
    }
    fn is_alive(&self) -> bool {
        self.alive
    }
}

/// Something that happened during the last tick, for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    ShotFired { projectile: u32, weapon: Weapon, pos: Vec2 },
    /// Fresh trigger press on an empty magazine
    ReloadNeeded,
    ReloadStarted,
    ReloadFinished,
    WeaponSwitched { weapon: Weapon },
    EnemySpawned { enemy: u32, pos: Vec2 },
    EnemyHit { enemy: u32, projectile: u32, pos: Vec2 },
    EnemyKilled { enemy: u32, pos: Vec2 },
    ProjectileBlocked { projectile: u32, pos: Vec2 },
    DropSpawned { drop: u32, kind: DropKind, pos: Vec2 },
    DropPickedUp { drop: u32, kind: DropKind, pos: Vec2 },
    DropExpired { drop: u32 },
    DoorOpened { door: u32, cost: u32 },
    StationPurchased { kind: StationKind, cost: u32, pos: Vec2 },
    PowerupActivated { expires_ms: u64 },
    PowerupExpired,
    PlayerDamaged { amount: f32 },
    GameOver,
}

/// Complete simulation state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Injected random source (spawning, loot rolls)
    pub rng: Pcg32,
    /// Simulation clock in milliseconds
    pub time_ms: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub bounds: Bounds,
    pub geometry: Geometry,
    pub stations: Vec<BuyStation>,
    pub player: Player,
    pub enemies: EntityPool<Enemy>,
    pub projectiles: EntityPool<Projectile>,
    pub drops: EntityPool<LootDrop>,
    pub powerup: Powerup,
    /// Clock value of the last spawn attempt
    pub last_spawn_ms: u64,
    /// Set when an empty magazine was triggered, cleared by a finished reload
    pub reload_prompt: bool,
    /// Events of the most recent tick
    pub events: Vec<GameEvent>,
    pub level: LevelLayout,
    pub tuning: Tuning,
    ids: IdAllocator,
}

impl GameState {
    /// Create a new session on the given level
    pub fn new(seed: u64, level: LevelLayout, tuning: Tuning) -> Self {
        log::info!("Starting session with seed {}", seed);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ms: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            bounds: level.bounds(),
            geometry: level.build_geometry(),
            stations: level.stations.clone(),
            player: Player::new(level.player_start, &tuning),
            enemies: EntityPool::new(),
            projectiles: EntityPool::new(),
            drops: EntityPool::new(),
            powerup: Powerup::default(),
            last_spawn_ms: 0,
            reload_prompt: false,
            events: Vec::new(),
            level,
            tuning,
            ids: IdAllocator::default(),
        }
    }

    /// Session on the reference level with default balance
    pub fn with_defaults(seed: u64) -> Self {
        Self::new(seed, LevelLayout::default(), Tuning::default())
    }

    /// Reset everything to initial values (same seed, level and tuning)
    pub fn start(&mut self) {
        let level = std::mem::take(&mut self.level);
        let tuning = std::mem::take(&mut self.tuning);
        *self = Self::new(self.seed, level, tuning);
    }

    /// Reset with a new seed
    pub fn restart_with_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.start();
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        self.ids.allocate()
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
