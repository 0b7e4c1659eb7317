//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod ai;
pub mod autopilot;
pub mod combat;
pub mod economy;
pub mod effects;
pub mod geometry;
pub mod movement;
pub mod pool;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod weapon;

pub use economy::{InteractionPrompt, Purchase, interact, interaction_prompt};
pub use effects::Powerup;
pub use geometry::{Bounds, Door, Geometry, Rect};
pub use movement::resolve_move;
pub use pool::{EntityPool, IdAllocator, PoolEntity};
pub use snapshot::WorldSnapshot;
pub use state::{
    BuyStation, DropKind, Enemy, GameEvent, GamePhase, GameState, LootDrop, Player, Projectile,
    StationKind,
};
pub use tick::{Aim, Stepper, TickInput, tick};
pub use weapon::{Arsenal, FireOutcome, Weapon};
