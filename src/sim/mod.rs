//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, re-seeded per round
//! - Stable iteration order (spawn order)
//! - Strict phase order per tick: spawn, update, collide
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod physics;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod trench;

pub use camera::{Camera, Projected};
pub use collision::{CollisionOutcome, resolve_collisions};
pub use rng::{TrenchRng, round_seed};
pub use spawn::{Difficulty, reset_round};
pub use state::{Enemy, GameEvent, GamePhase, Pipe, Ship, Shot, ShotKind, SpawnTimers, World};
pub use tick::{TickInput, advance_round, lose_life, start_game, tick};
pub use trench::{Corridor, corridor_half_width};
