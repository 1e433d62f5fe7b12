//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick, one step per host frame, no sub-stepping
//! - Seeded RNG only
//! - No rendering, audio, or platform dependencies; the outside world sees
//!   only [`Snapshot`]s and [`GameEvent`]s

pub mod particles;
pub mod physics;
pub mod pickup;
pub mod state;
pub mod tick;

pub use state::{
    GameEvent, GamePhase, GameState, Particle, ParticleKind, Platform, Player, PlayerPose,
    Snapshot, Treasure, TreasureKind,
};
pub use tick::{TickInput, tick};
