//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (world generation and rocket placement)
//! - Stable iteration order (planet order is fixed for a round)
//! - No rendering or platform dependencies

pub mod collision;
pub mod physics;
pub mod state;
pub mod tick;
pub mod vec2;
pub mod worldgen;

pub use collision::{CollisionOutcome, resolve_collisions};
pub use state::{
    GameEvent, GamePhase, GameState, MIN_PLANETS, Planet, Rocket, ScheduledTimer, TimerKind, World,
};
pub use tick::{TickInput, tick};
pub use vec2::{div_or_keep, project_onto_or_zero};
pub use worldgen::generate_world;
