//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied `dt` only, no clocks
//! - Seeded RNG only
//! - Stable iteration order (by slot index)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod player;
pub mod pool;
pub mod simulation;
pub mod state;
pub mod tick;

pub use collision::{CheckResult, CollisionCause, CollisionDetector, find_collision};
pub use difficulty::{Difficulty, DifficultyProfile};
pub use player::{Player, PlayerStep};
pub use pool::{ObstaclePool, ObstacleSlot};
pub use simulation::Simulation;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
