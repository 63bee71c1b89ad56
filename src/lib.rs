//! Flappy Runner - simulation core for a side-scrolling obstacle runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, obstacle pool, collisions)
//! - `telemetry`: Structured diagnostic events emitted by the simulation
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod telemetry;
pub mod tuning;

pub use sim::{Difficulty, DifficultyProfile, GameEvent, GameState, Simulation};
pub use telemetry::{LogTelemetry, NullTelemetry, Telemetry, TelemetryEvent};
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Fixed simulation timestep used by the driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = 15.0;
    /// Upward speed a jump resets vertical velocity to
    pub const JUMP_FORCE: f32 = 7.0;
    /// Terminal fall speed
    pub const MAX_VELOCITY: f32 = 10.0;
    /// Converts a difficulty speed into world units per second
    pub const FORWARD_SCALE: f32 = 5.0;

    /// Bank angle per unit of vertical velocity
    pub const BANK_FACTOR: f32 = 0.1;
    /// Maximum bank angle (radians, ~30 degrees)
    pub const MAX_BANK: f32 = std::f32::consts::FRAC_PI_6;
    /// Per-frame smoothing toward the target bank angle
    pub const BANK_SMOOTHING: f32 = 0.1;

    /// Number of obstacle slots in the pool
    pub const POOL_SIZE: usize = 5;
    /// Horizontal distance between consecutive obstacles
    pub const PIPE_SPACING: f32 = 15.0;
    /// Slots behind this x are recycled to the front
    pub const RECYCLE_THRESHOLD: f32 = -20.0;
    /// Gap centers are drawn from [-GAP_RANGE, GAP_RANGE]
    pub const GAP_RANGE: f32 = 3.0;
    /// Half the horizontal thickness of an obstacle column
    pub const PIPE_HALF_WIDTH: f32 = 1.0;

    /// Player box is 1x1x1
    pub const PLAYER_HALF_EXTENT: f32 = 0.5;
    /// Player x in the scrolling frame (camera anchor)
    pub const PLAYER_ANCHOR_X: f32 = 0.0;
    /// World ceiling/floor
    pub const WORLD_BOUND: f32 = 8.0;

    /// Fraction of frames that emit a state snapshot
    pub const SNAPSHOT_SAMPLE_RATE: f32 = 0.01;
}

/// Linear interpolation from `a` to `b` by `t`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
