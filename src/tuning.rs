//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`] so a run can be rebalanced
//! from a JSON file without recompiling. Missing fields fall back to the
//! values in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics, pool and collision parameters for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub gravity: f32,
    pub jump_force: f32,
    pub max_velocity: f32,
    pub forward_scale: f32,
    pub bank_factor: f32,
    pub max_bank: f32,
    pub bank_smoothing: f32,

    // === Obstacles ===
    pub pool_size: usize,
    pub pipe_spacing: f32,
    pub recycle_threshold: f32,
    pub gap_range: f32,
    pub pipe_half_width: f32,

    // === Collision ===
    pub player_half_extent: f32,
    pub player_anchor_x: f32,
    pub world_bound: f32,

    // === Diagnostics ===
    /// Probability per frame of a state snapshot (0 disables)
    pub snapshot_sample_rate: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            max_velocity: MAX_VELOCITY,
            forward_scale: FORWARD_SCALE,
            bank_factor: BANK_FACTOR,
            max_bank: MAX_BANK,
            bank_smoothing: BANK_SMOOTHING,

            pool_size: POOL_SIZE,
            pipe_spacing: PIPE_SPACING,
            recycle_threshold: RECYCLE_THRESHOLD,
            gap_range: GAP_RANGE,
            pipe_half_width: PIPE_HALF_WIDTH,

            player_half_extent: PLAYER_HALF_EXTENT,
            player_anchor_x: PLAYER_ANCHOR_X,
            world_bound: WORLD_BOUND,

            snapshot_sample_rate: SNAPSHOT_SAMPLE_RATE,
        }
    }
}

/// A tuning value that would break the simulation's invariants
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TuningError {
    #[error("pool_size must be at least 1")]
    EmptyPool,
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("recycle_threshold ({threshold}) must lie behind player_anchor_x ({anchor})")]
    ThresholdAheadOfAnchor { threshold: f32, anchor: f32 },
    #[error("snapshot_sample_rate must be within [0, 1] (got {0})")]
    SampleRateOutOfRange(f32),
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        // Plain struct of numbers, serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Load tuning from a JSON file, falling back to defaults on any problem
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    return tuning;
                }
                Err(e) => log::warn!("Invalid tuning file {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not read tuning file {}: {}", path.display(), e),
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Reject values that would break pool spacing or collision geometry
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.pool_size == 0 {
            return Err(TuningError::EmptyPool);
        }

        let positive = [
            ("pipe_spacing", self.pipe_spacing),
            ("forward_scale", self.forward_scale),
            ("world_bound", self.world_bound),
            ("pipe_half_width", self.pipe_half_width),
            ("player_half_extent", self.player_half_extent),
            ("max_velocity", self.max_velocity),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { field, value });
            }
        }

        if self.recycle_threshold >= self.player_anchor_x {
            return Err(TuningError::ThresholdAheadOfAnchor {
                threshold: self.recycle_threshold,
                anchor: self.player_anchor_x,
            });
        }

        if !(0.0..=1.0).contains(&self.snapshot_sample_rate) {
            return Err(TuningError::SampleRateOutOfRange(self.snapshot_sample_rate));
        }

        Ok(())
    }
}
