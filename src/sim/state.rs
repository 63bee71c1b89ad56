//! Game state and core simulation types
//!
//! Everything needed to reproduce a run lives here and is serializable.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionCause, CollisionDetector};
use super::difficulty::{Difficulty, DifficultyProfile};
use super::player::Player;
use super::pool::ObstaclePool;
use crate::tuning::Tuning;

/// Stream offset so diagnostic sampling never shares a sequence with gap placement
const DIAGNOSTIC_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended by a collision (terminal until reset)
    GameOver,
}

/// Events produced by a single tick, drained by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player passed an obstacle; `total` is the score after this event
    Score { slot: usize, total: u64 },
    /// Run ended; reported once per run
    Collision { cause: CollisionCause, final_score: u64 },
}

/// Complete run state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub difficulty: Difficulty,
    /// Cached parameters for `difficulty`
    pub profile: DifficultyProfile,
    pub tuning: Tuning,
    pub player: Player,
    pub pool: ObstaclePool,
    pub detector: CollisionDetector,
    /// Obstacles passed this run
    pub score: u64,
    pub phase: GamePhase,
    /// Simulated frames since the run started
    pub frame: u64,
    /// Simulated seconds since the run started
    pub elapsed: f32,
    /// Generator for diagnostic sampling only
    pub diag_rng: Pcg32,
}

impl GameState {
    /// Create a new run with default tuning
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_tuning(difficulty, seed, Tuning::default())
    }

    /// Create a new run with explicit tuning
    ///
    /// Panics if `tuning` fails [`Tuning::validate`]; callers loading tuning
    /// from outside should validate it first.
    pub fn with_tuning(difficulty: Difficulty, seed: u64, tuning: Tuning) -> Self {
        if let Err(e) = tuning.validate() {
            panic!("invalid tuning: {e}");
        }
        let pool = ObstaclePool::new(seed, &tuning);
        Self {
            seed,
            difficulty,
            profile: difficulty.profile(),
            tuning,
            player: Player::new(),
            pool,
            detector: CollisionDetector::new(),
            score: 0,
            phase: GamePhase::Playing,
            frame: 0,
            elapsed: 0.0,
            diag_rng: Pcg32::seed_from_u64(seed ^ DIAGNOSTIC_STREAM),
        }
    }

    /// Start over with a new seed, keeping difficulty and tuning
    pub fn reset(&mut self, seed: u64) {
        let tuning = std::mem::take(&mut self.tuning);
        *self = Self::with_tuning(self.difficulty, seed, tuning);
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
