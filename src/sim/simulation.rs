//! Run driver that owns the state and its telemetry collaborator

use serde_json::json;

use super::difficulty::Difficulty;
use super::state::{GameEvent, GameState};
use super::tick::{TickInput, tick};
use crate::telemetry::{NullTelemetry, Telemetry, TelemetryCategory, TelemetryEvent, TelemetryLevel};
use crate::tuning::Tuning;

/// A single-threaded, frame-driven run
///
/// The caller supplies `dt` and the jump flag once per rendered frame and
/// drains the returned events. After a collision the caller must
/// [`reset`](Self::reset) before stepping again.
#[derive(Debug)]
pub struct Simulation<T: Telemetry = NullTelemetry> {
    state: GameState,
    telemetry: T,
}

impl Simulation<NullTelemetry> {
    /// Simulation without diagnostics
    pub fn quiet(difficulty: Difficulty, seed: u64) -> Self {
        Self::new(difficulty, seed, NullTelemetry)
    }
}

impl<T: Telemetry> Simulation<T> {
    pub fn new(difficulty: Difficulty, seed: u64, telemetry: T) -> Self {
        Self::with_tuning(difficulty, seed, Tuning::default(), telemetry)
    }

    pub fn with_tuning(difficulty: Difficulty, seed: u64, tuning: Tuning, telemetry: T) -> Self {
        let mut sim = Self {
            state: GameState::with_tuning(difficulty, seed, tuning),
            telemetry,
        };
        sim.announce_start();
        sim
    }

    /// Advance one frame
    ///
    /// # Panics
    ///
    /// On a negative or non-finite `dt`, or when called after game over.
    pub fn step(&mut self, dt: f32, jump: bool) -> Vec<GameEvent> {
        self.step_input(&TickInput { jump }, dt)
    }

    pub fn step_input(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        tick(&mut self.state, input, dt, &mut self.telemetry)
    }

    /// Start a fresh run with the same difficulty and tuning
    pub fn reset(&mut self, seed: u64) {
        self.state.reset(seed);
        self.announce_start();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn telemetry(&self) -> &T {
        &self.telemetry
    }

    pub fn telemetry_mut(&mut self) -> &mut T {
        &mut self.telemetry
    }

    pub fn into_telemetry(self) -> T {
        self.telemetry
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    fn announce_start(&mut self) {
        if self.telemetry.enabled(TelemetryLevel::Info, TelemetryCategory::Game) {
            self.telemetry.emit(
                TelemetryEvent::info(TelemetryCategory::Game, "run started").with_data(json!({
                    "difficulty": self.state.difficulty,
                    "seed": self.state.seed,
                    "profile": self.state.profile,
                })),
            );
        }
    }
}
