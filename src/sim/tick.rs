//! Per-frame simulation tick
//!
//! Order matters: the player integrates, the pool scrolls and recycles, and
//! only then does the detector compare the updated transforms.

use rand::Rng;
use serde_json::json;

use super::state::{GameEvent, GamePhase, GameState};
use crate::telemetry::{Telemetry, TelemetryCategory, TelemetryEvent, TelemetryLevel};

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Jump pressed this frame
    pub jump: bool,
}

impl TickInput {
    pub fn jump() -> Self {
        Self { jump: true }
    }
}

/// Advance the run by `dt` seconds and return the events it produced
///
/// # Panics
///
/// If `dt` is negative or not finite, or if the run is already over. Both
/// are caller bugs: continuing would corrupt pool spacing or re-report the
/// terminal event.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    telemetry: &mut dyn Telemetry,
) -> Vec<GameEvent> {
    assert!(dt.is_finite() && dt >= 0.0, "tick called with invalid dt: {dt}");
    assert!(
        state.phase == GamePhase::Playing,
        "tick called after game over without reset"
    );

    state.frame += 1;
    state.elapsed += dt;

    let player_step = state.player.step(dt, input.jump, &state.profile, &state.tuning);
    if player_step.jumped && telemetry.enabled(TelemetryLevel::Debug, TelemetryCategory::Input) {
        telemetry.emit(
            TelemetryEvent::debug(TelemetryCategory::Input, "jump").with_data(json!({
                "frame": state.frame,
                "y": state.player.position.y,
            })),
        );
    }

    if player_step.reached_terminal_velocity
        && telemetry.enabled(TelemetryLevel::Debug, TelemetryCategory::Character)
    {
        telemetry.emit(
            TelemetryEvent::debug(TelemetryCategory::Character, "terminal velocity").with_data(json!({
                "frame": state.frame,
                "y": state.player.position.y,
                "vertical_velocity": state.player.vertical_velocity,
            })),
        );
    }

    let recycled = state.pool.advance(dt, &state.profile, &state.tuning);
    if !recycled.is_empty() && telemetry.enabled(TelemetryLevel::Debug, TelemetryCategory::Terrain) {
        for &index in &recycled {
            let slot = &state.pool.slots()[index];
            telemetry.emit(
                TelemetryEvent::debug(TelemetryCategory::Terrain, "obstacle recycled").with_data(json!({
                    "slot": index,
                    "center_x": slot.center_x,
                    "gap_center_y": slot.gap_center_y,
                })),
            );
        }
    }

    let result = state
        .detector
        .check(&state.player, &mut state.pool, &state.profile, &state.tuning);

    let mut events = Vec::with_capacity(result.scored.len().max(1));
    if let Some(cause) = result.collision {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::Collision {
            cause,
            final_score: state.score,
        });
        if telemetry.enabled(TelemetryLevel::Info, TelemetryCategory::Collision) {
            telemetry.emit(
                TelemetryEvent::info(TelemetryCategory::Collision, "collision").with_data(json!({
                    "cause": cause,
                    "score": state.score,
                    "frame": state.frame,
                    "y": state.player.position.y,
                })),
            );
        }
    } else {
        for slot in result.scored {
            state.score += 1;
            events.push(GameEvent::Score {
                slot,
                total: state.score,
            });
            if telemetry.enabled(TelemetryLevel::Info, TelemetryCategory::Score) {
                telemetry.emit(
                    TelemetryEvent::info(TelemetryCategory::Score, "obstacle passed")
                        .with_data(json!({ "slot": slot, "score": state.score })),
                );
            }
        }
    }

    emit_snapshot(state, telemetry);

    events
}

/// Occasionally record player and pool state for offline inspection
///
/// One draw per frame decides whether this frame is sampled, so the
/// character and terrain snapshots always land on the same frames.
fn emit_snapshot(state: &mut GameState, telemetry: &mut dyn Telemetry) {
    let rate = state.tuning.snapshot_sample_rate;
    let character = telemetry.enabled(TelemetryLevel::Debug, TelemetryCategory::Character);
    let terrain = telemetry.enabled(TelemetryLevel::Debug, TelemetryCategory::Terrain);
    if rate <= 0.0 || !(character || terrain) {
        return;
    }
    if state.diag_rng.random::<f32>() >= rate {
        return;
    }

    if character {
        let player = &state.player;
        telemetry.emit(
            TelemetryEvent::debug(TelemetryCategory::Character, "state snapshot").with_data(json!({
                "frame": state.frame,
                "position": [player.position.x, player.position.y, player.position.z],
                "vertical_velocity": player.vertical_velocity,
                "bank_angle": player.bank_angle,
                "score": state.score,
            })),
        );
    }

    if terrain {
        let slots: Vec<_> = state
            .pool
            .slots()
            .iter()
            .map(|s| {
                json!({
                    "center_x": s.center_x,
                    "world_x": s.world_x(state.player.position.x),
                    "gap_center_y": s.gap_center_y,
                    "scored": s.scored,
                })
            })
            .collect();
        telemetry.emit(
            TelemetryEvent::debug(TelemetryCategory::Terrain, "pool snapshot").with_data(json!({
                "frame": state.frame,
                "leading_x": state.pool.leading_x(),
                "slots": slots,
            })),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::{CollisionCause, Difficulty, autopilot};
    use crate::telemetry::NullTelemetry;

    #[test]
    fn test_free_fall_ends_in_bounds_collision() {
        let mut state = GameState::new(Difficulty::Easy, 1);
        let mut telemetry = NullTelemetry;

        let mut collisions = Vec::new();
        for _ in 0..600 {
            let events = tick(&mut state, &TickInput::default(), SIM_DT, &mut telemetry);
            collisions.extend(events.iter().filter(|e| matches!(e, GameEvent::Collision { .. })).copied());
            if state.is_over() {
                break;
            }
        }

        assert_eq!(collisions.len(), 1);
        assert!(state.is_over());
    }

    #[test]
    fn test_scores_accumulate() {
        let mut state = GameState::new(Difficulty::Easy, 11);
        let mut telemetry = NullTelemetry;

        let mut scored = 0;
        for _ in 0..(60 * 20) {
            let input = autopilot::input(&state);
            for event in tick(&mut state, &input, SIM_DT, &mut telemetry) {
                if let GameEvent::Score { total, .. } = event {
                    scored += 1;
                    assert_eq!(total, scored);
                }
            }
            if state.is_over() {
                break;
            }
        }

        assert!(scored >= 3, "only scored {scored}");
        assert_eq!(state.score, scored);
    }

    #[test]
    #[should_panic(expected = "after game over")]
    fn test_tick_after_game_over_panics() {
        let mut state = GameState::new(Difficulty::Normal, 1);
        state.player.position.y = 100.0;
        let mut telemetry = NullTelemetry;

        let events = tick(&mut state, &TickInput::default(), SIM_DT, &mut telemetry);
        assert!(matches!(
            events[0],
            GameEvent::Collision { cause: CollisionCause::Bounds, .. }
        ));
        tick(&mut state, &TickInput::default(), SIM_DT, &mut telemetry);
    }

    #[test]
    #[should_panic(expected = "invalid dt")]
    fn test_negative_dt_panics() {
        let mut state = GameState::new(Difficulty::Normal, 1);
        tick(&mut state, &TickInput::default(), -0.1, &mut NullTelemetry);
    }

    #[test]
    fn test_telemetry_on_jump_and_recycle() {
        let mut state = GameState::new(Difficulty::Normal, 3);
        let mut sink: Vec<TelemetryEvent> = Vec::new();

        tick(&mut state, &TickInput::jump(), SIM_DT, &mut sink);
        assert!(sink
            .iter()
            .any(|e| e.category == TelemetryCategory::Input && e.message == "jump"));

        // Fast-forward the trailing slot behind the threshold
        let threshold = state.tuning.recycle_threshold;
        state.pool.slots_mut()[0].center_x = threshold - 1.0;
        state.pool.slots_mut()[0].scored = true;
        tick(&mut state, &TickInput::jump(), SIM_DT, &mut sink);
        assert!(sink
            .iter()
            .any(|e| e.category == TelemetryCategory::Terrain && e.message == "obstacle recycled"));
    }

    #[test]
    fn test_snapshot_sampling_does_not_affect_gameplay() {
        let mut quiet = GameState::new(Difficulty::Normal, 21);
        let mut tuning = quiet.tuning.clone();
        tuning.snapshot_sample_rate = 1.0;
        let mut chatty = GameState::with_tuning(Difficulty::Normal, 21, tuning);

        let mut sink: Vec<TelemetryEvent> = Vec::new();
        for _ in 0..120 {
            let input = autopilot::input(&quiet);
            tick(&mut quiet, &input, SIM_DT, &mut NullTelemetry);
            tick(&mut chatty, &input, SIM_DT, &mut sink);
            if quiet.is_over() {
                break;
            }
        }

        assert_eq!(quiet.player, chatty.player);
        assert_eq!(quiet.pool.slots(), chatty.pool.slots());
        let count = |message: &str| sink.iter().filter(|e| e.message == message).count() as u64;
        assert_eq!(count("state snapshot"), chatty.frame);
        assert_eq!(count("pool snapshot"), chatty.frame);
    }

    #[test]
    fn test_pool_snapshot_lists_every_slot() {
        let mut tuning = crate::Tuning::default();
        tuning.snapshot_sample_rate = 1.0;
        let mut state = GameState::with_tuning(Difficulty::Normal, 8, tuning);
        let mut sink: Vec<TelemetryEvent> = Vec::new();

        tick(&mut state, &TickInput::jump(), SIM_DT, &mut sink);

        let snapshot = sink
            .iter()
            .find(|e| e.category == TelemetryCategory::Terrain && e.message == "pool snapshot")
            .unwrap();
        let slots = snapshot.data["slots"].as_array().unwrap();
        assert_eq!(slots.len(), state.pool.len());
        assert_eq!(snapshot.data["frame"], 1);
        for (json, slot) in slots.iter().zip(state.pool.slots()) {
            assert_eq!(json["center_x"].as_f64().unwrap() as f32, slot.center_x);
            assert_eq!(json["scored"].as_bool().unwrap(), slot.scored);
        }
    }

    #[test]
    fn test_terminal_velocity_reported_once() {
        let mut state = GameState::new(Difficulty::Normal, 5);
        // Tall enough to fall for two seconds without leaving the bounds
        state.tuning.world_bound = 100.0;
        let mut sink: Vec<TelemetryEvent> = Vec::new();

        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), SIM_DT, &mut sink);
            // Keep the player inside every gap so only falling is measured
            for slot in state.pool.slots_mut() {
                slot.gap_center_y = state.player.position.y;
            }
        }

        assert!(!state.is_over());
        let reports: Vec<_> = sink
            .iter()
            .filter(|e| e.category == TelemetryCategory::Character && e.message == "terminal velocity")
            .collect();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].data["vertical_velocity"], state.tuning.max_velocity as f64);
    }
}
