//! Demo autopilot
//!
//! Plays the game by hovering around the gap of the next obstacle. Used by
//! the headless driver and by tests that need a run to survive.

use super::pool::ObstacleSlot;
use super::state::GameState;
use super::tick::TickInput;
use crate::tuning::Tuning;

/// Height gained by a single jump from rest
pub fn jump_apex(tuning: &Tuning) -> f32 {
    if tuning.gravity <= 0.0 {
        return 0.0;
    }
    tuning.jump_force * tuning.jump_force / (2.0 * tuning.gravity)
}

/// Nearest slot the player has not fully cleared yet
pub fn next_slot(state: &GameState) -> Option<&ObstacleSlot> {
    let tuning = &state.tuning;
    let cleared_x = tuning.player_anchor_x - tuning.pipe_half_width - tuning.player_half_extent;
    state
        .pool
        .slots()
        .iter()
        .filter(|s| s.center_x > cleared_x)
        .min_by(|a, b| a.center_x.total_cmp(&b.center_x))
}

/// Jump when below the aim point and falling
///
/// The aim sits half a jump below the gap center, so each hop arcs
/// symmetrically through the middle of the gap.
pub fn should_jump(state: &GameState) -> bool {
    let gap_center = next_slot(state).map(|s| s.gap_center_y).unwrap_or(0.0);
    let aim = gap_center - jump_apex(&state.tuning) / 2.0;
    state.player.position.y < aim && state.player.vertical_velocity > 0.0
}

/// Autopilot decision as a tick input
pub fn input(state: &GameState) -> TickInput {
    TickInput {
        jump: should_jump(state),
    }
}
