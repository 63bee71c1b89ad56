//! Player kinematics: gravity, jump impulse, forward motion and banking

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyProfile;
use crate::lerp;
use crate::tuning::Tuning;

/// What happened during a single player step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerStep {
    /// A jump impulse was applied this frame
    pub jumped: bool,
    /// Falling speed reached the terminal clamp this frame, having been
    /// below it before. Stays false while the player keeps falling at the cap.
    pub reached_terminal_velocity: bool,
}

/// The player entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// x = distance travelled, y = height, z is constant
    pub position: Vec3,
    /// Positive means falling
    pub vertical_velocity: f32,
    /// Cosmetic banking (radians), follows velocity
    pub bank_angle: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            vertical_velocity: 0.0,
            bank_angle: 0.0,
        }
    }
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrate one frame
    ///
    /// Gravity accumulates first, then a jump *replaces* the velocity with
    /// `-jump_force`. Holding jump every frame therefore hovers instead of
    /// accelerating upward.
    pub fn step(&mut self, dt: f32, jump: bool, profile: &DifficultyProfile, tuning: &Tuning) -> PlayerStep {
        let mut step = PlayerStep::default();

        let was_below_cap = self.vertical_velocity < tuning.max_velocity;
        self.vertical_velocity += tuning.gravity * dt;
        if self.vertical_velocity >= tuning.max_velocity {
            self.vertical_velocity = tuning.max_velocity;
            step.reached_terminal_velocity = was_below_cap && !jump;
        }

        if jump {
            self.vertical_velocity = -tuning.jump_force;
            step.jumped = true;
        }

        self.position.y -= self.vertical_velocity * dt;
        self.position.x += profile.forward_speed * tuning.forward_scale * dt;

        let target_bank = (self.vertical_velocity * tuning.bank_factor)
            .clamp(-tuning.max_bank, tuning.max_bank);
        self.bank_angle = lerp(self.bank_angle, target_bank, tuning.bank_smoothing);

        step
    }

    /// Height of the player's top edge
    #[inline]
    pub fn top(&self, tuning: &Tuning) -> f32 {
        self.position.y + tuning.player_half_extent
    }

    /// Height of the player's bottom edge
    #[inline]
    pub fn bottom(&self, tuning: &Tuning) -> f32 {
        self.position.y - tuning.player_half_extent
    }
}
