//! Collision and scoring detection
//!
//! Runs once per frame after the player and the pool have moved. A frame
//! yields either exactly one collision or zero-or-more scored slots.

use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyProfile;
use super::player::Player;
use super::pool::{ObstaclePool, ObstacleSlot};
use crate::tuning::Tuning;

/// What the player hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionCause {
    /// Overlapped an obstacle pair outside its gap
    Obstacle { slot: usize },
    /// Left the world's ceiling/floor
    Bounds,
}

/// Result of a detection pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckResult {
    /// Set only on the frame the collision first happens
    pub collision: Option<CollisionCause>,
    /// Slots newly passed this frame
    pub scored: Vec<usize>,
}

impl CheckResult {
    pub fn collided(&self) -> bool {
        self.collision.is_some()
    }
}

/// Edge-triggered collision detector
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollisionDetector {
    tripped: bool,
}

impl CollisionDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// A collision has been reported since the last reset
    pub fn tripped(&self) -> bool {
        self.tripped
    }

    pub fn reset(&mut self) {
        self.tripped = false;
    }

    /// Test the player against bounds and obstacles, then score passed slots
    ///
    /// Once a collision has been reported the detector stays silent, neither
    /// reporting collisions nor scoring, until [`reset`](Self::reset).
    pub fn check(
        &mut self,
        player: &Player,
        pool: &mut ObstaclePool,
        profile: &DifficultyProfile,
        tuning: &Tuning,
    ) -> CheckResult {
        if self.tripped {
            return CheckResult::default();
        }

        if let Some(cause) = find_collision(player, pool.slots(), profile, tuning) {
            self.tripped = true;
            return CheckResult {
                collision: Some(cause),
                scored: Vec::new(),
            };
        }

        let mut scored = Vec::new();
        for (index, slot) in pool.slots_mut().iter_mut().enumerate() {
            if !slot.scored && slot.center_x < tuning.player_anchor_x {
                slot.scored = true;
                scored.push(index);
            }
        }

        CheckResult {
            collision: None,
            scored,
        }
    }
}

/// First collision for the current frame, bounds before obstacles
pub fn find_collision(
    player: &Player,
    slots: &[ObstacleSlot],
    profile: &DifficultyProfile,
    tuning: &Tuning,
) -> Option<CollisionCause> {
    if out_of_bounds(player, tuning) {
        return Some(CollisionCause::Bounds);
    }

    slots
        .iter()
        .position(|slot| hits_obstacle(player, slot, profile.gap_size, tuning))
        .map(|slot| CollisionCause::Obstacle { slot })
}

/// Player center is beyond the world ceiling or floor
#[inline]
pub fn out_of_bounds(player: &Player, tuning: &Tuning) -> bool {
    player.position.y.abs() > tuning.world_bound
}

/// Player box overlaps the column and is not fully inside its gap
pub fn hits_obstacle(player: &Player, slot: &ObstacleSlot, gap_size: f32, tuning: &Tuning) -> bool {
    let reach = tuning.pipe_half_width + tuning.player_half_extent;
    let overlaps_x = (slot.center_x - tuning.player_anchor_x).abs() < reach;
    if !overlaps_x {
        return false;
    }

    player.bottom(tuning) < slot.gap_bottom(gap_size) || player.top(tuning) > slot.gap_top(gap_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Difficulty;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn pool_at(slots: &[(f32, f32)]) -> ObstaclePool {
        let slots = slots
            .iter()
            .map(|&(x, gap)| ObstacleSlot::new(x, gap))
            .collect();
        ObstaclePool::from_slots(slots, Pcg32::seed_from_u64(0))
    }

    fn player_at(y: f32) -> Player {
        let mut player = Player::new();
        player.position.y = y;
        player
    }

    #[test]
    fn test_inside_gap_no_collision() {
        let tuning = Tuning::default();
        let profile = Difficulty::Normal.profile();
        let mut pool = pool_at(&[(0.5, 0.0), (15.5, 2.0)]);
        let mut detector = CollisionDetector::new();

        let result = detector.check(&player_at(0.0), &mut pool, &profile, &tuning);
        assert!(!result.collided());
        assert!(result.scored.is_empty());
    }

    #[test]
    fn test_outside_gap_collides() {
        let tuning = Tuning::default();
        let profile = Difficulty::Normal.profile();
        // Gap [1, 5], player box [-0.5, 0.5]
        let mut pool = pool_at(&[(15.0, 0.0), (0.2, 3.0)]);
        let mut detector = CollisionDetector::new();

        let result = detector.check(&player_at(0.0), &mut pool, &profile, &tuning);
        assert_eq!(result.collision, Some(CollisionCause::Obstacle { slot: 1 }));
        assert!(result.scored.is_empty());
    }

    #[test]
    fn test_box_edge_clipping_gap_collides() {
        let tuning = Tuning::default();
        let profile = Difficulty::Hard.profile();
        // Gap [-1.5, 1.5]: center inside but top edge at 1.7
        let player = player_at(1.2);
        let slot = ObstacleSlot::new(0.0, 0.0);
        assert!(hits_obstacle(&player, &slot, profile.gap_size, &tuning));

        let player = player_at(0.9);
        assert!(!hits_obstacle(&player, &slot, profile.gap_size, &tuning));
    }

    #[test]
    fn test_no_x_overlap_no_collision() {
        let tuning = Tuning::default();
        let profile = Difficulty::Normal.profile();
        let slot = ObstacleSlot::new(5.0, 4.0);
        assert!(!hits_obstacle(&player_at(-3.0), &slot, profile.gap_size, &tuning));
    }

    #[test]
    fn test_bounds_collision() {
        let tuning = Tuning::default();
        let profile = Difficulty::Normal.profile();
        let mut pool = pool_at(&[(10.0, 0.0)]);
        let mut detector = CollisionDetector::new();

        let result = detector.check(&player_at(-tuning.world_bound - 0.1), &mut pool, &profile, &tuning);
        assert_eq!(result.collision, Some(CollisionCause::Bounds));

        let mut detector = CollisionDetector::new();
        let result = detector.check(&player_at(tuning.world_bound + 0.1), &mut pool, &profile, &tuning);
        assert_eq!(result.collision, Some(CollisionCause::Bounds));
    }

    #[test]
    fn test_collision_is_edge_triggered() {
        let tuning = Tuning::default();
        let profile = Difficulty::Normal.profile();
        let mut pool = pool_at(&[(10.0, 0.0)]);
        let mut detector = CollisionDetector::new();
        let player = player_at(-50.0);

        let first = detector.check(&player, &mut pool, &profile, &tuning);
        assert!(first.collided());

        for _ in 0..10 {
            let again = detector.check(&player, &mut pool, &profile, &tuning);
            assert!(!again.collided());
        }

        detector.reset();
        assert!(detector.check(&player, &mut pool, &profile, &tuning).collided());
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let tuning = Tuning::default();
        let profile = Difficulty::Normal.profile();
        let mut pool = pool_at(&[(-0.1, 0.0), (14.9, 0.0)]);
        let mut detector = CollisionDetector::new();
        let player = player_at(0.0);

        let first = detector.check(&player, &mut pool, &profile, &tuning);
        assert_eq!(first.scored, vec![0]);
        assert!(pool.slots()[0].scored);

        // Slot lingers behind the anchor for many frames
        for _ in 0..20 {
            pool.slots_mut()[0].center_x -= 0.05;
            let result = detector.check(&player, &mut pool, &profile, &tuning);
            assert!(result.scored.is_empty());
        }
    }

    #[test]
    fn test_collision_frame_does_not_score() {
        let tuning = Tuning::default();
        let profile = Difficulty::Normal.profile();
        let mut pool = pool_at(&[(-5.0, 0.0), (0.0, 0.0)]);
        let mut detector = CollisionDetector::new();

        let result = detector.check(&player_at(20.0), &mut pool, &profile, &tuning);
        assert!(result.collided());
        assert!(result.scored.is_empty());
        assert!(!pool.slots()[0].scored);
    }
}
