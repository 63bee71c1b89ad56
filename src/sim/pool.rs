//! Obstacle pool
//!
//! A fixed set of obstacle-pair slots that scroll toward the player. A slot
//! that falls behind the recycle threshold is moved to the front of the
//! column sequence with a fresh gap, so a handful of slots produce an
//! endless course.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyProfile;
use crate::tuning::Tuning;

/// One reusable obstacle pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSlot {
    /// Column x in the scrolling frame (player anchor at 0)
    pub center_x: f32,
    /// Vertical center of the passable gap
    pub gap_center_y: f32,
    /// Player has passed this column since it last spawned
    pub scored: bool,
}

impl ObstacleSlot {
    pub fn new(center_x: f32, gap_center_y: f32) -> Self {
        Self {
            center_x,
            gap_center_y,
            scored: false,
        }
    }

    /// Top edge of the gap
    #[inline]
    pub fn gap_top(&self, gap_size: f32) -> f32 {
        self.gap_center_y + gap_size / 2.0
    }

    /// Bottom edge of the gap
    #[inline]
    pub fn gap_bottom(&self, gap_size: f32) -> f32 {
        self.gap_center_y - gap_size / 2.0
    }

    /// World-space x, given how far the player has travelled
    #[inline]
    pub fn world_x(&self, player_x: f32) -> f32 {
        self.center_x + player_x
    }
}

/// Fixed-size pool of obstacle slots plus the generator for gap placement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstaclePool {
    slots: Vec<ObstacleSlot>,
    rng: Pcg32,
}

impl ObstaclePool {
    /// Create a pool with a generator seeded from `seed`
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed), tuning)
    }

    /// Create a pool drawing gaps from the given generator
    ///
    /// Slots start at `i * pipe_spacing`. The opening slot sits on the
    /// player's anchor, so its gap is centered on the spawn height.
    ///
    /// Panics if `tuning` fails [`Tuning::validate`].
    pub fn with_rng(mut rng: Pcg32, tuning: &Tuning) -> Self {
        if let Err(e) = tuning.validate() {
            panic!("invalid tuning: {e}");
        }
        let slots = (0..tuning.pool_size)
            .map(|i| {
                let gap_center_y = if i == 0 {
                    0.0
                } else {
                    random_gap_center(&mut rng, tuning.gap_range)
                };
                ObstacleSlot::new(i as f32 * tuning.pipe_spacing, gap_center_y)
            })
            .collect();

        Self { slots, rng }
    }

    /// Build a pool from explicit slots (fixtures, replays)
    pub fn from_slots(slots: Vec<ObstacleSlot>, rng: Pcg32) -> Self {
        assert!(!slots.is_empty(), "obstacle pool needs at least one slot");
        Self { slots, rng }
    }

    pub fn slots(&self) -> &[ObstacleSlot] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [ObstacleSlot] {
        &mut self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Largest `center_x` in the pool
    pub fn leading_x(&self) -> f32 {
        self.slots
            .iter()
            .map(|s| s.center_x)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Index and `center_x` of the rearmost slot
    pub fn trailing(&self) -> Option<(usize, f32)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, s)| (i, s.center_x))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Slot centers in ascending order
    pub fn sorted_centers(&self) -> Vec<f32> {
        let mut centers: Vec<f32> = self.slots.iter().map(|s| s.center_x).collect();
        centers.sort_by(f32::total_cmp);
        centers
    }

    /// Scroll every slot and recycle the ones left behind
    ///
    /// All slots move first, then recycling places each trailing slot one
    /// spacing ahead of the current leader. Positions are always derived
    /// from the leader, never from an absolute counter, so spacing does not
    /// drift. Returns the recycled slot indices in recycle order.
    pub fn advance(&mut self, dt: f32, profile: &DifficultyProfile, tuning: &Tuning) -> Vec<usize> {
        // Recycling only terminates when each respawn moves the leader forward
        assert!(
            tuning.pipe_spacing > 0.0,
            "invalid tuning: pipe_spacing must be positive (got {})",
            tuning.pipe_spacing
        );
        let shift = profile.forward_speed * tuning.forward_scale * dt;
        for slot in &mut self.slots {
            slot.center_x -= shift;
        }

        let mut recycled = Vec::new();
        while let Some((index, x)) = self.trailing() {
            if x >= tuning.recycle_threshold {
                break;
            }
            let new_x = self.leading_x() + tuning.pipe_spacing;
            self.recycle(index, new_x, tuning);
            recycled.push(index);
        }
        recycled
    }

    fn recycle(&mut self, index: usize, center_x: f32, tuning: &Tuning) {
        let gap_center_y = random_gap_center(&mut self.rng, tuning.gap_range);
        let slot = &mut self.slots[index];
        slot.center_x = center_x;
        slot.gap_center_y = gap_center_y;
        slot.scored = false;
    }
}

fn random_gap_center(rng: &mut Pcg32, gap_range: f32) -> f32 {
    if gap_range > 0.0 {
        rng.random_range(-gap_range..=gap_range)
    } else {
        0.0
    }
}
