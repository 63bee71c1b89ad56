//! Difficulty levels and the numeric parameters they select

use serde::{Deserialize, Serialize};

/// Difficulty chosen for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    /// Parse a caller-supplied label. Unknown labels are the caller's problem.
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Parameters for this difficulty
    pub fn profile(&self) -> DifficultyProfile {
        DifficultyProfile::resolve(*self)
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric parameters driven by difficulty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Abstract forward speed (scaled by `Tuning::forward_scale`)
    pub forward_speed: f32,
    /// Height of the passable gap between an obstacle pair
    pub gap_size: f32,
}

impl DifficultyProfile {
    pub fn resolve(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                forward_speed: 0.8,
                gap_size: 5.0,
            },
            Difficulty::Normal => Self {
                forward_speed: 1.0,
                gap_size: 4.0,
            },
            Difficulty::Hard => Self {
                forward_speed: 1.2,
                gap_size: 3.0,
            },
        }
    }
}
