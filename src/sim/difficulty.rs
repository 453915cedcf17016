//! Difficulty tiers and pacing progression
//!
//! Every cleared hostile word ratchets the base speed up and the spawn
//! interval down by a tier-specific step until the speed cap is reached.
//! The effective speed is the base, scaled down while slow mode is on.

use serde::{Deserialize, Serialize};

use super::state::SessionState;
use crate::consts::*;

/// Difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Index into per-tier tables
    pub fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    /// Starting speed multiplier
    pub fn initial_speed_multiplier(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.15,
            Difficulty::Hard => 1.35,
        }
    }

    /// Base speed gained per cleared word.
    /// Hard ramps spawn rate fastest but speed gentler than Medium.
    pub fn speed_step(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.015,
            Difficulty::Medium => 0.05,
            Difficulty::Hard => 0.03,
        }
    }

    /// Spawn interval lost per cleared word (ms)
    pub fn interval_step(&self) -> u32 {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Medium => 20,
            Difficulty::Hard => 10,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ramp pacing after a cleared hostile word. Returns false once capped.
pub fn ramp(session: &mut SessionState) -> bool {
    if session.base_speed_multiplier >= MAX_SPEED_THRESHOLD {
        return false;
    }

    let tier = session.difficulty;
    session.base_speed_multiplier += tier.speed_step();
    session.spawn_interval_ms = session
        .spawn_interval_ms
        .saturating_sub(tier.interval_step())
        .max(MIN_SPAWN_INTERVAL_MS);
    recompute_speed(session);
    true
}

/// Derive the effective speed from the base and slow mode
pub fn recompute_speed(session: &mut SessionState) {
    session.speed_multiplier = if session.slow_mode_active {
        session.base_speed_multiplier * SLOW_FACTOR
    } else {
        session.base_speed_multiplier
    };
}
