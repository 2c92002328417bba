//! Adaptive Difficulty Module
//!
//! Moves a learner between difficulty levels based on recent performance.
//! The raw attempt score blends accuracy, a log-normalized solve time, and a
//! hint penalty; an EMA smooths it, and a momentum band keeps the level from
//! flapping on a single good or bad attempt.

use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// EMA smoothing factor applied to each attempt score
pub const EMA_ALPHA: f64 = 0.18;

/// The smoothed score must diverge from the current level's anchor by more
/// than this before the level moves
pub const MOMENTUM_BAND: f64 = 0.12;

/// Solve-time normalization baseline, in seconds
const TIME_BASELINE_SECS: f64 = 120.0;

/// Hints counted toward the full penalty
const HINT_PENALTY_SCALE: f64 = 10.0;

// ============================================================================
// DIFFICULTY LEVELS
// ============================================================================

/// Question difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Introductory questions
    Easy,
    /// The starting level
    #[default]
    Medium,
    /// Advanced questions
    Hard,
}

impl Level {
    /// String form, as serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Easy => "easy",
            Level::Medium => "medium",
            Level::Hard => "hard",
        }
    }

    /// Anchor score the smoothed EMA is compared against
    pub fn anchor_score(&self) -> f64 {
        match self {
            Level::Easy => 0.25,
            Level::Medium => 0.5,
            Level::Hard => 0.85,
        }
    }

    /// One level up, saturating at `Hard`
    pub fn promote(&self) -> Level {
        match self {
            Level::Easy => Level::Medium,
            Level::Medium | Level::Hard => Level::Hard,
        }
    }

    /// One level down, saturating at `Easy`
    pub fn demote(&self) -> Level {
        match self {
            Level::Hard => Level::Medium,
            Level::Medium | Level::Easy => Level::Easy,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Level::Easy),
            "medium" => Ok(Level::Medium),
            "hard" => Ok(Level::Hard),
            _ => Err(format!("Unknown difficulty level: {}", s)),
        }
    }
}

// ============================================================================
// ADJUSTMENT
// ============================================================================

/// Result of a difficulty adjustment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adjustment {
    /// Level to serve next
    pub level: Level,
    /// Updated smoothed score, fed back into the next adjustment
    pub smoothed_score: f64,
}

fn ema(prev: f64, value: f64, alpha: f64) -> f64 {
    alpha * value + (1.0 - alpha) * prev
}

/// Normalize solve time into [0, 1]; faster solves score closer to 1
pub fn normalize_time(time_secs: f64) -> f64 {
    1.0 / (1.0 + (time_secs.max(0.0) / TIME_BASELINE_SECS).ln_1p())
}

/// Fold one attempt into the learner's smoothed score and decide the next
/// level.
///
/// `accuracy` is clamped to [0, 1]. The level moves at most one step per
/// call and only when the new smoothed score leaves the momentum band
/// around the current level's anchor.
pub fn adjust(
    accuracy: f64,
    avg_time_secs: f64,
    hints_used: u32,
    current: Level,
    smoothed_score: f64,
) -> Adjustment {
    let acc = accuracy.clamp(0.0, 1.0);
    let time_norm = normalize_time(avg_time_secs);
    let hint_penalty = (f64::from(hints_used) / HINT_PENALTY_SCALE).clamp(0.0, 1.0);

    let raw_score = 0.62 * acc + 0.28 * time_norm - 0.10 * hint_penalty;
    let new_score = ema(smoothed_score, raw_score, EMA_ALPHA);

    let delta = new_score - current.anchor_score();
    let level = if delta > MOMENTUM_BAND {
        current.promote()
    } else if delta < -MOMENTUM_BAND {
        current.demote()
    } else {
        current
    };

    Adjustment {
        level,
        smoothed_score: (new_score * 10_000.0).round() / 10_000.0,
    }
}

// ============================================================================
// TESTS
// ============================================================================
