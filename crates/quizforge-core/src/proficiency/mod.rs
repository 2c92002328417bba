//! Proficiency Scoring Module
//!
//! Per-topic proficiency on a 0–100 scale. Accuracy is estimated under a
//! Beta(2,2) prior, so a topic with two attempts cannot swing to 0 or 100;
//! slow average solve times and stale topics are penalized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Beta prior pseudo-counts for both successes and failures
const PRIOR_PSEUDO_COUNT: f64 = 2.0;

/// Solve-time penalty baseline, in seconds
const TIME_BASELINE_SECS: f64 = 60.0;

/// Recency half-life, in days
const RECENCY_HALF_LIFE_DAYS: f64 = 30.0;

const ACCURACY_WEIGHT: f64 = 0.7;
const TIME_WEIGHT: f64 = 0.2;
const RECENCY_WEIGHT: f64 = 0.1;

// ============================================================================
// TOPIC STATS
// ============================================================================

/// Attempt statistics for one topic
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicStats {
    /// Correct attempts
    pub correct: u32,
    /// Total attempts
    pub total: u32,
    /// Average solve time, in seconds
    pub avg_time_secs: f64,
    /// Most recent attempt, if any
    pub last_attempt: Option<DateTime<Utc>>,
}

// ============================================================================
// SCORING
// ============================================================================

/// Score one topic at evaluation instant `now`, on a 0–100 scale
pub fn score(stats: &TopicStats, now: DateTime<Utc>) -> f64 {
    let correct = f64::from(stats.correct.min(stats.total));
    let total = f64::from(stats.total);

    let alpha = PRIOR_PSEUDO_COUNT + correct;
    let beta = PRIOR_PSEUDO_COUNT + (total - correct);
    let accuracy_mean = alpha / (alpha + beta);

    let time_penalty = 1.0 / (1.0 + (stats.avg_time_secs.max(0.0) / TIME_BASELINE_SECS).ln_1p());

    let days_stale = stats
        .last_attempt
        .map(|last| (now - last).num_days().max(0) as f64)
        .unwrap_or(0.0);
    let recency_decay = 0.5_f64.powf(days_stale / RECENCY_HALF_LIFE_DAYS);

    let raw = accuracy_mean * ACCURACY_WEIGHT
        + time_penalty * TIME_WEIGHT
        + recency_decay * RECENCY_WEIGHT;

    ((raw.clamp(0.0, 1.0) * 100.0) * 100.0).round() / 100.0
}

/// Score every topic at evaluation instant `now`
pub fn compute_proficiency(
    topics: &HashMap<String, TopicStats>,
    now: DateTime<Utc>,
) -> HashMap<String, f64> {
    topics
        .iter()
        .map(|(topic, stats)| (topic.clone(), score(stats, now)))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
