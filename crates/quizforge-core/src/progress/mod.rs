//! Progress Tracking Module
//!
//! Two horizons of attempt history: a short-term window of the most recent
//! attempts, and long-term per-topic accuracy stats. Weakness ranking feeds
//! the session builder's weak pool.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Attempts kept in the short-term window
pub const SHORT_TERM_LIMIT: usize = 10;

// ============================================================================
// TYPES
// ============================================================================

/// One recorded attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    /// Topic the question belonged to
    pub topic: String,
    /// Whether the answer was correct
    pub correct: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct TopicRecord {
    correct: u32,
    total: u32,
}

// ============================================================================
// PROGRESS TRACKER
// ============================================================================

/// Short-term and long-term attempt tracker
#[derive(Debug, Default)]
pub struct ProgressTracker {
    short_term: VecDeque<Attempt>,
    topic_stats: HashMap<String, TopicRecord>,
}

impl ProgressTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one attempt
    pub fn record_attempt(&mut self, topic: &str, correct: bool) {
        if self.short_term.len() == SHORT_TERM_LIMIT {
            self.short_term.pop_front();
        }
        self.short_term.push_back(Attempt {
            topic: topic.to_string(),
            correct,
        });

        let record = self.topic_stats.entry(topic.to_string()).or_default();
        record.total += 1;
        if correct {
            record.correct += 1;
        }
    }

    /// Long-term accuracy for a topic, if attempted
    pub fn accuracy(&self, topic: &str) -> Option<f64> {
        self.topic_stats
            .get(topic)
            .filter(|record| record.total > 0)
            .map(|record| f64::from(record.correct) / f64::from(record.total))
    }

    /// Topics ranked weakest-first by `1 - accuracy`, at most `k` of them.
    /// Ties resolve alphabetically.
    pub fn weakest_topics(&self, k: usize) -> Vec<(String, f64)> {
        let mut ranked: Vec<(String, f64)> = self
            .topic_stats
            .iter()
            .filter(|(_, record)| record.total > 0)
            .map(|(topic, record)| {
                let accuracy = f64::from(record.correct) / f64::from(record.total);
                (topic.clone(), 1.0 - accuracy)
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked.truncate(k);
        ranked
    }

    /// Failures per topic within the short-term window
    pub fn recent_failures(&self) -> HashMap<String, u32> {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for attempt in &self.short_term {
            if !attempt.correct {
                *counts.entry(attempt.topic.clone()).or_default() += 1;
            }
        }
        counts
    }

    /// The short-term window, oldest first
    pub fn recent_attempts(&self) -> impl Iterator<Item = &Attempt> {
        self.short_term.iter()
    }
}

// ============================================================================
// TESTS
// ============================================================================
