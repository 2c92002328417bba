//! Spaced Repetition Scheduler
//!
//! Ease-factor interval scheduling over tracked questions. A correct review
//! stretches the interval geometrically by the question's ease factor; an
//! incorrect one resets the interval to one day and dents the ease.
//!
//! Dates are injected by the caller, so scheduling is deterministic and
//! testable; the `*_today` wrappers default to the current local date.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Interval seeded when a question is first tracked, in days
pub const INITIAL_INTERVAL_DAYS: u32 = 1;

/// Ease factor seeded when a question is first tracked
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Ease factor floor after repeated failures
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Ease factor ceiling after repeated successes
pub const MAX_EASE_FACTOR: f64 = 3.0;

const EASE_REWARD: f64 = 0.1;
const EASE_PENALTY: f64 = 0.25;

// ============================================================================
// REVIEW STATE
// ============================================================================

/// Per-question scheduling state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewState {
    /// Date of the most recent review (or of tracking)
    pub last_seen: NaiveDate,
    /// Current interval, in days
    pub interval_days: u32,
    /// Current ease factor
    pub ease_factor: f64,
    /// Next scheduled review date
    pub next_due: NaiveDate,
}

impl ReviewState {
    fn seeded(today: NaiveDate) -> Self {
        Self {
            last_seen: today,
            interval_days: INITIAL_INTERVAL_DAYS,
            ease_factor: INITIAL_EASE_FACTOR,
            next_due: today + Duration::days(i64::from(INITIAL_INTERVAL_DAYS)),
        }
    }
}

// ============================================================================
// SCHEDULER
// ============================================================================

/// Review scheduler over tracked question ids
#[derive(Debug, Default)]
pub struct ReviewScheduler {
    history: HashMap<String, ReviewState>,
}

impl ReviewScheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked questions
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether no questions are tracked
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Scheduling state for a question, if tracked
    pub fn state(&self, question_id: &str) -> Option<&ReviewState> {
        self.history.get(question_id)
    }

    /// Iterate over all tracked (id, state) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReviewState)> {
        self.history.iter().map(|(id, state)| (id.as_str(), state))
    }

    /// Start tracking a question as of `today`. Re-tracking an existing
    /// question resets its state.
    pub fn track(&mut self, question_id: impl Into<String>, today: NaiveDate) {
        self.history
            .insert(question_id.into(), ReviewState::seeded(today));
    }

    /// Restore persisted state for a question (storage rehydration)
    pub fn restore(&mut self, question_id: impl Into<String>, state: ReviewState) {
        self.history.insert(question_id.into(), state);
    }

    /// Fold one review outcome into a question's schedule as of `today`.
    /// An untracked question is tracked first.
    pub fn record_review(&mut self, question_id: &str, correct: bool, today: NaiveDate) {
        let state = self
            .history
            .entry(question_id.to_string())
            .or_insert_with(|| ReviewState::seeded(today));

        if correct {
            state.ease_factor = (state.ease_factor + EASE_REWARD).min(MAX_EASE_FACTOR);
            // geometric growth, truncated to whole days
            state.interval_days =
                ((f64::from(state.interval_days) * state.ease_factor) as u32).max(1);
        } else {
            state.ease_factor = (state.ease_factor - EASE_PENALTY).max(MIN_EASE_FACTOR);
            state.interval_days = 1;
        }

        state.last_seen = today;
        state.next_due = today + Duration::days(i64::from(state.interval_days));
    }

    /// Ids due for review on `today`, soonest first (ties alphabetical)
    pub fn due_on(&self, today: NaiveDate) -> Vec<String> {
        let mut due: Vec<(&NaiveDate, &String)> = self
            .history
            .iter()
            .filter(|(_, state)| state.next_due <= today)
            .map(|(id, state)| (&state.next_due, id))
            .collect();
        due.sort();
        due.into_iter().map(|(_, id)| id.clone()).collect()
    }

    /// Like [`due_on`](Self::due_on), capped at `limit` ids
    pub fn due_on_limited(&self, today: NaiveDate, limit: usize) -> Vec<String> {
        let mut due = self.due_on(today);
        due.truncate(limit);
        due
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_track_seeds_state() {
        let mut scheduler = ReviewScheduler::new();
        scheduler.track("q-1", day("2026-08-01"));

        let state = scheduler.state("q-1").unwrap();
        assert_eq!(state.interval_days, INITIAL_INTERVAL_DAYS);
        assert_eq!(state.ease_factor, INITIAL_EASE_FACTOR);
        assert_eq!(state.next_due, day("2026-08-02"));
    }

    #[test]
    fn test_correct_review_grows_interval() {
        let mut scheduler = ReviewScheduler::new();
        scheduler.track("q-1", day("2026-08-01"));
        scheduler.record_review("q-1", true, day("2026-08-02"));

        let state = scheduler.state("q-1").unwrap();
        assert!((state.ease_factor - 2.6).abs() < 1e-9);
        // 1 * 2.6 truncated = 2
        assert_eq!(state.interval_days, 2);
        assert_eq!(state.next_due, day("2026-08-04"));

        scheduler.record_review("q-1", true, day("2026-08-04"));
        let state = scheduler.state("q-1").unwrap();
        // 2 * 2.7 truncated = 5
        assert_eq!(state.interval_days, 5);
    }

    #[test]
    fn test_incorrect_review_resets_interval() {
        let mut scheduler = ReviewScheduler::new();
        scheduler.track("q-1", day("2026-08-01"));
        scheduler.record_review("q-1", true, day("2026-08-02"));
        scheduler.record_review("q-1", false, day("2026-08-04"));

        let state = scheduler.state("q-1").unwrap();
        assert_eq!(state.interval_days, 1);
        assert!((state.ease_factor - 2.35).abs() < 1e-9);
        assert_eq!(state.next_due, day("2026-08-05"));
    }

    #[test]
    fn test_ease_factor_clamped() {
        let mut scheduler = ReviewScheduler::new();
        scheduler.track("q-1", day("2026-08-01"));

        let mut today = day("2026-08-01");
        for _ in 0..10 {
            scheduler.record_review("q-1", false, today);
            today += Duration::days(1);
        }
        assert_eq!(scheduler.state("q-1").unwrap().ease_factor, MIN_EASE_FACTOR);

        for _ in 0..30 {
            scheduler.record_review("q-1", true, today);
            today += Duration::days(1);
        }
        assert_eq!(scheduler.state("q-1").unwrap().ease_factor, MAX_EASE_FACTOR);
    }

    #[test]
    fn test_review_untracked_question_tracks_it() {
        let mut scheduler = ReviewScheduler::new();
        scheduler.record_review("q-9", false, day("2026-08-01"));

        let state = scheduler.state("q-9").unwrap();
        assert_eq!(state.interval_days, 1);
        assert!((state.ease_factor - 2.25).abs() < 1e-9);
    }

    #[test]
    fn test_due_on_filters_and_sorts() {
        let mut scheduler = ReviewScheduler::new();
        scheduler.track("due-later", day("2026-08-05"));
        scheduler.track("due-now", day("2026-08-01"));
        scheduler.track("due-earlier", day("2026-07-28"));

        let due = scheduler.due_on(day("2026-08-02"));
        assert_eq!(due, vec!["due-earlier".to_string(), "due-now".to_string()]);

        let limited = scheduler.due_on_limited(day("2026-08-02"), 1);
        assert_eq!(limited, vec!["due-earlier".to_string()]);
    }

    #[test]
    fn test_state_serialization() {
        let state = ReviewState::seeded(day("2026-08-01"));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["intervalDays"], 1);
        assert_eq!(json["nextDue"], "2026-08-02");
    }
}
