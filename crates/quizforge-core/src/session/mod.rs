//! Session Builder Module
//!
//! Assembles a practice session from three question pools (weak topics,
//! scheduled reviews, fresh questions) in a configurable ratio, then
//! backfills from the full pool when a pool runs short. The output never
//! repeats a question id.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use std::collections::HashSet;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Default session length
pub const DEFAULT_TOTAL: usize = 10;

/// Minimum distinct questions required to build any session
pub const MIN_VIABLE: usize = 3;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Session assembly error types
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Too few distinct questions across all pools
    #[error("not enough distinct questions available: {available} < {required}")]
    InsufficientQuestions {
        /// Distinct questions found
        available: usize,
        /// Minimum required
        required: usize,
    },
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Pool sampling ratios; fresh questions take whatever the other two leave
#[derive(Debug, Clone, Copy)]
pub struct PoolRatios {
    /// Share drawn from weak-topic questions
    pub weak: f64,
    /// Share drawn from scheduled reviews
    pub review: f64,
    /// Share drawn from fresh questions
    pub fresh: f64,
}

impl Default for PoolRatios {
    fn default() -> Self {
        Self {
            weak: 0.6,
            review: 0.3,
            fresh: 0.1,
        }
    }
}

// ============================================================================
// SESSION BUILDER
// ============================================================================

/// Weighted session assembler
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    total: usize,
    ratios: PoolRatios,
    min_viable: usize,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn unique_preserving_order(pool: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    pool.iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

impl SessionBuilder {
    /// Create a builder with default length and ratios
    pub fn new() -> Self {
        Self {
            total: DEFAULT_TOTAL,
            ratios: PoolRatios::default(),
            min_viable: MIN_VIABLE,
        }
    }

    /// Set the session length
    pub fn with_total(mut self, total: usize) -> Self {
        self.total = total;
        self
    }

    /// Set the pool ratios
    pub fn with_ratios(mut self, ratios: PoolRatios) -> Self {
        self.ratios = ratios;
        self
    }

    /// Build a session from the three pools, backfilling from their union
    pub fn build(
        &self,
        weak: &[String],
        review: &[String],
        fresh: &[String],
    ) -> Result<Vec<String>, SessionError> {
        self.build_with_rng(weak, review, fresh, None, &mut rand::rng())
    }

    /// Build with an explicit backfill pool and rng
    pub fn build_with_rng<R: Rng + ?Sized>(
        &self,
        weak: &[String],
        review: &[String],
        fresh: &[String],
        all_pool: Option<&[String]>,
        rng: &mut R,
    ) -> Result<Vec<String>, SessionError> {
        let weak = unique_preserving_order(weak);
        let review = unique_preserving_order(review);
        let fresh = unique_preserving_order(fresh);

        let combined: Vec<String> = match all_pool {
            Some(pool) => pool.to_vec(),
            None => weak
                .iter()
                .chain(review.iter())
                .chain(fresh.iter())
                .cloned()
                .collect(),
        };
        let all = unique_preserving_order(&combined);

        if all.len() < self.min_viable {
            return Err(SessionError::InsufficientQuestions {
                available: all.len(),
                required: self.min_viable,
            });
        }

        let want_weak = (self.total as f64 * self.ratios.weak) as usize;
        let want_review = (self.total as f64 * self.ratios.review) as usize;
        let want_fresh = self.total.saturating_sub(want_weak + want_review);

        let mut session: Vec<String> = Vec::with_capacity(self.total);
        let mut chosen: HashSet<String> = HashSet::new();

        let mut take = |pool: &[String], n: usize, session: &mut Vec<String>, rng: &mut R| {
            for id in pool.choose_multiple(rng, n.min(pool.len())) {
                if chosen.insert(id.clone()) {
                    session.push(id.clone());
                }
            }
        };

        take(&weak, want_weak, &mut session, rng);
        take(&review, want_review, &mut session, rng);
        take(&fresh, want_fresh, &mut session, rng);

        // backfill from the full pool until the session is complete
        if session.len() < self.total {
            let mut candidates: Vec<String> = all
                .iter()
                .filter(|id| !chosen.contains(id.as_str()))
                .cloned()
                .collect();
            candidates.shuffle(rng);
            for id in candidates {
                if session.len() >= self.total {
                    break;
                }
                if chosen.insert(id.clone()) {
                    session.push(id);
                }
            }
        }

        session.shuffle(rng);
        session.truncate(self.total);
        Ok(session)
    }
}

// ============================================================================
// TESTS
// ============================================================================
