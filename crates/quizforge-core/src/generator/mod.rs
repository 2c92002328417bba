//! Question Generator Module
//!
//! Composes candidate questions from templates and variable pools, rewrites
//! them through a paraphrase capability, and registers each accepted
//! question with the caller's duplicate detector. Uniqueness is whatever
//! the detector says it is; there is no generator-private seen-set.

use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::dedup::{canonical_hash, DedupError, DuplicateDetector};
use crate::difficulty::Level;

// ============================================================================
// TEMPLATE POOLS
// ============================================================================

/// Question templates with `{target}`, `{structure}`, `{n}` placeholders
pub const TEMPLATES: &[&str] = &[
    "Write an algorithm to find the {target} in a {structure} of size {n}.",
    "Design a program that computes the {target} within a {structure} containing {n} elements.",
    "How would you determine the {target} from a {structure} having {n} entries?",
];

/// Values for the `{target}` placeholder
pub const TARGETS: &[&str] = &[
    "maximum element",
    "minimum element",
    "sum",
    "frequency of a number",
];

/// Values for the `{structure}` placeholder
pub const STRUCTURES: &[&str] = &["array", "linked list", "binary tree", "graph"];

/// Values for the `{n}` placeholder
pub const SIZES: &[u32] = &[10, 50, 100, 500, 1000];

/// Default composition attempts before giving up
pub const DEFAULT_MAX_ATTEMPTS: usize = 12;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Generator error types
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Every composition attempt collided with a registered question
    #[error("unable to generate a unique question after {0} attempts")]
    Exhausted(usize),
    /// Registration failed structurally (not a collision)
    #[error(transparent)]
    Dedup(#[from] DedupError),
}

// ============================================================================
// PARAPHRASE CAPABILITY
// ============================================================================

/// Paraphrase error (provider-specific detail only)
#[derive(Debug, Clone)]
pub struct ParaphraseError(pub String);

impl std::fmt::Display for ParaphraseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Paraphrase failed: {}", self.0)
    }
}

impl std::error::Error for ParaphraseError {}

/// A model that rewrites a composed question
pub trait ParaphraseModel: Send + Sync {
    /// Rewrite `text` for the given difficulty
    fn paraphrase(&self, text: &str, difficulty: Level) -> Result<String, ParaphraseError>;
}

/// Paraphrase capability, dispatched on rather than probed for
#[derive(Clone, Default)]
pub enum Paraphraser {
    /// A configured paraphrase model
    Configured(Arc<dyn ParaphraseModel>),
    /// Deterministic word-swap rewriting
    #[default]
    Unconfigured,
}

impl Paraphraser {
    /// Rewrite `text`; a failing model degrades to the word-swap fallback
    pub fn rewrite(&self, text: &str, difficulty: Level) -> String {
        match self {
            Paraphraser::Configured(model) => match model.paraphrase(text, difficulty) {
                Ok(rewritten) => rewritten,
                Err(e) => {
                    tracing::warn!(error = %e, "paraphrase model failed, using fallback");
                    fallback_paraphrase(text)
                }
            },
            Paraphraser::Unconfigured => fallback_paraphrase(text),
        }
    }
}

/// Deterministic lightweight paraphrase: sequential verb swaps
fn fallback_paraphrase(text: &str) -> String {
    let mut out = text.to_string();
    for (from, to) in [
        ("Write", "Design"),
        ("Design", "Construct"),
        ("How would you determine", "Determine"),
    ] {
        out = out.replace(from, to);
    }
    out
}

// ============================================================================
// GENERATED QUESTION
// ============================================================================

/// A question accepted by the duplicate detector
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    /// Generator-assigned id (UUID v4)
    pub id: String,
    /// Final question text, post-paraphrase
    pub text: String,
    /// Template-composed text before paraphrasing
    pub template: String,
    /// Topic the question was generated for
    pub topic: String,
    /// Curriculum week
    pub week: u32,
    /// Difficulty level
    pub difficulty: Level,
    /// Canonical hash of the final text
    pub canonical_hash: String,
    /// Generation instant
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// QUESTION GENERATOR
// ============================================================================

/// Template-driven unique question generator
#[derive(Clone, Default)]
pub struct QuestionGenerator {
    paraphraser: Paraphraser,
    max_attempts: usize,
}

impl QuestionGenerator {
    /// Create a generator with the word-swap paraphraser
    pub fn new() -> Self {
        Self {
            paraphraser: Paraphraser::Unconfigured,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Create a generator backed by a paraphrase model
    pub fn with_paraphraser(paraphraser: Paraphraser) -> Self {
        Self {
            paraphraser,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Set the attempt limit
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Generate a question no registered question duplicates, registering it
    /// with `detector` under a fresh UUID
    pub fn generate_unique(
        &self,
        topic: &str,
        week: u32,
        difficulty: Level,
        detector: &DuplicateDetector,
    ) -> Result<GeneratedQuestion, GeneratorError> {
        self.generate_unique_with_rng(topic, week, difficulty, detector, &mut rand::rng())
    }

    /// Like [`generate_unique`](Self::generate_unique) with an explicit rng
    pub fn generate_unique_with_rng<R: Rng + ?Sized>(
        &self,
        topic: &str,
        week: u32,
        difficulty: Level,
        detector: &DuplicateDetector,
        rng: &mut R,
    ) -> Result<GeneratedQuestion, GeneratorError> {
        for _ in 0..self.max_attempts {
            let base = compose(rng);
            let text = self.paraphraser.rewrite(&base, difficulty);
            let id = Uuid::new_v4().to_string();

            match detector.add(&id, &text) {
                Ok(()) => {
                    return Ok(GeneratedQuestion {
                        canonical_hash: canonical_hash(&text),
                        id,
                        text,
                        template: base,
                        topic: topic.to_string(),
                        week,
                        difficulty,
                        created_at: Utc::now(),
                    });
                }
                // collisions just mean "try another composition"
                Err(DedupError::DuplicateHash { .. }) | Err(DedupError::DuplicateId(_)) => continue,
                Err(other) => return Err(other.into()),
            }
        }

        Err(GeneratorError::Exhausted(self.max_attempts))
    }
}

/// Fill one random template from the variable pools
fn compose<R: Rng + ?Sized>(rng: &mut R) -> String {
    let template = TEMPLATES.choose(rng).copied().unwrap_or(TEMPLATES[0]);
    let target = TARGETS.choose(rng).copied().unwrap_or(TARGETS[0]);
    let structure = STRUCTURES.choose(rng).copied().unwrap_or(STRUCTURES[0]);
    let n = SIZES.choose(rng).copied().unwrap_or(SIZES[0]);

    template
        .replace("{target}", target)
        .replace("{structure}", structure)
        .replace("{n}", &n.to_string())
}

// ============================================================================
// TESTS
// ============================================================================
