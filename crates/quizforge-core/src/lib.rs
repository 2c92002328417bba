//! # Quizforge Core
//!
//! Adaptive practice engine. Generates unique practice questions, detects
//! near-duplicate/plagiarized questions, and tracks a learner's difficulty,
//! proficiency, and review schedule.
//!
//! The deep core is duplicate detection:
//!
//! - **Exact stage**: canonical SHA-256 hash of trimmed, lowercased text,
//!   looked up in O(1)
//! - **Semantic stage**: top-k cosine-similarity search over embeddings,
//!   consulted only on an exact miss
//! - **Graceful degradation**: with no encoder configured, or a failing
//!   one, checking keeps working on the exact stage alone
//! - **Pluggable index backends**: exact brute force, or USearch HNSW behind
//!   the `vector-search` feature
//!
//! Around it sit the platform modules: template-driven question generation,
//! ease-factor spaced repetition, EMA difficulty leveling, Beta-prior
//! proficiency scoring, weighted session assembly, conceptual-hint
//! filtering, and a SQLite question bank that rehydrates the detector at
//! startup.
//!
//! ## Quick Start
//!
//! ```rust
//! use quizforge_core::{DuplicateDetector, Encoder, IndexBackend, MatchReason};
//!
//! let detector = DuplicateDetector::new(Encoder::Unconfigured, IndexBackend::BruteForce);
//!
//! detector.add("q-1", "Find the maximum in an array of size 10")?;
//!
//! let result = detector.check("  find the MAXIMUM in an array of size 10 ")?;
//! assert!(result.is_duplicate);
//! assert_eq!(result.reason, MatchReason::Exact);
//! # Ok::<(), quizforge_core::DedupError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `bundled-sqlite` (default): compile SQLite into the binary
//! - `embeddings`: local embedding generation with fastembed
//! - `vector-search`: HNSW approximate index backend with USearch
//! - `full`: everything above

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod dedup;
pub mod difficulty;
pub mod embeddings;
pub mod generator;
pub mod hints;
pub mod proficiency;
pub mod progress;
pub mod scheduler;
pub mod search;
pub mod session;
pub mod storage;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Duplicate detection
pub use dedup::{
    canonical_hash, canonicalize, DedupError, DetectorConfig, DetectorStats, DuplicateDetector,
    DuplicateResult, ExactMatchIndex, HashCollision, MatchReason, DEFAULT_THRESHOLD,
    DEFAULT_TOP_K,
};

// Encoder capability and similarity math
pub use embeddings::{
    cosine_similarity, dot_product, euclidean_distance, Embedding, Encoder, EncoderError,
    TextEncoder,
};

#[cfg(feature = "embeddings")]
pub use embeddings::LocalEncoder;

// Vector index
pub use search::{IndexBackend, VectorIndex, VectorIndexError, VectorIndexStats};

// Question generation
pub use generator::{
    GeneratedQuestion, GeneratorError, ParaphraseModel, Paraphraser, QuestionGenerator,
};

// Spaced repetition
pub use scheduler::{ReviewScheduler, ReviewState};

// Difficulty and proficiency
pub use difficulty::{adjust, Adjustment, Level};
pub use proficiency::{compute_proficiency, TopicStats};

// Session assembly
pub use session::{PoolRatios, SessionBuilder, SessionError};

// Hint filtering
pub use hints::{FilteredHint, HintClassifier, HintFilter};

// Progress tracking
pub use progress::ProgressTracker;

// Storage
pub use storage::{NewQuestion, QuestionBank, QuestionRecord, StorageError};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        DedupError, DuplicateDetector, DuplicateResult, Embedding, Encoder, IndexBackend, Level,
        MatchReason, QuestionBank, QuestionGenerator, ReviewScheduler, SessionBuilder,
        StorageError, TextEncoder,
    };

    #[cfg(feature = "embeddings")]
    pub use crate::LocalEncoder;
}
