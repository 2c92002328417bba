//! Duplicate Detection Module
//!
//! Two-stage duplicate detection for the question bank:
//! 1. Exact: canonical SHA-256 hash lookup, O(1), no model involved
//! 2. Semantic: top-k cosine-similarity search over embeddings, consulted
//!    only when the exact stage misses and an encoder is configured
//!
//! The detector degrades gracefully: with no encoder (or a failing one) it
//! keeps answering from the exact stage alone.

mod canonical;
mod detector;

pub use canonical::{canonical_hash, canonicalize, ExactMatchIndex, HashCollision};
pub use detector::{
    DedupError, DetectorConfig, DetectorStats, DuplicateDetector, DuplicateResult, MatchReason,
    DEFAULT_THRESHOLD, DEFAULT_TOP_K,
};
