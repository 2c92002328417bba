//! Duplicate Detector
//!
//! Orchestrates the exact-match index, the encoder capability, and the
//! vector index to answer "is this text a duplicate of something already
//! registered, and if so of what?".
//!
//! Check order is cheap-first: canonical-hash lookup short-circuits before
//! any embedding is computed; the semantic stage runs only on an exact miss
//! with a configured encoder. A failing encoder never fails a check: the
//! detector logs and falls back to exact-only semantics, because hash
//! matching stays valid on its own.
//!
//! All methods take `&self`; state sits behind a `RwLock` so the detector
//! can be shared via `Arc` between concurrent registration and checking.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError, RwLock};

use lru::LruCache;
use serde::{Deserialize, Serialize};

use super::canonical::{canonical_hash, canonicalize, ExactMatchIndex};
use crate::embeddings::{Embedding, Encoder};
use crate::search::{IndexBackend, VectorIndex, VectorIndexError};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Default similarity threshold for the semantic stage
pub const DEFAULT_THRESHOLD: f64 = 0.85;

/// Default number of nearest neighbors consulted per check
pub const DEFAULT_TOP_K: usize = 5;

/// Default capacity of the per-text embedding cache
const DEFAULT_CACHE_CAPACITY: usize = 128;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Duplicate detection error types.
///
/// Encoder unavailability is deliberately absent: it is a degraded mode
/// handled inside the detector, never surfaced as a failure.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum DedupError {
    /// `add` called with an id that is already registered
    #[error("question id already registered: {0}")]
    DuplicateId(String),
    /// `add` called with text whose canonical hash is already registered
    #[error("text already registered under id {existing_id} (canonical hash {hash})")]
    DuplicateHash {
        /// Canonical hash of the rejected text
        hash: String,
        /// Id of the first registrant
        existing_id: String,
    },
    /// Embedding dimensionality differs from the index's established one
    #[error("embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Dimensionality fixed at the index's first insertion
        expected: usize,
        /// Dimensionality of the offending embedding
        got: usize,
    },
    /// `check` called with a threshold outside [0.0, 1.0]
    #[error("similarity threshold {0} outside [0.0, 1.0]")]
    InvalidThreshold(f64),
    /// Vector index backend failure
    #[error("vector index failure: {0}")]
    Index(String),
}

fn map_index_error(err: VectorIndexError) -> DedupError {
    match err {
        VectorIndexError::DimensionMismatch { expected, got } => {
            DedupError::DimensionMismatch { expected, got }
        }
        other => DedupError::Index(other.to_string()),
    }
}

// ============================================================================
// RESULT TYPES
// ============================================================================

/// How a duplicate was matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchReason {
    /// Canonical-hash hit
    Exact,
    /// Cosine similarity above threshold
    Semantic,
    /// No match
    None,
}

impl MatchReason {
    /// String form, as serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchReason::Exact => "exact",
            MatchReason::Semantic => "semantic",
            MatchReason::None => "none",
        }
    }
}

impl std::fmt::Display for MatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a duplicate check
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateResult {
    /// Whether the candidate duplicates a registered question
    pub is_duplicate: bool,
    /// Id of the matched registration, if any
    pub matched_id: Option<String>,
    /// How the match was made
    pub reason: MatchReason,
    /// Similarity of the match (1.0 for exact hits)
    pub similarity: Option<f32>,
}

impl DuplicateResult {
    fn exact(id: &str) -> Self {
        Self {
            is_duplicate: true,
            matched_id: Some(id.to_string()),
            reason: MatchReason::Exact,
            similarity: Some(1.0),
        }
    }

    fn semantic(id: &str, similarity: f32) -> Self {
        Self {
            is_duplicate: true,
            matched_id: Some(id.to_string()),
            reason: MatchReason::Semantic,
            similarity: Some(similarity),
        }
    }

    fn none() -> Self {
        Self {
            is_duplicate: false,
            matched_id: None,
            reason: MatchReason::None,
            similarity: None,
        }
    }
}

/// Detector statistics
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectorStats {
    /// Registered questions
    pub registered: usize,
    /// Registrations that carry an embedding
    pub with_embeddings: usize,
    /// Active vector index backend
    pub backend: &'static str,
    /// Configured encoder model, if any
    pub encoder_model: Option<String>,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Detector tuning knobs
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Similarity threshold used by [`DuplicateDetector::check`]
    pub threshold: f64,
    /// Nearest neighbors consulted per semantic check
    pub top_k: usize,
    /// Capacity of the per-text embedding cache
    pub cache_capacity: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            top_k: DEFAULT_TOP_K,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

// ============================================================================
// DUPLICATE DETECTOR
// ============================================================================

struct DetectorState {
    // id -> canonical hash; the registration record of truth
    ids: HashMap<String, String>,
    exact: ExactMatchIndex,
    vectors: VectorIndex,
}

impl DetectorState {
    fn rollback(&mut self, id: &str, hash: &str) {
        self.ids.remove(id);
        self.exact.remove(hash);
    }
}

/// Two-stage duplicate detector over registered question texts
pub struct DuplicateDetector {
    encoder: Encoder,
    config: DetectorConfig,
    state: RwLock<DetectorState>,
    embedding_cache: Mutex<LruCache<String, Embedding>>,
}

impl DuplicateDetector {
    /// Create a detector with default configuration
    pub fn new(encoder: Encoder, backend: IndexBackend) -> Self {
        Self::with_config(encoder, backend, DetectorConfig::default())
    }

    /// Create a detector with custom configuration
    pub fn with_config(encoder: Encoder, backend: IndexBackend, config: DetectorConfig) -> Self {
        let capacity = NonZeroUsize::new(config.cache_capacity.max(1))
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            encoder,
            config,
            state: RwLock::new(DetectorState {
                ids: HashMap::new(),
                exact: ExactMatchIndex::new(),
                vectors: VectorIndex::new(backend),
            }),
            embedding_cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Number of registered questions
    pub fn len(&self) -> usize {
        self.read_state().ids.len()
    }

    /// Whether no questions are registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `id` is registered
    pub fn contains_id(&self, id: &str) -> bool {
        self.read_state().ids.contains_key(id)
    }

    /// The encoder capability this detector was built with
    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    /// Detector statistics
    pub fn stats(&self) -> DetectorStats {
        let state = self.read_state();
        DetectorStats {
            registered: state.ids.len(),
            with_embeddings: state.vectors.len(),
            backend: state.vectors.backend().as_str(),
            encoder_model: self.encoder.model_name().map(str::to_string),
        }
    }

    /// Register a question text under a caller-assigned unique id.
    ///
    /// Registration is atomic: the id, hash, and (when available) embedding
    /// all land, or none do. The encoder runs before any state is touched,
    /// so an encoder failure cannot half-register a record; it degrades the
    /// registration to hash-only with a warning.
    pub fn add(&self, id: &str, text: &str) -> Result<(), DedupError> {
        let canonical = canonicalize(text);
        let hash = canonical_hash(text);
        let embedding = self.embed_degraded(&canonical);

        let mut state = self.write_state();

        if state.ids.contains_key(id) {
            return Err(DedupError::DuplicateId(id.to_string()));
        }
        if let Some(existing) = state.exact.lookup(&hash) {
            return Err(DedupError::DuplicateHash {
                hash,
                existing_id: existing.to_string(),
            });
        }
        if let (Some(emb), Some(expected)) = (&embedding, state.vectors.dimensions()) {
            if emb.dimensions != expected {
                return Err(DedupError::DimensionMismatch {
                    expected,
                    got: emb.dimensions,
                });
            }
        }

        state.ids.insert(id.to_string(), hash.clone());
        if let Err(collision) = state.exact.insert(hash.clone(), id.to_string()) {
            // unreachable after the lookup above; keep the signal anyway
            state.ids.remove(id);
            return Err(DedupError::DuplicateHash {
                hash: collision.hash,
                existing_id: collision.existing_id,
            });
        }
        if let Some(emb) = embedding {
            if let Err(e) = state.vectors.add(id, emb.vector) {
                state.rollback(id, &hash);
                return Err(map_index_error(e));
            }
        }

        Ok(())
    }

    /// Rehydrate one registration from persisted state.
    ///
    /// Same validation as [`add`](Self::add) but takes the stored hash and
    /// embedding as-is; no canonicalization or encoding happens here.
    pub fn restore(
        &self,
        id: &str,
        hash: &str,
        embedding: Option<Embedding>,
    ) -> Result<(), DedupError> {
        let mut state = self.write_state();

        if state.ids.contains_key(id) {
            return Err(DedupError::DuplicateId(id.to_string()));
        }
        if let Some(existing) = state.exact.lookup(hash) {
            return Err(DedupError::DuplicateHash {
                hash: hash.to_string(),
                existing_id: existing.to_string(),
            });
        }
        if let (Some(emb), Some(expected)) = (&embedding, state.vectors.dimensions()) {
            if emb.dimensions != expected {
                return Err(DedupError::DimensionMismatch {
                    expected,
                    got: emb.dimensions,
                });
            }
        }

        state.ids.insert(id.to_string(), hash.to_string());
        if let Err(collision) = state.exact.insert(hash.to_string(), id.to_string()) {
            state.ids.remove(id);
            return Err(DedupError::DuplicateHash {
                hash: collision.hash,
                existing_id: collision.existing_id,
            });
        }
        if let Some(emb) = embedding {
            if let Err(e) = state.vectors.add(id, emb.vector) {
                state.rollback(id, hash);
                return Err(map_index_error(e));
            }
        }

        Ok(())
    }

    /// Check a candidate text against all registrations at the configured
    /// threshold
    pub fn check(&self, text: &str) -> Result<DuplicateResult, DedupError> {
        self.check_with_threshold(text, self.config.threshold)
    }

    /// Check a candidate text at an explicit threshold in [0.0, 1.0]
    pub fn check_with_threshold(
        &self,
        text: &str,
        threshold: f64,
    ) -> Result<DuplicateResult, DedupError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(DedupError::InvalidThreshold(threshold));
        }

        let canonical = canonicalize(text);
        let hash = canonical_hash(text);

        {
            let state = self.read_state();
            if let Some(id) = state.exact.lookup(&hash) {
                return Ok(DuplicateResult::exact(id));
            }
            if state.vectors.is_empty() {
                return Ok(DuplicateResult::none());
            }
        }
        // exact stage missed and embeddings exist; encode outside the lock
        if !self.encoder.is_configured() {
            return Ok(DuplicateResult::none());
        }
        let Some(embedding) = self.embed_degraded(&canonical) else {
            return Ok(DuplicateResult::none());
        };

        let state = self.read_state();
        let hits = state
            .vectors
            .query(&embedding.vector, self.config.top_k)
            .map_err(map_index_error)?;

        match hits.first() {
            Some((id, similarity)) if f64::from(*similarity) >= threshold => {
                Ok(DuplicateResult::semantic(id, *similarity))
            }
            _ => Ok(DuplicateResult::none()),
        }
    }

    /// Encode `canonical` text, degrading to `None` on any encoder problem.
    /// Results are cached per canonical text.
    fn embed_degraded(&self, canonical: &str) -> Option<Embedding> {
        if let Ok(mut cache) = self.embedding_cache.lock() {
            if let Some(hit) = cache.get(canonical) {
                return Some(hit.clone());
            }
        }

        match self.encoder.encode(canonical) {
            Ok(Some(embedding)) => {
                if let Ok(mut cache) = self.embedding_cache.lock() {
                    cache.put(canonical.to_string(), embedding.clone());
                }
                Some(embedding)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "encoder failed, degrading to exact-match only");
                None
            }
        }
    }

    // State mutations are validate-then-mutate, so data behind a poisoned
    // lock is still consistent; recover instead of propagating the poison.
    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, DetectorState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, DetectorState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::{EncoderError, TextEncoder};
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Encoder with a fixed text → vector table, keyed by canonical text
    struct TableEncoder {
        dims: usize,
        table: HashMap<String, Vec<f32>>,
    }

    impl TableEncoder {
        fn new(dims: usize, entries: &[(&str, &[f32])]) -> Self {
            let table = entries
                .iter()
                .map(|(text, vector)| (canonicalize(text), vector.to_vec()))
                .collect();
            Self { dims, table }
        }
    }

    impl TextEncoder for TableEncoder {
        fn model_name(&self) -> &str {
            "table-test-encoder"
        }

        fn dimensions(&self) -> usize {
            self.dims
        }

        fn encode(&self, text: &str) -> Result<Embedding, EncoderError> {
            self.table
                .get(&canonicalize(text))
                .map(|v| Embedding::new(v.clone()))
                .ok_or_else(|| EncoderError::EncodeFailed(format!("no vector for {:?}", text)))
        }
    }

    /// Encoder that always fails, simulating a down embedding backend
    struct BrokenEncoder;

    impl TextEncoder for BrokenEncoder {
        fn model_name(&self) -> &str {
            "broken-test-encoder"
        }

        fn dimensions(&self) -> usize {
            2
        }

        fn encode(&self, _text: &str) -> Result<Embedding, EncoderError> {
            Err(EncoderError::EncodeFailed("backend down".to_string()))
        }
    }

    fn exact_only_detector() -> DuplicateDetector {
        DuplicateDetector::new(Encoder::Unconfigured, IndexBackend::BruteForce)
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        // Scenario A
        let detector = exact_only_detector();
        detector
            .add("1", "Find the maximum in an array of size 10")
            .unwrap();

        let result = detector
            .check("find the maximum in an array of size 10")
            .unwrap();
        assert!(result.is_duplicate);
        assert_eq!(result.matched_id.as_deref(), Some("1"));
        assert_eq!(result.reason, MatchReason::Exact);
        assert_eq!(result.similarity, Some(1.0));
    }

    #[test]
    fn test_exact_match_whitespace_insensitive() {
        let detector = exact_only_detector();
        detector.add("1", "What is a binary heap?").unwrap();

        let result = detector.check("   What is a binary heap?   ").unwrap();
        assert!(result.is_duplicate);
        assert_eq!(result.reason, MatchReason::Exact);
    }

    #[test]
    fn test_semantic_match_catches_paraphrase() {
        // Scenario B: paraphrases map to nearby vectors
        let encoder = TableEncoder::new(
            3,
            &[
                ("Find the max value in a list of 10 numbers", &[0.9, 0.1, 0.05]),
                (
                    "Determine the maximum element in an array of size 10",
                    &[0.85, 0.15, 0.1],
                ),
                ("Explain how TCP handshakes work", &[0.0, 0.1, 0.95]),
            ],
        );
        let detector = DuplicateDetector::new(
            Encoder::configured(Arc::new(encoder)),
            IndexBackend::BruteForce,
        );
        detector
            .add("1", "Find the max value in a list of 10 numbers")
            .unwrap();

        let result = detector
            .check_with_threshold("Determine the maximum element in an array of size 10", 0.80)
            .unwrap();
        assert!(result.is_duplicate);
        assert_eq!(result.matched_id.as_deref(), Some("1"));
        assert_eq!(result.reason, MatchReason::Semantic);
        assert!(result.similarity.unwrap() >= 0.80);

        let unrelated = detector
            .check_with_threshold("Explain how TCP handshakes work", 0.80)
            .unwrap();
        assert!(!unrelated.is_duplicate);
        assert_eq!(unrelated.reason, MatchReason::None);
    }

    #[test]
    fn test_no_encoder_no_false_positive() {
        // Scenario C
        let detector = exact_only_detector();
        detector.add("1", "X").unwrap();

        let result = detector.check("completely different text Y").unwrap();
        assert!(!result.is_duplicate);
        assert!(result.matched_id.is_none());
        assert_eq!(result.reason, MatchReason::None);
    }

    #[test]
    fn test_duplicate_id_rejected_state_unchanged() {
        // Scenario D
        let detector = exact_only_detector();
        detector.add("1", "A").unwrap();

        let err = detector.add("1", "B").unwrap_err();
        assert!(matches!(err, DedupError::DuplicateId(ref id) if id == "1"));

        assert_eq!(detector.len(), 1);
        // "B" was never registered
        let result = detector.check("B").unwrap();
        assert!(!result.is_duplicate);
    }

    #[test]
    fn test_invalid_threshold() {
        // Scenario E
        let detector = exact_only_detector();
        let err = detector.check_with_threshold("anything", 1.5).unwrap_err();
        assert!(matches!(err, DedupError::InvalidThreshold(t) if t == 1.5));

        let err = detector.check_with_threshold("anything", -0.1).unwrap_err();
        assert!(matches!(err, DedupError::InvalidThreshold(_)));
    }

    #[test]
    fn test_duplicate_hash_rejected_with_first_registrant() {
        let detector = exact_only_detector();
        detector.add("1", "Same question text").unwrap();

        let err = detector.add("2", "  SAME QUESTION TEXT  ").unwrap_err();
        match err {
            DedupError::DuplicateHash { existing_id, .. } => assert_eq!(existing_id, "1"),
            other => panic!("unexpected error: {}", other),
        }

        // idempotence: the original registration still answers exact
        let result = detector.check("same question text").unwrap();
        assert!(result.is_duplicate);
        assert_eq!(result.matched_id.as_deref(), Some("1"));
        assert_eq!(result.reason, MatchReason::Exact);
        assert_eq!(detector.len(), 1);
    }

    #[test]
    fn test_exact_short_circuits_before_encoding() {
        // a broken encoder must not matter when the hash hits
        let detector = DuplicateDetector::new(
            Encoder::configured(Arc::new(BrokenEncoder)),
            IndexBackend::BruteForce,
        );
        detector.add("1", "What is a mutex?").unwrap();

        let result = detector.check("what is a mutex?").unwrap();
        assert!(result.is_duplicate);
        assert_eq!(result.reason, MatchReason::Exact);
    }

    #[test]
    fn test_broken_encoder_degrades_not_crashes() {
        let detector = DuplicateDetector::new(
            Encoder::configured(Arc::new(BrokenEncoder)),
            IndexBackend::BruteForce,
        );
        // add registers the hash even though encoding fails
        detector.add("1", "What is a semaphore?").unwrap();
        assert_eq!(detector.len(), 1);
        assert_eq!(detector.stats().with_embeddings, 0);

        // check on different text degrades to "none", not an error
        let result = detector.check("Explain condition variables").unwrap();
        assert!(!result.is_duplicate);
        assert_eq!(result.reason, MatchReason::None);
    }

    #[test]
    fn test_threshold_monotonicity() {
        let encoder = TableEncoder::new(
            2,
            &[
                ("alpha question", &[1.0, 0.0]),
                ("alpha question variant", &[0.95, 0.3]),
            ],
        );
        let detector = DuplicateDetector::new(
            Encoder::configured(Arc::new(encoder)),
            IndexBackend::BruteForce,
        );
        detector.add("1", "alpha question").unwrap();

        let strict = detector
            .check_with_threshold("alpha question variant", 0.90)
            .unwrap();
        assert!(strict.is_duplicate);

        // any lower threshold must also report the duplicate
        for threshold in [0.85, 0.5, 0.0] {
            let loose = detector
                .check_with_threshold("alpha question variant", threshold)
                .unwrap();
            assert!(loose.is_duplicate, "missed at threshold {}", threshold);
        }
    }

    #[test]
    fn test_dimension_mismatch_leaves_no_half_registration() {
        let encoder = TableEncoder::new(
            3,
            &[
                ("first question", &[1.0, 0.0, 0.0]),
                ("second question", &[1.0, 0.0]),
            ],
        );
        let detector = DuplicateDetector::new(
            Encoder::configured(Arc::new(encoder)),
            IndexBackend::BruteForce,
        );
        detector.add("1", "first question").unwrap();

        let err = detector.add("2", "second question").unwrap_err();
        assert!(matches!(err, DedupError::DimensionMismatch { expected: 3, got: 2 }));

        // neither the id nor the hash of the failed add is registered
        assert!(!detector.contains_id("2"));
        let result = detector.check("second question").unwrap();
        assert_eq!(result.reason, MatchReason::None);
    }

    #[test]
    fn test_tie_break_prefers_earlier_registration() {
        let encoder = TableEncoder::new(
            2,
            &[
                ("first registered", &[1.0, 0.0]),
                ("second registered", &[2.0, 0.0]),
                ("candidate text", &[3.0, 0.0]),
            ],
        );
        let detector = DuplicateDetector::new(
            Encoder::configured(Arc::new(encoder)),
            IndexBackend::BruteForce,
        );
        detector.add("early", "first registered").unwrap();
        detector.add("late", "second registered").unwrap();

        let result = detector.check_with_threshold("candidate text", 0.99).unwrap();
        assert!(result.is_duplicate);
        assert_eq!(result.matched_id.as_deref(), Some("early"));
    }

    #[test]
    fn test_restore_rebuilds_without_encoding() {
        let detector = DuplicateDetector::new(
            Encoder::configured(Arc::new(BrokenEncoder)),
            IndexBackend::BruteForce,
        );
        let hash = canonical_hash("restored question");
        detector
            .restore("1", &hash, Some(Embedding::new(vec![1.0, 0.0])))
            .unwrap();

        assert_eq!(detector.len(), 1);
        assert_eq!(detector.stats().with_embeddings, 1);

        let result = detector.check("Restored Question").unwrap();
        assert!(result.is_duplicate);
        assert_eq!(result.reason, MatchReason::Exact);
    }

    #[test]
    fn test_concurrent_add_and_check() {
        let detector = Arc::new(exact_only_detector());
        let mut handles = Vec::new();

        for worker in 0..4 {
            let detector = Arc::clone(&detector);
            handles.push(std::thread::spawn(move || {
                for i in 0..50 {
                    let id = format!("w{}-q{}", worker, i);
                    let text = format!("question {} from worker {}", i, worker);
                    match detector.add(&id, &text) {
                        Ok(()) => {}
                        Err(DedupError::DuplicateHash { .. }) => {}
                        Err(other) => panic!("unexpected error: {}", other),
                    }
                    let result = detector.check(&format!("question {} from worker 0", i)).unwrap();
                    assert_ne!(result.reason, MatchReason::Semantic);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }
        // one registration per distinct text
        assert_eq!(detector.len(), 200);
    }

    #[test]
    fn test_stats() {
        let detector = exact_only_detector();
        detector.add("1", "a question").unwrap();

        let stats = detector.stats();
        assert_eq!(stats.registered, 1);
        assert_eq!(stats.with_embeddings, 0);
        assert_eq!(stats.backend, "brute-force");
        assert!(stats.encoder_model.is_none());
    }

    #[test]
    fn test_result_serialization() {
        let detector = exact_only_detector();
        detector.add("1", "serialized question").unwrap();

        let result = detector.check("serialized question").unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isDuplicate"], true);
        assert_eq!(json["matchedId"], "1");
        assert_eq!(json["reason"], "exact");
    }
}
