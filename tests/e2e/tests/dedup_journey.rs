//! Dedup Journey Tests
//!
//! Register a corpus, then drive the detector through exact hits, semantic
//! hits, degraded modes, and persistence round-trips the way the platform
//! would during a real serving session.

use std::sync::Arc;

use quizforge_core::{
    DedupError, DetectorConfig, DuplicateDetector, Encoder, IndexBackend, MatchReason,
    NewQuestion, QuestionBank, TextEncoder,
};
use quizforge_e2e_tests::fixtures::{sample_corpus, BagOfWordsEncoder};

fn corpus_encoder() -> Arc<BagOfWordsEncoder> {
    let texts: Vec<&str> = sample_corpus().iter().map(|(_, text)| *text).collect();
    Arc::new(BagOfWordsEncoder::from_corpus(&texts))
}

fn seeded_detector(encoder: Encoder) -> DuplicateDetector {
    let detector = DuplicateDetector::new(encoder, IndexBackend::BruteForce);
    for (id, text) in sample_corpus() {
        detector.add(id, text).unwrap();
    }
    detector
}

#[test]
fn exact_hits_survive_any_casing_and_padding() {
    let detector = seeded_detector(Encoder::Unconfigured);

    for (id, text) in sample_corpus() {
        let shouted = format!("   {}   ", text.to_uppercase());
        let result = detector.check(&shouted).unwrap();
        assert!(result.is_duplicate);
        assert_eq!(result.reason, MatchReason::Exact);
        assert_eq!(result.matched_id.as_deref(), Some(id));
    }
}

#[test]
fn semantic_stage_catches_paraphrase_and_respects_threshold() {
    let detector = seeded_detector(Encoder::configured(corpus_encoder()));

    // heavy vocabulary overlap with q-arrays-1, but not an exact hash hit
    let paraphrase = "Write an algorithm to find the maximum element in an array of size 500.";

    let loose = detector.check_with_threshold(paraphrase, 0.70).unwrap();
    assert!(loose.is_duplicate);
    assert_eq!(loose.reason, MatchReason::Semantic);
    assert_eq!(loose.matched_id.as_deref(), Some("q-arrays-1"));

    // the same candidate must stay a duplicate at every lower threshold
    for threshold in [0.5, 0.2, 0.0] {
        let result = detector.check_with_threshold(paraphrase, threshold).unwrap();
        assert!(result.is_duplicate, "missed at threshold {}", threshold);
    }

    // an impossibly strict threshold rejects it
    let strict = detector.check_with_threshold(paraphrase, 1.0).unwrap();
    assert!(!strict.is_duplicate);
}

#[test]
fn unrelated_text_is_not_flagged() {
    let detector = seeded_detector(Encoder::configured(corpus_encoder()));

    let result = detector
        .check("Explain the CAP theorem tradeoffs for distributed databases.")
        .unwrap();
    assert!(!result.is_duplicate);
    assert_eq!(result.reason, MatchReason::None);
}

#[test]
fn exact_only_mode_never_produces_semantic_hits() {
    let detector = seeded_detector(Encoder::Unconfigured);

    let paraphrase = "Write an algorithm to find the maximum element in an array of size 500.";
    let result = detector.check_with_threshold(paraphrase, 0.0).unwrap();
    assert!(!result.is_duplicate);
    assert_eq!(result.reason, MatchReason::None);
}

#[test]
fn structural_errors_propagate() {
    let detector = seeded_detector(Encoder::Unconfigured);

    assert!(matches!(
        detector.check_with_threshold("anything", 1.5),
        Err(DedupError::InvalidThreshold(_))
    ));
    assert!(matches!(
        detector.add("q-arrays-1", "brand new text"),
        Err(DedupError::DuplicateId(_))
    ));
    assert!(matches!(
        detector.add("brand-new-id", sample_corpus()[0].1),
        Err(DedupError::DuplicateHash { .. })
    ));
}

#[test]
fn persisted_bank_rebuilds_an_equivalent_detector() {
    let dir = tempfile::tempdir().unwrap();
    let bank = QuestionBank::new(Some(dir.path().join("bank.db"))).unwrap();

    let encoder = corpus_encoder();
    for (id, text) in sample_corpus() {
        let mut input = NewQuestion::new(id, text);
        input.embedding = Some(encoder.encode(text).unwrap());
        input.embedding_model = Some("bag-of-words-fixture".to_string());
        bank.insert_question(&input).unwrap();
    }

    let detector = bank
        .rebuild_detector(
            Encoder::configured(encoder),
            IndexBackend::BruteForce,
            DetectorConfig::default(),
        )
        .unwrap();

    assert_eq!(detector.len(), sample_corpus().len());
    assert_eq!(detector.stats().with_embeddings, sample_corpus().len());

    // exact stage answers straight from the restored hashes
    let result = detector.check(sample_corpus()[2].1).unwrap();
    assert_eq!(result.reason, MatchReason::Exact);
    assert_eq!(result.matched_id.as_deref(), Some("q-lists-1"));

    // semantic stage works over the restored embedding bytes
    let paraphrase = "Write an algorithm to find the maximum element in an array of size 500.";
    let semantic = detector.check_with_threshold(paraphrase, 0.70).unwrap();
    assert!(semantic.is_duplicate);
    assert_eq!(semantic.reason, MatchReason::Semantic);
}
