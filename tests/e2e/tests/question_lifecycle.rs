//! Question Lifecycle Journey
//!
//! The full platform loop: generate unique questions, persist them, schedule
//! reviews, track progress, and assemble a practice session.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizforge_core::{
    DetectorConfig, DuplicateDetector, Encoder, IndexBackend, Level, NewQuestion, ProgressTracker,
    QuestionBank, QuestionGenerator, ReviewScheduler, SessionBuilder,
};

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn generate_store_schedule_and_build_session() {
    let dir = tempfile::tempdir().unwrap();
    let bank = QuestionBank::new(Some(dir.path().join("bank.db"))).unwrap();

    let detector = DuplicateDetector::new(Encoder::Unconfigured, IndexBackend::BruteForce);
    let generator = QuestionGenerator::new();
    let mut rng = StdRng::seed_from_u64(42);

    // generate a week of unique questions and persist them
    let mut scheduler = ReviewScheduler::new();
    let mut ids = Vec::new();
    for _ in 0..8 {
        let question = generator
            .generate_unique_with_rng("Arrays", 1, Level::Medium, &detector, &mut rng)
            .unwrap();

        let mut input = NewQuestion::new(&question.id, &question.text);
        input.topic = Some(question.topic.clone());
        input.difficulty = Some(question.difficulty.to_string());
        input.week = Some(i64::from(question.week));
        bank.insert_question(&input).unwrap();

        scheduler.track(&question.id, day("2026-08-01"));
        ids.push(question.id);
    }

    assert_eq!(bank.question_count().unwrap(), 8);
    assert_eq!(detector.len(), 8);

    // every stored text is an exact duplicate of itself
    for record in bank.all_questions().unwrap() {
        let result = detector.check(&record.text).unwrap();
        assert!(result.is_duplicate);
        assert_eq!(result.matched_id.as_deref(), Some(record.id.as_str()));
    }

    // first review pass: half pass, half fail
    let mut progress = ProgressTracker::new();
    for (i, id) in ids.iter().enumerate() {
        let correct = i % 2 == 0;
        scheduler.record_review(id, correct, day("2026-08-02"));
        progress.record_attempt("Arrays", correct);
        bank.upsert_review(id, scheduler.state(id).unwrap()).unwrap();
    }

    // failed questions come back first
    let due_tomorrow = scheduler.due_on(day("2026-08-03"));
    assert_eq!(due_tomorrow.len(), 4);
    for id in &due_tomorrow {
        let position = ids.iter().position(|other| other == id).unwrap();
        assert!(position % 2 == 1, "passing question {} came due early", id);
    }

    // persisted schedule agrees with the in-memory one
    assert_eq!(bank.due_questions(day("2026-08-03")).unwrap().len(), 4);
    let reloaded = bank.load_scheduler().unwrap();
    for id in &ids {
        assert_eq!(reloaded.state(id), scheduler.state(id));
    }

    // weakness feeds the session's weak pool; reviews come from the schedule
    assert_eq!(progress.weakest_topics(1)[0].0, "Arrays");
    let session = SessionBuilder::new()
        .with_total(6)
        .build_with_rng(&due_tomorrow, &ids, &[], None, &mut rng)
        .unwrap();
    assert_eq!(session.len(), 6);

    // a restarted process sees the same detector state
    let rebuilt = bank
        .rebuild_detector(
            Encoder::Unconfigured,
            IndexBackend::BruteForce,
            DetectorConfig::default(),
        )
        .unwrap();
    assert_eq!(rebuilt.len(), 8);
    let sample = bank.get_question(&ids[0]).unwrap().unwrap();
    assert!(rebuilt.check(&sample.text).unwrap().is_duplicate);
}

#[test]
fn generator_refuses_to_repeat_itself_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let bank = QuestionBank::new(Some(dir.path().join("bank.db"))).unwrap();

    let detector = DuplicateDetector::new(Encoder::Unconfigured, IndexBackend::BruteForce);
    let generator = QuestionGenerator::new();
    let mut rng = StdRng::seed_from_u64(7);

    let first = generator
        .generate_unique_with_rng("Trees", 2, Level::Hard, &detector, &mut rng)
        .unwrap();
    bank.insert_question(&NewQuestion::new(&first.id, &first.text))
        .unwrap();

    // restart: detector rebuilt from the bank still remembers the text
    let rebuilt = bank
        .rebuild_detector(
            Encoder::Unconfigured,
            IndexBackend::BruteForce,
            DetectorConfig::default(),
        )
        .unwrap();
    assert!(rebuilt.check(&first.text).unwrap().is_duplicate);

    // a fresh generation round against the rebuilt detector cannot reuse it
    for _ in 0..5 {
        if let Ok(question) =
            generator.generate_unique_with_rng("Trees", 2, Level::Hard, &rebuilt, &mut rng)
        {
            assert_ne!(question.canonical_hash, first.canonical_hash);
        }
    }
}
