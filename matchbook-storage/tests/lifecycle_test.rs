//! Prediction lifecycle tests: idempotent inserts, confidence ceiling
//! enforcement, write-once reconciliation, metadata recompute.

use chrono::{NaiveDate, Utc};

use matchbook_core::models::{ConfidenceBucket, InsertOutcome, LearningPhase, Prediction};
use matchbook_core::traits::IPredictionStore;
use matchbook_core::{MatchKey, MatchbookError};
use matchbook_storage::StorageEngine;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn make_prediction(tournament: &str, p1: &str, p2: &str, date: &str, confidence: u8) -> Prediction {
    let prediction_day = day(date);
    Prediction {
        match_key: MatchKey::resolve(tournament, p1, p2, Some(prediction_day)),
        prediction_day,
        tournament: tournament.to_string(),
        surface: "Grass".to_string(),
        player1: p1.to_string(),
        player2: p2.to_string(),
        odds_player1: 1.8,
        odds_player2: 2.1,
        predicted_winner: p1.to_string(),
        confidence_score: confidence,
        rationale: "head to head record".to_string(),
        risk_label: "moderate".to_string(),
        value_bet: false,
        recommended_action: "monitor".to_string(),
        data_quality_score: 80,
        learning_phase: LearningPhase::Collection,
        days_operated: 0,
        system_accuracy: 0.0,
        created_at: Utc::now(),
        actual_winner: None,
        prediction_correct: None,
        confidence_bucket: None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// INSERT: one row per match key, duplicates are not errors
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn insert_then_get_roundtrip() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let prediction = make_prediction("Wimbledon", "Alice", "Bob", "2024-07-01", 55);

    let outcome = engine.insert_if_absent(&prediction).unwrap();
    assert_eq!(outcome, InsertOutcome::Created);

    let stored = engine.get(&prediction.match_key).unwrap().unwrap();
    assert_eq!(stored.match_key, prediction.match_key);
    assert_eq!(stored.tournament, "Wimbledon");
    assert_eq!(stored.confidence_score, 55);
    assert!(!stored.is_resolved());
}

#[test]
fn duplicate_insert_is_reported_not_stored() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let prediction = make_prediction("Wimbledon", "Alice", "Bob", "2024-07-01", 55);

    assert_eq!(
        engine.insert_if_absent(&prediction).unwrap(),
        InsertOutcome::Created
    );

    // Same match, different surface text: the key wins, nothing changes.
    let mut again = prediction.clone();
    again.surface = "Clay".to_string();
    again.confidence_score = 40;
    assert_eq!(
        engine.insert_if_absent(&again).unwrap(),
        InsertOutcome::AlreadyExists
    );

    let stored = engine.get(&prediction.match_key).unwrap().unwrap();
    assert_eq!(stored.surface, "Grass");
    assert_eq!(stored.confidence_score, 55);
}

#[test]
fn player_order_does_not_create_a_second_row() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let first = make_prediction("Wimbledon", "Alice", "Bob", "2024-07-01", 55);
    let swapped = make_prediction("Wimbledon", "Bob", "Alice", "2024-07-01", 55);

    assert_eq!(first.match_key, swapped.match_key);
    assert_eq!(
        engine.insert_if_absent(&first).unwrap(),
        InsertOutcome::Created
    );
    assert_eq!(
        engine.insert_if_absent(&swapped).unwrap(),
        InsertOutcome::AlreadyExists
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// CONFIDENCE CEILING: hard error, never silently clamped
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn confidence_above_ceiling_is_rejected() {
    let engine = StorageEngine::open_in_memory().unwrap();
    // Bootstrap metadata is collection phase, ceiling 60.
    let prediction = make_prediction("Wimbledon", "Alice", "Bob", "2024-07-01", 61);

    let err = engine.insert_if_absent(&prediction).unwrap_err();
    match err {
        MatchbookError::ConfidenceAboveCeiling { confidence, ceiling } => {
            assert_eq!(confidence, 61);
            assert_eq!(ceiling, 60);
        }
        other => panic!("expected ConfidenceAboveCeiling, got {other}"),
    }

    // Nothing was stored.
    assert!(engine.get(&prediction.match_key).unwrap().is_none());
}

#[test]
fn ceiling_rises_with_phase() {
    let engine = StorageEngine::open_in_memory().unwrap();
    // Advance to pattern_recognition (days 8..=21, ceiling 75).
    engine.recompute_metadata(10).unwrap();

    let ok = make_prediction("Wimbledon", "Alice", "Bob", "2024-07-01", 75);
    assert_eq!(engine.insert_if_absent(&ok).unwrap(), InsertOutcome::Created);

    let too_high = make_prediction("Wimbledon", "Carol", "Dave", "2024-07-01", 76);
    assert!(matches!(
        engine.insert_if_absent(&too_high).unwrap_err(),
        MatchbookError::ConfidenceAboveCeiling { ceiling: 75, .. }
    ));
}

// ═══════════════════════════════════════════════════════════════════════════
// RECONCILIATION: first writer wins, outcomes are write-once
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn apply_outcome_resolves_once() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let prediction = make_prediction("Wimbledon", "Alice", "Bob", "2024-07-01", 55);
    engine.insert_if_absent(&prediction).unwrap();

    let updated = engine
        .apply_outcome(&prediction.match_key, "Alice", true, ConfidenceBucket::Medium)
        .unwrap();
    assert!(updated);

    let stored = engine.get(&prediction.match_key).unwrap().unwrap();
    assert_eq!(stored.actual_winner.as_deref(), Some("Alice"));
    assert_eq!(stored.prediction_correct, Some(true));
    assert_eq!(stored.confidence_bucket, Some(ConfidenceBucket::Medium));

    // A second writer loses: no update, original outcome intact.
    let updated = engine
        .apply_outcome(&prediction.match_key, "Bob", false, ConfidenceBucket::Medium)
        .unwrap();
    assert!(!updated);

    let stored = engine.get(&prediction.match_key).unwrap().unwrap();
    assert_eq!(stored.actual_winner.as_deref(), Some("Alice"));
    assert_eq!(stored.prediction_correct, Some(true));
}

#[test]
fn apply_outcome_on_missing_key_updates_nothing() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let key = MatchKey::resolve("Wimbledon", "Nobody", "NoOne", Some(day("2024-07-01")));
    let updated = engine
        .apply_outcome(&key, "Nobody", true, ConfidenceBucket::Low)
        .unwrap();
    assert!(!updated);
}

#[test]
fn unresolved_listing_shrinks_as_outcomes_land() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let a = make_prediction("Wimbledon", "Alice", "Bob", "2024-07-01", 55);
    let b = make_prediction("Wimbledon", "Carol", "Dave", "2024-07-01", 50);
    let other_day = make_prediction("Wimbledon", "Eve", "Frank", "2024-07-02", 50);
    engine.insert_if_absent(&a).unwrap();
    engine.insert_if_absent(&b).unwrap();
    engine.insert_if_absent(&other_day).unwrap();

    assert_eq!(engine.list_unresolved(day("2024-07-01")).unwrap().len(), 2);

    engine
        .apply_outcome(&a.match_key, "Alice", true, ConfidenceBucket::Medium)
        .unwrap();
    let remaining = engine.list_unresolved(day("2024-07-01")).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].match_key, b.match_key);
}

// ═══════════════════════════════════════════════════════════════════════════
// METADATA: full recompute from the predictions table
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn metadata_bootstrap_is_collection_phase() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let meta = engine.load_metadata().unwrap();
    assert_eq!(meta.days_operated, 0);
    assert_eq!(meta.learning_phase, LearningPhase::Collection);
    assert_eq!(meta.max_confidence_allowed, 60);
    assert_eq!(meta.total_resolved, 0);
}

#[test]
fn recompute_counts_resolved_predictions() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let a = make_prediction("Wimbledon", "Alice", "Bob", "2024-07-01", 55);
    let b = make_prediction("Wimbledon", "Carol", "Dave", "2024-07-01", 45);
    let unresolved = make_prediction("Wimbledon", "Eve", "Frank", "2024-07-02", 50);
    engine.insert_if_absent(&a).unwrap();
    engine.insert_if_absent(&b).unwrap();
    engine.insert_if_absent(&unresolved).unwrap();

    engine
        .apply_outcome(&a.match_key, "Alice", true, ConfidenceBucket::Medium)
        .unwrap();
    engine
        .apply_outcome(&b.match_key, "Dave", false, ConfidenceBucket::Low)
        .unwrap();

    let meta = engine.recompute_metadata(5).unwrap();
    assert_eq!(meta.days_operated, 5);
    assert_eq!(meta.learning_phase, LearningPhase::Collection);
    assert_eq!(meta.total_resolved, 2);
    assert_eq!(meta.correct_count, 1);
    assert_eq!(meta.incorrect_count, 1);
    assert!((meta.accuracy_pct - 50.0).abs() < f64::EPSILON);
    assert_eq!(meta.medium_bucket.total, 1);
    assert_eq!(meta.medium_bucket.correct, 1);
    assert_eq!(meta.low_bucket.total, 1);
    assert_eq!(meta.low_bucket.correct, 0);
    assert_eq!(meta.high_bucket.total, 0);
}

#[test]
fn recompute_is_idempotent() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let a = make_prediction("Wimbledon", "Alice", "Bob", "2024-07-01", 55);
    engine.insert_if_absent(&a).unwrap();
    engine
        .apply_outcome(&a.match_key, "Alice", true, ConfidenceBucket::Medium)
        .unwrap();

    let first = engine.recompute_metadata(3).unwrap();
    let second = engine.recompute_metadata(3).unwrap();
    assert_eq!(first.total_resolved, second.total_resolved);
    assert_eq!(first.correct_count, second.correct_count);
    assert_eq!(first.medium_bucket.total, second.medium_bucket.total);
}

#[test]
fn recompute_advances_phase_boundaries() {
    let engine = StorageEngine::open_in_memory().unwrap();

    let meta = engine.recompute_metadata(7).unwrap();
    assert_eq!(meta.learning_phase, LearningPhase::Collection);
    assert_eq!(meta.max_confidence_allowed, 60);

    let meta = engine.recompute_metadata(8).unwrap();
    assert_eq!(meta.learning_phase, LearningPhase::PatternRecognition);
    assert_eq!(meta.max_confidence_allowed, 75);

    let meta = engine.recompute_metadata(22).unwrap();
    assert_eq!(meta.learning_phase, LearningPhase::Mature);
    assert_eq!(meta.max_confidence_allowed, 100);
}

// ═══════════════════════════════════════════════════════════════════════════
// PERSISTENCE: file-backed data survives engine close + reopen
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn predictions_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("matchbook.db");
    let prediction = make_prediction("Wimbledon", "Alice", "Bob", "2024-07-01", 55);

    {
        let engine = StorageEngine::open(&db_path).unwrap();
        engine.insert_if_absent(&prediction).unwrap();
        engine
            .apply_outcome(&prediction.match_key, "Alice", true, ConfidenceBucket::Medium)
            .unwrap();
        engine.recompute_metadata(4).unwrap();
    }

    {
        let engine = StorageEngine::open(&db_path).unwrap();
        let stored = engine.get(&prediction.match_key).unwrap().unwrap();
        assert_eq!(stored.actual_winner.as_deref(), Some("Alice"));

        let meta = engine.load_metadata().unwrap();
        assert_eq!(meta.days_operated, 4);
        assert_eq!(meta.total_resolved, 1);
    }
}
