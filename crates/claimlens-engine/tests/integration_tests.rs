//! Integration tests for claimlens-engine
//!
//! These tests drive the full loop: analyze, feedback, reanalyze, export,
//! import and persistence.

use claimlens_domain::{ClaimType, DimensionValue, Efficacy, Label, Persistence};
use claimlens_engine::{Engine, EngineConfig, EngineError, SharedEngine};
use claimlens_store::{JsonFileBackend, MergeConfig, StoreError};
use std::collections::BTreeSet;
use std::thread;
use tempfile::TempDir;

#[test]
fn test_analyze_reference_claims() {
    let mut engine = Engine::default_config();
    let results = engine
        .analyze("该产品24小时长效保湿，温和不刺激\nxyzxyz qqq")
        .unwrap();

    assert_eq!(results.len(), 2);
    assert!(results[0].efficacy.contains(&Efficacy::Moisturizing));
    assert_eq!(results[0].persistence, Persistence::Durable);
    assert!(results[0].claim_types.contains(&ClaimType::Mild));

    assert_eq!(results[1].efficacy, BTreeSet::from([Efficacy::Other]));
    assert!((results[1].efficacy_confidence() - 0.1).abs() < 1e-9);
}

#[test]
fn test_correction_feeds_next_analysis() {
    let mut engine = Engine::default_config();
    let id = engine.analyze("雪肌奇迹").unwrap()[0].id;

    let outcome = engine
        .correct(
            id,
            DimensionValue::Efficacy(BTreeSet::from([Efficacy::Whitening])),
            Some("雪肌"),
        )
        .unwrap();
    assert_eq!(outcome.registered, vec![Label::Efficacy(Efficacy::Whitening)]);

    // The stored result is overwritten in place
    assert!(engine.result(id).unwrap().efficacy.contains(&Efficacy::Whitening));

    let again = engine.analyze("雪肌奇迹").unwrap();
    assert!(again[0].efficacy.contains(&Efficacy::Whitening));
    assert_eq!(engine.learning_summary().user_corrections, 1);
}

#[test]
fn test_confirm_updates_stats() {
    let mut engine = Engine::default_config();
    let id = engine.analyze("长效保湿").unwrap()[0].id;
    engine.confirm(id).unwrap();

    let summary = engine.learning_summary();
    assert_eq!(summary.feedback_actions, 1);
    assert!((summary.accuracy_rate - 100.0).abs() < 1e-9);
    assert_eq!(engine.store().score("保湿"), Some(1.0));
}

#[test]
fn test_export_import_into_fresh_engine() {
    let mut source = Engine::default_config();
    source.learn(Efficacy::Moisturizing.into(), "补水").unwrap();
    source.remove(Efficacy::Moisturizing.into(), "甘油").unwrap();
    let json = source.export_json().unwrap();

    let mut target = Engine::default_config();
    target.learn(Efficacy::Moisturizing.into(), "滋润").unwrap();
    target.import_json(&json).unwrap();

    let learned = target.store().learned_for(Efficacy::Moisturizing.into());
    assert_eq!(learned, &["滋润".to_string(), "补水".to_string()]);

    let results = target.analyze("甘油配方").unwrap();
    assert!(!results[0].efficacy.contains(&Efficacy::Moisturizing));
}

#[test]
fn test_invalid_import_is_rejected_without_changes() {
    let mut engine = Engine::default_config();
    engine.learn(ClaimType::Mild.into(), "零负担").unwrap();
    let before = engine.store().clone();

    let err = engine.import_json(r#"{"newKeywords": 42}"#).unwrap_err();
    assert!(matches!(err, EngineError::Store(StoreError::ImportFormat(_))));
    assert_eq!(engine.store(), &before);
}

#[test]
fn test_overwrite_tombstone_merge() {
    let mut source = Engine::default_config();
    source.remove(Efficacy::Moisturizing.into(), "水分").unwrap();
    let json = source.export_json().unwrap();

    let config = EngineConfig {
        merge: MergeConfig::overwrite_tombstones(),
        ..EngineConfig::default()
    };
    let mut target = Engine::new(config).unwrap();
    target.remove(Efficacy::Moisturizing.into(), "甘油").unwrap();
    target.import_json(&json).unwrap();

    let removed = target.store().removed_for(Efficacy::Moisturizing.into());
    assert_eq!(removed, &["水分".to_string()]);
}

#[test]
fn test_state_survives_restart() {
    let dir = TempDir::new().unwrap();
    let backend = JsonFileBackend::new(dir.path().join("learning.json"));

    {
        let mut engine =
            Engine::with_store(EngineConfig::default(), backend.load().unwrap()).unwrap();
        engine.learn(Persistence::Durable.into(), "一晚").unwrap();
        backend.save(engine.store()).unwrap();
    }

    let mut engine = Engine::with_store(EngineConfig::default(), backend.load().unwrap()).unwrap();
    let results = engine.analyze("妆效一晚不脱").unwrap();
    assert_eq!(results[0].persistence, Persistence::Durable);
}

#[test]
fn test_shared_engine_serializes_mutations() {
    let shared = SharedEngine::new(Engine::default_config());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let shared = shared.clone();
            thread::spawn(move || {
                shared
                    .with(|engine| engine.learn(Efficacy::Moisturizing.into(), &format!("kw{}", i)))
                    .unwrap()
                    .unwrap()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }

    let count = shared
        .with(|engine| engine.store().learned_for(Efficacy::Moisturizing.into()).len())
        .unwrap();
    assert_eq!(count, 8);
}

#[test]
fn test_statistics_over_batch() {
    let mut engine = Engine::default_config();
    engine.analyze("保湿\n美白\n保湿美白").unwrap();
    let stats = engine.statistics();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.efficacy.get(&Efficacy::Moisturizing), Some(&2));

    engine.clear_results();
    assert_eq!(engine.statistics().total, 0);
}
