//! Integration tests for claimlens-feedback
//!
//! Classify, apply feedback, rebuild the dictionary, classify again.

use claimlens_classifier::{Classifier, PatternDictionary};
use claimlens_domain::{DimensionValue, Efficacy, Label, Persistence};
use claimlens_feedback::FeedbackProcessor;
use claimlens_store::LearningStore;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn classify(store: &LearningStore, text: &str) -> claimlens_domain::AnalysisResult {
    let classifier = Classifier::default_config();
    let dict = PatternDictionary::build(store, true);
    let results = classifier.analyze(text, &dict).unwrap();
    results.into_iter().next().unwrap()
}

#[test]
fn test_supplied_keyword_is_used_on_next_run() {
    let processor = FeedbackProcessor::default_config();
    let mut store = LearningStore::new();

    let mut result = classify(&store, "雪肌奇迹");
    assert!(result.efficacy.contains(&Efficacy::Other));

    processor
        .correct(
            &mut store,
            &mut result,
            DimensionValue::Efficacy(BTreeSet::from([Efficacy::Whitening])),
            Some("雪肌"),
        )
        .unwrap();
    assert!(result.efficacy.contains(&Efficacy::Whitening));

    let again = classify(&store, "雪肌奇迹");
    assert!(again.efficacy.contains(&Efficacy::Whitening));
    assert!(!again.efficacy.contains(&Efficacy::Other));
}

#[test]
fn test_learned_then_removed_keyword_stops_matching() {
    let processor = FeedbackProcessor::default_config();
    let mut store = LearningStore::new();
    let label: Label = Efficacy::Whitening.into();

    processor.learn(&mut store, label, "雪肌").unwrap();
    assert!(classify(&store, "雪肌").efficacy.contains(&Efficacy::Whitening));

    processor.remove(&mut store, label, "雪肌").unwrap();
    let result = classify(&store, "雪肌");
    assert!(!result.efficacy.contains(&Efficacy::Whitening));
    assert!(result.matched.iter().all(|m| m.keyword != "雪肌"));
}

#[test]
fn test_removed_base_keyword_keeps_other_base_matches() {
    let processor = FeedbackProcessor::default_config();
    let mut store = LearningStore::new();
    let label: Label = Efficacy::Moisturizing.into();

    processor.remove(&mut store, label, "补水").unwrap();

    let only_removed = classify(&store, "补水");
    assert!(!only_removed.efficacy.contains(&Efficacy::Moisturizing));

    let other_keyword = classify(&store, "补水保湿");
    assert!(other_keyword.efficacy.contains(&Efficacy::Moisturizing));
    assert!(other_keyword.matched.iter().all(|m| m.keyword != "补水"));
}

#[test]
fn test_persistence_correction_with_keyword() {
    let processor = FeedbackProcessor::default_config();
    let mut store = LearningStore::new();

    let mut result = classify(&store, "妆效一晚不脱");
    assert_eq!(result.persistence, Persistence::Immediate);
    processor
        .correct(
            &mut store,
            &mut result,
            DimensionValue::Persistence(Persistence::Durable),
            Some("一晚"),
        )
        .unwrap();

    let again = classify(&store, "妆效一晚不脱");
    assert_eq!(again.persistence, Persistence::Durable);
}

proptest! {
    #[test]
    fn prop_confirm_never_decreases_or_exceeds_one(
        start in 0.1f64..=1.0,
        rounds in 1usize..20,
    ) {
        let processor = FeedbackProcessor::default_config();
        let mut store = LearningStore::new();
        store.set_score("保湿", start);
        let result = classify(&store, "保湿");

        let mut previous = start;
        for _ in 0..rounds {
            processor.confirm_all(&mut store, &result);
            let score = store.score("保湿").unwrap();
            prop_assert!(score >= previous);
            prop_assert!(score <= 1.0);
            previous = score;
        }
    }

    #[test]
    fn prop_disagreement_penalty_is_floored(start in 0.1f64..=1.0) {
        let processor = FeedbackProcessor::default_config();
        let mut store = LearningStore::new();
        store.set_score("保湿", start);
        let mut result = classify(&store, "保湿");

        processor
            .correct(
                &mut store,
                &mut result,
                DimensionValue::Efficacy(BTreeSet::from([Efficacy::Whitening])),
                None,
            )
            .unwrap();

        let expected = (start - 0.15).max(0.1);
        prop_assert!((store.score("保湿").unwrap() - expected).abs() < 1e-9);
        prop_assert!(store.score("保湿").unwrap() >= 0.1);
    }
}
