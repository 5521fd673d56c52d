//! The mutable learning state

use crate::record::{CorrectionRecord, LearningStats};
use chrono::{DateTime, Utc};
use claimlens_classifier::base::BASE_VERSION;
use claimlens_domain::{Dimension, KeywordOverlay, Label};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Lowest score a keyword can hold
pub const SCORE_FLOOR: f64 = 0.1;
/// Highest score a keyword can hold
pub const SCORE_CEILING: f64 = 1.0;

/// Bound a score to [`SCORE_FLOOR`, `SCORE_CEILING`]; NaN maps to the floor
pub(crate) fn bound_score(score: f64) -> f64 {
    if score.is_nan() {
        SCORE_FLOOR
    } else {
        score.clamp(SCORE_FLOOR, SCORE_CEILING)
    }
}

/// Loosely-typed snapshot fields carried through export, import and merge
///
/// The classifier never reads them; they are preserved so that snapshots
/// produced by other tools survive a round trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotExtras {
    /// Legacy correction list (opaque entries)
    pub corrections: Vec<Value>,
    /// Correction log entries that could not be read as records
    pub opaque_corrections: Vec<Value>,
    /// Per-key confidence overrides
    pub confidence: Map<String, Value>,
    /// Free-form user feedback
    pub user_feedback: Map<String, Value>,
    /// Keyword occurrence counters
    pub keyword_frequency: Map<String, Value>,
    /// Conflict log (opaque entries)
    pub conflict_log: Vec<Value>,
}

/// Learned keywords, tombstones, keyword scores and the correction log
///
/// One instance per process. Created empty, mutated by feedback, replaced
/// wholesale by clear or import-merge.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningStore {
    pub(crate) keyword_scores: BTreeMap<String, f64>,
    pub(crate) learned: BTreeMap<Label, Vec<String>>,
    pub(crate) removed: BTreeMap<Label, Vec<String>>,
    pub(crate) corrections: Vec<CorrectionRecord>,
    pub(crate) stats: LearningStats,
    pub(crate) extras: SnapshotExtras,
    pub(crate) last_updated: Option<DateTime<Utc>>,
    pub(crate) version: String,
}

impl Default for LearningStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LearningStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            keyword_scores: BTreeMap::new(),
            learned: BTreeMap::new(),
            removed: BTreeMap::new(),
            corrections: Vec::new(),
            stats: LearningStats::default(),
            extras: SnapshotExtras::default(),
            last_updated: None,
            version: BASE_VERSION.to_string(),
        }
    }

    // Keyword scores

    /// Score of a keyword, if it has one
    pub fn score(&self, keyword: &str) -> Option<f64> {
        self.keyword_scores.get(keyword).copied()
    }

    /// Set a keyword's score, bounded to [`SCORE_FLOOR`, `SCORE_CEILING`]
    pub fn set_score(&mut self, keyword: &str, score: f64) {
        let score = bound_score(score);
        debug!(keyword, score, "keyword score updated");
        self.keyword_scores.insert(keyword.to_string(), score);
        self.touch();
    }

    /// All keyword scores
    pub fn keyword_scores(&self) -> &BTreeMap<String, f64> {
        &self.keyword_scores
    }

    // Learned keywords and tombstones

    /// Learned keywords of a label, in registration order
    pub fn learned_for(&self, label: Label) -> &[String] {
        self.learned.get(&label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tombstoned keywords of a label
    pub fn removed_for(&self, label: Label) -> &[String] {
        self.removed.get(&label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Register a keyword for a label
    ///
    /// Returns `false` without changes if the keyword is blank or already
    /// registered. A tombstone for the same (label, keyword) is lifted, since
    /// the registration is an explicit request to match it again.
    pub fn register_keyword(&mut self, label: Label, keyword: &str) -> bool {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return false;
        }
        let entry = self.learned.entry(label).or_default();
        if entry.iter().any(|k| k == keyword) {
            return false;
        }
        entry.push(keyword.to_string());

        if let Some(tombstones) = self.removed.get_mut(&label) {
            tombstones.retain(|k| k != keyword);
            if tombstones.is_empty() {
                self.removed.remove(&label);
            }
        }

        info!(%label, keyword, "registered keyword");
        self.touch();
        true
    }

    /// Remove a keyword from a label
    ///
    /// Deletes it from the learned set (if present), records a tombstone
    /// unconditionally and drops its score. Returns whether the keyword was
    /// a learned keyword of the label.
    pub fn remove_keyword(&mut self, label: Label, keyword: &str) -> bool {
        let keyword = keyword.trim();
        let mut was_learned = false;
        if let Some(entry) = self.learned.get_mut(&label) {
            let before = entry.len();
            entry.retain(|k| k != keyword);
            was_learned = entry.len() != before;
            if entry.is_empty() {
                self.learned.remove(&label);
            }
        }

        let tombstones = self.removed.entry(label).or_default();
        if !tombstones.iter().any(|k| k == keyword) {
            tombstones.push(keyword.to_string());
        }
        self.keyword_scores.remove(keyword);

        info!(%label, keyword, was_learned, "removed keyword");
        self.touch();
        was_learned
    }

    /// Every label with learned keywords
    pub fn learned(&self) -> impl Iterator<Item = (Label, &[String])> {
        self.learned.iter().map(|(l, k)| (*l, k.as_slice()))
    }

    /// Every label with tombstones
    pub fn removed(&self) -> impl Iterator<Item = (Label, &[String])> {
        self.removed.iter().map(|(l, k)| (*l, k.as_slice()))
    }

    /// Number of learned keywords across all labels
    pub fn learned_keyword_count(&self) -> usize {
        self.learned.values().map(Vec::len).sum()
    }

    // Correction log and stats

    /// Append a correction to the log
    pub fn record_correction(&mut self, record: CorrectionRecord) {
        info!(
            result = %record.result_id,
            dimension = %record.dimension,
            old = %record.old_value,
            new = %record.new_value,
            "recorded correction"
        );
        self.corrections.push(record);
        self.touch();
    }

    /// Count one feedback action in the aggregate stats
    pub fn record_feedback(&mut self, agreed: bool) {
        self.stats.record(agreed);
        self.touch();
    }

    /// The correction log, oldest first
    pub fn corrections(&self) -> &[CorrectionRecord] {
        &self.corrections
    }

    /// Aggregate feedback counters
    pub fn stats(&self) -> &LearningStats {
        &self.stats
    }

    /// Loosely-typed extra fields
    pub fn extras(&self) -> &SnapshotExtras {
        &self.extras
    }

    /// Time of the last mutation
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Format version tag
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whether the store holds no learning at all
    pub fn is_empty(&self) -> bool {
        self.learned.is_empty()
            && self.removed.is_empty()
            && self.keyword_scores.is_empty()
            && self.corrections.is_empty()
            && self.stats.total_corrections == 0
    }

    /// Overview of the learning state
    pub fn summary(&self) -> LearningSummary {
        LearningSummary {
            user_corrections: self.corrections.len(),
            learned_keywords: self.learned_keyword_count(),
            removed_keywords: self.removed.values().map(Vec::len).sum(),
            scored_keywords: self.keyword_scores.len(),
            feedback_actions: self.stats.total_corrections,
            accuracy_rate: self.stats.accuracy_rate,
            last_updated: self.last_updated,
        }
    }

    pub(crate) fn touch(&mut self) {
        self.last_updated = Some(Utc::now());
    }
}

impl KeywordOverlay for LearningStore {
    fn learned_keywords(&self, dimension: Dimension) -> Vec<(Label, Vec<String>)> {
        self.learned
            .iter()
            .filter(|(label, _)| label.dimension() == dimension)
            .map(|(label, keywords)| (*label, keywords.clone()))
            .collect()
    }

    fn is_removed(&self, label: Label, keyword: &str) -> bool {
        self.removed
            .get(&label)
            .map(|k| k.iter().any(|kw| kw == keyword))
            .unwrap_or(false)
    }
}

/// Counts describing the learning state
#[derive(Debug, Clone, PartialEq)]
pub struct LearningSummary {
    /// Entries in the correction log
    pub user_corrections: usize,
    /// Learned keywords across all labels
    pub learned_keywords: usize,
    /// Tombstones across all labels
    pub removed_keywords: usize,
    /// Keywords with a score
    pub scored_keywords: usize,
    /// Feedback actions counted in the stats
    pub feedback_actions: u64,
    /// Accuracy rate in percent
    pub accuracy_rate: f64,
    /// Time of the last mutation
    pub last_updated: Option<DateTime<Utc>>,
}

impl LearningSummary {
    /// Get a human-readable summary
    pub fn summary(&self) -> String {
        let lines = [
            "Learning Summary".to_string(),
            "================".to_string(),
            format!("User corrections: {}", self.user_corrections),
            format!("Learned keywords: {}", self.learned_keywords),
            format!("Removed keywords: {}", self.removed_keywords),
            format!("Scored keywords: {}", self.scored_keywords),
            format!("Feedback actions: {}", self.feedback_actions),
            format!("Accuracy rate: {:.0}%", self.accuracy_rate),
            format!(
                "Last updated: {}",
                self.last_updated
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| "never".to_string())
            ),
        ];
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimlens_domain::{ClaimType, Efficacy};

    fn moisturizing() -> Label {
        Efficacy::Moisturizing.into()
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut store = LearningStore::new();
        assert!(store.register_keyword(moisturizing(), "水光"));
        assert!(!store.register_keyword(moisturizing(), "水光"));
        assert!(!store.register_keyword(moisturizing(), " 水光 "));
        assert_eq!(store.learned_for(moisturizing()), &["水光".to_string()]);
    }

    #[test]
    fn test_register_rejects_blank_keyword() {
        let mut store = LearningStore::new();
        assert!(!store.register_keyword(moisturizing(), "   "));
        assert_eq!(store.learned_keyword_count(), 0);
    }

    #[test]
    fn test_remove_tombstones_and_drops_score() {
        let mut store = LearningStore::new();
        store.register_keyword(moisturizing(), "水光");
        store.set_score("水光", 0.7);

        assert!(store.remove_keyword(moisturizing(), "水光"));
        assert!(store.learned_for(moisturizing()).is_empty());
        assert!(store.is_removed(moisturizing(), "水光"));
        assert_eq!(store.score("水光"), None);
    }

    #[test]
    fn test_remove_unknown_keyword_still_tombstones() {
        let mut store = LearningStore::new();
        assert!(!store.remove_keyword(moisturizing(), "甘油"));
        assert_eq!(store.removed_for(moisturizing()), &["甘油".to_string()]);

        // A second removal does not duplicate the tombstone
        store.remove_keyword(moisturizing(), "甘油");
        assert_eq!(store.removed_for(moisturizing()).len(), 1);
    }

    #[test]
    fn test_register_lifts_tombstone() {
        let mut store = LearningStore::new();
        store.remove_keyword(moisturizing(), "水光");
        store.register_keyword(moisturizing(), "水光");
        assert!(!store.is_removed(moisturizing(), "水光"));
    }

    #[test]
    fn test_overlay_filters_by_dimension() {
        let mut store = LearningStore::new();
        store.register_keyword(moisturizing(), "水光");
        store.register_keyword(ClaimType::Mild.into(), "零负担");

        let efficacy = store.learned_keywords(Dimension::Efficacy);
        assert_eq!(efficacy, vec![(moisturizing(), vec!["水光".to_string()])]);
        assert!(store.learned_keywords(Dimension::Persistence).is_empty());
    }

    #[test]
    fn test_set_score_bounds() {
        let mut store = LearningStore::new();
        store.set_score("a", 1.5);
        store.set_score("b", f64::NAN);
        store.set_score("c", 0.0);
        store.set_score("d", f64::NEG_INFINITY);
        assert_eq!(store.score("a"), Some(SCORE_CEILING));
        assert_eq!(store.score("b"), Some(SCORE_FLOOR));
        assert_eq!(store.score("c"), Some(SCORE_FLOOR));
        assert_eq!(store.score("d"), Some(SCORE_FLOOR));
    }

    #[test]
    fn test_summary() {
        let mut store = LearningStore::new();
        assert!(store.is_empty());
        store.register_keyword(moisturizing(), "水光");
        store.record_feedback(true);

        let summary = store.summary();
        assert_eq!(summary.learned_keywords, 1);
        assert_eq!(summary.feedback_actions, 1);
        assert!(summary.summary().contains("Learned keywords: 1"));
        assert!(store.last_updated().is_some());
    }
}
