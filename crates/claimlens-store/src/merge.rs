//! Import merge
//!
//! Per-field rules:
//!
//! | Field | Rule |
//! |-------|------|
//! | learned keywords | per-label set union, current order first |
//! | tombstones | per-label union, or per-label imported-wins ([`TombstoneMerge`]) |
//! | keyword scores, confidence, user feedback, keyword frequency | key union, imported wins |
//! | correction logs, conflict log | concatenation, current first |
//! | stats | imported wins when it counts any feedback |
//! | version | imported wins when present |

use crate::store::LearningStore;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::info;

/// How imported tombstones combine with current ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TombstoneMerge {
    /// Union per label; a removal on either side stays removed
    #[default]
    Union,
    /// Imported tombstones replace current ones label by label
    Overwrite,
}

/// Configuration for the import merger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Tombstone rule
    #[serde(default)]
    pub tombstones: TombstoneMerge,
}

impl MergeConfig {
    /// Imported tombstones overwrite current ones
    pub fn overwrite_tombstones() -> Self {
        Self {
            tombstones: TombstoneMerge::Overwrite,
        }
    }
}

/// Combines an imported learning state with the current one
#[derive(Debug, Clone, Default)]
pub struct ImportMerger {
    config: MergeConfig,
}

impl ImportMerger {
    /// Create a merger with the given configuration
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Merge `imported` into a copy of `current`
    ///
    /// Neither input is modified; the caller swaps the result in.
    pub fn merge(&self, current: &LearningStore, imported: &LearningStore) -> LearningStore {
        let mut merged = current.clone();

        merged.learned = union_lists(&current.learned, &imported.learned);
        merged.removed = match self.config.tombstones {
            TombstoneMerge::Union => union_lists(&current.removed, &imported.removed),
            TombstoneMerge::Overwrite => {
                let mut removed = current.removed.clone();
                removed.extend(imported.removed.clone());
                removed
            }
        };

        merged
            .keyword_scores
            .extend(imported.keyword_scores.iter().map(|(k, v)| (k.clone(), *v)));
        merged.corrections.extend(imported.corrections.iter().cloned());
        if imported.stats.total_corrections > 0 {
            merged.stats = imported.stats.clone();
        }

        let extras = &mut merged.extras;
        extras.corrections.extend(imported.extras.corrections.iter().cloned());
        extras
            .opaque_corrections
            .extend(imported.extras.opaque_corrections.iter().cloned());
        extras.conflict_log.extend(imported.extras.conflict_log.iter().cloned());
        overlay(&mut extras.confidence, &imported.extras.confidence);
        overlay(&mut extras.user_feedback, &imported.extras.user_feedback);
        overlay(&mut extras.keyword_frequency, &imported.extras.keyword_frequency);

        if !imported.version.is_empty() {
            merged.version = imported.version.clone();
        }
        merged.touch();

        info!(
            learned = merged.learned_keyword_count(),
            corrections = merged.corrections.len(),
            tombstones = ?self.config.tombstones,
            "merged imported learning state"
        );
        merged
    }
}

fn union_lists<K: Ord + Copy>(
    current: &BTreeMap<K, Vec<String>>,
    imported: &BTreeMap<K, Vec<String>>,
) -> BTreeMap<K, Vec<String>> {
    let mut out = current.clone();
    for (key, keywords) in imported {
        let entry = out.entry(*key).or_default();
        for keyword in keywords {
            if !entry.contains(keyword) {
                entry.push(keyword.clone());
            }
        }
    }
    out.retain(|_, keywords| !keywords.is_empty());
    out
}

fn overlay(target: &mut Map<String, Value>, imported: &Map<String, Value>) {
    for (key, value) in imported {
        target.insert(key.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimlens_domain::{Efficacy, KeywordOverlay, Label};

    fn moisturizing() -> Label {
        Efficacy::Moisturizing.into()
    }

    fn store_with(keyword: &str) -> LearningStore {
        let mut store = LearningStore::new();
        store.register_keyword(moisturizing(), keyword);
        store
    }

    #[test]
    fn test_learned_union_is_direction_independent() {
        let a = store_with("补水");
        let b = store_with("滋润");
        let merger = ImportMerger::default();

        let ab = merger.merge(&a, &b);
        let ba = merger.merge(&b, &a);

        assert_eq!(ab.learned_for(moisturizing()), &["补水".to_string(), "滋润".to_string()]);
        let mut ba_sorted = ba.learned_for(moisturizing()).to_vec();
        ba_sorted.sort();
        let mut ab_sorted = ab.learned_for(moisturizing()).to_vec();
        ab_sorted.sort();
        assert_eq!(ab_sorted, ba_sorted);
    }

    #[test]
    fn test_scores_imported_wins() {
        let mut a = LearningStore::new();
        a.set_score("补水", 0.5);
        a.set_score("保湿", 0.4);
        let mut b = LearningStore::new();
        b.set_score("补水", 0.9);

        let merged = ImportMerger::default().merge(&a, &b);
        assert_eq!(merged.score("补水"), Some(0.9));
        assert_eq!(merged.score("保湿"), Some(0.4));
    }

    #[test]
    fn test_tombstone_union_and_overwrite() {
        let mut a = LearningStore::new();
        a.remove_keyword(moisturizing(), "甘油");
        let mut b = LearningStore::new();
        b.remove_keyword(moisturizing(), "水分");

        let union = ImportMerger::default().merge(&a, &b);
        assert!(union.is_removed(moisturizing(), "甘油"));
        assert!(union.is_removed(moisturizing(), "水分"));

        let overwrite = ImportMerger::new(MergeConfig::overwrite_tombstones()).merge(&a, &b);
        assert!(!overwrite.is_removed(moisturizing(), "甘油"));
        assert!(overwrite.is_removed(moisturizing(), "水分"));
    }

    #[test]
    fn test_imported_stats_replace_current() {
        let mut a = LearningStore::new();
        a.record_feedback(true);
        let mut b = LearningStore::new();
        b.record_feedback(true);
        b.record_feedback(false);

        let merged = ImportMerger::default().merge(&a, &b);
        assert_eq!(merged.stats(), b.stats());

        let kept = ImportMerger::default().merge(&a, &LearningStore::new());
        assert_eq!(kept.stats(), a.stats());
    }

    #[test]
    fn test_self_merge_keeps_stats() {
        let mut store = LearningStore::new();
        store.record_feedback(true);
        store.record_feedback(false);

        let exported = LearningStore::from_snapshot(store.export());
        let merged = ImportMerger::default().merge(&store, &exported);
        assert_eq!(merged.stats().total_corrections, 2);
        assert_eq!(merged.stats().confirmations, 1);
        assert_eq!(merged.stats(), store.stats());
    }

    #[test]
    fn test_merge_config_wire_form() {
        let config: MergeConfig = serde_json::from_str(r#"{"tombstones": "overwrite"}"#).unwrap();
        assert_eq!(config.tombstones, TombstoneMerge::Overwrite);
        let config: MergeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.tombstones, TombstoneMerge::Union);
    }
}
