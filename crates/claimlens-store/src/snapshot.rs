//! Snapshot wire format
//!
//! Learned keywords are keyed by category name then label name
//! (`{"功效": {"保湿": ["补水"]}}`); tombstones are keyed by
//! `"<category>-<label>"`. Both names are accepted in any form
//! [`Dimension::parse`] and [`Label::parse`] understand.

use crate::error::StoreError;
use crate::record::{CorrectionRecord, LearningStats};
use crate::store::{bound_score, LearningStore, SnapshotExtras, SCORE_CEILING, SCORE_FLOOR};
use chrono::{DateTime, Utc};
use claimlens_classifier::base::{self, BASE_VERSION};
use claimlens_domain::{Dimension, Label};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

/// Name of the learned-keyword field in the wire format
const LEARNED_FIELD: &str = "newKeywords";
/// Accepted alternative name of the learned-keyword field
const LEARNED_FIELD_ALIAS: &str = "learnedKeywords";

/// Serializable form of a [`LearningStore`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningSnapshot {
    /// Legacy correction list
    #[serde(default)]
    pub corrections: Vec<Value>,

    /// Category → label → keywords
    #[serde(alias = "learnedKeywords")]
    pub new_keywords: BTreeMap<String, BTreeMap<String, Vec<String>>>,

    /// Confidence overrides
    #[serde(default)]
    pub confidence: Map<String, Value>,

    /// Free-form user feedback
    #[serde(default)]
    pub user_feedback: Map<String, Value>,

    /// Keyword → score
    #[serde(default)]
    pub keyword_scores: BTreeMap<String, f64>,

    /// Conflict log
    #[serde(default)]
    pub conflict_log: Vec<Value>,

    /// `"<category>-<label>"` → tombstoned keywords
    #[serde(default)]
    pub removed_keywords: BTreeMap<String, Vec<String>>,

    /// Time of the last mutation
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,

    /// Format version tag
    #[serde(default)]
    pub version: String,

    /// Correction log; unreadable entries are kept verbatim
    #[serde(default, deserialize_with = "lenient_corrections")]
    pub user_corrections: Vec<CorrectionEntry>,

    /// Keyword occurrence counters
    #[serde(default)]
    pub keyword_frequency: Map<String, Value>,

    /// Aggregate feedback counters
    #[serde(default)]
    pub learning_stats: LearningStats,

    /// Set on export
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<DateTime<Utc>>,

    /// Base table at export time, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_keyword_mapping: Option<Value>,
}

/// One correction log entry on the wire
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CorrectionEntry {
    /// Entry readable as a [`CorrectionRecord`]
    Record(CorrectionRecord),
    /// Entry carried through unchanged
    Opaque(Value),
}

fn lenient_corrections<'de, D>(deserializer: D) -> Result<Vec<CorrectionEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|value| match CorrectionRecord::deserialize(&value) {
            Ok(record) => CorrectionEntry::Record(record),
            Err(e) => {
                warn!(error = %e, "keeping unreadable correction record verbatim");
                CorrectionEntry::Opaque(value)
            }
        })
        .collect())
}

impl LearningSnapshot {
    /// Parse and validate an imported snapshot
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ImportFormat`] if the payload is not JSON, or
    /// if its learned-keyword field is not a mapping of mappings of string
    /// lists, or if any other field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| StoreError::ImportFormat(format!("not valid JSON: {}", e)))?;
        validate_shape(&value)?;
        serde_json::from_value(value).map_err(|e| StoreError::ImportFormat(e.to_string()))
    }

    /// Encode as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Check the learned-keyword structure before any typed decoding
fn validate_shape(value: &Value) -> Result<(), StoreError> {
    let root = value
        .as_object()
        .ok_or_else(|| StoreError::ImportFormat("snapshot must be a JSON object".to_string()))?;

    let learned = root
        .get(LEARNED_FIELD)
        .or_else(|| root.get(LEARNED_FIELD_ALIAS))
        .ok_or_else(|| {
            StoreError::ImportFormat(format!("missing '{}' mapping", LEARNED_FIELD))
        })?;

    let categories = learned.as_object().ok_or_else(|| {
        StoreError::ImportFormat(format!("'{}' must be a mapping", LEARNED_FIELD))
    })?;

    for (category, labels) in categories {
        let labels = labels.as_object().ok_or_else(|| {
            StoreError::ImportFormat(format!("category '{}' must be a mapping", category))
        })?;
        for (label, keywords) in labels {
            let keywords = keywords.as_array().ok_or_else(|| {
                StoreError::ImportFormat(format!(
                    "keywords of '{}/{}' must be a list",
                    category, label
                ))
            })?;
            if keywords.iter().any(|k| !k.is_string()) {
                return Err(StoreError::ImportFormat(format!(
                    "keywords of '{}/{}' must be strings",
                    category, label
                )));
            }
        }
    }
    Ok(())
}

/// The base table in its exported form: category → joined keywords → label
pub fn base_keyword_mapping() -> Value {
    let mut mapping = Map::new();
    for dimension in Dimension::ALL {
        mapping.insert(dimension.display_name().to_string(), Value::Object(Map::new()));
    }
    for (label, keywords) in base::rows() {
        if let Some(Value::Object(rows)) = mapping.get_mut(label.dimension().display_name()) {
            rows.insert(keywords.join("|"), Value::String(label.as_str().to_string()));
        }
    }
    Value::Object(mapping)
}

fn tombstone_key(label: Label) -> String {
    format!("{}-{}", label.dimension().display_name(), label.as_str())
}

fn parse_tombstone_key(key: &str) -> Option<Label> {
    let (category, name) = key.split_once('-')?;
    let dimension = Dimension::parse(category)?;
    Label::parse(dimension, name)
}

fn clean_keywords(keywords: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        let keyword = keyword.trim();
        if !keyword.is_empty() && !out.iter().any(|k| k == keyword) {
            out.push(keyword.to_string());
        }
    }
    out
}

impl LearningStore {
    /// Snapshot of the full state, without export metadata
    pub fn to_snapshot(&self) -> LearningSnapshot {
        let mut new_keywords: BTreeMap<String, BTreeMap<String, Vec<String>>> = Dimension::ALL
            .iter()
            .map(|d| (d.display_name().to_string(), BTreeMap::new()))
            .collect();
        for (label, keywords) in &self.learned {
            new_keywords
                .entry(label.dimension().display_name().to_string())
                .or_default()
                .insert(label.as_str().to_string(), keywords.clone());
        }

        LearningSnapshot {
            corrections: self.extras.corrections.clone(),
            new_keywords,
            confidence: self.extras.confidence.clone(),
            user_feedback: self.extras.user_feedback.clone(),
            keyword_scores: self.keyword_scores.clone(),
            conflict_log: self.extras.conflict_log.clone(),
            removed_keywords: self
                .removed
                .iter()
                .map(|(label, keywords)| (tombstone_key(*label), keywords.clone()))
                .collect(),
            last_updated: self.last_updated,
            version: self.version.clone(),
            user_corrections: self
                .corrections
                .iter()
                .cloned()
                .map(CorrectionEntry::Record)
                .chain(self.extras.opaque_corrections.iter().cloned().map(CorrectionEntry::Opaque))
                .collect(),
            keyword_frequency: self.extras.keyword_frequency.clone(),
            learning_stats: self.stats.clone(),
            export_date: None,
            base_keyword_mapping: None,
        }
    }

    /// Snapshot for export, stamped with the export time and the base table
    pub fn export(&self) -> LearningSnapshot {
        LearningSnapshot {
            export_date: Some(Utc::now()),
            base_keyword_mapping: Some(base_keyword_mapping()),
            ..self.to_snapshot()
        }
    }

    /// Rebuild a store from a snapshot
    ///
    /// Unknown categories or labels, blank keywords and out-of-range scores
    /// are dropped or bounded with a warning; learning never introduces new
    /// labels.
    pub fn from_snapshot(snapshot: LearningSnapshot) -> Self {
        let mut learned: BTreeMap<Label, Vec<String>> = BTreeMap::new();
        for (category, labels) in snapshot.new_keywords {
            let Some(dimension) = Dimension::parse(&category) else {
                warn!(category = %category, "dropping keywords of unknown category");
                continue;
            };
            for (name, keywords) in labels {
                let Some(label) = Label::parse(dimension, &name) else {
                    warn!(%dimension, label = %name, "dropping keywords of unknown label");
                    continue;
                };
                let keywords = clean_keywords(keywords);
                if !keywords.is_empty() {
                    learned.entry(label).or_default().extend(keywords);
                }
            }
        }
        for keywords in learned.values_mut() {
            *keywords = clean_keywords(std::mem::take(keywords));
        }

        let mut removed: BTreeMap<Label, Vec<String>> = BTreeMap::new();
        for (key, keywords) in snapshot.removed_keywords {
            let Some(label) = parse_tombstone_key(&key) else {
                warn!(key = %key, "dropping tombstones with unreadable key");
                continue;
            };
            let keywords = clean_keywords(keywords);
            if !keywords.is_empty() {
                let entry = removed.entry(label).or_default();
                entry.extend(keywords);
                *entry = clean_keywords(std::mem::take(entry));
            }
        }

        let keyword_scores = snapshot
            .keyword_scores
            .into_iter()
            .map(|(keyword, score)| {
                if !(SCORE_FLOOR..=SCORE_CEILING).contains(&score) {
                    warn!(keyword = %keyword, score, "bounding out-of-range keyword score");
                }
                (keyword, bound_score(score))
            })
            .collect();

        let mut corrections = Vec::new();
        let mut opaque_corrections = Vec::new();
        for entry in snapshot.user_corrections {
            match entry {
                CorrectionEntry::Record(record) => corrections.push(record),
                CorrectionEntry::Opaque(value) => opaque_corrections.push(value),
            }
        }

        let version = if snapshot.version.is_empty() {
            BASE_VERSION.to_string()
        } else {
            snapshot.version
        };

        Self {
            keyword_scores,
            learned,
            removed,
            corrections,
            stats: snapshot.learning_stats,
            extras: SnapshotExtras {
                corrections: snapshot.corrections,
                opaque_corrections,
                confidence: snapshot.confidence,
                user_feedback: snapshot.user_feedback,
                keyword_frequency: snapshot.keyword_frequency,
                conflict_log: snapshot.conflict_log,
            },
            last_updated: snapshot.last_updated,
            version,
        }
    }

    /// Export as pretty-printed JSON
    pub fn export_json(&self) -> Result<String, StoreError> {
        self.export().to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimlens_domain::{Efficacy, Persistence};

    #[test]
    fn test_learned_keyword_wire_shape() {
        let mut store = LearningStore::new();
        store.register_keyword(Efficacy::Moisturizing.into(), "补水");
        let json = serde_json::to_value(store.to_snapshot()).unwrap();

        assert_eq!(json["newKeywords"]["功效"]["保湿"], serde_json::json!(["补水"]));
        assert!(json["newKeywords"]["类型"].as_object().unwrap().is_empty());
        assert_eq!(json["version"], "2.0");
    }

    #[test]
    fn test_tombstone_key_round_trip() {
        let label: Label = Persistence::Durable.into();
        assert_eq!(tombstone_key(label), "持续性-持久");
        assert_eq!(parse_tombstone_key("持续性-持久"), Some(label));
        assert_eq!(parse_tombstone_key("功效-不存在"), None);
        assert_eq!(parse_tombstone_key("nodash"), None);
    }

    #[test]
    fn test_export_includes_metadata() {
        let snapshot = LearningStore::new().export();
        assert!(snapshot.export_date.is_some());
        let mapping = snapshot.base_keyword_mapping.unwrap();
        assert!(mapping["功效"].as_object().unwrap().len() >= 26);
    }

    #[test]
    fn test_rejects_non_mapping_learned_keywords() {
        for payload in [
            r#"[]"#,
            r#"{"version": "2.0"}"#,
            r#"{"newKeywords": ["补水"]}"#,
            r#"{"newKeywords": {"功效": ["补水"]}}"#,
            r#"{"newKeywords": {"功效": {"保湿": "补水"}}}"#,
            r#"{"newKeywords": {"功效": {"保湿": [1, 2]}}}"#,
            r#"not json"#,
        ] {
            let err = LearningSnapshot::from_json(payload).unwrap_err();
            assert!(matches!(err, StoreError::ImportFormat(_)), "{}", payload);
        }
    }

    #[test]
    fn test_accepts_minimal_snapshot() {
        let snapshot = LearningSnapshot::from_json(r#"{"newKeywords": {}}"#).unwrap();
        assert!(snapshot.new_keywords.is_empty());
        assert_eq!(snapshot.learning_stats.accuracy_rate, 100.0);
    }

    #[test]
    fn test_from_snapshot_drops_unknown_labels() {
        let snapshot = LearningSnapshot::from_json(
            r#"{
                "newKeywords": {
                    "功效": {"保湿": ["补水", " ", "补水"], "不存在": ["x"]},
                    "unknown": {"保湿": ["y"]}
                },
                "removedKeywords": {"功效-保湿": ["甘油"], "bad": ["z"]},
                "keywordScores": {"补水": 1.4}
            }"#,
        )
        .unwrap();
        let store = LearningStore::from_snapshot(snapshot);

        assert_eq!(store.learned_for(Efficacy::Moisturizing.into()), &["补水".to_string()]);
        assert_eq!(store.learned_keyword_count(), 1);
        assert_eq!(store.removed_for(Efficacy::Moisturizing.into()), &["甘油".to_string()]);
        assert_eq!(store.score("补水"), Some(1.0));
    }

    #[test]
    fn test_unreadable_corrections_are_kept_verbatim() {
        let json = r#"{"newKeywords": {}, "userCorrections": [{"id": 1, "resultId": 5}]}"#;
        let snapshot = LearningSnapshot::from_json(json).unwrap();
        assert_eq!(
            snapshot.user_corrections,
            vec![CorrectionEntry::Opaque(serde_json::json!({"id": 1, "resultId": 5}))]
        );

        let store = LearningStore::from_snapshot(snapshot);
        assert!(store.corrections().is_empty());
        assert_eq!(store.extras().opaque_corrections.len(), 1);

        let exported = serde_json::to_value(store.to_snapshot()).unwrap();
        assert_eq!(exported["userCorrections"][0]["resultId"], 5);
    }

    #[test]
    fn test_scores_are_bounded_on_import() {
        let snapshot =
            LearningSnapshot::from_json(r#"{"newKeywords": {}, "keywordScores": {"x": 0.05}}"#)
                .unwrap();
        let store = LearningStore::from_snapshot(snapshot);
        assert_eq!(store.score("x"), Some(SCORE_FLOOR));
    }
}
