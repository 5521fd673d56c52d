//! Correction log entries and aggregate feedback statistics

use chrono::{DateTime, Utc};
use claimlens_domain::{Dimension, DimensionValue, ResultId};
use serde::{Deserialize, Serialize};

/// Whether a correction kept or changed a dimension's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionType {
    /// New value equals the prior value
    Confirm,
    /// New value differs from the prior value
    Modify,
}

impl CorrectionType {
    /// Classify a correction by comparing the prior and new values
    pub fn between(old: &DimensionValue, new: &DimensionValue) -> Self {
        if old == new {
            CorrectionType::Confirm
        } else {
            CorrectionType::Modify
        }
    }
}

/// One entry of the append-only correction log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionRecord {
    /// Result the correction was applied to
    pub result_id: ResultId,
    /// Claim text at the time of correction
    pub text: String,
    /// Corrected dimension
    pub dimension: Dimension,
    /// Prior value, labels joined with ", "
    pub old_value: String,
    /// New value, labels joined with ", "
    pub new_value: String,
    /// Keyword supplied with the correction (empty if none)
    #[serde(rename = "userKeyword", default)]
    pub supplied_keyword: String,
    /// When the correction was made
    pub timestamp: DateTime<Utc>,
    /// Classifier confidence for the dimension before correction
    #[serde(default)]
    pub confidence: f64,
    /// Confirm or modify
    pub correction_type: CorrectionType,
}

/// Aggregate counters updated on every feedback action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "LearningStatsWire")]
pub struct LearningStats {
    /// Feedback actions received (confirmations and corrections)
    pub total_corrections: u64,
    /// Feedback actions that agreed with the classifier
    pub confirmations: u64,
    /// confirmations / total_corrections, in percent
    pub accuracy_rate: f64,
    /// Time of the last update
    pub last_accuracy_update: Option<DateTime<Utc>>,
}

impl Default for LearningStats {
    fn default() -> Self {
        Self {
            total_corrections: 0,
            confirmations: 0,
            accuracy_rate: 100.0,
            last_accuracy_update: None,
        }
    }
}

/// Decoding form of [`LearningStats`]; older snapshots carry no
/// `confirmations` counter, only the rate
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LearningStatsWire {
    total_corrections: u64,
    confirmations: Option<u64>,
    accuracy_rate: f64,
    last_accuracy_update: Option<DateTime<Utc>>,
}

impl Default for LearningStatsWire {
    fn default() -> Self {
        Self {
            total_corrections: 0,
            confirmations: None,
            accuracy_rate: 100.0,
            last_accuracy_update: None,
        }
    }
}

impl From<LearningStatsWire> for LearningStats {
    fn from(wire: LearningStatsWire) -> Self {
        let confirmations = wire.confirmations.unwrap_or_else(|| {
            let rate = if wire.accuracy_rate.is_finite() {
                wire.accuracy_rate.clamp(0.0, 100.0)
            } else {
                100.0
            };
            (rate * wire.total_corrections as f64 / 100.0).round() as u64
        });
        let mut stats = Self {
            total_corrections: wire.total_corrections,
            confirmations,
            accuracy_rate: wire.accuracy_rate,
            last_accuracy_update: wire.last_accuracy_update,
        };
        stats.recompute();
        stats
    }
}

impl LearningStats {
    /// Count one feedback action
    pub fn record(&mut self, agreed: bool) {
        self.total_corrections += 1;
        if agreed {
            self.confirmations += 1;
        }
        self.recompute();
        self.last_accuracy_update = Some(Utc::now());
    }

    fn recompute(&mut self) {
        self.confirmations = self.confirmations.min(self.total_corrections);
        self.accuracy_rate = if self.total_corrections == 0 {
            100.0
        } else {
            self.confirmations as f64 / self.total_corrections as f64 * 100.0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimlens_domain::Persistence;

    #[test]
    fn test_accuracy_rate() {
        let mut stats = LearningStats::default();
        assert_eq!(stats.accuracy_rate, 100.0);

        stats.record(true);
        stats.record(false);
        assert_eq!(stats.total_corrections, 2);
        assert!((stats.accuracy_rate - 50.0).abs() < 1e-9);
        assert!(stats.last_accuracy_update.is_some());
    }

    #[test]
    fn test_correction_type_between() {
        let durable = DimensionValue::Persistence(Persistence::Durable);
        let immediate = DimensionValue::Persistence(Persistence::Immediate);
        assert_eq!(CorrectionType::between(&durable, &durable), CorrectionType::Confirm);
        assert_eq!(CorrectionType::between(&durable, &immediate), CorrectionType::Modify);
    }

    #[test]
    fn test_stats_wire_defaults() {
        let stats: LearningStats = serde_json::from_str("{}").unwrap();
        assert_eq!(stats, LearningStats::default());
    }

    #[test]
    fn test_confirmations_derived_from_rate() {
        let stats: LearningStats =
            serde_json::from_str(r#"{"totalCorrections": 4, "accuracyRate": 100}"#).unwrap();
        assert_eq!(stats.total_corrections, 4);
        assert_eq!(stats.confirmations, 4);
        assert_eq!(stats.accuracy_rate, 100.0);

        let stats: LearningStats =
            serde_json::from_str(r#"{"totalCorrections": 3, "accuracyRate": 66.7}"#).unwrap();
        assert_eq!(stats.confirmations, 2);

        let mut recorded = LearningStats::default();
        recorded.record(true);
        recorded.record(false);
        let json = serde_json::to_string(&recorded).unwrap();
        let back: LearningStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, recorded);
    }
}
