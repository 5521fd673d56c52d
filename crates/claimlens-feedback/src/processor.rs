//! Feedback application logic

use crate::{FeedbackConfig, FeedbackError};
use chrono::Utc;
use claimlens_domain::{AnalysisResult, DimensionValue, Label};
use claimlens_store::{CorrectionRecord, CorrectionType, LearningStore};
use tracing::{debug, info};

/// One keyword score change
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreChange {
    /// Keyword whose score changed
    pub keyword: String,
    /// Score before the change (the default if it had none)
    pub before: f64,
    /// Score after the change
    pub after: f64,
}

/// Outcome of confirming a whole result
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfirmOutcome {
    /// Reinforced keywords, in match order
    pub reinforced: Vec<ScoreChange>,
}

/// Outcome of correcting one dimension
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionOutcome {
    /// Confirm if the value was unchanged, otherwise modify
    pub correction_type: CorrectionType,
    /// Score changes of the dimension's matched keywords
    pub adjusted: Vec<ScoreChange>,
    /// Labels the supplied keyword was newly registered for
    pub registered: Vec<Label>,
}

/// Translates user feedback into learning-store mutations
#[derive(Debug, Clone, Default)]
pub struct FeedbackProcessor {
    config: FeedbackConfig,
}

impl FeedbackProcessor {
    /// Create a processor with the given configuration
    pub fn new(config: FeedbackConfig) -> Self {
        Self { config }
    }

    /// Create a processor with default configuration
    pub fn default_config() -> Self {
        Self::new(FeedbackConfig::default())
    }

    /// Get the current configuration
    pub fn config(&self) -> &FeedbackConfig {
        &self.config
    }

    /// Confirm that every dimension of a result is correct
    ///
    /// Reinforces each matched keyword and counts one agreeing feedback
    /// action. No correction-log entry is written.
    pub fn confirm_all(
        &self,
        store: &mut LearningStore,
        result: &AnalysisResult,
    ) -> ConfirmOutcome {
        let reinforced: Vec<ScoreChange> = result
            .matched
            .iter()
            .map(|record| self.reinforce(store, &record.keyword))
            .collect();
        store.record_feedback(true);

        info!(result = %result.id, keywords = reinforced.len(), "confirmed result");
        ConfirmOutcome { reinforced }
    }

    /// Correct one dimension of a result
    ///
    /// Logs the correction, adjusts the scores of the dimension's matched
    /// keywords by agreement with `new_value`, registers `supplied_keyword`
    /// for every label of `new_value`, then overwrites the result's value.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackError::EmptyValue`] for an empty label set; the
    /// store and the result are left untouched.
    pub fn correct(
        &self,
        store: &mut LearningStore,
        result: &mut AnalysisResult,
        new_value: DimensionValue,
        supplied_keyword: Option<&str>,
    ) -> Result<CorrectionOutcome, FeedbackError> {
        let dimension = new_value.dimension();
        if new_value.is_empty() {
            return Err(FeedbackError::EmptyValue(dimension));
        }

        let old_value = result.value(dimension);
        let correction_type = CorrectionType::between(&old_value, &new_value);
        let keyword = supplied_keyword.map(str::trim).unwrap_or_default();

        store.record_correction(CorrectionRecord {
            result_id: result.id,
            text: result.text.clone(),
            dimension,
            old_value: old_value.display(),
            new_value: new_value.display(),
            supplied_keyword: keyword.to_string(),
            timestamp: Utc::now(),
            confidence: result.confidence.get(dimension),
            correction_type,
        });

        let adjusted: Vec<ScoreChange> = result
            .matches_for(dimension)
            .map(|record| {
                if new_value.contains(&record.label) {
                    self.reinforce(store, &record.keyword)
                } else {
                    self.penalize(store, &record.keyword)
                }
            })
            .collect();

        let mut registered = Vec::new();
        if !keyword.is_empty() {
            for label in new_value.labels() {
                if store.register_keyword(label, keyword) {
                    store.set_score(keyword, self.config.correction_seed);
                    registered.push(label);
                }
            }
        }

        result.set_value(new_value);
        store.record_feedback(correction_type == CorrectionType::Confirm);

        info!(
            result = %result.id,
            %dimension,
            ?correction_type,
            adjusted = adjusted.len(),
            registered = registered.len(),
            "applied correction"
        );
        Ok(CorrectionOutcome {
            correction_type,
            adjusted,
            registered,
        })
    }

    /// Register a keyword for a label by hand
    ///
    /// Returns `false` if it was already registered.
    pub fn learn(
        &self,
        store: &mut LearningStore,
        label: Label,
        keyword: &str,
    ) -> Result<bool, FeedbackError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(FeedbackError::EmptyKeyword);
        }
        let added = store.register_keyword(label, keyword);
        if added {
            store.set_score(keyword, self.config.manual_seed);
        }
        Ok(added)
    }

    /// Remove a keyword from a label and tombstone it
    ///
    /// Returns whether the keyword was a learned keyword of the label.
    pub fn remove(
        &self,
        store: &mut LearningStore,
        label: Label,
        keyword: &str,
    ) -> Result<bool, FeedbackError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(FeedbackError::EmptyKeyword);
        }
        Ok(store.remove_keyword(label, keyword))
    }

    fn current(&self, store: &LearningStore, keyword: &str) -> f64 {
        store.score(keyword).unwrap_or(self.config.default_score)
    }

    fn reinforce(&self, store: &mut LearningStore, keyword: &str) -> ScoreChange {
        let before = self.current(store, keyword);
        let after = (before + self.config.reinforce_step).min(self.config.score_ceiling);
        store.set_score(keyword, after);
        debug!(keyword, before, after, "reinforced keyword");
        ScoreChange {
            keyword: keyword.to_string(),
            before,
            after,
        }
    }

    fn penalize(&self, store: &mut LearningStore, keyword: &str) -> ScoreChange {
        let before = self.current(store, keyword);
        let after = (before - self.config.penalty_step).max(self.config.score_floor);
        store.set_score(keyword, after);
        debug!(keyword, before, after, "penalized keyword");
        ScoreChange {
            keyword: keyword.to_string(),
            before,
            after,
        }
    }
}
