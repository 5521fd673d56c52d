//! The engine facade

use crate::{EngineConfig, EngineError};
use claimlens_classifier::{BatchStatistics, Classifier, ClassifierError, PatternDictionary};
use claimlens_domain::{AnalysisResult, DimensionValue, Label, ResultId};
use claimlens_feedback::{ConfirmOutcome, CorrectionOutcome, FeedbackProcessor};
use claimlens_store::{ImportMerger, LearningSnapshot, LearningStore, LearningSummary};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

/// Classifier, feedback loop and learning state behind explicit operations
///
/// Owns one [`LearningStore`] and the current result batch. Every operation
/// runs to completion synchronously; wrap in [`SharedEngine`] to serve
/// several callers.
#[derive(Debug)]
pub struct Engine {
    classifier: Classifier,
    processor: FeedbackProcessor,
    merger: ImportMerger,
    store: LearningStore,
    results: Vec<AnalysisResult>,
}

impl Engine {
    /// Create an engine with an empty learning store
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_store(config, LearningStore::new())
    }

    /// Create an engine with default configuration
    pub fn default_config() -> Self {
        let config = EngineConfig::default();
        Self {
            classifier: Classifier::new(config.classifier),
            processor: FeedbackProcessor::new(config.feedback),
            merger: ImportMerger::new(config.merge),
            store: LearningStore::new(),
            results: Vec::new(),
        }
    }

    /// Create an engine around an existing learning store
    pub fn with_store(config: EngineConfig, store: LearningStore) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            classifier: Classifier::new(config.classifier),
            processor: FeedbackProcessor::new(config.feedback),
            merger: ImportMerger::new(config.merge),
            store,
            results: Vec::new(),
        })
    }

    /// Effective dictionary for the current learning state
    pub fn dictionary(&self) -> PatternDictionary {
        PatternDictionary::build(&self.store, self.classifier.config().filter_base_tombstones)
    }

    // Classification

    /// Classify a multi-line input, replacing the current batch
    ///
    /// # Errors
    ///
    /// Blank input clears the current batch and reports
    /// [`ClassifierError::EmptyInput`]; over-long input leaves it untouched.
    pub fn analyze(&mut self, input: &str) -> Result<&[AnalysisResult], EngineError> {
        let dictionary = self.dictionary();
        match self.classifier.analyze(input, &dictionary) {
            Ok(results) => {
                self.results = results;
                Ok(&self.results)
            }
            Err(ClassifierError::EmptyInput) => {
                self.results.clear();
                Err(ClassifierError::EmptyInput.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The current batch, in input order
    pub fn results(&self) -> &[AnalysisResult] {
        &self.results
    }

    /// A result of the current batch by id
    pub fn result(&self, id: ResultId) -> Option<&AnalysisResult> {
        self.results.iter().find(|r| r.id == id)
    }

    /// Id of the result at a 1-based position
    pub fn id_at(&self, position: usize) -> Result<ResultId, EngineError> {
        position
            .checked_sub(1)
            .and_then(|i| self.results.get(i))
            .map(|r| r.id)
            .ok_or(EngineError::IndexOutOfRange(position))
    }

    /// Replace the current batch, e.g. from a saved session
    pub fn restore_results(&mut self, results: Vec<AnalysisResult>) {
        self.results = results;
    }

    /// Drop the current batch
    pub fn clear_results(&mut self) {
        info!(dropped = self.results.len(), "cleared results");
        self.results.clear();
    }

    /// Label histograms of the current batch
    pub fn statistics(&self) -> BatchStatistics {
        BatchStatistics::from_results(&self.results)
    }

    // Feedback

    /// Confirm every dimension of a result
    pub fn confirm(&mut self, id: ResultId) -> Result<ConfirmOutcome, EngineError> {
        let result = self
            .results
            .iter()
            .find(|r| r.id == id)
            .ok_or(EngineError::ResultNotFound(id))?;
        Ok(self.processor.confirm_all(&mut self.store, result))
    }

    /// Correct one dimension of a result
    pub fn correct(
        &mut self,
        id: ResultId,
        value: DimensionValue,
        supplied_keyword: Option<&str>,
    ) -> Result<CorrectionOutcome, EngineError> {
        let result = self
            .results
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(EngineError::ResultNotFound(id))?;
        Ok(self
            .processor
            .correct(&mut self.store, result, value, supplied_keyword)?)
    }

    /// Register a keyword for a label
    pub fn learn(&mut self, label: Label, keyword: &str) -> Result<bool, EngineError> {
        Ok(self.processor.learn(&mut self.store, label, keyword)?)
    }

    /// Remove a keyword from a label
    pub fn remove(&mut self, label: Label, keyword: &str) -> Result<bool, EngineError> {
        Ok(self.processor.remove(&mut self.store, label, keyword)?)
    }

    // Learning state

    /// The learning store
    pub fn store(&self) -> &LearningStore {
        &self.store
    }

    /// Overview of the learning state
    pub fn learning_summary(&self) -> LearningSummary {
        self.store.summary()
    }

    /// Snapshot for export
    pub fn export_snapshot(&self) -> LearningSnapshot {
        self.store.export()
    }

    /// Snapshot for export, as pretty-printed JSON
    pub fn export_json(&self) -> Result<String, EngineError> {
        Ok(self.store.export_json()?)
    }

    /// Validate and merge an imported snapshot
    ///
    /// # Errors
    ///
    /// An invalid payload is rejected before any change is made.
    pub fn import_json(&mut self, json: &str) -> Result<LearningSummary, EngineError> {
        let snapshot = LearningSnapshot::from_json(json)?;
        Ok(self.import_snapshot(snapshot))
    }

    /// Merge an already-parsed snapshot into the learning state
    pub fn import_snapshot(&mut self, snapshot: LearningSnapshot) -> LearningSummary {
        let imported = LearningStore::from_snapshot(snapshot);
        self.store = self.merger.merge(&self.store, &imported);
        let summary = self.store.summary();
        info!(
            learned = summary.learned_keywords,
            corrections = summary.user_corrections,
            "imported learning state"
        );
        summary
    }

    /// Replace the learning state with an empty one
    pub fn clear_learning(&mut self) {
        info!("cleared learning state");
        self.store = LearningStore::new();
    }
}

/// An engine shared between callers
///
/// Mutations are serialized through one lock, so each operation sees and
/// leaves a consistent store.
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<Engine>>,
}

impl SharedEngine {
    /// Wrap an engine
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Lock the engine for a sequence of operations
    pub fn lock(&self) -> Result<MutexGuard<'_, Engine>, EngineError> {
        self.inner.lock().map_err(|_| EngineError::Poisoned)
    }

    /// Run one closure with exclusive access to the engine
    pub fn with<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> Result<R, EngineError> {
        let mut guard = self.lock()?;
        Ok(f(&mut *guard))
    }
}
