//! Error types for the engine

use claimlens_classifier::ClassifierError;
use claimlens_domain::ResultId;
use claimlens_feedback::FeedbackError;
use claimlens_store::StoreError;
use thiserror::Error;

/// Engine operation errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// Batch analysis failed
    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    /// Snapshot or persistence failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Feedback was rejected
    #[error("Feedback error: {0}")]
    Feedback(#[from] FeedbackError),

    /// Feedback referenced a result outside the current batch
    #[error("Result not found: {0}")]
    ResultNotFound(ResultId),

    /// No result at the given 1-based position
    #[error("No result at position {0}")]
    IndexOutOfRange(usize),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A previous holder of the shared engine panicked
    #[error("Engine lock poisoned")]
    Poisoned,
}
