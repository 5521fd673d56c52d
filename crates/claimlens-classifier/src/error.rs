//! Error types for the Classifier

use thiserror::Error;

/// Errors that can occur during batch analysis
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    /// Input contained no non-blank claim line
    #[error("No claims to analyze: input is empty")]
    EmptyInput,

    /// Input exceeds the configured maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
