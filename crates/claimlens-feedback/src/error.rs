//! Feedback error types

use claimlens_domain::Dimension;
use thiserror::Error;

/// Errors that can occur while applying feedback
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedbackError {
    /// Keyword was empty after trimming
    #[error("Keyword must not be empty")]
    EmptyKeyword,

    /// Corrected value holds no labels
    #[error("Corrected {0} value must hold at least one label")]
    EmptyValue(Dimension),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
