//! Claimlens Feedback
//!
//! Applies user feedback to the learning store.
//!
//! The processor provides:
//! - Confirm-all-correct (reinforce every matched keyword)
//! - Per-dimension correction (log, reinforce or penalize, register a supplied keyword)
//! - Manual keyword registration and removal
//!
//! # Examples
//!
//! ```
//! use claimlens_feedback::FeedbackProcessor;
//! use claimlens_domain::Efficacy;
//! use claimlens_store::LearningStore;
//!
//! let processor = FeedbackProcessor::default_config();
//! let mut store = LearningStore::new();
//!
//! processor.learn(&mut store, Efficacy::Whitening.into(), "雪肌").unwrap();
//! assert_eq!(store.score("雪肌"), Some(0.7));
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod processor;

pub use config::FeedbackConfig;
pub use error::FeedbackError;
pub use processor::{ConfirmOutcome, CorrectionOutcome, FeedbackProcessor, ScoreChange};
