//! Claimlens Classifier
//!
//! Classifies claim statements along three dimensions by keyword matching.
//!
//! # Overview
//!
//! The classifier combines a static, versioned base table with the keywords
//! learned from user feedback into a [`PatternDictionary`], then matches each
//! claim line against it. Matching is binary and literal: a keyword counts
//! when the lowercased claim contains it.
//!
//! # Architecture
//!
//! ```text
//! base table + KeywordOverlay → PatternDictionary → Classifier → AnalysisResult
//! ```
//!
//! # Key Features
//!
//! - **Multi-label dimensions**: efficacy and claim type collect every matched label
//! - **Priority dimension**: persistence takes the first matching cue (immediate before durable)
//! - **Confidence model**: fixed heuristics per dimension
//! - **Suggestions**: unmatched tokens offered as keyword candidates
//! - **Batch analysis**: one result per non-blank input line, ids in input order
//!
//! # Example Usage
//!
//! ```
//! use claimlens_classifier::{Classifier, PatternDictionary};
//! use claimlens_domain::{Efficacy, Persistence};
//!
//! let classifier = Classifier::default_config();
//! let dictionary = PatternDictionary::base();
//!
//! let result = classifier.classify("该产品24小时长效保湿，温和不刺激", &dictionary);
//! assert!(result.efficacy.contains(&Efficacy::Moisturizing));
//! assert_eq!(result.persistence, Persistence::Durable);
//! ```

#![warn(missing_docs)]

pub mod base;
mod batch;
mod classifier;
mod config;
mod dictionary;
mod error;
mod suggest;


pub use batch::{split_claims, BatchStatistics};
pub use classifier::{
    Classifier, CLAIM_TYPE_FALLBACK_CONFIDENCE, CLAIM_TYPE_MATCH_CONFIDENCE,
    EFFICACY_FALLBACK_CONFIDENCE, PERSISTENCE_MATCH_CONFIDENCE,
};
pub use config::ClassifierConfig;
pub use dictionary::{EntryOrigin, PatternDictionary, PatternEntry};
pub use error::ClassifierError;
pub use suggest::tokenize;
