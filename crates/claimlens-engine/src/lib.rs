//! Claimlens Engine
//!
//! One entry point for classification and the feedback loop.
//!
//! # Overview
//!
//! The engine owns the learning store and the current result batch, and
//! exposes the operations a host calls: analyze, confirm, correct, learn,
//! remove, export, import and clear. The effective dictionary is rebuilt from
//! the learning store on every analysis, so feedback takes effect on the next
//! run.
//!
//! # Architecture
//!
//! ```text
//! input → Engine::analyze → Classifier → results
//! feedback → Engine::{confirm, correct, learn, remove} → FeedbackProcessor → LearningStore
//! snapshot → Engine::import_json → ImportMerger → LearningStore
//! ```
//!
//! # Example Usage
//!
//! ```
//! use claimlens_domain::{DimensionValue, Efficacy};
//! use claimlens_engine::Engine;
//! use std::collections::BTreeSet;
//!
//! let mut engine = Engine::default_config();
//! let id = engine.analyze("雪肌奇迹").unwrap()[0].id;
//!
//! engine
//!     .correct(
//!         id,
//!         DimensionValue::Efficacy(BTreeSet::from([Efficacy::Whitening])),
//!         Some("雪肌"),
//!     )
//!     .unwrap();
//!
//! let again = engine.analyze("雪肌奇迹").unwrap();
//! assert!(again[0].efficacy.contains(&Efficacy::Whitening));
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod error;

pub use config::EngineConfig;
pub use engine::{Engine, SharedEngine};
pub use error::EngineError;
