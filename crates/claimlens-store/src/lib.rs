//! Claimlens Learning Store
//!
//! Holds the mutable learning state that layers over the base dictionary:
//! keyword scores, learned keywords, tombstones, the correction log and the
//! aggregate feedback counters.
//!
//! # Architecture
//!
//! - [`LearningStore`] is a plain in-memory value passed by reference into
//!   every engine call; it implements [`claimlens_domain::KeywordOverlay`]
//! - [`LearningSnapshot`] is its JSON wire form, used for export, import and
//!   file persistence
//! - [`ImportMerger`] combines an imported state with the current one using a
//!   fixed per-field rule table
//! - [`JsonFileBackend`] is an optional persistence collaborator
//!
//! # Examples
//!
//! ```
//! use claimlens_domain::Efficacy;
//! use claimlens_store::{ImportMerger, LearningStore};
//!
//! let mut current = LearningStore::new();
//! current.register_keyword(Efficacy::Moisturizing.into(), "补水");
//!
//! let mut imported = LearningStore::new();
//! imported.register_keyword(Efficacy::Moisturizing.into(), "滋润");
//!
//! let merged = ImportMerger::default().merge(&current, &imported);
//! assert_eq!(merged.learned_for(Efficacy::Moisturizing.into()).len(), 2);
//! ```

#![warn(missing_docs)]

mod error;
mod merge;
mod persist;
mod record;
mod snapshot;
mod store;

pub use error::StoreError;
pub use merge::{ImportMerger, MergeConfig, TombstoneMerge};
pub use persist::JsonFileBackend;
pub use record::{CorrectionRecord, CorrectionType, LearningStats};
pub use snapshot::{base_keyword_mapping, CorrectionEntry, LearningSnapshot};
pub use store::{LearningStore, LearningSummary, SnapshotExtras, SCORE_CEILING, SCORE_FLOOR};
