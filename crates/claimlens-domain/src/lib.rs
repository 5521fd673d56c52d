//! Claimlens Domain Layer
//!
//! This crate contains the core vocabulary of Claimlens: the three
//! classification dimensions, their closed label sets, and the result types
//! produced by the classifier and consumed by the feedback loop.
//!
//! ## Key Concepts
//!
//! - **Claim**: one line of marketing text (e.g. a cosmetic product claim)
//! - **Dimension**: an independent classification axis (efficacy, claim type, persistence)
//! - **Label**: a fixed category within a dimension; learning never adds labels
//! - **MatchRecord**: one keyword hit, replayed later to adjust keyword scores
//! - **AnalysisResult**: the per-claim outcome, overwritable by user correction
//!
//! ## Architecture
//!
//! - No infrastructure dependencies (only `uuid` for identifiers and `serde`
//!   for the wire shapes)
//! - Pure value types and the [`traits::KeywordOverlay`] seam used to layer
//!   learned keywords over the base dictionary

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod confidence;
pub mod dimension;
pub mod label;
pub mod result;
pub mod traits;

// Re-exports for convenience
pub use confidence::DimensionConfidence;
pub use dimension::Dimension;
pub use label::{ClaimType, Efficacy, Label, Persistence};
pub use result::{AnalysisResult, Classification, DimensionValue, MatchRecord, ResultId};
pub use traits::{EmptyOverlay, KeywordOverlay};
