//! Trait definitions for external interactions
//!
//! These traits define the boundary between the classifier and the learning
//! state. Implementations live in other crates.

use crate::{Dimension, Label};

/// Source of learned and suppressed keywords layered over the base dictionary
///
/// Implemented by the learning store (claimlens-store).
pub trait KeywordOverlay {
    /// Learned keywords of one dimension, grouped by label
    ///
    /// Keyword order within a label is registration order.
    fn learned_keywords(&self, dimension: Dimension) -> Vec<(Label, Vec<String>)>;

    /// Whether a keyword has been removed (tombstoned) for a label
    fn is_removed(&self, label: Label, keyword: &str) -> bool;
}

/// Overlay with no learned keywords and no tombstones
///
/// Classifying against it uses the base dictionary alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyOverlay;

impl KeywordOverlay for EmptyOverlay {
    fn learned_keywords(&self, _dimension: Dimension) -> Vec<(Label, Vec<String>)> {
        Vec::new()
    }

    fn is_removed(&self, _label: Label, _keyword: &str) -> bool {
        false
    }
}
