//! Per-dimension confidence scores

use crate::Dimension;
use serde::{Deserialize, Serialize};

/// Heuristic match strength per dimension, each in [0, 1]
///
/// Not a calibrated probability. A persistence score of [`DimensionConfidence::UNSET`]
/// means no persistence cue matched and the label is the default.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DimensionConfidence {
    /// Dimension 1 confidence
    pub efficacy: f64,
    /// Dimension 2 confidence
    pub claim_type: f64,
    /// Dimension 3 confidence
    pub persistence: f64,
}

impl DimensionConfidence {
    /// Baseline for a dimension that was never matched
    pub const UNSET: f64 = 0.0;

    /// Confidence for a single dimension
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Efficacy => self.efficacy,
            Dimension::ClaimType => self.claim_type,
            Dimension::Persistence => self.persistence,
        }
    }

    /// Whether a persistence cue was matched
    pub fn persistence_matched(&self) -> bool {
        self.persistence > Self::UNSET
    }

    /// Efficacy confidence as a whole percentage, as shown in reports
    pub fn efficacy_percent(&self) -> u32 {
        (self.efficacy * 100.0).round() as u32
    }
}
