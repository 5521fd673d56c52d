//! Feedback configuration

use crate::FeedbackError;
use claimlens_store::{SCORE_CEILING, SCORE_FLOOR};
use serde::{Deserialize, Serialize};

/// Score update rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Added to a keyword's score on agreement
    pub reinforce_step: f64,

    /// Subtracted from a keyword's score on disagreement
    pub penalty_step: f64,

    /// Lowest score a penalty can reach
    pub score_floor: f64,

    /// Highest score reinforcement can reach
    pub score_ceiling: f64,

    /// Score assumed for a keyword that has never been scored
    pub default_score: f64,

    /// Initial score of a manually registered keyword
    pub manual_seed: f64,

    /// Initial score of a keyword supplied with a correction
    pub correction_seed: f64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            reinforce_step: 0.1,
            penalty_step: 0.15,
            score_floor: 0.1,
            score_ceiling: 1.0,
            default_score: 1.0,
            manual_seed: 0.7,
            correction_seed: 0.8,
        }
    }
}

impl FeedbackConfig {
    /// Faster-moving scores
    pub fn aggressive() -> Self {
        Self {
            reinforce_step: 0.2,
            penalty_step: 0.3,
            ..Self::default()
        }
    }

    /// Slower-moving scores
    pub fn conservative() -> Self {
        Self {
            reinforce_step: 0.05,
            penalty_step: 0.05,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), FeedbackError> {
        let in_bounds = |v: f64| (SCORE_FLOOR..=SCORE_CEILING).contains(&v);
        if !in_bounds(self.score_floor) || !in_bounds(self.score_ceiling) {
            return Err(FeedbackError::Config(format!(
                "score bounds must lie in [{}, {}]",
                SCORE_FLOOR, SCORE_CEILING
            )));
        }
        if self.score_floor > self.score_ceiling {
            return Err(FeedbackError::Config(format!(
                "score_floor ({}) must not exceed score_ceiling ({})",
                self.score_floor, self.score_ceiling
            )));
        }
        if !(self.reinforce_step > 0.0 && self.penalty_step > 0.0) {
            return Err(FeedbackError::Config(
                "reinforce_step and penalty_step must be positive".to_string(),
            ));
        }
        for (name, seed) in [
            ("default_score", self.default_score),
            ("manual_seed", self.manual_seed),
            ("correction_seed", self.correction_seed),
        ] {
            if !in_bounds(seed) {
                return Err(FeedbackError::Config(format!(
                    "{} must lie in [{}, {}]",
                    name, SCORE_FLOOR, SCORE_CEILING
                )));
            }
        }
        Ok(())
    }
}
