//! Engine configuration

use crate::EngineError;
use claimlens_classifier::ClassifierConfig;
use claimlens_feedback::FeedbackConfig;
use claimlens_store::MergeConfig;
use serde::{Deserialize, Serialize};

/// Configuration of every engine component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Classification and batch limits
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Score update rules
    #[serde(default)]
    pub feedback: FeedbackConfig,

    /// Import merge rules
    #[serde(default)]
    pub merge: MergeConfig,
}

impl EngineConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), EngineError> {
        self.classifier
            .validate()
            .map_err(|e| EngineError::Config(e.to_string()))?;
        self.feedback
            .validate()
            .map_err(|e| EngineError::Config(e.to_string()))?;
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, EngineError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| EngineError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}
