//! Configuration for the Classifier

use crate::ClassifierError;
use serde::{Deserialize, Serialize};

/// Configuration for batch analysis and the effective dictionary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Maximum input text length (characters) for one batch
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,

    /// Maximum number of suggested keywords per claim
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// Minimum token length (characters) for a suggestion candidate
    #[serde(default = "default_min_token_chars")]
    pub min_token_chars: usize,

    /// Apply keyword tombstones to base-dictionary keywords as well
    ///
    /// When false, removing a base keyword records a tombstone that has no
    /// effect on classification.
    #[serde(default = "default_true")]
    pub filter_base_tombstones: bool,
}

fn default_max_text_length() -> usize {
    50_000
}

fn default_max_suggestions() -> usize {
    5
}

fn default_min_token_chars() -> usize {
    2
}

fn default_true() -> bool {
    true
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_text_length: default_max_text_length(),
            max_suggestions: default_max_suggestions(),
            min_token_chars: default_min_token_chars(),
            filter_base_tombstones: true,
        }
    }
}

impl ClassifierConfig {
    /// Strict preset: shorter inputs and fewer, longer suggestions
    pub fn strict() -> Self {
        Self {
            max_text_length: 10_000,
            max_suggestions: 3,
            min_token_chars: 3,
            filter_base_tombstones: true,
        }
    }

    /// Legacy preset: base tombstones stay inert and only tokens longer than
    /// two characters are suggested
    pub fn legacy() -> Self {
        Self {
            min_token_chars: 3,
            filter_base_tombstones: false,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.max_text_length == 0 {
            return Err(ClassifierError::Config(
                "max_text_length must be greater than 0".to_string(),
            ));
        }
        if self.min_token_chars == 0 {
            return Err(ClassifierError::Config(
                "min_token_chars must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ClassifierError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ClassifierError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClassifierConfig::default();
        assert_eq!(config.max_suggestions, 5);
        assert_eq!(config.min_token_chars, 2);
        assert!(config.filter_base_tombstones);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strict_config() {
        let config = ClassifierConfig::strict();
        assert!(config.max_suggestions < ClassifierConfig::default().max_suggestions);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_legacy_config() {
        let config = ClassifierConfig::legacy();
        assert!(!config.filter_base_tombstones);
        assert_eq!(config.min_token_chars, 3);
    }

    #[test]
    fn test_from_toml_with_defaults() {
        let config = ClassifierConfig::from_toml("max_suggestions = 3\n").unwrap();
        assert_eq!(config.max_suggestions, 3);
        assert_eq!(config.max_text_length, 50_000);
    }

    #[test]
    fn test_invalid_config() {
        let config = ClassifierConfig {
            min_token_chars: 0,
            ..ClassifierConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(ClassifierConfig::from_toml("max_text_length = 0").is_err());
    }
}
