//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use claimlens_classifier::ClassifierConfig;
use claimlens_engine::EngineConfig;
use claimlens_feedback::FeedbackConfig;
use claimlens_store::MergeConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// State file locations
    #[serde(default)]
    pub paths: Paths,

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

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Where state is kept between invocations.
///
/// Unset paths resolve inside `~/.claimlens`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paths {
    /// Learning-state snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning: Option<PathBuf>,

    /// Last analyzed batch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<PathBuf>,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Directory holding config, state and history.
    pub fn data_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".claimlens"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("config.toml"))
    }

    /// Load configuration from a file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, writing the defaults on first run.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load_from(path);
        }
        let config = Self::default();
        config.save_to(path)?;
        debug!(path = %path.display(), "wrote default configuration");
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Validate the embedded engine sections.
    pub fn validate(&self) -> Result<()> {
        self.engine_config()
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Engine configuration assembled from the embedded sections.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            classifier: self.classifier.clone(),
            feedback: self.feedback.clone(),
            merge: self.merge.clone(),
        }
    }

    /// Resolved learning-state file.
    pub fn learning_path(&self) -> Result<PathBuf> {
        match &self.paths.learning {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("learning.json")),
        }
    }

    /// Resolved session file.
    pub fn session_path(&self) -> Result<PathBuf> {
        match &self.paths.session {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("session.json")),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}
