//! Persistence of the last analyzed batch between invocations.

use crate::error::Result;
use claimlens_domain::AnalysisResult;
use claimlens_engine::Engine;
use claimlens_store::JsonFileBackend;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Session file contents.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionData {
    #[serde(default)]
    results: Vec<AnalysisResult>,
}

/// The last batch on disk.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    /// Create a session file handle.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved batch; a missing file yields none.
    pub fn load(&self) -> Result<Vec<AnalysisResult>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(&self.path)?;
        let data: SessionData = serde_json::from_str(&json)?;
        debug!(path = %self.path.display(), results = data.results.len(), "loaded session");
        Ok(data.results)
    }

    /// Save a batch, replacing the previous one.
    pub fn save(&self, results: &[AnalysisResult]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = SessionData {
            results: results.to_vec(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&data)?)?;
        Ok(())
    }
}

/// An engine bound to its state files.
///
/// Loads the learning snapshot and the last batch on open; commands call
/// [`Session::persist`] after they change either.
#[derive(Debug)]
pub struct Session {
    engine: Engine,
    learning: JsonFileBackend,
    results: SessionFile,
}

impl Session {
    /// Open an engine over the given files.
    pub fn open(
        config: claimlens_engine::EngineConfig,
        learning: JsonFileBackend,
        results: SessionFile,
    ) -> Result<Self> {
        let store = learning.load()?;
        let mut engine = Engine::with_store(config, store)?;
        engine.restore_results(results.load()?);
        Ok(Self {
            engine,
            learning,
            results,
        })
    }

    /// Open the files named by a CLI configuration.
    pub fn from_config(config: &crate::Config) -> Result<Self> {
        Self::open(
            config.engine_config(),
            JsonFileBackend::new(config.learning_path()?),
            SessionFile::new(config.session_path()?),
        )
    }

    /// The engine.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// The engine, for mutation.
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Write the learning state and the current batch.
    pub fn persist(&self) -> Result<()> {
        self.learning.save(self.engine.store())?;
        self.results.save(self.engine.results())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimlens_domain::{Efficacy, Persistence};
    use claimlens_engine::EngineConfig;
    use tempfile::TempDir;

    fn open(dir: &TempDir) -> Session {
        Session::open(
            EngineConfig::default(),
            JsonFileBackend::new(dir.path().join("learning.json")),
            SessionFile::new(dir.path().join("session.json")),
        )
        .unwrap()
    }

    #[test]
    fn test_missing_files_start_empty() {
        let dir = TempDir::new().unwrap();
        let session = open(&dir);
        assert!(session.engine().results().is_empty());
        assert!(session.engine().store().is_empty());
    }

    #[test]
    fn test_state_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let mut session = open(&dir);
            session
                .engine_mut()
                .learn(Persistence::Durable.into(), "一晚")
                .unwrap();
            session.engine_mut().analyze("妆效一晚不脱\n美白").unwrap();
            session.persist().unwrap();
        }

        let session = open(&dir);
        let results = session.engine().results();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].persistence, Persistence::Durable);
        assert!(results[1].efficacy.contains(&Efficacy::Whitening));
        assert_eq!(session.engine().learning_summary().learned_keywords, 1);
    }

    #[test]
    fn test_restored_results_accept_feedback() {
        let dir = TempDir::new().unwrap();
        {
            let mut session = open(&dir);
            session.engine_mut().analyze("长效保湿").unwrap();
            session.persist().unwrap();
        }

        let mut session = open(&dir);
        let id = session.engine().id_at(1).unwrap();
        session.engine_mut().confirm(id).unwrap();
        assert_eq!(session.engine().learning_summary().feedback_actions, 1);
    }
}
