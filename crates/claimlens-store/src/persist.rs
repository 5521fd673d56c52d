//! JSON file persistence
//!
//! The store itself never touches storage; hosts that want state to survive
//! restarts load and save snapshots through this backend.

use crate::error::StoreError;
use crate::snapshot::LearningSnapshot;
use crate::store::LearningStore;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Snapshot file on disk
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Create a backend for the given file path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored learning state
    ///
    /// A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// snapshot.
    pub fn load(&self) -> Result<LearningStore, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no snapshot file, starting empty");
            return Ok(LearningStore::new());
        }
        let json = fs::read_to_string(&self.path)?;
        let snapshot = LearningSnapshot::from_json(&json)?;
        info!(path = %self.path.display(), "loaded learning state");
        Ok(LearningStore::from_snapshot(snapshot))
    }

    /// Save the learning state
    ///
    /// Writes to a sibling temporary file first and renames it into place.
    pub fn save(&self, store: &LearningStore) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = store.to_snapshot().to_json()?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "saved learning state");
        Ok(())
    }

    /// Delete the snapshot file if present
    pub fn clear(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
