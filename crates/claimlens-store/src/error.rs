//! Error types for the learning store

use thiserror::Error;

/// Errors that can occur during snapshot and persistence operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Imported snapshot does not have the required shape
    #[error("Import format error: {0}")]
    ImportFormat(String),

    /// JSON encoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
