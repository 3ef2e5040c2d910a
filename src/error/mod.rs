use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabDriftError {
    #[error("Corrupt history for source '{source_id}' at {}: {reason}", .path.display())]
    CorruptHistory {
        source_id: String,
        path: PathBuf,
        reason: String,
    },

    #[error("Failed to commit history for source '{source_id}' at {}: {error}", .path.display())]
    StorageWrite {
        source_id: String,
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Invalid version record: {0}")]
    InvalidRecord(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Version not found: {0}")]
    VersionNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TabDriftError {
    /// True for failures scoped to a single source's history.
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            TabDriftError::CorruptHistory { .. } | TabDriftError::StorageWrite { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TabDriftError>;
