use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::PoisonError;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};
use crate::error::{Result, TabDriftError};
use crate::fingerprint::sha256;
use super::lock::KeyedLocks;
use super::record::VersionRecord;

const STORE_KEY_LEN: usize = 48;
const HISTORY_EXT: &str = "json";

#[derive(Debug, Serialize, Deserialize)]
struct HistoryFile {
    source: String,
    versions: Vec<VersionRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Appended at this zero-based position in the history.
    Appended { position: usize },
    /// A record with the same version id was already committed.
    AlreadyStored,
}

/// Append-only audit history, one JSON file per source under `root`.
///
/// Writes for one source are serialized through a process-wide per-key mutex,
/// shared by every handle on the same root, and committed by renaming a fully
/// written temp file over the old history. Readers see either the previous or
/// the new history and never a partial one.
#[derive(Debug, Clone)]
pub struct VersionStore {
    root: PathBuf,
}

impl VersionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem-safe key for a source identifier.
    pub fn store_key(source: &str) -> String {
        let mut key = sha256(source);
        key.truncate(STORE_KEY_LEN);
        key
    }

    pub fn history_path(&self, source: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", Self::store_key(source), HISTORY_EXT))
    }

    pub fn save(&self, record: &VersionRecord) -> Result<SaveOutcome> {
        let source = record.source();
        let key = Self::store_key(source);
        let path = self.history_path(source);

        check_scores(record)?;

        fs::create_dir_all(&self.root).map_err(|error| TabDriftError::StorageWrite {
            source_id: source.to_string(),
            path: path.clone(),
            error,
        })?;
        let lock = KeyedLocks::global().handle_for(&self.root, &key);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut history = match read_history(&path, source)? {
            Some(history) => history,
            None => HistoryFile {
                source: source.to_string(),
                versions: Vec::new(),
            },
        };

        if history
            .versions
            .iter()
            .any(|v| v.version_id() == record.version_id())
        {
            debug!(
                "Version {} already stored for '{}', skipping write",
                record.version_id(),
                source
            );
            return Ok(SaveOutcome::AlreadyStored);
        }

        if let Some(latest) = history.versions.last() {
            if record.timestamp() < latest.timestamp() {
                warn!(
                    "Version {} for '{}' is older than latest {}; appending anyway",
                    record.version_id(),
                    source,
                    latest.version_id()
                );
            }
        }

        history.versions.push(record.clone());
        let position = history.versions.len() - 1;

        let payload = serde_json::to_vec_pretty(&history)?;
        self.commit(&path, &payload).map_err(|error| {
            TabDriftError::StorageWrite {
                source_id: source.to_string(),
                path: path.clone(),
                error,
            }
        })?;

        debug!(
            "Saved version {} for '{}' at position {} ({})",
            record.version_id(),
            source,
            position,
            path.display()
        );
        Ok(SaveOutcome::Appended { position })
    }

    pub fn load_latest(&self, source: &str) -> Result<Option<VersionRecord>> {
        Ok(self.load_history(source)?.pop())
    }

    pub fn load_history(&self, source: &str) -> Result<Vec<VersionRecord>> {
        let path = self.history_path(source);
        Ok(read_history(&path, source)?
            .map(|h| h.versions)
            .unwrap_or_default())
    }

    pub fn find_version(&self, source: &str, version_id: &str) -> Result<Option<VersionRecord>> {
        Ok(self
            .load_history(source)?
            .into_iter()
            .find(|v| v.version_id() == version_id))
    }

    pub fn exists(&self, source: &str) -> Result<bool> {
        Ok(!self.load_history(source)?.is_empty())
    }

    /// Sequence number the next record for `source` should be built with.
    pub fn next_sequence(&self, source: &str) -> Result<u64> {
        Ok(self.load_history(source)?.len() as u64)
    }

    pub fn score_trend(&self, source: &str) -> Result<Vec<f64>> {
        Ok(self
            .load_history(source)?
            .iter()
            .map(VersionRecord::overall_score)
            .collect())
    }

    /// Every source with a readable history, sorted. Corrupt files are skipped.
    pub fn list_sources(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut sources = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(HISTORY_EXT) {
                continue;
            }
            let content = match fs::read(&path) {
                Ok(content) => content,
                Err(e) => {
                    warn!("Skipping unreadable history {}: {}", path.display(), e);
                    continue;
                }
            };
            match serde_json::from_slice::<HistoryFile>(&content) {
                Ok(history) => sources.push(history.source),
                Err(e) => warn!("Skipping unreadable history {}: {}", path.display(), e),
            }
        }

        sources.sort();
        Ok(sources)
    }

    /// Each write gets its own temp file in `root`; it is removed on any failure.
    fn commit(&self, path: &Path, payload: &[u8]) -> std::io::Result<()> {
        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(payload)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;

        sync_dir(&self.root);
        Ok(())
    }
}

/// serde_json writes non-finite floats as `null`, which would make the
/// history unreadable, so such records never reach the file.
fn check_scores(record: &VersionRecord) -> Result<()> {
    if !record.overall_score().is_finite() {
        return Err(TabDriftError::InvalidRecord(format!(
            "version {} has non-finite overall score {}",
            record.version_id(),
            record.overall_score()
        )));
    }
    if let Some((name, score)) = record
        .dimension_scores()
        .iter()
        .find(|(_, score)| !score.is_finite())
    {
        return Err(TabDriftError::InvalidRecord(format!(
            "version {} has non-finite score {} for dimension '{}'",
            record.version_id(),
            score,
            name
        )));
    }
    Ok(())
}

#[cfg(unix)]
fn sync_dir(dir: &Path) {
    if let Err(e) = File::open(dir).and_then(|d| d.sync_all()) {
        debug!("Could not sync directory {}: {}", dir.display(), e);
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}

fn read_history(path: &Path, source: &str) -> Result<Option<HistoryFile>> {
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let corrupt = |reason: String| {
        warn!("Corrupt history for '{}' at {}: {}", source, path.display(), reason);
        TabDriftError::CorruptHistory {
            source_id: source.to_string(),
            path: path.to_path_buf(),
            reason,
        }
    };

    let history: HistoryFile =
        serde_json::from_slice(&content).map_err(|e| corrupt(e.to_string()))?;

    if history.source != source {
        return Err(corrupt(format!("file belongs to source '{}'", history.source)));
    }
    if let Some(stray) = history.versions.iter().find(|v| v.source() != source) {
        return Err(corrupt(format!(
            "version {} belongs to source '{}'",
            stray.version_id(),
            stray.source()
        )));
    }

    Ok(Some(history))
}
