use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

static PROCESS_LOCKS: OnceLock<KeyedLocks> = OnceLock::new();

/// One mutex per store key. Writers to different keys never contend.
#[derive(Debug, Default)]
pub(crate) struct KeyedLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registry shared by every store handle in this process.
    pub(crate) fn global() -> &'static KeyedLocks {
        PROCESS_LOCKS.get_or_init(KeyedLocks::new)
    }

    /// Shared handle to the mutex guarding `key`, created on first use.
    pub(crate) fn handle(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Mutex for one history file, keyed by its resolved root so that
    /// `./store` and `/abs/store` map to the same lock.
    pub(crate) fn handle_for(&self, root: &Path, store_key: &str) -> Arc<Mutex<()>> {
        let root: PathBuf = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        self.handle(&format!("{}|{}", root.display(), store_key))
    }
}
