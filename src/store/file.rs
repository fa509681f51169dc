use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::KeyValueStore;
use crate::error::{Error, Result};
use crate::lock::{self, FileLock, DEFAULT_LOCK_TIMEOUT_MS};

type Entries = BTreeMap<String, String>;

/// Store backed by a single JSON object file.
///
/// Every call takes an exclusive lock on `<file>.lock` for its duration, so
/// separate processes never interleave a read with a half-finished write.
/// Writes replace the file atomically.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    timeout_ms: u64,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
        }
    }

    pub fn with_lock_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` against the decoded entries while holding the file lock.
    /// The entries are written back only when `f` reports a change.
    async fn locked<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Entries) -> (T, bool) + Send + 'static,
    {
        let path = self.path.clone();
        let timeout_ms = self.timeout_ms;

        tokio::task::spawn_blocking(move || {
            let _lock = FileLock::acquire(lock::lock_path_for(&path), timeout_ms)?;
            let mut entries = read_entries(&path)?;
            let (value, changed) = f(&mut entries);
            if changed {
                write_entries(&path, &entries)?;
            }
            Ok(value)
        })
        .await
        .map_err(|e| Error::Store(format!("store task failed: {e}")))?
    }
}

fn read_entries(path: &Path) -> Result<Entries> {
    if !path.exists() {
        return Ok(Entries::new());
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Entries::new());
    }
    serde_json::from_str(&content).map_err(|source| Error::CorruptStore {
        path: path.to_path_buf(),
        source,
    })
}

fn write_entries(path: &Path, entries: &Entries) -> Result<()> {
    let json = serde_json::to_string_pretty(entries)?;
    lock::write_atomic(path, json.as_bytes())
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        debug!(key, path = %self.path.display(), "store get");
        let key = key.to_string();
        self.locked(move |entries| (entries.get(&key).cloned(), false))
            .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        debug!(key, path = %self.path.display(), "store set");
        let key = key.to_string();
        let value = value.to_string();
        self.locked(move |entries| {
            let changed = entries.get(&key) != Some(&value);
            entries.insert(key, value);
            ((), changed)
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        debug!(key, path = %self.path.display(), "store remove");
        let key = key.to_string();
        self.locked(move |entries| ((), entries.remove(&key).is_some()))
            .await
    }

    async fn keys(&self) -> Result<Vec<String>> {
        self.locked(|entries| (entries.keys().cloned().collect(), false))
            .await
    }
}
