#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use artmark::error::{Error, Result};
use artmark::notify::RecordingNotifier;
use artmark::store::{KeyValueStore, MemoryStore};
use async_trait::async_trait;
use tempfile::TempDir;

/// Memory store whose reads and/or writes can be made to fail.
pub struct FailingStore {
    inner: MemoryStore,
    fail_reads: bool,
    fail_writes: bool,
}

impl FailingStore {
    /// Every operation fails.
    pub fn broken() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_reads: true,
            fail_writes: true,
        }
    }

    /// Reads work against `entries`; `set` and `remove` fail.
    pub fn read_only<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            inner: MemoryStore::with_entries(entries),
            fail_reads: false,
            fail_writes: true,
        }
    }
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads {
            return Err(Error::Store(format!("read of '{key}' refused")));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Store(format!("write of '{key}' refused")));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Store(format!("remove of '{key}' refused")));
        }
        self.inner.remove(key).await
    }

    async fn keys(&self) -> Result<Vec<String>> {
        if self.fail_reads {
            return Err(Error::Store("key listing refused".to_string()));
        }
        self.inner.keys().await
    }
}

pub fn memory_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

pub fn recorder() -> Arc<RecordingNotifier> {
    Arc::new(RecordingNotifier::new())
}

/// Temporary data directory for CLI tests.
pub struct DataDir {
    dir: TempDir,
}

impl DataDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn read_store(&self) -> serde_json::Value {
        let raw = std::fs::read_to_string(self.join("store.json")).expect("store.json");
        serde_json::from_str(&raw).expect("store.json is valid JSON")
    }
}
