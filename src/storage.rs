//! Data directory layout
//!
//! ```text
//! <data dir>/
//!   .artmark.toml          # Configuration
//!   store.json             # Favourites, completed tasks, task lists
//!   store.json.lock        # Advisory lock for the store
//!   reminders.json         # Scheduled reminder events
//!   reminders.json.lock
//! ```
//!
//! The data directory comes from `--data-dir`, then `ARTMARK_DIR`, then the
//! platform data directory.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::config::{Config, CONFIG_FILE};
use crate::error::{Error, Result};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "ARTMARK_DIR";

/// Paths inside one data directory
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the data directory from an explicit path or the platform default
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        if let Some(root) = explicit {
            return Ok(Self::new(root));
        }
        let dirs = ProjectDirs::from("", "", "artmark").ok_or_else(|| {
            Error::InvalidArgument(format!(
                "no home directory found; pass --data-dir or set {DATA_DIR_ENV}"
            ))
        })?;
        Ok(Self::new(dirs.data_dir()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn store_file(&self, config: &Config) -> PathBuf {
        self.root.join(&config.store.file)
    }

    pub fn reminders_file(&self, config: &Config) -> PathBuf {
        self.root.join(&config.reminders.file)
    }

    /// Create the directory and a default config if none exists.
    ///
    /// Returns whether a config file was written.
    pub fn init(&self) -> Result<bool> {
        fs::create_dir_all(&self.root)?;
        let config_file = self.config_file();
        if config_file.exists() {
            return Ok(false);
        }
        Config::default().save(&config_file)?;
        Ok(true)
    }

    pub fn is_initialized(&self) -> bool {
        self.config_file().exists()
    }

    /// Fail with `NotInitialized` unless `init` has run
    pub fn require_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(Error::NotInitialized(self.root.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_paths() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path());
        let config = Config::default();

        assert_eq!(storage.config_file(), temp.path().join(".artmark.toml"));
        assert_eq!(storage.store_file(&config), temp.path().join("store.json"));
        assert_eq!(
            storage.reminders_file(&config),
            temp.path().join("reminders.json")
        );
    }

    #[test]
    fn init_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().join("data"));

        assert!(!storage.is_initialized());
        assert!(matches!(
            storage.require_initialized(),
            Err(Error::NotInitialized(_))
        ));

        assert!(storage.init().unwrap());
        assert!(!storage.init().unwrap());
        assert!(storage.is_initialized());
        storage.require_initialized().unwrap();
    }

    #[test]
    fn explicit_root_wins() {
        let storage = Storage::resolve(Some(PathBuf::from("/tmp/artmark-test"))).unwrap();
        assert_eq!(storage.root(), Path::new("/tmp/artmark-test"));
    }
}
