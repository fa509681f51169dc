//! Configuration loading and management
//!
//! Handles parsing of the `.artmark.toml` file in the data directory.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name of the configuration inside the data directory
pub const CONFIG_FILE: &str = ".artmark.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Key-value store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Reminder configuration
    #[serde(default)]
    pub reminders: RemindersConfig,

    /// User-visible notifications
    #[serde(default)]
    pub notifications: NotificationsConfig,

    /// Tasks configuration
    #[serde(default)]
    pub tasks: TasksConfig,
}

/// Store-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// File name of the JSON store inside the data directory
    #[serde(default = "default_store_file")]
    pub file: String,
}

fn default_store_file() -> String {
    "store.json".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            file: default_store_file(),
        }
    }
}

/// Reminder-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemindersConfig {
    /// Schedule a reminder for each new task
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// File name of the reminder store inside the data directory
    #[serde(default = "default_reminders_file")]
    pub file: String,
}

fn default_true() -> bool {
    true
}

fn default_reminders_file() -> String {
    "reminders.json".to_string()
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: default_reminders_file(),
        }
    }
}

/// Notification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Print confirmations such as "added to favourites"
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Task-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// strftime format used to render a task's due date when it is stored
    #[serde(default = "default_due_format")]
    pub due_format: String,
}

fn default_due_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            due_format: default_due_format(),
        }
    }
}

impl Config {
    /// Load configuration from a `.artmark.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        let content = toml::to_string_pretty(self)?;
        crate::lock::write_atomic(path, content.as_bytes())
    }

    fn validate(&self) -> crate::error::Result<()> {
        validate_file_name(&self.store.file, "store.file")?;
        validate_file_name(&self.reminders.file, "reminders.file")?;
        if self.store.file == self.reminders.file {
            return Err(crate::error::Error::InvalidConfig(
                "store.file and reminders.file must differ".to_string(),
            ));
        }
        self.tasks.validate()?;
        Ok(())
    }
}

impl TasksConfig {
    fn validate(&self) -> crate::error::Result<()> {
        if self.due_format.trim().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "tasks.due_format cannot be empty".to_string(),
            ));
        }
        if StrftimeItems::new(&self.due_format).any(|item| matches!(item, Item::Error)) {
            return Err(crate::error::Error::InvalidConfig(format!(
                "tasks.due_format '{}' is not a valid format",
                self.due_format
            )));
        }
        Ok(())
    }
}

fn validate_file_name(name: &str, field: &str) -> crate::error::Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(crate::error::Error::InvalidConfig(format!(
            "{field} cannot be empty"
        )));
    }
    if trimmed.contains(['/', '\\']) || trimmed == "." || trimmed == ".." {
        return Err(crate::error::Error::InvalidConfig(format!(
            "{field} must be a plain file name: {trimmed}"
        )));
    }
    Ok(())
}
