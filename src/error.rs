//! Error types for artmark
//!
//! Exit codes:
//! - 2: User error (bad args, unknown task, missing data directory)
//! - 3: Stored data could not be decoded
//! - 4: Operation failed (I/O, lock contention, store or reminder failure)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the artmark CLI
pub mod exit_codes {
    pub const USER_ERROR: i32 = 2;
    pub const DATA_ERROR: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for artmark operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid artwork id: {0}")]
    InvalidArtworkId(String),

    #[error("Task {task} not found for artwork {artwork}")]
    TaskNotFound { artwork: String, task: String },

    #[error("Data directory not initialized: {0}")]
    NotInitialized(PathBuf),

    // Undecodable stored data (exit code 3)
    #[error("Task list under key '{key}' is corrupt: {source}")]
    CorruptTaskList {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store file {path} is corrupt: {source}")]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Reminder error: {0}")]
    Reminder(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::InvalidConfig(_)
            | Error::InvalidArgument(_)
            | Error::InvalidArtworkId(_)
            | Error::TaskNotFound { .. }
            | Error::NotInitialized(_) => exit_codes::USER_ERROR,

            // Undecodable data
            Error::CorruptTaskList { .. } | Error::CorruptStore { .. } => exit_codes::DATA_ERROR,

            // Operation failures
            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::LockFailed(_)
            | Error::Store(_)
            | Error::Reminder(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured details for JSON error output
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::TaskNotFound { artwork, task } => Some(serde_json::json!({
                "artwork_id": artwork,
                "task_id": task,
            })),
            Error::CorruptTaskList { key, .. } => Some(serde_json::json!({ "key": key })),
            Error::CorruptStore { path, .. } | Error::NotInitialized(path) => {
                Some(serde_json::json!({ "path": path }))
            }
            _ => None,
        }
    }
}

/// Result type alias for artmark operations
pub type Result<T> = std::result::Result<T, Error>;
