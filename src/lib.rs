//! artmark - favourites and follow-up tasks for catalog artworks
//!
//! This library keeps a user's favourite artworks and the tasks they attach
//! to individual artworks in a string-keyed key-value store.
//!
//! # Core Concepts
//!
//! - **Favourites**: one comma-joined set of artwork IDs
//! - **Tasks**: per-artwork ordered lists, keyed by the artwork ID
//! - **Completed registry**: the single source of truth for task completion
//! - **Reminders**: the external scheduler whose event IDs become task IDs
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `codec`: Comma-joined set encoding
//! - `completed`: Completed-task registry
//! - `config`: Configuration loading from `.artmark.toml`
//! - `discovery`: Artworks that currently have tasks
//! - `error`: Error types and result aliases
//! - `favorites`: Favourite artworks index
//! - `ids`: Artwork and task identifiers
//! - `lock`: File locking and atomic writes
//! - `notify`: User-visible notifications
//! - `reminder`: Reminder service trait and local implementations
//! - `session`: Application flows over all of the above
//! - `storage`: Data directory layout
//! - `store`: Key-value store trait, memory and file backends
//! - `tasks`: Per-artwork task lists

pub mod cli;
pub mod codec;
pub mod completed;
pub mod config;
pub mod discovery;
pub mod error;
pub mod favorites;
pub mod ids;
pub mod lock;
pub mod notify;
pub mod output;
pub mod reminder;
pub mod session;
pub mod storage;
pub mod store;
pub mod tasks;

pub use error::{Error, Result};
pub use ids::{ArtworkId, TaskId};
