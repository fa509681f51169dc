//! Key-value persistence behind the favourites and task indexes.
//!
//! Everything artmark keeps lives in one string-keyed, string-valued store:
//!
//! ```text
//! favourites        -> "27992,16568"             (comma-joined artwork IDs)
//! completed         -> "evt-1,evt-7"             (comma-joined task IDs)
//! <artworkId>       -> [{"taskID":..,"text":..,"dueDate":..}, ...]
//! ```
//!
//! Other keys may appear (platform test keys, for instance); readers ignore
//! anything that is neither reserved nor a canonical artwork ID.

mod file;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Reserved key holding the favourite artwork IDs
pub const FAVOURITES_KEY: &str = "favourites";

/// Reserved key holding the completed task IDs
pub const COMPLETED_KEY: &str = "completed";

/// Async string-keyed store contract.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `None` when the key is absent
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite a value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key; removing an absent key is not an error
    async fn remove(&self, key: &str) -> Result<()>;

    /// All keys currently present, in no particular order
    async fn keys(&self) -> Result<Vec<String>>;
}

/// Store handle shared by the components
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Whether a key is one of the reserved set keys
pub fn is_reserved(key: &str) -> bool {
    key == FAVOURITES_KEY || key == COMPLETED_KEY
}
