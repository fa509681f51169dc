//! Completed-task registry under the reserved `"completed"` key.
//!
//! Membership here is the only record of completion; task records carry no
//! completed flag of their own.

use std::collections::BTreeSet;

use tracing::warn;

use crate::codec;
use crate::ids::TaskId;
use crate::store::{SharedStore, COMPLETED_KEY};

#[derive(Clone)]
pub struct CompletedRegistry {
    store: SharedStore,
}

impl CompletedRegistry {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Full completed set; a failed read is logged and treated as empty.
    pub async fn completed(&self) -> BTreeSet<String> {
        match self.store.get(COMPLETED_KEY).await {
            Ok(raw) => codec::decode(raw.as_deref()),
            Err(err) => {
                warn!(error = %err, "failed to read completed tasks");
                BTreeSet::new()
            }
        }
    }

    pub async fn is_completed(&self, task: &TaskId) -> bool {
        self.completed().await.contains(task.as_str())
    }

    /// Add `task` to the registry. Marking twice is harmless.
    ///
    /// IDs that would not survive the comma-joined encoding are skipped.
    pub async fn mark_completed(&self, task: &TaskId) {
        if let Err(err) = task.validate() {
            warn!(error = %err, "not marking task completed");
            return;
        }
        let mut completed = self.completed().await;
        if !completed.insert(task.to_string()) {
            return;
        }
        self.save(&completed).await;
    }

    /// Drop `task` from the registry, keeping every other entry.
    pub async fn unmark(&self, task: &TaskId) {
        let mut completed = self.completed().await;
        if !completed.remove(task.as_str()) {
            return;
        }
        self.save(&completed).await;
    }

    async fn save(&self, completed: &BTreeSet<String>) {
        if let Err(err) = self
            .store
            .set(COMPLETED_KEY, &codec::encode(completed))
            .await
        {
            warn!(error = %err, "failed to save completed tasks");
        }
    }
}
