//! Reminder service seam.
//!
//! Task IDs are whatever the reminder service hands back when it schedules
//! an event; the task store treats them as opaque strings.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ulid::Ulid;

use crate::error::{Error, Result};
use crate::ids::TaskId;
use crate::store::SharedStore;

#[async_trait]
pub trait ReminderService: Send + Sync {
    /// Schedule a reminder and return its event ID.
    async fn create_reminder(&self, text: &str, due: NaiveDateTime) -> Result<TaskId>;

    /// Cancel a reminder. Cancelling one that no longer exists succeeds.
    async fn delete_reminder(&self, id: &TaskId) -> Result<()>;
}

fn mint_event_id() -> TaskId {
    TaskId::new(Ulid::new().to_string().to_ascii_lowercase())
}

/// A scheduled reminder event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderEvent {
    pub title: String,
    pub start: NaiveDateTime,
}

/// Reminders kept as JSON events in a dedicated key-value store.
#[derive(Clone)]
pub struct StoreReminders {
    store: SharedStore,
}

impl StoreReminders {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Every pending reminder, soonest first.
    pub async fn pending(&self) -> Result<Vec<(TaskId, ReminderEvent)>> {
        let mut events = Vec::new();
        for key in self.store.keys().await? {
            let Some(raw) = self.store.get(&key).await? else {
                continue;
            };
            let event: ReminderEvent = serde_json::from_str(&raw)?;
            events.push((TaskId::new(key), event));
        }
        events.sort_by(|(a_id, a), (b_id, b)| a.start.cmp(&b.start).then_with(|| a_id.cmp(b_id)));
        Ok(events)
    }
}

#[async_trait]
impl ReminderService for StoreReminders {
    async fn create_reminder(&self, text: &str, due: NaiveDateTime) -> Result<TaskId> {
        let id = mint_event_id();
        let event = ReminderEvent {
            title: text.to_string(),
            start: due,
        };
        self.store
            .set(id.as_str(), &serde_json::to_string(&event)?)
            .await
            .map_err(|e| Error::Reminder(format!("failed to schedule reminder: {e}")))?;
        info!(reminder = %id, start = %due, "reminder scheduled");
        Ok(id)
    }

    async fn delete_reminder(&self, id: &TaskId) -> Result<()> {
        if self.store.get(id.as_str()).await?.is_none() {
            debug!(reminder = %id, "reminder already gone");
            return Ok(());
        }
        self.store
            .remove(id.as_str())
            .await
            .map_err(|e| Error::Reminder(format!("failed to cancel reminder {id}: {e}")))?;
        info!(reminder = %id, "reminder cancelled");
        Ok(())
    }
}

/// Hands out event IDs without scheduling anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnscheduledReminders;

#[async_trait]
impl ReminderService for UnscheduledReminders {
    async fn create_reminder(&self, _text: &str, _due: NaiveDateTime) -> Result<TaskId> {
        Ok(mint_event_id())
    }

    async fn delete_reminder(&self, id: &TaskId) -> Result<()> {
        debug!(reminder = %id, "reminders disabled; nothing to cancel");
        Ok(())
    }
}
