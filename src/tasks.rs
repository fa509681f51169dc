//! Per-artwork task lists.
//!
//! Each artwork with tasks owns one store entry keyed by its ID, holding a
//! JSON array of records in creation order. An artwork without tasks has no
//! entry at all: deleting the last task removes the key.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::completed::CompletedRegistry;
use crate::error::{Error, Result};
use crate::ids::{ArtworkId, TaskId};
use crate::notify::Notifier;
use crate::store::SharedStore;

pub const TASK_ADDED_MESSAGE: &str = "Task added!";

/// Task as persisted. Completion is deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(rename = "taskID")]
    pub task_id: TaskId,
    pub text: String,
    #[serde(rename = "dueDate")]
    pub due_date: String,
}

/// Task as read back, with completion joined in from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    #[serde(flatten)]
    pub record: TaskRecord,
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
}

impl Task {
    pub fn id(&self) -> &TaskId {
        &self.record.task_id
    }
}

#[derive(Clone)]
pub struct TaskStore {
    store: SharedStore,
    registry: CompletedRegistry,
    notifier: Arc<dyn Notifier>,
}

impl TaskStore {
    pub fn new(
        store: SharedStore,
        registry: CompletedRegistry,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            registry,
            notifier,
        }
    }

    pub fn registry(&self) -> &CompletedRegistry {
        &self.registry
    }

    /// Stored records for `artwork`, or `None` if it has no entry.
    async fn load(&self, artwork: &ArtworkId) -> Result<Option<Vec<TaskRecord>>> {
        let key = artwork.key();
        let raw = match self.store.get(&key).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, artwork = %artwork, "failed to read tasks");
                return Ok(None);
            }
        };

        match raw {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| Error::CorruptTaskList { key, source }),
            None => Ok(None),
        }
    }

    async fn join(&self, records: Vec<TaskRecord>) -> Vec<Task> {
        let completed: BTreeSet<String> = self.registry.completed().await;
        records
            .into_iter()
            .map(|record| Task {
                is_completed: completed.contains(record.task_id.as_str()),
                record,
            })
            .collect()
    }

    pub async fn list_tasks_for_artwork(&self, artwork: &ArtworkId) -> Result<Option<Vec<Task>>> {
        match self.load(artwork).await? {
            Some(records) => Ok(Some(self.join(records).await)),
            None => Ok(None),
        }
    }

    /// Append a task and return the artwork's refreshed list.
    pub async fn add_task(
        &self,
        artwork: &ArtworkId,
        task_id: TaskId,
        text: impl Into<String>,
        due_date: impl Into<String>,
    ) -> Result<Vec<Task>> {
        task_id.validate()?;
        let mut records = self.load(artwork).await?.unwrap_or_default();
        records.push(TaskRecord {
            task_id,
            text: text.into(),
            due_date: due_date.into(),
        });

        let json = serde_json::to_string(&records)?;
        match self.store.set(&artwork.key(), &json).await {
            Ok(()) => {
                debug!(artwork = %artwork, count = records.len(), "task list saved");
                self.notifier.notify(TASK_ADDED_MESSAGE);
            }
            Err(err) => warn!(error = %err, artwork = %artwork, "failed to save tasks"),
        }

        Ok(self
            .list_tasks_for_artwork(artwork)
            .await?
            .unwrap_or_default())
    }

    /// Delete one task.
    ///
    /// Returns the remaining tasks, or `None` once the artwork has none left
    /// (its entry is removed) or never had any.
    pub async fn delete_task(
        &self,
        artwork: &ArtworkId,
        task_id: &TaskId,
    ) -> Result<Option<Vec<Task>>> {
        let Some(records) = self.load(artwork).await? else {
            return Ok(None);
        };

        self.registry.unmark(task_id).await;

        let before = records.len();
        let remaining: Vec<TaskRecord> = records
            .into_iter()
            .filter(|record| &record.task_id != task_id)
            .collect();

        if remaining.is_empty() {
            if let Err(err) = self.store.remove(&artwork.key()).await {
                warn!(error = %err, artwork = %artwork, "failed to remove task list");
            }
            return Ok(None);
        }

        if remaining.len() != before {
            let json = serde_json::to_string(&remaining)?;
            if let Err(err) = self.store.set(&artwork.key(), &json).await {
                warn!(error = %err, artwork = %artwork, "failed to save tasks");
            }
        } else {
            debug!(artwork = %artwork, task = %task_id, "task not in list; nothing removed");
        }

        Ok(Some(self.join(remaining).await))
    }

    pub async fn mark_completed(&self, task_id: &TaskId) {
        self.registry.mark_completed(task_id).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::store::{KeyValueStore, MemoryStore, COMPLETED_KEY};

    fn task_store() -> (TaskStore, Arc<MemoryStore>, Arc<RecordingNotifier>) {
        let store = Arc::new(MemoryStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let tasks = TaskStore::new(
            store.clone(),
            CompletedRegistry::new(store.clone()),
            notifier.clone(),
        );
        (tasks, store, notifier)
    }

    #[test]
    fn record_serializes_with_camel_case_field_names() {
        let record = TaskRecord {
            task_id: TaskId::new("evt-1"),
            text: "See it in person".to_string(),
            due_date: "2026-11-01 10:00".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "taskID": "evt-1",
                "text": "See it in person",
                "dueDate": "2026-11-01 10:00",
            })
        );

        let view = Task {
            record,
            is_completed: true,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["isCompleted"], true);
        assert_eq!(json["taskID"], "evt-1");
    }

    #[tokio::test]
    async fn unknown_artwork_has_no_entry() {
        let (tasks, _, _) = task_store();
        assert_eq!(tasks.list_tasks_for_artwork(&ArtworkId(1)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn add_appends_in_order_and_notifies() {
        let (tasks, store, notifier) = task_store();
        let artwork = ArtworkId(100);

        tasks.add_task(&artwork, "a".into(), "first", "d1").await.unwrap();
        let list = tasks.add_task(&artwork, "b".into(), "second", "d2").await.unwrap();

        let ids: Vec<_> = list.iter().map(|t| t.id().as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(list.iter().all(|t| !t.is_completed));
        assert_eq!(notifier.messages(), vec![TASK_ADDED_MESSAGE, TASK_ADDED_MESSAGE]);

        let raw = store.get("100").await.unwrap().unwrap();
        assert!(!raw.contains("isCompleted"));
    }

    #[tokio::test]
    async fn completion_is_joined_per_task() {
        let (tasks, _, _) = task_store();
        let artwork = ArtworkId(100);
        tasks.add_task(&artwork, "a".into(), "first", "d1").await.unwrap();
        tasks.add_task(&artwork, "b".into(), "second", "d2").await.unwrap();

        tasks.mark_completed(&TaskId::new("b")).await;

        let list = tasks.list_tasks_for_artwork(&artwork).await.unwrap().unwrap();
        assert!(!list[0].is_completed);
        assert!(list[1].is_completed);
    }

    #[tokio::test]
    async fn deleting_middle_task_preserves_order() {
        let (tasks, _, _) = task_store();
        let artwork = ArtworkId(7);
        for id in ["a", "b", "c"] {
            tasks.add_task(&artwork, id.into(), id, "d").await.unwrap();
        }

        let remaining = tasks
            .delete_task(&artwork, &TaskId::new("b"))
            .await
            .unwrap()
            .unwrap();
        let ids: Vec<_> = remaining.iter().map(|t| t.id().as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn deleting_last_task_removes_entry() {
        let (tasks, store, _) = task_store();
        let artwork = ArtworkId(7);
        tasks.add_task(&artwork, "a".into(), "only", "d").await.unwrap();

        let result = tasks.delete_task(&artwork, &TaskId::new("a")).await.unwrap();
        assert_eq!(result, None);
        assert_eq!(store.get("7").await.unwrap(), None);
        assert_eq!(tasks.list_tasks_for_artwork(&artwork).await.unwrap(), None);
    }

    #[tokio::test]
    async fn deleting_unknown_task_keeps_single_task() {
        let (tasks, _, _) = task_store();
        let artwork = ArtworkId(7);
        tasks.add_task(&artwork, "a".into(), "only", "d").await.unwrap();

        let result = tasks
            .delete_task(&artwork, &TaskId::new("missing"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id().as_str(), "a");
    }

    #[tokio::test]
    async fn delete_without_entry_is_noop() {
        let (tasks, store, _) = task_store();
        store.set(COMPLETED_KEY, "evt-1").await.unwrap();

        let result = tasks.delete_task(&ArtworkId(5), &TaskId::new("evt-1")).await.unwrap();
        assert_eq!(result, None);
        assert_eq!(store.get(COMPLETED_KEY).await.unwrap().as_deref(), Some("evt-1"));
    }

    #[tokio::test]
    async fn separator_in_task_id_is_rejected() {
        let (tasks, store, notifier) = task_store();

        let err = tasks
            .add_task(&ArtworkId(3), "a,b".into(), "split", "d")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(store.get("3").await.unwrap(), None);
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn corrupt_list_surfaces_decode_error() {
        let (tasks, store, _) = task_store();
        store.set("9", "{not json").await.unwrap();

        let err = tasks.list_tasks_for_artwork(&ArtworkId(9)).await.unwrap_err();
        assert!(matches!(err, Error::CorruptTaskList { ref key, .. } if key == "9"));
    }
}
