//! Application facade over the indexes, the reminder service and the notifier.
//!
//! The indexes do unguarded read-modify-write cycles on single keys. A
//! `Session` runs every mutating flow behind one async gate so two flows in
//! the same process never interleave on a key.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::completed::CompletedRegistry;
use crate::config::Config;
use crate::discovery::ArtworkDiscovery;
use crate::error::{Error, Result};
use crate::favorites::FavoritesIndex;
use crate::ids::{ArtworkId, TaskId};
use crate::notify::Notifier;
use crate::reminder::ReminderService;
use crate::store::SharedStore;
use crate::tasks::{Task, TaskStore};

/// An artwork together with its uncompleted tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgendaEntry {
    pub artwork_id: ArtworkId,
    pub tasks: Vec<Task>,
}

pub struct Session {
    favorites: FavoritesIndex,
    tasks: TaskStore,
    discovery: ArtworkDiscovery,
    reminders: Box<dyn ReminderService>,
    config: Config,
    gate: Mutex<()>,
}

impl Session {
    pub fn new(
        store: SharedStore,
        reminders: Box<dyn ReminderService>,
        notifier: Arc<dyn Notifier>,
        config: Config,
    ) -> Self {
        let registry = CompletedRegistry::new(store.clone());
        Self {
            favorites: FavoritesIndex::new(store.clone(), notifier.clone()),
            tasks: TaskStore::new(store.clone(), registry, notifier),
            discovery: ArtworkDiscovery::new(store),
            reminders,
            config,
            gate: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Favourites
    // =========================================================================

    pub async fn is_favorite(&self, artwork: &ArtworkId) -> bool {
        self.favorites.is_favorite(artwork).await
    }

    pub async fn toggle_favorite(&self, artwork: &ArtworkId) -> bool {
        let _guard = self.gate.lock().await;
        self.favorites.toggle_favorite(artwork).await
    }

    pub async fn favorites(&self) -> Vec<ArtworkId> {
        self.favorites.favorites().await
    }

    // =========================================================================
    // Tasks
    // =========================================================================

    pub async fn tasks(&self, artwork: &ArtworkId) -> Result<Option<Vec<Task>>> {
        self.tasks.list_tasks_for_artwork(artwork).await
    }

    pub async fn is_completed(&self, task: &TaskId) -> bool {
        self.tasks.registry().is_completed(task).await
    }

    pub async fn artwork_ids_with_tasks(&self) -> Option<Vec<ArtworkId>> {
        self.discovery.artwork_ids_with_tasks().await
    }

    /// Schedule a reminder for `due` and file a task under its event ID.
    ///
    /// Returns the new task's ID with the artwork's refreshed list. If the
    /// task does not make it into the stored list the reminder is cancelled.
    pub async fn plan_task(
        &self,
        artwork: &ArtworkId,
        text: &str,
        due: NaiveDateTime,
    ) -> Result<(TaskId, Vec<Task>)> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::InvalidArgument("task text cannot be empty".to_string()));
        }

        let _guard = self.gate.lock().await;
        let task_id = self.reminders.create_reminder(text, due).await?;
        let due_date = due.format(&self.config.tasks.due_format).to_string();
        info!(artwork = %artwork, task = %task_id, "adding task");

        let result = self
            .tasks
            .add_task(artwork, task_id.clone(), text, due_date)
            .await;
        match result {
            Ok(tasks) if tasks.iter().any(|task| task.id() == &task_id) => Ok((task_id, tasks)),
            Ok(_) => {
                self.cancel_reminder(&task_id).await;
                Err(Error::OperationFailed(format!(
                    "task for artwork {artwork} was not saved"
                )))
            }
            Err(err) => {
                self.cancel_reminder(&task_id).await;
                Err(err)
            }
        }
    }

    /// Mark a task completed and cancel its reminder.
    pub async fn complete_task(&self, artwork: &ArtworkId, task: &TaskId) -> Result<Vec<Task>> {
        let _guard = self.gate.lock().await;
        self.require_task(artwork, task).await?;

        self.tasks.mark_completed(task).await;
        self.cancel_reminder(task).await;
        Ok(self.tasks.list_tasks_for_artwork(artwork).await?.unwrap_or_default())
    }

    /// Delete a task and cancel its reminder.
    ///
    /// Returns the remaining tasks, or `None` if that was the artwork's last.
    pub async fn remove_task(
        &self,
        artwork: &ArtworkId,
        task: &TaskId,
    ) -> Result<Option<Vec<Task>>> {
        let _guard = self.gate.lock().await;
        self.require_task(artwork, task).await?;

        let remaining = self.tasks.delete_task(artwork, task).await?;
        self.cancel_reminder(task).await;
        Ok(remaining)
    }

    /// Artworks that still have uncompleted tasks, with only those tasks.
    pub async fn open_agenda(&self) -> Result<Vec<AgendaEntry>> {
        let Some(ids) = self.discovery.artwork_ids_with_tasks().await else {
            return Ok(Vec::new());
        };

        let mut agenda = Vec::new();
        for artwork_id in ids {
            let open: Vec<Task> = self
                .tasks
                .list_tasks_for_artwork(&artwork_id)
                .await?
                .unwrap_or_default()
                .into_iter()
                .filter(|task| !task.is_completed)
                .collect();
            if !open.is_empty() {
                agenda.push(AgendaEntry {
                    artwork_id,
                    tasks: open,
                });
            }
        }
        Ok(agenda)
    }

    async fn require_task(&self, artwork: &ArtworkId, task: &TaskId) -> Result<()> {
        let known = self
            .tasks
            .list_tasks_for_artwork(artwork)
            .await?
            .is_some_and(|tasks| tasks.iter().any(|t| t.id() == task));
        if known {
            Ok(())
        } else {
            Err(Error::TaskNotFound {
                artwork: artwork.to_string(),
                task: task.to_string(),
            })
        }
    }

    async fn cancel_reminder(&self, task: &TaskId) {
        if let Err(err) = self.reminders.delete_reminder(task).await {
            warn!(error = %err, task = %task, "failed to cancel reminder");
        }
    }
}
