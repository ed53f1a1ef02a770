//! Daily tasks: the habits a user checks off each day.
//!
//! [`TaskBoard`] owns the in-memory task list and persists it after every
//! mutation. Tasks can be added and toggled but never deleted — there is no
//! delete surface for tasks in this system.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::collection::{self, Collection};
use crate::record::{IdAllocator, Record, RecordId};
use crate::seeds;
use crate::store::{Storage, StorageKey};

/// A single daily task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier.
    pub id: RecordId,
    /// What the task is. Non-empty (enforced at creation).
    pub title: String,
    /// Whether the task is checked off for today.
    pub completed: bool,
    /// Consecutive days this task was completed.
    pub streak: u32,
}

impl Record for Task {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Derived statistics over the task list. Recomputed on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    /// Total number of tasks.
    pub total: usize,
    /// Number checked off.
    pub completed: usize,
    /// `round(completed / total × 100)`; 0 for an empty list.
    pub completion_rate: u32,
}

/// State controller for the daily task list.
pub struct TaskBoard {
    tasks: Collection<Task>,
    ids: IdAllocator,
    storage: Arc<Storage>,
}

impl TaskBoard {
    /// Load the task list from storage, falling back to seed data when the
    /// key was never written (or its payload failed to read).
    pub fn load(storage: Arc<Storage>) -> Self {
        let tasks = match storage.get::<Vec<Task>>(StorageKey::Tasks) {
            Some(tasks) => Collection::from_records(tasks),
            None => Collection::from_records(seeds::default_tasks()),
        };
        let ids = IdAllocator::starting_from(tasks.max_id() + 1);
        Self {
            tasks,
            ids,
            storage,
        }
    }

    /// All tasks, in insertion order.
    pub fn tasks(&self) -> &[Task] {
        self.tasks.records()
    }

    /// Look up a task by ID.
    pub fn get(&self, id: RecordId) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Flip a task's completed flag.
    ///
    /// Returns whether a task was toggled; an absent ID is a silent no-op.
    pub fn toggle(&mut self, id: RecordId) -> bool {
        let changed = self.tasks.modify(id, |t| t.completed = !t.completed);
        if changed {
            self.persist();
        }
        changed
    }

    /// Append a new task with a fresh ID, unchecked, streak 0.
    ///
    /// A title that is empty after trimming is rejected: no state change,
    /// `None` returned. The title is stored as given.
    pub fn add(&mut self, title: &str) -> Option<RecordId> {
        if title.trim().is_empty() {
            tracing::debug!("task rejected: empty title");
            return None;
        }
        let id = match self.ids.next_id() {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("task rejected: {e}");
                return None;
            }
        };
        self.tasks.push(Task {
            id,
            title: title.to_string(),
            completed: false,
            streak: 0,
        });
        self.persist();
        Some(id)
    }

    /// Compute derived statistics by a full scan.
    pub fn stats(&self) -> TaskStats {
        let total = self.tasks.len();
        let completed = self.tasks.records().iter().filter(|t| t.completed).count();
        TaskStats {
            total,
            completed,
            completion_rate: collection::percent(completed, total),
        }
    }

    fn persist(&self) {
        self.storage.set(StorageKey::Tasks, &self.tasks.records());
    }
}

impl std::fmt::Debug for TaskBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskBoard")
            .field("count", &self.tasks.len())
            .finish()
    }
}
