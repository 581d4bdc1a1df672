//! Task repository implementation.
//!
//! # Responsibility
//! - Provide create/update/toggle/delete over the canonical collection.
//! - Assign unique, monotonic task ids.
//! - Notify subscribers after each successful mutation.
//!
//! # Invariants
//! - `list()` returns insertion order; display ordering is derived elsewhere.
//! - `update` never changes `id` or `completed`.
//! - `toggle_complete` never changes title, description or priority.
//! - Store write failures are downgraded to a warning; memory stays
//!   authoritative.

use crate::model::priority::Priority;
use crate::model::task::{validate_text_fields, Task, TaskId, TaskValidationError};
use crate::store::snapshot::TaskSnapshotStore;
use crate::store::KeyValueStore;
use log::{debug, info, warn};
use mockable::{Clock, DefaultClock};

pub type TaskResult<T> = Result<T, TaskError>;

/// Recoverable, user-facing task operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("invalid edit state: {0}")]
    InvalidState(&'static str),
    #[error("task id space exhausted")]
    IdSpaceExhausted,
}

/// Mutation notification delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskEvent {
    Created(TaskId),
    Updated(TaskId),
    Toggled { id: TaskId, completed: bool },
    Deleted(TaskId),
}

type Observer = Box<dyn FnMut(&TaskEvent) + Send>;

/// Owner of the canonical task collection.
pub struct TaskRepository<S: KeyValueStore> {
    tasks: Vec<Task>,
    snapshots: TaskSnapshotStore<S>,
    clock: Box<dyn Clock + Send>,
    last_id: TaskId,
    observers: Vec<Observer>,
    persistence_warning: Option<String>,
}

impl<S: KeyValueStore> TaskRepository<S> {
    /// Loads the last saved collection using the system clock for new ids.
    pub fn open(snapshots: TaskSnapshotStore<S>) -> Self {
        Self::open_with_clock(snapshots, DefaultClock)
    }

    /// Loads the last saved collection with a caller-provided clock.
    ///
    /// This is the only store read for the repository lifetime.
    pub fn open_with_clock(
        snapshots: TaskSnapshotStore<S>,
        clock: impl Clock + Send + 'static,
    ) -> Self {
        let tasks = snapshots.load();
        let last_id = tasks.iter().map(|task| task.id).max().unwrap_or(0);
        info!(
            "event=repo_open module=repo status=ok key={} count={}",
            snapshots.key(),
            tasks.len()
        );
        Self {
            tasks,
            snapshots,
            clock: Box::new(clock),
            last_id,
            observers: Vec::new(),
            persistence_warning: None,
        }
    }

    /// Registers a callback invoked after every successful mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(&TaskEvent) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Canonical collection in insertion order.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns and clears the last persistence failure message.
    pub fn take_persistence_warning(&mut self) -> Option<String> {
        self.persistence_warning.take()
    }

    /// Appends a new incomplete task.
    ///
    /// # Errors
    /// - `Validation` when title or description is blank.
    /// - `IdSpaceExhausted` when the largest id is already `i64::MAX`.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> TaskResult<Task> {
        let title = title.into();
        let description = description.into();
        if let Err(err) = validate_text_fields(&title, &description) {
            debug!("event=task_create module=repo status=rejected reason={err}");
            return Err(err.into());
        }
        let id = self.next_id().ok_or_else(|| {
            warn!(
                "event=task_create module=repo status=error error_code=id_space_exhausted last_id={}",
                self.last_id
            );
            TaskError::IdSpaceExhausted
        })?;

        let task = Task {
            id,
            title,
            description,
            completed: false,
            priority,
        };
        self.tasks.push(task.clone());
        info!(
            "event=task_create module=repo status=ok task_id={} priority={}",
            task.id, task.priority
        );

        self.persist();
        self.notify(TaskEvent::Created(task.id));
        Ok(task)
    }

    /// Replaces the editable fields of an existing task.
    ///
    /// # Errors
    /// - `NotFound` when no task has `id`.
    /// - `Validation` when title or description is blank.
    pub fn update(
        &mut self,
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> TaskResult<Task> {
        let index = self.index_of(id).ok_or(TaskError::NotFound(id))?;
        let title = title.into();
        let description = description.into();
        if let Err(err) = validate_text_fields(&title, &description) {
            debug!("event=task_update module=repo status=rejected task_id={id} reason={err}");
            return Err(err.into());
        }

        let task = &mut self.tasks[index];
        task.title = title;
        task.description = description;
        task.priority = priority;
        let updated = task.clone();
        info!(
            "event=task_update module=repo status=ok task_id={} priority={}",
            id, updated.priority
        );

        self.persist();
        self.notify(TaskEvent::Updated(id));
        Ok(updated)
    }

    /// Flips the completion flag.
    ///
    /// # Errors
    /// - `NotFound` when no task has `id`.
    pub fn toggle_complete(&mut self, id: TaskId) -> TaskResult<Task> {
        let index = self.index_of(id).ok_or(TaskError::NotFound(id))?;
        let task = &mut self.tasks[index];
        task.completed = !task.completed;
        let toggled = task.clone();
        info!(
            "event=task_toggle module=repo status=ok task_id={} completed={}",
            id, toggled.completed
        );

        self.persist();
        self.notify(TaskEvent::Toggled {
            id,
            completed: toggled.completed,
        });
        Ok(toggled)
    }

    /// Removes a task, returning it when present.
    ///
    /// Unknown ids are a no-op: nothing is written and nobody is notified.
    pub fn delete(&mut self, id: TaskId) -> Option<Task> {
        let Some(index) = self.index_of(id) else {
            debug!("event=task_delete module=repo status=noop task_id={id}");
            return None;
        };

        let removed = self.tasks.remove(index);
        info!(
            "event=task_delete module=repo status=ok task_id={} remaining={}",
            id,
            self.tasks.len()
        );

        self.persist();
        self.notify(TaskEvent::Deleted(id));
        Some(removed)
    }

    fn index_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    fn next_id(&mut self) -> Option<TaskId> {
        let floor = self.last_id.checked_add(1)?;
        let id = self.clock.utc().timestamp_millis().max(floor);
        self.last_id = id;
        Some(id)
    }

    fn persist(&mut self) {
        // Empty collections are never written, so deleting every task keeps
        // the previous snapshot in the store.
        if self.tasks.is_empty() {
            info!(
                "event=snapshot_save module=repo status=skip reason=empty_collection key={}",
                self.snapshots.key()
            );
            return;
        }

        match self.snapshots.save(&self.tasks) {
            Ok(()) => debug!(
                "event=snapshot_save module=repo status=ok key={} count={}",
                self.snapshots.key(),
                self.tasks.len()
            ),
            Err(err) => {
                warn!(
                    "event=snapshot_save module=repo status=error error_code=store_write_failed key={} error={}",
                    self.snapshots.key(),
                    err
                );
                self.persistence_warning = Some(format!("tasks were not saved: {err}"));
            }
        }
    }

    fn notify(&mut self, event: TaskEvent) {
        for observer in &mut self.observers {
            observer(&event);
        }
    }
}
