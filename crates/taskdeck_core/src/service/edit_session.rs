//! Edit session state machine.
//!
//! # Responsibility
//! - Hold the staging draft mirrored by form input.
//! - Track which task, if any, the draft belongs to.
//! - Turn a draft into a repository create or update.
//!
//! # Invariants
//! - `Idle` drafts describe a new task; `Editing(id)` drafts hold pending
//!   edits of task `id`, copied from the repository at `begin_edit`.
//! - `begin_edit` while editing drops the unsaved draft and retargets.
//! - A rejected commit or submit keeps both state and draft.

use crate::model::priority::Priority;
use crate::model::task::{Task, TaskDraft, TaskId};
use crate::repo::task_repo::{TaskError, TaskRepository, TaskResult};
use crate::store::KeyValueStore;
use log::{debug, info};

/// Whether the draft targets a new task or an existing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing(TaskId),
}

#[derive(Debug, Clone, Default)]
pub struct EditSession {
    state: EditState,
    draft: TaskDraft,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn editing_id(&self) -> Option<TaskId> {
        match self.state {
            EditState::Editing(id) => Some(id),
            EditState::Idle => None,
        }
    }

    pub fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.draft.priority = priority;
    }

    /// Replaces the whole draft, e.g. from one form snapshot.
    pub fn set_draft(&mut self, draft: TaskDraft) {
        self.draft = draft;
    }

    /// Starts editing `id`, loading its editable fields into the draft.
    ///
    /// # Errors
    /// - `NotFound` when the repository has no such task; state is unchanged.
    pub fn begin_edit<S: KeyValueStore>(
        &mut self,
        repo: &TaskRepository<S>,
        id: TaskId,
    ) -> TaskResult<()> {
        let task = repo.get(id).ok_or(TaskError::NotFound(id))?;
        if let EditState::Editing(previous) = self.state {
            if previous != id {
                debug!(
                    "event=edit_retarget module=edit status=ok from_task_id={previous} to_task_id={id}"
                );
            }
        }
        self.draft = task.to_draft();
        self.state = EditState::Editing(id);
        debug!("event=edit_begin module=edit status=ok task_id={id}");
        Ok(())
    }

    /// Applies the draft to the task under edit and returns to `Idle`.
    ///
    /// # Errors
    /// - `InvalidState` while `Idle`.
    /// - `Validation` when the draft has a blank field; session unchanged.
    /// - `NotFound` when the task vanished meanwhile; session resets to `Idle`.
    pub fn commit_edit<S: KeyValueStore>(
        &mut self,
        repo: &mut TaskRepository<S>,
    ) -> TaskResult<Task> {
        let EditState::Editing(id) = self.state else {
            return Err(TaskError::InvalidState("commit requires an active edit"));
        };

        match repo.update(
            id,
            self.draft.title.as_str(),
            self.draft.description.as_str(),
            self.draft.priority,
        ) {
            Ok(task) => {
                self.reset();
                info!("event=edit_commit module=edit status=ok task_id={id}");
                Ok(task)
            }
            Err(TaskError::NotFound(missing)) => {
                self.reset();
                info!(
                    "event=edit_commit module=edit status=error error_code=target_missing task_id={missing}"
                );
                Err(TaskError::NotFound(missing))
            }
            Err(err) => Err(err),
        }
    }

    /// Creates a task from the draft and clears it.
    ///
    /// # Errors
    /// - `InvalidState` while editing an existing task.
    /// - `Validation` when the draft has a blank field; draft is kept.
    pub fn submit_new<S: KeyValueStore>(
        &mut self,
        repo: &mut TaskRepository<S>,
    ) -> TaskResult<Task> {
        if let EditState::Editing(_) = self.state {
            return Err(TaskError::InvalidState(
                "cannot submit a new task while editing",
            ));
        }

        let task = repo.create(
            self.draft.title.as_str(),
            self.draft.description.as_str(),
            self.draft.priority,
        )?;
        self.reset();
        Ok(task)
    }

    fn reset(&mut self) {
        self.state = EditState::Idle;
        self.draft = TaskDraft::default();
    }
}
