//! View-facing task board.
//!
//! # Responsibility
//! - Own one repository and one edit session for a view's lifetime.
//! - Translate view intents (add/save, edit, toggle, delete) into core calls.
//! - Expose the display-ordered task list.
//!
//! # Invariants
//! - The view holds no task state; draft keystrokes are forwarded here.
//! - `add_or_save` dispatches on edit state, never on draft contents.

use crate::model::priority::Priority;
use crate::model::task::{Task, TaskDraft, TaskId};
use crate::repo::task_repo::{TaskEvent, TaskRepository, TaskResult};
use crate::service::edit_session::{EditSession, EditState};
use crate::service::sort_policy::sorted_view;
use crate::store::snapshot::TaskSnapshotStore;
use crate::store::KeyValueStore;

/// What the view's submit control does right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    Add,
    Save,
}

impl SubmitAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Save => "Save",
        }
    }
}

/// Result of a mutating intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentOutcome {
    /// Task created, updated, toggled or removed. `None` for a no-op delete.
    pub task: Option<Task>,
    /// Set when the change is in memory but could not be written.
    pub persistence_warning: Option<String>,
}

pub struct TaskBoard<S: KeyValueStore> {
    repo: TaskRepository<S>,
    session: EditSession,
}

impl<S: KeyValueStore> TaskBoard<S> {
    pub fn new(repo: TaskRepository<S>) -> Self {
        Self {
            repo,
            session: EditSession::new(),
        }
    }

    /// Opens a board over the last saved snapshot.
    pub fn open(snapshots: TaskSnapshotStore<S>) -> Self {
        Self::new(TaskRepository::open(snapshots))
    }

    pub fn repository(&self) -> &TaskRepository<S> {
        &self.repo
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn edit_state(&self) -> EditState {
        self.session.state()
    }

    pub fn draft(&self) -> &TaskDraft {
        self.session.draft()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&TaskEvent) + Send + 'static) {
        self.repo.subscribe(observer);
    }

    /// Tasks in display order.
    pub fn visible_tasks(&self) -> Vec<Task> {
        sorted_view(self.repo.list())
    }

    pub fn submit_action(&self) -> SubmitAction {
        match self.session.state() {
            EditState::Idle => SubmitAction::Add,
            EditState::Editing(_) => SubmitAction::Save,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.session.set_title(title);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.session.set_description(description);
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.session.set_priority(priority);
    }

    pub fn set_draft(&mut self, draft: TaskDraft) {
        self.session.set_draft(draft);
    }

    /// Submits the draft: creates when idle, saves the edit otherwise.
    pub fn add_or_save(&mut self) -> TaskResult<IntentOutcome> {
        let task = match self.session.state() {
            EditState::Idle => self.session.submit_new(&mut self.repo)?,
            EditState::Editing(_) => self.session.commit_edit(&mut self.repo)?,
        };
        Ok(self.outcome(Some(task)))
    }

    pub fn begin_edit(&mut self, id: TaskId) -> TaskResult<()> {
        self.session.begin_edit(&self.repo, id)
    }

    pub fn toggle_complete(&mut self, id: TaskId) -> TaskResult<IntentOutcome> {
        let task = self.repo.toggle_complete(id)?;
        Ok(self.outcome(Some(task)))
    }

    /// Deletes a task; unknown ids yield an outcome without a task.
    ///
    /// Deleting the task under edit leaves the session untouched; the next
    /// save reports `NotFound` and returns the session to idle.
    pub fn delete_task(&mut self, id: TaskId) -> IntentOutcome {
        let removed = self.repo.delete(id);
        self.outcome(removed)
    }

    fn outcome(&mut self, task: Option<Task>) -> IntentOutcome {
        IntentOutcome {
            task,
            persistence_warning: self.repo.take_persistence_warning(),
        }
    }
}
