//! Task domain record.
//!
//! # Responsibility
//! - Define the canonical record persisted in the task snapshot.
//! - Own the text-field validation rule shared by create and update.
//!
//! # Invariants
//! - `id` is assigned once at creation and never rewritten.
//! - `completed` starts as `false`.
//! - Only `title`, `description` and `priority` are editable.

use crate::model::priority::Priority;
use serde::{Deserialize, Serialize};

/// Stable identifier of a task.
///
/// Assigned from epoch milliseconds at creation; kept as an alias so the
/// persisted integer shape stays obvious in signatures.
pub type TaskId = i64;

/// Validation failures for task text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TaskValidationError {
    #[error("task title must not be empty")]
    EmptyTitle,
    #[error("task description must not be empty")]
    EmptyDescription,
}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
}

impl Task {
    /// Builds a validated, not-yet-completed task.
    ///
    /// # Errors
    /// - `EmptyTitle` / `EmptyDescription` when a text field is blank.
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Result<Self, TaskValidationError> {
        let title = title.into();
        let description = description.into();
        validate_text_fields(&title, &description)?;
        Ok(Self {
            id,
            title,
            description,
            completed: false,
            priority,
        })
    }

    /// Returns the editable fields as a draft.
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
        }
    }
}

/// Editable field set of a task, mirrored by form input.
///
/// `Default` is the blank new-task draft with `Low` priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

impl TaskDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority,
        }
    }

    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_text_fields(&self.title, &self.description)
    }
}

/// Rejects blank (empty or whitespace-only) title and description.
///
/// Title is checked first so a fully blank form reports the title.
pub fn validate_text_fields(title: &str, description: &str) -> Result<(), TaskValidationError> {
    if title.trim().is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    if description.trim().is_empty() {
        return Err(TaskValidationError::EmptyDescription);
    }
    Ok(())
}
