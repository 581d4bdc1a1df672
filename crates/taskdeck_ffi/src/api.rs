//! FFI use-case API for the Flutter task view.
//!
//! # Responsibility
//! - Expose the board intents (add/save, edit, toggle, delete) to Dart via FRB.
//! - Own the process-wide board between `board_open` and `board_close`.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every board call runs to completion under one lock.
//! - Failures are returned as envelopes, never thrown.

use log::info;
use std::sync::{Mutex, OnceLock};
use taskdeck_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_board,
    ping as ping_inner, CoreConfig, EditState, Priority, SqliteKvStore, Task, TaskBoard, TaskDraft,
};

type Board = TaskBoard<SqliteKvStore>;

static BOARD: OnceLock<Mutex<Option<Board>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
/// Safe to call repeatedly with the same `level + log_dir`.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One task row as rendered by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    /// `Low|Medium|High`.
    pub priority: String,
}

/// Full view state: display-ordered tasks plus form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub ok: bool,
    pub message: String,
    pub tasks: Vec<TaskItem>,
    /// `Add` while idle, `Save` while editing.
    pub submit_label: String,
    pub editing_id: Option<i64>,
    pub draft_title: String,
    pub draft_description: String,
    pub draft_priority: String,
}

/// Result envelope for board intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardActionResponse {
    pub ok: bool,
    pub task: Option<TaskItem>,
    pub message: String,
    /// Set when the change was applied in memory but not saved.
    pub warning: Option<String>,
}

impl BoardActionResponse {
    fn success(
        message: impl Into<String>,
        task: Option<TaskItem>,
        warning: Option<String>,
    ) -> Self {
        Self {
            ok: true,
            task,
            message: message.into(),
            warning,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task: None,
            message: message.into(),
            warning: None,
        }
    }
}

/// Opens the board over `db_path`, replacing any open board.
#[flutter_rust_bridge::frb(sync)]
pub fn board_open(db_path: String) -> BoardActionResponse {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return BoardActionResponse::failure("board_open failed: db_path cannot be empty");
    }
    let config = CoreConfig {
        db_path: trimmed.into(),
        ..CoreConfig::default()
    };
    let board = match open_board(&config) {
        Ok(board) => board,
        Err(err) => return BoardActionResponse::failure(format!("board_open failed: {err}")),
    };
    let count = board.repository().len();

    match board_slot().lock() {
        Ok(mut slot) => {
            *slot = Some(board);
            info!("event=board_open module=ffi status=ok count={count}");
            BoardActionResponse::success(format!("Loaded {count} task(s)."), None, None)
        }
        Err(_) => BoardActionResponse::failure("board_open failed: board lock poisoned"),
    }
}

/// Drops the open board. Returns an empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn board_close() -> String {
    match board_slot().lock() {
        Ok(mut slot) => {
            if slot.take().is_some() {
                info!("event=board_close module=ffi status=ok");
            }
            String::new()
        }
        Err(_) => "board_close failed: board lock poisoned".to_string(),
    }
}

/// Display-ordered tasks; empty when no board is open.
#[flutter_rust_bridge::frb(sync)]
pub fn board_list() -> Vec<TaskItem> {
    with_board(|board| board.visible_tasks().iter().map(to_task_item).collect())
        .unwrap_or_default()
}

/// Full view state for re-rendering after any intent.
#[flutter_rust_bridge::frb(sync)]
pub fn board_state() -> BoardView {
    match with_board(|board| to_board_view(board)) {
        Ok(view) => view,
        Err(message) => BoardView {
            ok: false,
            message,
            tasks: Vec::new(),
            submit_label: String::new(),
            editing_id: None,
            draft_title: String::new(),
            draft_description: String::new(),
            draft_priority: Priority::default().to_string(),
        },
    }
}

/// Forwards the form fields into the edit draft.
///
/// Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn board_set_draft(title: String, description: String, priority: String) -> String {
    let priority = match priority.parse::<Priority>() {
        Ok(priority) => priority,
        Err(err) => return err.to_string(),
    };
    match with_board(|board| board.set_draft(TaskDraft::new(title, description, priority))) {
        Ok(()) => String::new(),
        Err(message) => message,
    }
}

/// Adds the draft as a new task, or saves it into the task under edit.
#[flutter_rust_bridge::frb(sync)]
pub fn board_add_or_save() -> BoardActionResponse {
    flatten(with_board(|board| {
        let was_editing = matches!(board.edit_state(), EditState::Editing(_));
        match board.add_or_save() {
            Ok(outcome) => BoardActionResponse::success(
                if was_editing { "Task saved." } else { "Task added." },
                outcome.task.as_ref().map(to_task_item),
                outcome.persistence_warning,
            ),
            Err(err) => BoardActionResponse::failure(err.to_string()),
        }
    }))
}

/// Loads task `id` into the draft and switches the form to save mode.
#[flutter_rust_bridge::frb(sync)]
pub fn board_begin_edit(id: i64) -> BoardActionResponse {
    flatten(with_board(|board| match board.begin_edit(id) {
        Ok(()) => BoardActionResponse::success(
            "Editing task.",
            board.repository().get(id).map(to_task_item),
            None,
        ),
        Err(err) => BoardActionResponse::failure(err.to_string()),
    }))
}

#[flutter_rust_bridge::frb(sync)]
pub fn board_toggle_complete(id: i64) -> BoardActionResponse {
    flatten(with_board(|board| match board.toggle_complete(id) {
        Ok(outcome) => BoardActionResponse::success(
            "Task updated.",
            outcome.task.as_ref().map(to_task_item),
            outcome.persistence_warning,
        ),
        Err(err) => BoardActionResponse::failure(err.to_string()),
    }))
}

/// Deletes task `id`; unknown ids succeed without a task.
#[flutter_rust_bridge::frb(sync)]
pub fn board_delete(id: i64) -> BoardActionResponse {
    flatten(with_board(|board| {
        let outcome = board.delete_task(id);
        let message = if outcome.task.is_some() {
            "Task deleted."
        } else {
            "Nothing to delete."
        };
        BoardActionResponse::success(
            message,
            outcome.task.as_ref().map(to_task_item),
            outcome.persistence_warning,
        )
    }))
}

fn board_slot() -> &'static Mutex<Option<Board>> {
    BOARD.get_or_init(|| Mutex::new(None))
}

fn with_board<T>(f: impl FnOnce(&mut Board) -> T) -> Result<T, String> {
    let mut slot = board_slot()
        .lock()
        .map_err(|_| "board lock poisoned".to_string())?;
    let board = slot
        .as_mut()
        .ok_or_else(|| "board is not open; call board_open first".to_string())?;
    Ok(f(board))
}

fn flatten(result: Result<BoardActionResponse, String>) -> BoardActionResponse {
    result.unwrap_or_else(BoardActionResponse::failure)
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        id: task.id,
        title: task.title.clone(),
        description: task.description.clone(),
        completed: task.completed,
        priority: task.priority.to_string(),
    }
}

fn to_board_view(board: &Board) -> BoardView {
    let draft = board.draft();
    BoardView {
        ok: true,
        message: String::new(),
        tasks: board.visible_tasks().iter().map(to_task_item).collect(),
        submit_label: board.submit_action().label().to_string(),
        editing_id: board.session().editing_id(),
        draft_title: draft.title.clone(),
        draft_description: draft.description.clone(),
        draft_priority: draft.priority.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        board_add_or_save, board_begin_edit, board_close, board_delete, board_list, board_open,
        board_set_draft, board_state, board_toggle_complete, core_version, init_logging, ping,
    };

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/logs".to_string());
        assert!(error.contains("verbose"));
    }

    // The board is process-wide, so its whole lifecycle lives in one test.
    #[test]
    fn board_lifecycle_drives_intents_through_core() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("board.sqlite3");
        let db_path = db_path.to_str().unwrap().to_string();

        board_close();
        assert!(!board_add_or_save().ok);
        assert!(!board_state().ok);

        assert!(!board_open("  ".to_string()).ok);
        let opened = board_open(db_path.clone());
        assert!(opened.ok, "{}", opened.message);

        assert_eq!(
            board_set_draft("Buy milk".into(), "2%".into(), "medium".into()),
            ""
        );
        let milk = board_add_or_save();
        assert!(milk.ok, "{}", milk.message);
        let milk_id = milk.task.unwrap().id;

        board_set_draft("Pay rent".into(), "rent".into(), "High".into());
        let rent_id = board_add_or_save().task.unwrap().id;

        let titles: Vec<String> = board_list().into_iter().map(|item| item.title).collect();
        assert_eq!(titles, vec!["Pay rent", "Buy milk"]);

        let invalid = board_set_draft("x".into(), "y".into(), "urgent".into());
        assert!(invalid.contains("urgent"));

        board_set_draft(String::new(), "x".into(), "Low".into());
        let rejected = board_add_or_save();
        assert!(!rejected.ok);
        assert!(rejected.message.contains("title"));

        let editing = board_begin_edit(milk_id);
        assert!(editing.ok);
        let state = board_state();
        assert_eq!(state.submit_label, "Save");
        assert_eq!(state.editing_id, Some(milk_id));
        assert_eq!(state.draft_title, "Buy milk");

        board_set_draft("Buy milk".into(), "2%".into(), "Low".into());
        let saved = board_add_or_save();
        assert_eq!(saved.message, "Task saved.");
        assert_eq!(saved.task.unwrap().priority, "Low");
        assert_eq!(board_state().submit_label, "Add");

        assert!(board_toggle_complete(rent_id).task.unwrap().completed);
        assert!(!board_toggle_complete(404).ok);

        assert_eq!(board_delete(rent_id).message, "Task deleted.");
        assert_eq!(board_delete(rent_id).message, "Nothing to delete.");

        assert_eq!(board_close(), "");
        assert!(board_open(db_path).ok);
        let reloaded = board_list();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].id, milk_id);
        board_close();
    }
}
