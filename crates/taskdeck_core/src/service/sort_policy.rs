//! Display ordering for tasks.
//!
//! # Invariants
//! - Ordering depends on priority rank only (High, Medium, Low).
//! - Equal-priority tasks keep their canonical relative order.
//! - The canonical collection is never reordered; callers get a copy.

use crate::model::task::Task;
use std::cmp::Ordering;

/// Compares two tasks by priority rank, highest tier first.
pub fn compare(a: &Task, b: &Task) -> Ordering {
    a.priority.rank().cmp(&b.priority.rank())
}

/// Returns a display-ordered copy of `tasks`.
pub fn sorted_view(tasks: &[Task]) -> Vec<Task> {
    let mut view = tasks.to_vec();
    // `sort_by` is stable, which the equal-priority rule depends on.
    view.sort_by(compare);
    view
}
