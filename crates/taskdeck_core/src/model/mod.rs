//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its editable field set.
//! - Define the priority tier used by display ordering.
//!
//! # Invariants
//! - Every task is identified by a stable integer `TaskId`.
//! - Title and description are non-empty after trimming on every write path.

pub mod priority;
pub mod task;
