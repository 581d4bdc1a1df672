//! Core use-case services.
//!
//! # Responsibility
//! - Derive display order from the canonical collection.
//! - Track the single task under edit and its staging draft.
//! - Expose the intent surface consumed by view layers (ffi, cli).

pub mod edit_session;
pub mod sort_policy;
pub mod task_board;
