//! Task repository: the canonical in-memory collection.
//!
//! # Responsibility
//! - Own the ordered task collection for the lifetime of a session.
//! - Enforce identity and text-field invariants on every mutation.
//! - Persist the whole collection after each successful mutation.
//!
//! # Invariants
//! - Failed operations leave the collection, the store and observers untouched.
//! - Delete of an unknown id is a silent no-op.
//! - An empty collection is never written to the store.

pub mod task_repo;

#[cfg(test)]
pub(crate) mod fixed_clock;
