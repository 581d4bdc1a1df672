//! Flutter-facing bindings for Taskdeck core.

pub mod api;
