//! # Store Module
//!
//! The in-memory record store owning every [`Task`]. Rows live in a plain
//! `Vec` in insertion order; identity lookups are a linear scan, which is
//! the store's contract at this scale and keeps list responses stable
//! without a secondary index.
//!
//! Mutation operations (`update`, `complete`, `delete`) signal "id not
//! found" by returning `None`. That is the only failure mode the store has:
//! nothing here panics or returns an error type.
//!
//! The process shares a single store behind [`SharedTaskStore`]; handlers
//! receive it by reference at registration time rather than through global
//! state, so tests can spin up isolated stores per case.

mod core;
mod task;

use std::sync::{Arc, RwLock};

pub use self::core::TaskStore;
pub use self::task::{Task, TaskFilter, TaskPatch};

/// The process-wide store handle injected into handler closures.
pub type SharedTaskStore = Arc<RwLock<TaskStore>>;

/// Create a fresh shared store.
pub fn shared_store() -> SharedTaskStore {
    Arc::new(RwLock::new(TaskStore::new()))
}
