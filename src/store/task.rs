use crate::ids::TaskId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single domain entity tracked by this service.
///
/// `title` and `description` are never empty for a stored task; the
/// handlers enforce presence before anything reaches the store.
/// `completed_at` stays `None` until the task is explicitly marked
/// complete and never transitions back. Timestamps serialize as RFC 3339.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Construct a fresh task: id assigned, both timestamps set to now,
    /// not completed.
    pub fn new(title: String, description: String) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::new(),
            title,
            description,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Substring filter for [`select`](super::TaskStore::select).
///
/// A row matches if ANY present field's value contains the given substring
/// (case-sensitive containment). The list handler fills both fields from
/// the single `search` query parameter, so a hit on either title or
/// description selects the row.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl TaskFilter {
    /// Filter matching `needle` against title OR description.
    pub fn any_field(needle: &str) -> Self {
        Self {
            title: Some(needle.to_string()),
            description: Some(needle.to_string()),
        }
    }

    pub(crate) fn matches(&self, task: &Task) -> bool {
        if let Some(needle) = &self.title {
            if task.title.contains(needle.as_str()) {
                return true;
            }
        }
        if let Some(needle) = &self.description {
            if task.description.contains(needle.as_str()) {
                return true;
            }
        }
        false
    }
}

/// Partial field update for [`update`](super::TaskStore::update).
///
/// Only supplied fields are overwritten; absent fields keep their stored
/// value.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl TaskPatch {
    pub fn new(title: Option<String>, description: Option<String>) -> Self {
        Self { title, description }
    }
}
