use super::task::{Task, TaskFilter, TaskPatch};
use crate::ids::TaskId;
use chrono::Utc;
use tracing::{debug, info};

/// In-memory task table.
///
/// Rows are kept in insertion order; every operation completes
/// synchronously. The store trusts callers to supply unique ids on insert
/// (ids come from [`TaskId::new`], which generates them).
#[derive(Debug, Default)]
pub struct TaskStore {
    rows: Vec<Task>,
}

impl TaskStore {
    #[must_use]
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Return matching rows in insertion order.
    ///
    /// With no filter, every row is returned. With a filter, a row is
    /// included when any of the filter's fields matches (substring,
    /// case-sensitive). Never fails.
    #[must_use]
    pub fn select(&self, filter: Option<&TaskFilter>) -> Vec<Task> {
        match filter {
            None => self.rows.clone(),
            Some(filter) => self
                .rows
                .iter()
                .filter(|task| filter.matches(task))
                .cloned()
                .collect(),
        }
    }

    /// Append a fully-formed row to the table. Always succeeds.
    pub fn insert(&mut self, task: Task) {
        info!(task_id = %task.id, title = %task.title, "Task inserted");
        self.rows.push(task);
    }

    /// Overwrite the supplied fields of the row with matching id and
    /// refresh `updated_at`.
    ///
    /// Returns the row index on success, `None` if the id is not present.
    pub fn update(&mut self, id: TaskId, patch: TaskPatch) -> Option<usize> {
        let index = self.position(id)?;
        let task = &mut self.rows[index];
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        task.updated_at = Utc::now();
        info!(task_id = %id, "Task updated");
        Some(index)
    }

    /// Set `completed_at` to now (even if already set) and refresh
    /// `updated_at`.
    ///
    /// Returns the row index on success, `None` if the id is not present.
    pub fn complete(&mut self, id: TaskId) -> Option<usize> {
        let index = self.position(id)?;
        let task = &mut self.rows[index];
        let now = Utc::now();
        task.completed_at = Some(now);
        task.updated_at = now;
        info!(task_id = %id, "Task completed");
        Some(index)
    }

    /// Remove the row with matching id.
    ///
    /// Returns the removed row's index on success, `None` if the id is not
    /// present.
    pub fn delete(&mut self, id: TaskId) -> Option<usize> {
        let index = self.position(id)?;
        self.rows.remove(index);
        info!(task_id = %id, "Task deleted");
        Some(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    // Linear identity scan; no secondary index.
    fn position(&self, id: TaskId) -> Option<usize> {
        let index = self.rows.iter().position(|task| task.id == id);
        if index.is_none() {
            debug!(task_id = %id, "Task id not found");
        }
        index
    }
}
