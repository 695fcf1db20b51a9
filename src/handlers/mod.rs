//! Request handlers for the task routes.
//!
//! Each handler consumes a [`HandlerRequest`], calls into the shared store,
//! and replies exactly once through the request's reply channel. Validation
//! failures and unknown ids answer 400 with a plain string message and stop
//! there; nothing past a handler ever sees the request.

pub mod complete_task;
pub mod create_task;
pub mod delete_task;
pub mod list_tasks;
pub mod update_task;

use crate::dispatcher::{HandlerRequest, HandlerResponse};
use crate::ids::TaskId;
use serde_json::Value;

pub(crate) const INCOMPLETE_FIELDS: &str =
    "Incomplete information. Check the 'title' and 'description' fields";
pub(crate) const ID_NOT_FOUND: &str = "ID not found in database";

/// Extract required non-empty `title` and `description` from a JSON body.
///
/// Missing body, non-object body, missing fields, and empty strings all
/// fail the same way: a 400 carrying [`INCOMPLETE_FIELDS`].
pub(crate) fn require_task_fields(
    body: Option<&Value>,
) -> Result<(String, String), HandlerResponse> {
    let fields = body.and_then(Value::as_object);
    let title = fields
        .and_then(|m| m.get("title"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    let description = fields
        .and_then(|m| m.get("description"))
        .and_then(Value::as_str)
        .unwrap_or_default();

    if title.is_empty() || description.is_empty() {
        return Err(HandlerResponse::error(400, INCOMPLETE_FIELDS));
    }
    Ok((title.to_string(), description.to_string()))
}

/// Parse the `{id}` path parameter. An id that does not parse cannot exist
/// in the store, so callers treat `None` the same as a store miss.
pub(crate) fn parse_task_id(req: &HandlerRequest) -> Option<TaskId> {
    req.get_path_param("id").and_then(|s| s.parse().ok())
}
