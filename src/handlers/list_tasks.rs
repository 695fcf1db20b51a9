use crate::dispatcher::{HandlerRequest, HandlerResponse};
use crate::store::{SharedTaskStore, TaskFilter};
use serde_json::Value;

/// GET /tasks
///
/// Lists tasks in insertion order. An optional `search` query parameter
/// filters by substring match on title OR description.
pub fn handle(store: &SharedTaskStore, req: HandlerRequest) {
    let filter = req.get_query_param("search").map(TaskFilter::any_field);
    let tasks = store.read().unwrap().select(filter.as_ref());
    let body = serde_json::to_value(tasks).unwrap_or_else(|_| Value::Array(Vec::new()));
    let _ = req.reply_tx.send(HandlerResponse::json(200, body));
}
