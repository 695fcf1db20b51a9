use super::{parse_task_id, ID_NOT_FOUND};
use crate::dispatcher::{HandlerRequest, HandlerResponse};
use crate::store::SharedTaskStore;

/// PATCH /tasks/{id}/complete
///
/// Marks the task complete: `completed_at` is set to now (re-completion
/// refreshes it) and `updated_at` follows. An unknown id answers 400 with
/// a message; success is a bodyless 204.
pub fn handle(store: &SharedTaskStore, req: HandlerRequest) {
    let completed = parse_task_id(&req).and_then(|id| store.write().unwrap().complete(id));

    let response = match completed {
        Some(_) => HandlerResponse::empty(204),
        None => HandlerResponse::error(400, ID_NOT_FOUND),
    };
    let _ = req.reply_tx.send(response);
}
