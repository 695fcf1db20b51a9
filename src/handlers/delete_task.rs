use super::{parse_task_id, ID_NOT_FOUND};
use crate::dispatcher::{HandlerRequest, HandlerResponse};
use crate::store::SharedTaskStore;

/// DELETE /tasks/{id}
///
/// Removes the task. An unknown id answers 400 with a message; success is
/// a bodyless 204.
pub fn handle(store: &SharedTaskStore, req: HandlerRequest) {
    let deleted = parse_task_id(&req).and_then(|id| store.write().unwrap().delete(id));

    let response = match deleted {
        Some(_) => HandlerResponse::empty(204),
        None => HandlerResponse::error(400, ID_NOT_FOUND),
    };
    let _ = req.reply_tx.send(response);
}
