use super::{parse_task_id, require_task_fields, ID_NOT_FOUND};
use crate::dispatcher::{HandlerRequest, HandlerResponse};
use crate::store::{SharedTaskStore, TaskPatch};

/// PUT /tasks/{id}
///
/// Requires non-empty `title` and `description`; answers 400 and stops on
/// incomplete input. An unknown id answers 400 with a message; success is
/// a bodyless 204.
pub fn handle(store: &SharedTaskStore, req: HandlerRequest) {
    let (title, description) = match require_task_fields(req.body.as_ref()) {
        Ok(fields) => fields,
        Err(resp) => {
            let _ = req.reply_tx.send(resp);
            return;
        }
    };

    let patch = TaskPatch::new(Some(title), Some(description));
    let updated = parse_task_id(&req).and_then(|id| store.write().unwrap().update(id, patch));

    let response = match updated {
        Some(_) => HandlerResponse::empty(204),
        None => HandlerResponse::error(400, ID_NOT_FOUND),
    };
    let _ = req.reply_tx.send(response);
}
