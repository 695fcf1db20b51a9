use super::require_task_fields;
use crate::dispatcher::{HandlerRequest, HandlerResponse};
use crate::store::{SharedTaskStore, Task};

/// POST /tasks
///
/// Requires non-empty `title` and `description` in the body; answers 400
/// and stops on incomplete input. On success a fresh task (id assigned,
/// timestamps set, not completed) is inserted and the response is a
/// bodyless 201.
pub fn handle(store: &SharedTaskStore, req: HandlerRequest) {
    let (title, description) = match require_task_fields(req.body.as_ref()) {
        Ok(fields) => fields,
        Err(resp) => {
            let _ = req.reply_tx.send(resp);
            return;
        }
    };

    let task = Task::new(title, description);
    store.write().unwrap().insert(task);
    let _ = req.reply_tx.send(HandlerResponse::empty(201));
}
