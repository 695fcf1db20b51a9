//! Handler registry: wires each route's handler into the dispatcher with
//! the shared store injected per closure.

use crate::dispatcher::Dispatcher;
use crate::handlers;
use crate::store::SharedTaskStore;
use std::sync::Arc;

/// Register all task handlers with the dispatcher.
///
/// Handler names must match the names in the route table
/// ([`task_routes`](crate::routes::task_routes)).
///
/// # Safety
///
/// Calls [`Dispatcher::register_handler`], which spawns `may` coroutines;
/// the May runtime must be initialized before calling this.
pub unsafe fn register_all(dispatcher: &mut Dispatcher, store: &SharedTaskStore) {
    let s = Arc::clone(store);
    dispatcher.register_handler("list_tasks", move |req| {
        handlers::list_tasks::handle(&s, req)
    });

    let s = Arc::clone(store);
    dispatcher.register_handler("create_task", move |req| {
        handlers::create_task::handle(&s, req)
    });

    let s = Arc::clone(store);
    dispatcher.register_handler("update_task", move |req| {
        handlers::update_task::handle(&s, req)
    });

    let s = Arc::clone(store);
    dispatcher.register_handler("complete_task", move |req| {
        handlers::complete_task::handle(&s, req)
    });

    let s = Arc::clone(store);
    dispatcher.register_handler("delete_task", move |req| {
        handlers::delete_task::handle(&s, req)
    });
}
