//! The route table: method + path template pairs bound to handler names.
//!
//! Path templates use `{name}` segments for named parameters
//! (e.g. `/tasks/{id}`). The table is built once at startup and handed to
//! the [`Router`](crate::router::Router), which matches entries in
//! registration order.

use http::Method;

/// Metadata for a single registered route.
#[derive(Debug, Clone)]
pub struct RouteMeta {
    pub method: Method,
    pub path_pattern: String,
    pub handler_name: String,
}

impl RouteMeta {
    pub fn new(method: Method, path_pattern: &str, handler_name: &str) -> Self {
        Self {
            method,
            path_pattern: path_pattern.to_string(),
            handler_name: handler_name.to_string(),
        }
    }
}

/// The task service route table, in registration order.
///
/// First match wins on dispatch, so more specific templates
/// (`/tasks/{id}/complete`) are listed before the ones they would
/// otherwise shadow.
pub fn task_routes() -> Vec<RouteMeta> {
    vec![
        RouteMeta::new(Method::GET, "/tasks", "list_tasks"),
        RouteMeta::new(Method::POST, "/tasks", "create_task"),
        RouteMeta::new(Method::PUT, "/tasks/{id}", "update_task"),
        RouteMeta::new(Method::PATCH, "/tasks/{id}/complete", "complete_task"),
        RouteMeta::new(Method::DELETE, "/tasks/{id}", "delete_task"),
    ]
}
