//! Integration tests for the HTTP server and the full request pipeline:
//! server startup and lifecycle, routing, dispatch, handler behavior, and
//! response serialization, all over real TCP connections.

use serde_json::json;
use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, RwLock};
use tasktrack::dispatcher::Dispatcher;
use tasktrack::middleware::{MetricsMiddleware, Middleware, TracingMiddleware};
use tasktrack::registry::register_all;
use tasktrack::router::Router;
use tasktrack::routes::task_routes;
use tasktrack::server::{AppService, HttpServer, ServerHandle};
use tasktrack::store::{shared_store, SharedTaskStore};

mod common;
use common::http::{parse_response, send_json, send_request};
use common::test_server::setup_may_runtime;
use tracing_util::TestTracing;

/// Test fixture with automatic setup and teardown using RAII.
///
/// Implements Drop to ensure the server is stopped when the test
/// completes, even on panic.
struct TaskServiceTestServer {
    _tracing: TestTracing,
    handle: Option<ServerHandle>,
    addr: SocketAddr,
    store: SharedTaskStore,
}

impl TaskServiceTestServer {
    fn new() -> Self {
        setup_may_runtime();
        let tracing = TestTracing::init();

        let store = shared_store();
        let router = Arc::new(RwLock::new(Router::new(task_routes())));

        let metrics = Arc::new(MetricsMiddleware::new());
        let mut dispatcher = Dispatcher::new();
        dispatcher.add_middleware(Arc::new(TracingMiddleware));
        dispatcher.add_middleware(Arc::clone(&metrics) as Arc<dyn Middleware>);
        unsafe {
            register_all(&mut dispatcher, &store);
        }

        let mut service = AppService::new(router, Arc::new(RwLock::new(dispatcher)));
        service.set_metrics_middleware(metrics);

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let handle = HttpServer(service).start(addr).unwrap();
        handle.wait_ready().unwrap();

        Self {
            _tracing: tracing,
            handle: Some(handle),
            addr,
            store,
        }
    }

    fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Drop for TaskServiceTestServer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.stop();
        }
    }
}

fn get(addr: &SocketAddr, path: &str) -> (u16, serde_json::Value) {
    let resp = send_request(
        addr,
        &format!("GET {path} HTTP/1.1\r\nHost: localhost\r\n\r\n"),
    );
    parse_response(&resp)
}

fn bodyless(addr: &SocketAddr, method: &str, path: &str) -> (u16, serde_json::Value) {
    let resp = send_request(
        addr,
        &format!("{method} {path} HTTP/1.1\r\nHost: localhost\r\n\r\n"),
    );
    parse_response(&resp)
}

#[test]
fn test_health_endpoint() {
    let server = TaskServiceTestServer::new();
    let (status, body) = get(&server.addr(), "/health");
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
}

#[test]
fn test_unknown_route_returns_404() {
    let server = TaskServiceTestServer::new();
    let (status, body) = get(&server.addr(), "/does/not/exist");
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Not Found");
}

#[test]
fn test_create_complete_delete_scenario() {
    let server = TaskServiceTestServer::new();
    let addr = server.addr();

    let resp = send_json(&addr, "POST", "/tasks", &json!({"title": "A", "description": "B"}));
    let (status, _) = parse_response(&resp);
    assert_eq!(status, 201);

    let (status, body) = get(&addr, "/tasks");
    assert_eq!(status, 200);
    let tasks = body.as_array().expect("list response should be an array");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "A");
    assert_eq!(tasks[0]["description"], "B");
    assert!(tasks[0]["completed_at"].is_null());
    let id = tasks[0]["id"].as_str().expect("id should serialize as a string").to_string();

    let (status, _) = bodyless(&addr, "PATCH", &format!("/tasks/{id}/complete"));
    assert_eq!(status, 204);

    let (_, body) = get(&addr, "/tasks");
    assert!(!body[0]["completed_at"].is_null());

    let (status, _) = bodyless(&addr, "DELETE", &format!("/tasks/{id}"));
    assert_eq!(status, 204);

    let (status, body) = get(&addr, "/tasks");
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));
}

#[test]
fn test_create_missing_fields_returns_400_and_inserts_nothing() {
    let server = TaskServiceTestServer::new();
    let addr = server.addr();

    let resp = send_json(&addr, "POST", "/tasks", &json!({"title": "A"}));
    let (status, body) = parse_response(&resp);
    assert_eq!(status, 400);
    assert_eq!(
        body,
        json!("Incomplete information. Check the 'title' and 'description' fields")
    );

    assert!(server.store.read().unwrap().is_empty());
}

#[test]
fn test_create_empty_fields_returns_400() {
    let server = TaskServiceTestServer::new();
    let addr = server.addr();

    let resp = send_json(
        &addr,
        "POST",
        "/tasks",
        &json!({"title": "", "description": "B"}),
    );
    let (status, _) = parse_response(&resp);
    assert_eq!(status, 400);
    assert!(server.store.read().unwrap().is_empty());
}

#[test]
fn test_update_existing_task() {
    let server = TaskServiceTestServer::new();
    let addr = server.addr();

    let _ = send_json(&addr, "POST", "/tasks", &json!({"title": "old", "description": "old"}));
    let (_, body) = get(&addr, "/tasks");
    let id = body[0]["id"].as_str().unwrap().to_string();

    let resp = send_json(
        &addr,
        "PUT",
        &format!("/tasks/{id}"),
        &json!({"title": "new title", "description": "new desc"}),
    );
    let (status, _) = parse_response(&resp);
    assert_eq!(status, 204);

    let (_, body) = get(&addr, "/tasks");
    assert_eq!(body[0]["id"], id.as_str());
    assert_eq!(body[0]["title"], "new title");
    assert_eq!(body[0]["description"], "new desc");
}

#[test]
fn test_update_unknown_id_returns_400_and_store_unmodified() {
    let server = TaskServiceTestServer::new();
    let addr = server.addr();

    let _ = send_json(&addr, "POST", "/tasks", &json!({"title": "A", "description": "B"}));

    let missing = tasktrack::ids::TaskId::new();
    let resp = send_json(
        &addr,
        "PUT",
        &format!("/tasks/{missing}"),
        &json!({"title": "x", "description": "y"}),
    );
    let (status, body) = parse_response(&resp);
    assert_eq!(status, 400);
    assert_eq!(body, json!("ID not found in database"));

    let rows = server.store.read().unwrap().select(None);
    assert_eq!(rows[0].title, "A");
}

#[test]
fn test_update_malformed_id_returns_400() {
    let server = TaskServiceTestServer::new();
    let addr = server.addr();

    let resp = send_json(
        &addr,
        "PUT",
        "/tasks/not-a-real-id",
        &json!({"title": "x", "description": "y"}),
    );
    let (status, body) = parse_response(&resp);
    assert_eq!(status, 400);
    assert_eq!(body, json!("ID not found in database"));
}

#[test]
fn test_complete_unknown_id_returns_400() {
    let server = TaskServiceTestServer::new();
    let missing = tasktrack::ids::TaskId::new();
    let (status, body) = bodyless(&server.addr(), "PATCH", &format!("/tasks/{missing}/complete"));
    assert_eq!(status, 400);
    assert_eq!(body, json!("ID not found in database"));
}

#[test]
fn test_delete_unknown_id_returns_400() {
    let server = TaskServiceTestServer::new();
    let missing = tasktrack::ids::TaskId::new();
    let (status, body) = bodyless(&server.addr(), "DELETE", &format!("/tasks/{missing}"));
    assert_eq!(status, 400);
    assert_eq!(body, json!("ID not found in database"));
}

#[test]
fn test_search_filters_by_title_or_description() {
    let server = TaskServiceTestServer::new();
    let addr = server.addr();

    let _ = send_json(&addr, "POST", "/tasks", &json!({"title": "Buy milk", "description": "errand"}));
    let _ = send_json(&addr, "POST", "/tasks", &json!({"title": "Clean house", "description": "all rooms"}));

    let (status, body) = get(&addr, "/tasks?search=milk");
    assert_eq!(status, 200);
    let tasks = body.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Buy milk");

    let (_, body) = get(&addr, "/tasks?search=nothing-matches");
    assert_eq!(body, json!([]));
}

#[test]
fn test_metrics_endpoint_reports_dispatches() {
    let server = TaskServiceTestServer::new();
    let addr = server.addr();

    let (status, _) = get(&addr, "/tasks");
    assert_eq!(status, 200);

    let resp = send_request(&addr, "GET /metrics HTTP/1.1\r\nHost: localhost\r\n\r\n");
    assert!(resp.contains("HTTP/1.1 200"));
    assert!(resp.contains("tasktrack_requests_total 1"));
    assert!(resp.contains("tasktrack_top_level_requests_total"));
}
