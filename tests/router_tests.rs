use http::Method;
use std::sync::Arc;
use tasktrack::router::{RouteMatch, Router};
use tasktrack::routes::{task_routes, RouteMeta};

fn assert_route_match(router: &Router, method: Method, path: &str, expected_handler: &str) {
    let result = router.route(method.clone(), path);
    match result {
        Some(RouteMatch { route, .. }) => {
            assert_eq!(
                route.handler_name, expected_handler,
                "Handler mismatch for {} {}: expected '{}', got '{}'",
                method, path, expected_handler, route.handler_name
            );
        }
        None => {
            assert_eq!(
                expected_handler, "<none>",
                "Expected route to match for {} {}",
                method, path
            );
        }
    }
}

#[test]
fn test_router_list_tasks() {
    let router = Router::new(task_routes());
    assert_route_match(&router, Method::GET, "/tasks", "list_tasks");
}

#[test]
fn test_router_create_task() {
    let router = Router::new(task_routes());
    assert_route_match(&router, Method::POST, "/tasks", "create_task");
}

#[test]
fn test_router_update_task_by_id() {
    let router = Router::new(task_routes());
    assert_route_match(&router, Method::PUT, "/tasks/123", "update_task");
}

#[test]
fn test_router_complete_task() {
    let router = Router::new(task_routes());
    assert_route_match(
        &router,
        Method::PATCH,
        "/tasks/123/complete",
        "complete_task",
    );
}

#[test]
fn test_router_delete_task() {
    let router = Router::new(task_routes());
    assert_route_match(&router, Method::DELETE, "/tasks/123", "delete_task");
}

#[test]
fn test_router_extracts_id_param() {
    let router = Router::new(task_routes());
    let m = router
        .route(Method::PUT, "/tasks/abc-123")
        .expect("route should match");
    assert_eq!(m.get_path_param("id"), Some("abc-123"));
}

#[test]
fn test_route_match_query_params_last_write_wins() {
    let router = Router::new(task_routes());
    let mut m = router
        .route(Method::GET, "/tasks")
        .expect("route should match");
    m.query_params.push((Arc::from("search"), "a".to_string()));
    m.query_params.push((Arc::from("search"), "b".to_string()));
    assert_eq!(m.get_query_param("search"), Some("b"));
}

#[test]
fn test_router_no_match_unknown_path() {
    let router = Router::new(task_routes());
    assert_route_match(&router, Method::GET, "/does/not/exist", "<none>");
}

#[test]
fn test_router_no_match_extra_segment() {
    let router = Router::new(task_routes());
    assert_route_match(&router, Method::PUT, "/tasks/123/extra", "<none>");
}

#[test]
fn test_router_no_match_trailing_slash() {
    let router = Router::new(task_routes());
    assert_route_match(&router, Method::GET, "/tasks/", "<none>");
}

#[test]
fn test_router_method_mismatch() {
    let router = Router::new(task_routes());
    // GET on an id path is not registered
    assert_route_match(&router, Method::GET, "/tasks/123", "<none>");
}

#[test]
fn test_router_first_match_wins() {
    let routes = vec![
        RouteMeta::new(Method::GET, "/things/{id}", "first"),
        RouteMeta::new(Method::GET, "/things/{name}", "second"),
    ];
    let router = Router::new(routes);
    let m = router
        .route(Method::GET, "/things/42")
        .expect("route should match");
    assert_eq!(m.handler_name, "first");
    assert_eq!(m.get_path_param("id"), Some("42"));
    assert_eq!(m.get_path_param("name"), None);
}

#[test]
fn test_router_param_segment_does_not_span_segments() {
    let routes = vec![RouteMeta::new(Method::GET, "/things/{id}", "get_thing")];
    let router = Router::new(routes);
    assert!(router.route(Method::GET, "/things/a/b").is_none());
}
