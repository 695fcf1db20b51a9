use super::request::{parse_request, ParsedRequest};
use super::response::{write_handler_response, write_json_error};
use crate::dispatcher::Dispatcher;
use crate::ids::RequestId;
use crate::middleware::MetricsMiddleware;
use crate::router::Router;
use http::Method;
use may_minihttp::{HttpService, Request, Response};
use std::io;
use std::sync::{Arc, RwLock};

/// The HTTP service: parses requests, serves the built-in endpoints, and
/// routes everything else through the router and dispatcher.
#[derive(Clone)]
pub struct AppService {
    pub router: Arc<RwLock<Router>>,
    pub dispatcher: Arc<RwLock<Dispatcher>>,
    pub metrics: Option<Arc<MetricsMiddleware>>,
}

impl AppService {
    pub fn new(router: Arc<RwLock<Router>>, dispatcher: Arc<RwLock<Dispatcher>>) -> Self {
        Self {
            router,
            dispatcher,
            metrics: None,
        }
    }

    pub fn set_metrics_middleware(&mut self, metrics: Arc<MetricsMiddleware>) {
        self.metrics = Some(metrics);
    }
}

/// Basic health check endpoint returning `{ "status": "ok" }`.
pub fn health_endpoint(res: &mut Response) -> io::Result<()> {
    write_handler_response(res, 200, serde_json::json!({ "status": "ok" }));
    Ok(())
}

/// Metrics endpoint returning Prometheus text format statistics.
pub fn metrics_endpoint(res: &mut Response, metrics: &MetricsMiddleware) -> io::Result<()> {
    let body = format!(
        "# HELP tasktrack_requests_total Total number of dispatched requests\n\
         # TYPE tasktrack_requests_total counter\n\
         tasktrack_requests_total {}\n\
         # HELP tasktrack_request_latency_seconds Average request latency in seconds\n\
         # TYPE tasktrack_request_latency_seconds gauge\n\
         tasktrack_request_latency_seconds {}\n\
         # HELP tasktrack_top_level_requests_total Requests answered above the dispatcher\n\
         # TYPE tasktrack_top_level_requests_total counter\n\
         tasktrack_top_level_requests_total {}\n",
        metrics.request_count(),
        metrics.average_latency().as_secs_f64(),
        metrics.top_level_requests(),
    );
    res.status_code(200, "OK");
    res.header("Content-Type: text/plain");
    res.body_vec(body.into_bytes());
    Ok(())
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let ParsedRequest {
            method,
            path,
            headers,
            query_params,
            body,
        } = parse_request(req);

        if method == "GET" && path == "/health" {
            if let Some(metrics) = &self.metrics {
                metrics.inc_top_level();
            }
            return health_endpoint(res);
        }
        if method == "GET" && path == "/metrics" {
            if let Some(metrics) = &self.metrics {
                metrics.inc_top_level();
                return metrics_endpoint(res, metrics);
            }
            write_json_error(
                res,
                404,
                serde_json::json!({"error": "Not Found", "method": method, "path": path}),
            );
            return Ok(());
        }

        let Ok(method_parsed) = method.parse::<Method>() else {
            write_json_error(
                res,
                400,
                serde_json::json!({"error": "Unsupported method", "method": method}),
            );
            return Ok(());
        };

        let route_opt = {
            let router = self.router.read().unwrap();
            router.route(method_parsed, &path)
        };

        let Some(mut route_match) = route_opt else {
            write_json_error(
                res,
                404,
                serde_json::json!({"error": "Not Found", "method": method, "path": path}),
            );
            return Ok(());
        };
        route_match.query_params = query_params;

        let request_id =
            RequestId::from_header_or_new(headers.get("x-request-id").map(String::as_str));

        let handler_response = {
            let dispatcher = self.dispatcher.read().unwrap();
            dispatcher.dispatch(route_match, body, request_id)
        };

        match handler_response {
            Some(hr) => write_handler_response(res, hr.status, hr.body),
            None => {
                write_json_error(
                    res,
                    500,
                    serde_json::json!({
                        "error": "Handler failed or not registered",
                        "method": method,
                        "path": path
                    }),
                );
            }
        }
        Ok(())
    }
}
