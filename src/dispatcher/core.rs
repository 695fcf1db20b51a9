use crate::ids::RequestId;
use crate::middleware::Middleware;
use crate::router::{ParamVec, RouteMatch};
use crate::runtime_config::RuntimeConfig;
use http::Method;
use may::coroutine;
use may::sync::mpsc;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Request data passed to a handler coroutine.
///
/// Contains the extracted request information (path/query parameters and
/// parsed JSON body) plus the reply channel the handler must answer on.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    /// Unique request ID for log correlation
    pub request_id: RequestId,
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The matched route template
    pub path: String,
    /// Name of the handler that should process this request
    pub handler_name: String,
    /// Path parameters extracted from the URL
    pub path_params: ParamVec,
    /// Query string parameters
    pub query_params: ParamVec,
    /// Request body parsed as JSON (if present)
    pub body: Option<Value>,
    /// Channel for sending the response back to the dispatcher
    pub reply_tx: mpsc::Sender<HandlerResponse>,
}

impl HandlerRequest {
    /// Get a path parameter by name, last occurrence winning.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a query parameter by name, last occurrence winning.
    #[inline]
    #[must_use]
    pub fn get_query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Response data sent back from a handler coroutine.
#[derive(Debug, Clone, Serialize)]
pub struct HandlerResponse {
    /// HTTP status code (200, 201, 204, 400, ...)
    pub status: u16,
    /// Response body as JSON; `Value::Null` means an empty body
    pub body: Value,
}

impl HandlerResponse {
    /// A JSON response with the given status.
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// An error response carrying a JSON-encoded plain string message.
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: Value::String(message.to_string()),
        }
    }

    /// A bodyless response (201 Created, 204 No Content).
    #[must_use]
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: Value::Null,
        }
    }
}

/// Type alias for a channel sender that dispatches requests to a handler
pub type HandlerSender = mpsc::Sender<HandlerRequest>;

/// Dispatcher that routes requests to registered handler coroutines.
///
/// Maintains a registry of handler names to their corresponding channel
/// senders, and the middleware chain applied around every dispatch.
#[derive(Clone, Default)]
pub struct Dispatcher {
    /// Map of handler names to their channel senders
    pub handlers: HashMap<String, HandlerSender>,
    /// Ordered list of middleware to apply to requests/responses
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl Dispatcher {
    /// Create a new empty dispatcher. Handlers must be registered with
    /// [`register_handler`](Self::register_handler).
    #[must_use]
    pub fn new() -> Self {
        Dispatcher {
            handlers: HashMap::new(),
            middlewares: Vec::new(),
        }
    }

    /// Add middleware to the processing pipeline. Middleware is executed
    /// in the order it's added.
    pub fn add_middleware(&mut self, mw: Arc<dyn Middleware>) {
        self.middlewares.push(mw);
    }

    /// Registers a handler function that will process incoming requests
    /// with the given name.
    ///
    /// Spawns a coroutine that processes requests from a channel. The
    /// handler is wrapped with panic recovery so one failing handler cannot
    /// crash the server. Registering the same name twice replaces the old
    /// handler; dropping its sender closes the channel and the old
    /// coroutine exits.
    ///
    /// # Safety
    ///
    /// This function is marked unsafe because it calls
    /// `may::coroutine::Builder::spawn()`, which is unsafe in the `may`
    /// runtime. The caller must ensure the May runtime is initialized and
    /// that the handler sends a response through the reply channel for
    /// every request it receives.
    pub unsafe fn register_handler<F>(&mut self, name: &str, handler_fn: F)
    where
        F: Fn(HandlerRequest) + Send + 'static + Clone,
    {
        let (tx, rx) = mpsc::channel::<HandlerRequest>();
        let name = name.to_string();
        let coroutine_name = name.clone();
        let stack_size = RuntimeConfig::from_env().stack_size;

        // SAFETY: spawn() is unsafe per the may runtime; the handler is
        // Send + 'static and errors travel the reply channel, not panics.
        let spawn_result = unsafe {
            coroutine::Builder::new()
                .stack_size(stack_size)
                .spawn(move || {
                    debug!(
                        handler_name = %coroutine_name,
                        stack_size = stack_size,
                        "Handler coroutine start"
                    );

                    for req in rx.iter() {
                        let reply_tx = req.reply_tx.clone();
                        let handler_name = req.handler_name.clone();
                        let request_id = req.request_id;

                        if let Err(panic) =
                            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                                handler_fn(req);
                            }))
                        {
                            error!(
                                request_id = %request_id,
                                handler_name = %handler_name,
                                panic_message = ?panic,
                                "Handler panicked"
                            );
                            let error_response =
                                HandlerResponse::error(500, "Handler panicked");
                            let _ = reply_tx.send(error_response);
                        }
                    }
                })
        };

        if let Err(e) = spawn_result {
            error!(
                handler_name = %name,
                error = %e,
                stack_size = stack_size,
                "Failed to spawn handler coroutine"
            );
            return;
        }

        if self.handlers.insert(name.clone(), tx).is_some() {
            info!(handler_name = %name, "Replaced existing handler");
        } else {
            info!(
                handler_name = %name,
                total_handlers = self.handlers.len(),
                "Handler registered"
            );
        }
    }

    /// Dispatch a request to the appropriate handler.
    ///
    /// Sends the request to the handler's coroutine via channel and waits
    /// for the response.
    ///
    /// # Returns
    ///
    /// * `Some(HandlerResponse)` - response from the handler (or an early
    ///   middleware response, or a 503 if the handler's reply channel
    ///   closed)
    /// * `None` - if no handler is registered for this route
    #[must_use]
    pub fn dispatch(
        &self,
        route_match: RouteMatch,
        body: Option<Value>,
        request_id: RequestId,
    ) -> Option<HandlerResponse> {
        let (reply_tx, reply_rx) = mpsc::channel();

        debug!(
            handler_name = %route_match.handler_name,
            available_handlers = self.handlers.len(),
            "Handler lookup"
        );

        let Some(tx) = self.handlers.get(&route_match.handler_name) else {
            error!(
                handler_name = %route_match.handler_name,
                "Handler not found"
            );
            return None;
        };

        let request = HandlerRequest {
            request_id,
            method: route_match.route.method.clone(),
            path: route_match.route.path_pattern.clone(),
            handler_name: route_match.handler_name,
            path_params: route_match.path_params,
            query_params: route_match.query_params,
            body,
            reply_tx,
        };

        let mut early_resp: Option<HandlerResponse> = None;
        for mw in &self.middlewares {
            if early_resp.is_none() {
                early_resp = mw.before(&request);
            } else {
                let _ = mw.before(&request);
            }
        }

        let (mut resp, latency) = if let Some(r) = early_resp {
            (r, Duration::from_millis(0))
        } else {
            let start = Instant::now();

            if let Err(e) = tx.send(request.clone()) {
                error!(
                    request_id = %request_id,
                    handler_name = %request.handler_name,
                    error = %e,
                    "Failed to send request to handler"
                );
                return None;
            }

            match reply_rx.recv() {
                Ok(response) => (response, start.elapsed()),
                Err(e) => {
                    error!(
                        request_id = %request_id,
                        handler_name = %request.handler_name,
                        error = %e,
                        "Handler channel closed - handler may have crashed"
                    );
                    return Some(HandlerResponse::error(
                        503,
                        "Handler is not responding",
                    ));
                }
            }
        };

        for mw in &self.middlewares {
            mw.after(&request, &mut resp, latency);
        }

        Some(resp)
    }
}
