//! Command-line interface and startup wiring for the task service.

use crate::dispatcher::Dispatcher;
use crate::middleware::{MetricsMiddleware, TracingMiddleware};
use crate::registry;
use crate::router::Router;
use crate::routes::task_routes;
use crate::runtime_config::RuntimeConfig;
use crate::server::{AppService, HttpServer};
use crate::store;
use anyhow::Result;
use clap::Parser;
use std::sync::{Arc, RwLock};
use tracing::info;

/// Command-line options for the task service.
#[derive(Parser, Debug)]
#[command(name = "tasktrack")]
#[command(about = "Task CRUD service over an in-memory record store", long_about = None)]
pub struct Cli {
    /// Address and port to bind the server to
    #[arg(long, env = "TASKTRACK_ADDR", default_value = "0.0.0.0:8080")]
    pub addr: String,

    /// Default log level (overridden by RUST_LOG when set)
    #[arg(long, env = "TASKTRACK_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Parse arguments, wire the service together, and serve until the server
/// coroutine exits.
///
/// # Errors
///
/// Returns an error if logging cannot be initialized, the bind address is
/// invalid, or the server fails to start.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    crate::logging::init(&cli.log_level)?;

    let runtime = RuntimeConfig::from_env();
    may::config().set_stack_size(runtime.stack_size);

    let store = store::shared_store();
    let router = Arc::new(RwLock::new(Router::new(task_routes())));

    let metrics = Arc::new(MetricsMiddleware::new());
    let mut dispatcher = Dispatcher::new();
    dispatcher.add_middleware(Arc::new(TracingMiddleware));
    dispatcher.add_middleware(Arc::clone(&metrics) as Arc<dyn crate::middleware::Middleware>);
    // SAFETY: the May runtime is configured above; handlers reply on every request.
    unsafe {
        registry::register_all(&mut dispatcher, &store);
    }
    let dispatcher = Arc::new(RwLock::new(dispatcher));

    let mut service = AppService::new(router, dispatcher);
    service.set_metrics_middleware(metrics);

    let handle = HttpServer(service).start(&cli.addr)?;
    info!(addr = %cli.addr, stack_size = runtime.stack_size, "tasktrack listening");

    handle
        .join()
        .map_err(|e| anyhow::anyhow!("server failed: {e:?}"))?;
    Ok(())
}
