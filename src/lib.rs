//! # tasktrack
//!
//! A coroutine-powered HTTP task service: CRUD over a single "tasks"
//! resource backed by an in-process record store, served by `may_minihttp`.
//!
//! ## Architecture
//!
//! The crate is organized into a handful of modules:
//!
//! - **[`routes`]** - the static route table (method + path template +
//!   handler name), built once at startup
//! - **[`router`]** - path matching and parameter extraction using compiled
//!   regex matchers, scanned in registration order
//! - **[`dispatcher`]** - coroutine-based handler dispatch over channels,
//!   with panic recovery and a middleware chain
//! - **[`store`]** - the in-memory task table owning every record
//! - **[`handlers`]** + **[`registry`]** - the five task handlers and their
//!   registration with the dispatcher
//! - **[`server`]** - HTTP service built on `may_minihttp`, plus the
//!   `/health` and `/metrics` built-ins and a server lifecycle wrapper
//! - **[`middleware`]** - pluggable middleware (request tracing, metrics)
//! - **[`ids`]** - ULID-backed task and request identifiers
//!
//! ## Request Handling Flow
//!
//! 1. The server parses the raw request (method, path, headers, query,
//!    JSON body)
//! 2. Built-in endpoints (`/health`, `/metrics`) answer immediately
//! 3. The router matches method + path against the route table and
//!    extracts path parameters
//! 4. The dispatcher sends the request to the handler's coroutine and
//!    waits on a reply channel
//! 5. The handler reads query/body/params, calls into the store, and
//!    replies with a status and optional JSON body
//!
//! ## Runtime Considerations
//!
//! tasktrack uses the `may` coroutine runtime, not tokio or async-std:
//!
//! - Each handler runs in a coroutine (lightweight thread)
//! - Stack size is configurable via `TASKTRACK_STACK_SIZE`
//! - Handlers are synchronous and complete immediately; the single shared
//!   store lock is held only for the duration of one store operation
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::{Arc, RwLock};
//! use tasktrack::dispatcher::Dispatcher;
//! use tasktrack::router::Router;
//! use tasktrack::routes::task_routes;
//! use tasktrack::server::{AppService, HttpServer};
//!
//! let store = tasktrack::store::shared_store();
//! let router = Arc::new(RwLock::new(Router::new(task_routes())));
//! let mut dispatcher = Dispatcher::new();
//! unsafe { tasktrack::registry::register_all(&mut dispatcher, &store) };
//! let service = AppService::new(router, Arc::new(RwLock::new(dispatcher)));
//! let handle = HttpServer(service).start("0.0.0.0:8080").unwrap();
//! handle.join().unwrap();
//! ```

pub mod cli;
pub mod dispatcher;
pub mod handlers;
pub mod ids;
pub mod logging;
pub mod middleware;
pub mod registry;
pub mod router;
pub mod routes;
pub mod runtime_config;
pub mod server;
pub mod store;

pub use ids::{RequestId, TaskId};
pub use routes::{task_routes, RouteMeta};
pub use store::{SharedTaskStore, Task, TaskFilter, TaskPatch, TaskStore};
