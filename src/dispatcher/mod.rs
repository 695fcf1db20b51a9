//! # Dispatcher Module
//!
//! Coroutine-based request handler dispatch. The dispatcher keeps a
//! registry of handler names to channel senders; each registered handler
//! runs in its own `may` coroutine, receives [`HandlerRequest`]s over its
//! channel, and answers over a per-request reply channel.
//!
//! ## Request Flow
//!
//! 1. Router matches the incoming request → route metadata
//! 2. Dispatcher looks up the handler by name from the route match
//! 3. Middleware `before` hooks run (and may answer early)
//! 4. The request is sent to the handler coroutine via channel
//! 5. The handler processes it and sends back a [`HandlerResponse`]
//! 6. Middleware `after` hooks observe the response and latency
//!
//! ## Error Handling
//!
//! - Missing handlers return `None` (the server answers 500)
//! - Handler panics are caught and converted to 500 responses
//! - A closed reply channel maps to a 503 response

mod core;

pub use self::core::{
    Dispatcher, HandlerRequest, HandlerResponse, HandlerSender,
};
