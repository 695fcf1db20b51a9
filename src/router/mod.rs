//! # Router Module
//!
//! Path matching and route resolution. Route templates from the route table
//! are compiled into regex patterns at startup; incoming requests are tested
//! against them in registration order.
//!
//! ## Architecture
//!
//! 1. **Compilation**: At startup, templates (e.g. `/tasks/{id}`) are
//!    converted into regex patterns that can match and extract path
//!    parameters.
//!
//! 2. **Matching**: For each incoming request, the router tests the request
//!    path against the compiled patterns until a match is found, returning
//!    route metadata and extracted parameters. A non-match is `None`, never
//!    an error — the server turns it into its not-found response.

mod core;

pub use self::core::{ParamVec, RouteMatch, Router, MAX_INLINE_PARAMS};
