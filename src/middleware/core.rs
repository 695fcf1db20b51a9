use std::time::Duration;

use crate::dispatcher::{HandlerRequest, HandlerResponse};

/// Hook points around handler dispatch.
///
/// `before` may return an early response, which skips the handler entirely;
/// `after` observes (and may mutate) the response on the way out.
pub trait Middleware: Send + Sync {
    fn before(&self, _req: &HandlerRequest) -> Option<HandlerResponse> {
        None
    }
    fn after(&self, _req: &HandlerRequest, _res: &mut HandlerResponse, _latency: Duration) {}
}
