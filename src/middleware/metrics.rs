use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use super::Middleware;
use crate::dispatcher::{HandlerRequest, HandlerResponse};

/// Middleware collecting the counters behind the `/metrics` endpoint.
///
/// All counters use atomic operations for thread-safe updates without
/// locks.
///
/// Metrics collected:
/// - Total dispatched request count
/// - Average latency (request processing time)
/// - Top-level request count (non-handler requests like /health, /metrics)
pub struct MetricsMiddleware {
    request_count: AtomicUsize,
    total_latency_ns: AtomicU64,
    top_level_requests: AtomicUsize,
}

impl Default for MetricsMiddleware {
    fn default() -> Self {
        Self {
            request_count: AtomicUsize::new(0),
            total_latency_ns: AtomicU64::new(0),
            top_level_requests: AtomicUsize::new(0),
        }
    }
}

impl MetricsMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of requests that went through the dispatcher.
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Mean processing time across all dispatched requests; zero before
    /// the first request.
    pub fn average_latency(&self) -> Duration {
        let count = self.request_count.load(Ordering::Relaxed) as u64;
        if count == 0 {
            Duration::from_nanos(0)
        } else {
            Duration::from_nanos(self.total_latency_ns.load(Ordering::Relaxed) / count)
        }
    }

    /// Requests answered above the dispatcher (health, metrics).
    pub fn top_level_requests(&self) -> usize {
        self.top_level_requests.load(Ordering::Relaxed)
    }

    /// Record a request answered without going through the dispatcher.
    pub fn inc_top_level(&self) {
        self.top_level_requests.fetch_add(1, Ordering::Relaxed);
    }
}

impl Middleware for MetricsMiddleware {
    fn after(&self, _req: &HandlerRequest, _res: &mut HandlerResponse, latency: Duration) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        self.total_latency_ns
            .fetch_add(latency.as_nanos() as u64, Ordering::Relaxed);
    }
}
