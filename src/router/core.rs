use crate::routes::RouteMeta;
use http::Method;
use regex::Regex;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Maximum number of path/query parameters before heap allocation.
/// Most REST paths have ≤4 path params; 8 keeps the common case on the stack.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the dispatch hot path.
///
/// Param names are `Arc<str>` because they come from the static route table
/// (known at startup) and clone in O(1); values are per-request data from
/// the URL and stay `String`.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Result of successfully matching a request path to a route.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route metadata (Arc to avoid cloning per request)
    pub route: Arc<RouteMeta>,
    /// Name of the handler that should process this request
    pub handler_name: String,
    /// Path parameters extracted from the URL (e.g. `{id}` → `("id", "123")`)
    pub path_params: ParamVec,
    /// Query string parameters (populated by the server)
    pub query_params: ParamVec,
}

impl RouteMatch {
    /// Get a path parameter by name.
    ///
    /// Uses "last write wins" semantics: if duplicate parameter names exist
    /// at different path depths, the deepest occurrence is returned.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a query parameter by name, last occurrence winning
    /// (e.g. `?limit=10&limit=20` yields `20`).
    #[inline]
    #[must_use]
    pub fn get_query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Router that matches HTTP requests against the registered route table.
///
/// Routes are tested in registration order and the first match wins, so the
/// table's ordering is part of the dispatch contract. With a handful of
/// routes the linear scan is also the fastest structure available.
#[derive(Clone)]
pub struct Router {
    routes: Vec<(Method, Regex, Arc<RouteMeta>, Vec<Arc<str>>)>,
}

impl Router {
    /// Create a new router from route metadata, compiling each template.
    #[must_use]
    pub fn new(routes: Vec<RouteMeta>) -> Self {
        let routes: Vec<_> = routes
            .into_iter()
            .map(|route| {
                let (regex, param_names) = Self::path_to_regex(&route.path_pattern);
                let method = route.method.clone();
                (method, regex, Arc::new(route), param_names)
            })
            .collect();

        let routes_summary: Vec<String> = routes
            .iter()
            .map(|(method, _, meta, _)| format!("{} {}", method, meta.path_pattern))
            .collect();

        info!(
            routes_count = routes.len(),
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );

        Self { routes }
    }

    /// Match an HTTP request to a route.
    ///
    /// # Returns
    ///
    /// * `Some(RouteMatch)` - if a matching route is found
    /// * `None` - if no route matches (the caller answers not-found)
    #[must_use]
    pub fn route(&self, method: Method, path: &str) -> Option<RouteMatch> {
        debug!(method = %method, path = %path, "Route match attempt");

        for (route_method, regex, meta, param_names) in &self.routes {
            if *route_method != method {
                continue;
            }
            let Some(caps) = regex.captures(path) else {
                continue;
            };

            let mut path_params = ParamVec::new();
            for (name, value) in param_names.iter().zip(caps.iter().skip(1)) {
                if let Some(value) = value {
                    path_params.push((Arc::clone(name), value.as_str().to_string()));
                }
            }

            info!(
                method = %method,
                path = %path,
                handler_name = %meta.handler_name,
                route_pattern = %meta.path_pattern,
                path_params = ?path_params,
                "Route matched"
            );

            return Some(RouteMatch {
                route: Arc::clone(meta),
                handler_name: meta.handler_name.clone(),
                path_params,
                query_params: ParamVec::new(),
            });
        }

        warn!(method = %method, path = %path, "No route matched");
        None
    }

    /// Convert a path template to a regex and extract parameter names.
    ///
    /// Transforms templates like `/tasks/{id}` into `^/tasks/([^/]+)$` with
    /// parameter names `["id"]`. Parameter segments match exactly one path
    /// segment; there is no wildcard or multi-segment support.
    pub(crate) fn path_to_regex(path: &str) -> (Regex, Vec<Arc<str>>) {
        if path == "/" {
            return (
                Regex::new(r"^/$").expect("Failed to compile path regex"),
                Vec::new(),
            );
        }

        let mut pattern = String::with_capacity(path.len() + 5);
        pattern.push('^');
        let mut param_names = Vec::with_capacity(path.matches('{').count());

        for segment in path.split('/') {
            if segment.starts_with('{') && segment.ends_with('}') {
                let param_name = segment.trim_start_matches('{').trim_end_matches('}');
                pattern.push_str("/([^/]+)");
                param_names.push(Arc::from(param_name));
            } else if !segment.is_empty() {
                pattern.push('/');
                pattern.push_str(segment);
            }
        }

        pattern.push('$');
        let regex = Regex::new(&pattern).expect("Failed to compile path regex");

        (regex, param_names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_to_regex_extracts_params() {
        let (regex, params) = Router::path_to_regex("/tasks/{id}/complete");
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].as_ref(), "id");
        assert!(regex.is_match("/tasks/abc123/complete"));
        assert!(!regex.is_match("/tasks/abc123"));
    }

    #[test]
    fn test_path_to_regex_root() {
        let (regex, params) = Router::path_to_regex("/");
        assert!(params.is_empty());
        assert!(regex.is_match("/"));
        assert!(!regex.is_match("/tasks"));
    }
}
