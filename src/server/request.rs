use crate::router::ParamVec;
use may_minihttp::Request;
use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;
use tracing::debug;

/// Parsed HTTP request data used by `AppService`.
#[derive(Debug)]
pub struct ParsedRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request path with the query string stripped
    pub path: String,
    /// HTTP headers (lowercase keys)
    pub headers: HashMap<String, String>,
    /// Parsed query string parameters
    pub query_params: ParamVec,
    /// Parsed JSON body (if present and valid JSON)
    pub body: Option<serde_json::Value>,
}

/// Parse query string parameters from a URL path.
///
/// Extracts everything after the `?` character and URL-decodes parameter
/// names and values.
pub fn parse_query_params(path: &str) -> ParamVec {
    let mut params = ParamVec::new();
    if let Some(pos) = path.find('?') {
        let query_str = &path[pos + 1..];
        for (k, v) in url::form_urlencoded::parse(query_str.as_bytes()) {
            params.push((Arc::from(k.as_ref()), v.to_string()));
        }
    }
    params
}

/// Extract method, path, headers, query parameters, and JSON body from a
/// raw HTTP request.
pub fn parse_request(req: Request) -> ParsedRequest {
    let method = req.method().to_string();
    let raw_path = req.path().to_string();
    let path = raw_path.split('?').next().unwrap_or("/").to_string();

    let headers: HashMap<String, String> = req
        .headers()
        .iter()
        .map(|h| {
            (
                h.name.to_ascii_lowercase(),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();

    let query_params = parse_query_params(&raw_path);

    let body = {
        let mut body_str = String::new();
        if let Ok(size) = req.body().read_to_string(&mut body_str) {
            if size > 0 {
                serde_json::from_str(&body_str).ok()
            } else {
                None
            }
        } else {
            None
        }
    };

    debug!(
        method = %method,
        path = %path,
        header_count = headers.len(),
        query_params = ?query_params,
        has_body = body.is_some(),
        "HTTP request parsed"
    );

    ParsedRequest {
        method,
        path,
        headers,
        query_params,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_params() {
        let q = parse_query_params("/tasks?search=milk&x=1");
        assert_eq!(q.len(), 2);
        assert_eq!(q[0].0.as_ref(), "search");
        assert_eq!(q[0].1, "milk");
        assert_eq!(q[1].0.as_ref(), "x");
        assert_eq!(q[1].1, "1");
    }

    #[test]
    fn test_parse_query_params_decodes() {
        let q = parse_query_params("/tasks?search=buy%20milk");
        assert_eq!(q[0].1, "buy milk");
    }

    #[test]
    fn test_parse_query_params_absent() {
        assert!(parse_query_params("/tasks").is_empty());
    }
}
