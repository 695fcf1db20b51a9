use may_minihttp::Response;
use serde_json::Value;

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "OK",
    }
}

/// Write a handler response: status line plus a JSON body.
///
/// `Value::Null` means a bodyless response (201 Created / 204 No Content);
/// anything else is serialized as `application/json`, including plain
/// string error messages, which serialize as JSON-encoded strings.
pub fn write_handler_response(res: &mut Response, status: u16, body: Value) {
    let reason = status_reason(status);
    res.status_code(status as usize, reason);
    match body {
        Value::Null => {}
        other => {
            res.header("Content-Type: application/json");
            res.body_vec(serde_json::to_vec(&other).unwrap_or_default());
        }
    }
}

/// Write a server-level JSON error (not-found, dispatch failure).
pub fn write_json_error(res: &mut Response, status: u16, body: Value) {
    let reason = status_reason(status);
    res.status_code(status as usize, reason);
    res.header("Content-Type: application/json");
    res.body_vec(body.to_string().into_bytes());
}
