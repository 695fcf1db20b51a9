pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use self::http_server::{HttpServer, ServerHandle};
pub use self::request::{parse_query_params, parse_request, ParsedRequest};
pub use self::service::{health_endpoint, AppService};
