pub mod test_server {
    use std::sync::Once;

    /// Ensures May coroutines are configured only once per test binary
    static MAY_INIT: Once = Once::new();

    #[allow(dead_code)]
    pub fn setup_may_runtime() {
        MAY_INIT.call_once(|| {
            may::config().set_stack_size(0x8000);
        });
    }
}

pub mod http {
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpStream};
    use std::time::Duration;

    /// Send a raw HTTP request string and collect the raw response.
    ///
    /// The server keeps connections alive, so reading stops on timeout
    /// rather than EOF.
    #[allow(dead_code)]
    pub fn send_request(addr: &SocketAddr, req: &str) -> String {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(req.as_bytes()).unwrap();
        stream
            .set_read_timeout(Some(Duration::from_millis(200)))
            .unwrap();
        let mut buf = Vec::new();
        loop {
            let mut tmp = [0u8; 1024];
            match stream.read(&mut tmp) {
                Ok(0) => break,
                Ok(n) => buf.extend_from_slice(&tmp[..n]),
                Err(ref e)
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut =>
                {
                    break
                }
                Err(e) => panic!("read error: {:?}", e),
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Build and send a request with a JSON body (Content-Length included).
    #[allow(dead_code)]
    pub fn send_json(
        addr: &SocketAddr,
        method: &str,
        path: &str,
        body: &serde_json::Value,
    ) -> String {
        let payload = body.to_string();
        let req = format!(
            "{method} {path} HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{payload}",
            payload.len()
        );
        send_request(addr, &req)
    }

    /// Split a raw response into status code and parsed JSON body
    /// (`Value::Null` when the body is empty).
    #[allow(dead_code)]
    pub fn parse_response(resp: &str) -> (u16, serde_json::Value) {
        let mut parts = resp.split("\r\n\r\n");
        let headers = parts.next().unwrap_or("");
        let body = parts.next().unwrap_or("");
        let mut status = 0;
        for line in headers.lines() {
            if line.starts_with("HTTP/1.1") {
                status = line
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or("0")
                    .parse()
                    .unwrap_or(0);
            }
        }
        let json: serde_json::Value = serde_json::from_str(body).unwrap_or_default();
        (status, json)
    }
}
