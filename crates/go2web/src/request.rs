//! HTTP/1.1 request serialization

use crate::USER_AGENT;

/// Media types advertised to the server
const ACCEPT: &str = "text/html,application/json";

/// Serializes the fixed GET request for one exchange.
///
/// Every request pins `Connection: close` so the response can be framed
/// by reading to end-of-stream. No other method is supported and no body
/// is ever sent.
pub(crate) fn build_request(host: &str, path: &str) -> String {
    format!(
        "GET {path} HTTP/1.1\r\n\
         Host: {host}\r\n\
         Connection: close\r\n\
         User-Agent: {USER_AGENT}\r\n\
         Accept: {ACCEPT}\r\n\
         \r\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_is_byte_exact() {
        let request = build_request("example.com", "/index.html");
        assert_eq!(
            request,
            "GET /index.html HTTP/1.1\r\n\
             Host: example.com\r\n\
             Connection: close\r\n\
             User-Agent: go2web/1.0\r\n\
             Accept: text/html,application/json\r\n\
             \r\n"
        );
    }

    #[test]
    fn test_request_carries_query() {
        let request = build_request("api.duckduckgo.com", "/?q=rust&format=json");
        assert!(request.starts_with("GET /?q=rust&format=json HTTP/1.1\r\n"));
        assert!(request.ends_with("\r\n\r\n"));
    }
}
