//! Response parsing
//!
//! One exchange accumulates the whole byte stream before anything is
//! parsed; this module splits it at the first blank line and exposes the
//! status code, headers, and body.

use crate::error::FetchError;

/// Header-block/body delimiter
const DELIMITER: &[u8] = b"\r\n\r\n";

/// One parsed HTTP response.
///
/// Lives only until interpretation: the engine inspects the status code
/// and headers, renders the body, and drops it.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status_code: u16,
    headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Splits one accumulated exchange at the first `\r\n\r\n`.
    ///
    /// Returns `None` when the delimiter is absent; the caller degrades
    /// to a placeholder result instead of failing. A status line without
    /// a parsable code is fatal to the fetch attempt.
    pub fn parse(raw: &[u8]) -> Result<Option<Self>, FetchError> {
        let Some(split) = raw.windows(DELIMITER.len()).position(|w| w == DELIMITER) else {
            return Ok(None);
        };
        let head = String::from_utf8_lossy(&raw[..split]);
        let body = raw[split + DELIMITER.len()..].to_vec();

        let mut lines = head.split("\r\n");
        let status_line = lines.next().unwrap_or_default();
        let status_code = status_line
            .split_whitespace()
            .nth(1)
            .and_then(|token| token.parse::<u16>().ok())
            .ok_or_else(|| FetchError::StatusLine {
                line: status_line.to_string(),
            })?;

        let mut headers = Vec::new();
        for line in lines {
            if let Some((name, value)) = line.split_once(':') {
                headers.push((name.to_lowercase(), value.trim().to_string()));
            }
        }

        Ok(Some(Self {
            status_code,
            headers,
            body,
        }))
    }

    /// Header lookup by lowercased name; the last occurrence wins on
    /// duplicates.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// First-occurrence lookup, the rule Content-Type follows.
    fn first_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.first_header("content-type")
    }

    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }
}
