//! URL normalization
//!
//! Turns an arbitrary user-supplied string into the canonical
//! scheme/host/port/path tuple one fetch attempt runs against.

use url::Url;

/// Transport-level scheme of a request target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    /// Port used when the authority does not embed one
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }

    /// Whether the transport wraps the connection in TLS
    pub fn is_tls(self) -> bool {
        matches!(self, Scheme::Https)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

/// One resolved request target, immutable after construction.
///
/// `path` carries the query string when the URL has one and is never
/// empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl RequestTarget {
    /// Normalizes an arbitrary string into a request target.
    ///
    /// Inputs without a scheme get `http://` prepended before parsing.
    /// This never fails: input the parser rejects degrades to a target
    /// whose host is the raw string, so the failure surfaces at connect
    /// time instead.
    pub fn normalize(input: &str) -> Self {
        let with_scheme = if input.contains("://") {
            input.to_string()
        } else {
            format!("http://{input}")
        };

        if let Ok(url) = Url::parse(&with_scheme) {
            if let Some(host) = url.host_str() {
                let scheme = if url.scheme() == "https" {
                    Scheme::Https
                } else {
                    Scheme::Http
                };
                let port = url.port().unwrap_or_else(|| scheme.default_port());
                let mut path = url.path().to_string();
                if path.is_empty() {
                    path.push('/');
                }
                if let Some(query) = url.query() {
                    path.push('?');
                    path.push_str(query);
                }
                return Self {
                    scheme,
                    host: host.to_string(),
                    port,
                    path,
                };
            }
        }

        Self {
            scheme: Scheme::Http,
            host: input.to_string(),
            port: Scheme::Http.default_port(),
            path: "/".to_string(),
        }
    }

    /// Origin string used to resolve path-absolute redirect targets.
    pub(crate) fn origin(&self) -> String {
        format!("{}://{}:{}", self.scheme.as_str(), self.host, self.port)
    }
}
