//! Error types for go2web

use std::io;

use thiserror::Error;

/// Errors that can occur while resolving a fetch
#[derive(Debug, Error)]
pub enum FetchError {
    /// TCP connection could not be established
    #[error("failed to connect to {host}:{port}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// Host string is not usable as a TLS server name
    #[error("invalid TLS server name: {host}")]
    InvalidServerName { host: String },

    /// TLS client session could not be created
    #[error("failed to set up TLS session for {host}")]
    Tls {
        host: String,
        #[source]
        source: rustls::Error,
    },

    /// Send or receive failed mid-exchange
    #[error("connection to {host} failed during exchange")]
    Io {
        host: String,
        #[source]
        source: io::Error,
    },

    /// First response line did not carry a parsable status code
    #[error("malformed status line in response: {line:?}")]
    StatusLine { line: String },

    /// Redirect hop budget exhausted before a terminal response
    #[error("too many redirects while fetching {url} (limit {limit})")]
    TooManyRedirects { url: String, limit: u32 },
}
