//! Blocking transport
//!
//! Opens one TCP connection per exchange, optionally wrapped in a TLS
//! client session, and exposes full-duplex byte I/O. There is no retry,
//! no timeout, and no keep-alive: the peer closing the stream is what
//! ends a receive.

use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::sync::Arc;

use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, RootCertStore, StreamOwned};
use tracing::debug;

use crate::error::FetchError;

/// Bytes requested per read while draining the response stream
const RECV_CHUNK: usize = 4096;

/// One exclusive connection for one exchange.
pub(crate) struct Connection {
    host: String,
    stream: Stream,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

enum Stream {
    Plain(TcpStream),
    Tls(Box<StreamOwned<ClientConnection, TcpStream>>),
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Stream::Plain(stream) => stream.read(buf),
            Stream::Tls(stream) => stream.read(buf),
        }
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Stream::Plain(stream) => stream.write(buf),
            Stream::Tls(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Stream::Plain(stream) => stream.flush(),
            Stream::Tls(stream) => stream.flush(),
        }
    }
}

impl Connection {
    /// Connects to `host:port`, wrapping the socket in a TLS session with
    /// SNI set to `host` when asked.
    pub fn open(host: &str, port: u16, use_tls: bool) -> Result<Self, FetchError> {
        debug!(host, port, tls = use_tls, "opening connection");
        let tcp = TcpStream::connect((host, port)).map_err(|source| FetchError::Connect {
            host: host.to_string(),
            port,
            source,
        })?;

        let stream = if use_tls {
            let server_name = ServerName::try_from(host.to_string()).map_err(|_| {
                FetchError::InvalidServerName {
                    host: host.to_string(),
                }
            })?;
            let session =
                ClientConnection::new(tls_config(), server_name).map_err(|source| {
                    FetchError::Tls {
                        host: host.to_string(),
                        source,
                    }
                })?;
            Stream::Tls(Box::new(StreamOwned::new(session, tcp)))
        } else {
            Stream::Plain(tcp)
        };

        Ok(Self {
            host: host.to_string(),
            stream,
        })
    }

    /// Writes the full request onto the stream.
    pub fn send(&mut self, bytes: &[u8]) -> Result<(), FetchError> {
        self.stream
            .write_all(bytes)
            .and_then(|()| self.stream.flush())
            .map_err(|source| FetchError::Io {
                host: self.host.clone(),
                source,
            })
    }

    /// Reads fixed-size chunks until the peer closes the stream, then
    /// drops the connection.
    ///
    /// The engine always sends `Connection: close`, so end-of-stream is
    /// the only framing signal it needs.
    pub fn receive_until_closed(mut self) -> Result<Vec<u8>, FetchError> {
        let mut chunk = [0u8; RECV_CHUNK];
        let mut received = Vec::new();
        loop {
            match self.stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => received.extend_from_slice(&chunk[..n]),
                // A TLS peer that skips close_notify shows up as
                // UnexpectedEof; with read-to-close framing that is just
                // the end of the stream.
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(source) => {
                    return Err(FetchError::Io {
                        host: self.host,
                        source,
                    })
                }
            }
        }
        debug!(host = %self.host, bytes = received.len(), "peer closed stream");
        Ok(received)
    }
}

/// Client TLS configuration validating against the webpki trust anchors.
fn tls_config() -> Arc<ClientConfig> {
    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    Arc::new(
        ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth(),
    )
}
