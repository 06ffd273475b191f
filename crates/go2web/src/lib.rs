//! go2web - minimal raw-socket HTTP(S) fetch-and-render engine
//!
//! go2web speaks HTTP/1.1 by hand: it serializes a GET request onto a
//! TCP (or TLS) socket, reads the response until the peer closes the
//! connection, follows redirects up to a fixed hop budget, and renders
//! the body to human-readable text: pretty-printed JSON for JSON bodies
//! (raw pass-through when they do not parse), tag-stripped prose for
//! everything else. Rendered results are memoized per request URL by a
//! caller-owned [`Session`].
//!
//! The engine is synchronous and blocking throughout; one fetch fully
//! resolves (redirect chain included) before control returns.
//!
//! ```no_run
//! use go2web::Session;
//!
//! let mut session = Session::new();
//! let text = session.fetch("example.com")?;
//! println!("{text}");
//! # Ok::<(), go2web::FetchError>(())
//! ```

pub mod cache;
pub mod client;
mod error;
mod render;
mod request;
mod response;
mod search;
mod target;
mod transport;

pub use cache::{MemoryCache, ResultCache};
pub use client::{fetch, Session};
pub use error::FetchError;
pub use render::{html_to_text, render_body};
pub use target::{RequestTarget, Scheme};

/// User-Agent sent with every request
pub const USER_AGENT: &str = "go2web/1.0";
