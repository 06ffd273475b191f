//! Fetch entry points and redirect resolution
//!
//! This module owns the fetch loop: cache lookup, one blocking exchange
//! per resolved target, redirect following under a fixed hop budget, and
//! the hand-off to the content transformers.

use tracing::{debug, info, warn};

use crate::cache::{MemoryCache, ResultCache};
use crate::error::FetchError;
use crate::render;
use crate::request;
use crate::response::RawResponse;
use crate::target::RequestTarget;
use crate::transport::Connection;

/// Redirect hops allowed for one top-level fetch
const MAX_REDIRECT_HOPS: u32 = 5;

/// Status codes followed when a Location header is present
const REDIRECT_STATUSES: [u16; 4] = [301, 302, 303, 307];

/// Fetch session owning the result cache.
///
/// One session memoizes rendered results across calls; dropping it drops
/// the cache. Fetches block until the full redirect chain resolves.
/// There is no timeout, so a stalled peer stalls the caller.
pub struct Session {
    cache: Box<dyn ResultCache>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session backed by a fresh in-memory cache.
    pub fn new() -> Self {
        Self::with_cache(Box::new(MemoryCache::new()))
    }

    /// Creates a session backed by a caller-supplied cache.
    pub fn with_cache(cache: Box<dyn ResultCache>) -> Self {
        Self { cache }
    }

    /// Fetches a URL and renders the terminal response to text.
    ///
    /// The cache is consulted under the exact input string before any
    /// network I/O. Only terminal (post-redirect, post-transform) results
    /// are stored, and only under that same key; intermediate redirect
    /// URLs are never cache keys.
    pub fn fetch(&mut self, url: &str) -> Result<String, FetchError> {
        if let Some(hit) = self.cache.get(url) {
            debug!(url, "cache hit");
            return Ok(hit);
        }
        let rendered = resolve(url)?;
        self.cache.put(url.to_string(), rendered.clone());
        Ok(rendered)
    }

    /// Searches DuckDuckGo for a term and formats the matched topics.
    pub fn search(&mut self, term: &str) -> Result<String, FetchError> {
        crate::search::search_and_format(self, term)
    }
}

/// Fetches a URL with a throwaway session.
///
/// Convenience for one-shot callers; nothing is memoized across calls.
/// Use [`Session`] to share the cache.
pub fn fetch(url: &str) -> Result<String, FetchError> {
    Session::new().fetch(url)
}

/// Follows the redirect chain for one fetch call and renders the
/// terminal response.
///
/// The visited list exists for diagnostics only; loops shorter than the
/// hop budget simply burn it down and fail.
fn resolve(url: &str) -> Result<String, FetchError> {
    let mut target = RequestTarget::normalize(url);
    let mut hops_left = MAX_REDIRECT_HOPS;
    let mut visited = vec![url.to_string()];

    loop {
        let Some(response) = exchange(&target)? else {
            warn!(host = %target.host, "response carries no header/body delimiter");
            return Ok(render::NO_CONTENT_FOUND.to_string());
        };

        let Some(location) = redirect_location(&response) else {
            debug!(
                status = response.status_code,
                requests = visited.len(),
                "terminal response"
            );
            return Ok(render::render_body(response.content_type(), &response.body));
        };

        info!(
            status = response.status_code,
            location = %location,
            hops_left,
            "following redirect"
        );
        hops_left -= 1;
        if hops_left == 0 {
            debug!(chain = ?visited, "redirect budget exhausted");
            return Err(FetchError::TooManyRedirects {
                url: url.to_string(),
                limit: MAX_REDIRECT_HOPS,
            });
        }
        let next = resolve_location(&target, &location);
        visited.push(next.clone());
        target = RequestTarget::normalize(&next);
    }
}

/// One request/response cycle against a single resolved target.
///
/// `None` means the response had no header/body delimiter; the caller
/// degrades to the placeholder result.
fn exchange(target: &RequestTarget) -> Result<Option<RawResponse>, FetchError> {
    let request = request::build_request(&target.host, &target.path);
    let mut connection = Connection::open(&target.host, target.port, target.scheme.is_tls())?;
    connection.send(request.as_bytes())?;
    let raw = connection.receive_until_closed()?;
    RawResponse::parse(&raw)
}

/// Location to follow, when the response is a followable redirect.
fn redirect_location(response: &RawResponse) -> Option<String> {
    if !REDIRECT_STATUSES.contains(&response.status_code) {
        return None;
    }
    response.location().map(str::to_string)
}

/// Resolves a Location value against the current target.
///
/// Path-absolute values keep the current origin; anything else is handed
/// to the normalizer untouched.
fn resolve_location(current: &RequestTarget, location: &str) -> String {
    if location.starts_with('/') {
        format!("{}{}", current.origin(), location)
    } else {
        location.to_string()
    }
}
