//! URL-keyed memoization of rendered results

use std::collections::HashMap;

/// Store for fully-resolved rendered results, keyed by request URL.
///
/// The engine consults the cache before any network I/O and populates it
/// only with terminal, post-transform results under the exact original
/// URL string. Implementations are owned by the caller's
/// [`Session`](crate::Session), not shared process-wide, so tests can
/// isolate or swap them.
pub trait ResultCache {
    /// Looks up the rendered result for a URL.
    fn get(&self, url: &str) -> Option<String>;

    /// Stores the rendered result for a URL.
    fn put(&mut self, url: String, result: String);
}

/// In-memory cache with process lifetime.
///
/// Entries are never evicted and the map is unbounded; both are accepted
/// limitations. Not thread-safe: the engine is single-threaded by
/// contract, and any future concurrent use needs its own guard.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: HashMap<String, String>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ResultCache for MemoryCache {
    fn get(&self, url: &str) -> Option<String> {
        self.entries.get(url).cloned()
    }

    fn put(&mut self, url: String, result: String) {
        self.entries.insert(url, result);
    }
}
