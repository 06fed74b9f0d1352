//! Memoized path parsing.
//!
//! Parsing is a pure function of the path string, so entries never need
//! invalidation. Two threads racing on the same miss both parse and one
//! overwrites the other with an identical value.

use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use tracing::debug;

use crate::segment::DotPath;

static GLOBAL: LazyLock<Arc<PathCache>> = LazyLock::new(|| Arc::new(PathCache::new()));

/// Concurrent cache of parsed paths keyed by the literal path string.
#[derive(Debug, Default)]
pub struct PathCache {
    entries: DashMap<String, Arc<DotPath>>,
}

impl PathCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// The shared process-wide cache.
    #[must_use]
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    /// Return the parsed form of `path`, parsing and storing it on a miss.
    pub fn parse(&self, path: &str) -> Arc<DotPath> {
        if let Some(hit) = self.entries.get(path) {
            return Arc::clone(hit.value());
        }
        debug!(path, "path cache miss");
        let parsed = Arc::new(DotPath::parse(path));
        self.entries.insert(path.to_owned(), Arc::clone(&parsed));
        parsed
    }

    /// Number of cached paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.entries.clear();
    }
}
