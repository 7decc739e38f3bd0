//! Memoised restriction.
//!
//! Routers evaluate the same `(topic, permission)` pair for every message on a
//! subscription. Results are keyed by a SHA-256 fingerprint of both inputs.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};

use crate::domain::restrict_by;
use crate::error::UriError;

/// Fingerprint of a restriction query.
pub type Fingerprint = [u8; 32];

/// Fingerprint `(from, by)`.
///
/// Each input is length-prefixed so `("a", "b/c")` and `("a/b", "c")` differ.
/// Validated URIs are already canonical: `+` always constrains the cell count,
/// so no cell can be dropped without changing what the pattern covers.
pub fn fingerprint(from: &str, by: &str) -> Fingerprint {
    let mut hasher = Sha256::new();
    for part in [from, by] {
        hasher.update((part.len() as u64).to_be_bytes());
        hasher.update(part.as_bytes());
    }
    hasher.finalize().into()
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// LRU cache of `restrict_by` outcomes.
pub struct RestrictionCache {
    /// `None` records a known empty intersection
    entries: Mutex<LruCache<Fingerprint, Option<String>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl RestrictionCache {
    /// Create a cache holding at most `capacity` results.
    pub fn new(capacity: usize) -> Result<Self, UriError> {
        let capacity =
            NonZeroUsize::new(capacity).ok_or(UriError::InvalidCacheCapacity(capacity))?;
        Ok(Self {
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// `restrict_by(from, by)`, answered from the cache when possible.
    ///
    /// Invalid inputs are reported but never cached.
    pub fn restrict(&self, from: &str, by: &str) -> Result<String, UriError> {
        let key = fingerprint(from, by);

        if let Some(cached) = self.entries.lock().get(&key).cloned() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return cached.ok_or_else(|| UriError::NoIntersection {
                from: from.to_string(),
                by: by.to_string(),
            });
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let outcome = restrict_by(from, by);
        match &outcome {
            Ok(result) => {
                self.entries.lock().put(key, Some(result.clone()));
            }
            Err(UriError::NoIntersection { .. }) => {
                self.entries.lock().put(key, None);
            }
            Err(_) => {}
        }
        outcome
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.lock().len(),
        }
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl std::fmt::Debug for RestrictionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestrictionCache")
            .field("stats", &self.stats())
            .finish()
    }
}
