// Time-boxed cache of search result pages.
// Wraps a KvStore with timestamps and absorbs every storage failure.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::NavError;
use crate::github::SearchResult;

use super::store::KvStore;

/// Cached pages older than this are discarded.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Wrapper for cached data with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    /// The cached data.
    pub data: T,
    /// When the data was cached.
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    /// Check if this cached data is older than `ttl`.
    ///
    /// Timestamps in the future count as expired.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        let elapsed = Utc::now()
            .signed_duration_since(self.cached_at)
            .to_std()
            .unwrap_or(Duration::MAX);

        elapsed > ttl
    }
}

/// Search result cache service. Lookups and writes never fail.
pub struct SearchCache {
    store: Arc<dyn KvStore>,
    ttl: Duration,
}

impl SearchCache {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self::with_ttl(store, FRESHNESS_WINDOW)
    }

    pub fn with_ttl(store: Arc<dyn KvStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Return a fresh page for `key` with `cached` set.
    ///
    /// Expired or unreadable entries are removed and reported as a miss.
    pub fn get(&self, key: &str) -> Option<SearchResult> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!(key, error = %e, "cache read failed");
                return None;
            }
        };

        let entry: CachedData<SearchResult> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding corrupt cache entry");
                self.evict(key);
                return None;
            }
        };

        if entry.is_expired(self.ttl) {
            tracing::debug!(key, cached_at = %entry.cached_at, "cache entry expired");
            self.evict(key);
            return None;
        }

        let mut result = entry.data;
        result.cached = true;
        Some(result)
    }

    /// Persist a page. Failures are logged and dropped.
    pub fn put(&self, key: &str, result: &SearchResult) {
        let stored = serde_json::to_string(&CachedData::new(result))
            .map_err(NavError::from)
            .and_then(|json| self.store.set(key, &json));

        if let Err(e) = stored {
            tracing::warn!(key, error = %e, "could not cache search result");
        }
    }

    fn evict(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            tracing::debug!(key, error = %e, "cache eviction failed");
        }
    }
}
