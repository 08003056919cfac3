//! In-memory result cache with per-key TTLs.
//!
//! Wraps catalog calls to avoid redundant network round-trips. The cache
//! is process-lifetime, in-memory only, and evicts solely by TTL expiry.
//! Concurrent callers populating the same key are not deduplicated; both
//! producers run and the later write wins.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::trace;

/// TTL for free-text search results.
pub const SEARCH_TTL: Duration = Duration::from_secs(15 * 60);
/// TTL for per-entity lookups by id.
pub const ENTITY_TTL: Duration = Duration::from_secs(2 * 60 * 60);
/// TTL for popularity and genre listings.
pub const LIST_TTL: Duration = Duration::from_secs(60 * 60);

struct Entry {
    value: Arc<dyn Any + Send + Sync>,
    expires_at: Instant,
}

/// Keyed cache of heterogeneous catalog results.
#[derive(Default)]
pub struct ResultCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl ResultCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, or run `producer`, cache its
    /// result for `ttl`, and return it.
    ///
    /// Errors from the producer are returned without caching.
    pub async fn get_or_populate<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        producer: F,
    ) -> std::result::Result<Arc<T>, E>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        if let Some(hit) = self.get::<T>(key).await {
            trace!(key, "cache hit");
            return Ok(hit);
        }

        let value = Arc::new(producer().await?);
        self.insert(key, Arc::clone(&value) as Arc<dyn Any + Send + Sync>, ttl)
            .await;
        Ok(value)
    }

    /// Look up a live entry, dropping it if expired.
    pub async fn get<T: Send + Sync + 'static>(&self, key: &str) -> Option<Arc<T>> {
        let expired = {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Arc::clone(&entry.value).downcast::<T>().ok();
                }
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            self.entries.write().await.remove(key);
        }
        None
    }

    async fn insert(&self, key: &str, value: Arc<dyn Any + Send + Sync>, ttl: Duration) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Number of entries currently held (including not-yet-swept expired ones).
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[tokio::test]
    async fn populates_then_hits() {
        let cache = ResultCache::new();

        let first: Arc<String> = cache
            .get_or_populate("k", Duration::from_secs(60), || async {
                Ok::<_, Infallible>("fresh".to_string())
            })
            .await
            .unwrap();
        assert_eq!(*first, "fresh");

        // Second producer must not run
        let second: Arc<String> = cache
            .get_or_populate::<String, Infallible, _, _>("k", Duration::from_secs(60), || async {
                panic!("producer ran on a warm key")
            })
            .await
            .unwrap();
        assert_eq!(*second, "fresh");
    }

    #[tokio::test]
    async fn expired_entries_are_refetched() {
        let cache = ResultCache::new();

        let _: Arc<u32> = cache
            .get_or_populate("n", Duration::from_millis(10), || async {
                Ok::<_, Infallible>(1u32)
            })
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(30)).await;

        let refreshed: Arc<u32> = cache
            .get_or_populate("n", Duration::from_secs(60), || async {
                Ok::<_, Infallible>(2u32)
            })
            .await
            .unwrap();
        assert_eq!(*refreshed, 2);
    }

    #[tokio::test]
    async fn distinct_types_per_key() {
        let cache = ResultCache::new();

        let _: Arc<u32> = cache
            .get_or_populate("a", Duration::from_secs(60), || async {
                Ok::<_, Infallible>(7u32)
            })
            .await
            .unwrap();

        // A different type under the same key misses the downcast and
        // repopulates.
        let s: Arc<String> = cache
            .get_or_populate("a", Duration::from_secs(60), || async {
                Ok::<_, Infallible>("seven".to_string())
            })
            .await
            .unwrap();
        assert_eq!(*s, "seven");
    }

    #[tokio::test]
    async fn producer_errors_are_not_cached() {
        let cache = ResultCache::new();

        let failed: std::result::Result<Arc<u32>, &str> = cache
            .get_or_populate("e", Duration::from_secs(60), || async { Err("down") })
            .await;
        assert!(failed.is_err());
        assert!(cache.is_empty().await);
    }
}
