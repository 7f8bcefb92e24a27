//! In-memory query cache.
//!
//! Entries are keyed by the full canonical [`QueryKey`] so distinct filter
//! tuples never collide. Mutations invalidate by prefix and write fresh
//! detail values through directly; a stale in-flight read can never clobber
//! a write-through that landed while it was in flight.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use operis_core::{ClientResult, QueryKey};

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    stored_at: DateTime<Utc>,
    stale: bool,
}

/// Shared cache of normalized query results.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, CacheEntry>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh value for a key, if any. Stale entries are treated as misses.
    pub fn lookup<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let entries = self.lock();
        let entry = entries.get(key)?;
        if entry.stale {
            return None;
        }
        match serde_json::from_value(entry.value.clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%key, "cached value no longer matches expected shape: {e}");
                None
            }
        }
    }

    /// True when a fresh entry exists for the key (test/introspection aid).
    pub fn contains_fresh(&self, key: &QueryKey) -> bool {
        self.lock().get(key).is_some_and(|e| !e.stale)
    }

    /// Overwrite an entry with a known-fresh value (mutation success path).
    pub fn write_through<T: Serialize>(&self, key: &QueryKey, value: &T) {
        let Some(json) = to_json(key, value) else {
            return;
        };
        self.lock().insert(
            key.clone(),
            CacheEntry {
                value: json,
                stored_at: Utc::now(),
                stale: false,
            },
        );
    }

    /// Store a fetch result, unless something newer (a write-through or a
    /// later fetch) landed after this fetch began.
    pub fn store_fetched<T: Serialize>(&self, key: &QueryKey, value: &T, begun_at: DateTime<Utc>) {
        let Some(json) = to_json(key, value) else {
            return;
        };
        let mut entries = self.lock();
        if let Some(existing) = entries.get(key) {
            if !existing.stale && existing.stored_at >= begun_at {
                tracing::debug!(%key, "discarding stale fetch result");
                return;
            }
        }
        entries.insert(
            key.clone(),
            CacheEntry {
                value: json,
                stored_at: Utc::now(),
                stale: false,
            },
        );
    }

    /// Mark one entry stale so the next read refetches.
    pub fn invalidate(&self, key: &QueryKey) {
        if let Some(entry) = self.lock().get_mut(key) {
            entry.stale = true;
        }
    }

    /// Mark every entry under a key prefix stale (all open filtered views
    /// of a resource refresh after a mutation).
    pub fn invalidate_prefix(&self, prefix: &QueryKey) {
        let mut entries = self.lock();
        let mut count = 0usize;
        for (key, entry) in entries.iter_mut() {
            if prefix.is_prefix_of(key) && !entry.stale {
                entry.stale = true;
                count += 1;
            }
        }
        if count > 0 {
            tracing::debug!(%prefix, count, "invalidated cache entries");
        }
    }

    /// Drop everything (logout).
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<QueryKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn to_json<T: Serialize>(key: &QueryKey, value: &T) -> Option<Value> {
    match serde_json::to_value(value) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::warn!(%key, "failed to serialize value for cache: {e}");
            None
        }
    }
}

/// Serve a read from the cache, fetching on miss/stale and storing the
/// result under the full key. If a write-through lands while the fetch is
/// in flight, the newer value wins and is what the caller sees.
pub async fn cached_fetch<T, F, Fut>(
    cache: &QueryCache,
    key: &QueryKey,
    fetch: F,
) -> ClientResult<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = ClientResult<T>>,
{
    if let Some(hit) = cache.lookup::<T>(key) {
        tracing::debug!(%key, "cache hit");
        return Ok(hit);
    }

    let begun_at = Utc::now();
    let fetched = fetch().await?;
    cache.store_fetched(key, &fetched, begun_at);
    Ok(cache.lookup::<T>(key).unwrap_or(fetched))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: String,
        total: u64,
    }

    fn row(id: &str, total: u64) -> Row {
        Row {
            id: id.to_string(),
            total,
        }
    }

    #[test]
    fn distinct_filter_keys_are_independent() {
        let cache = QueryCache::new();
        let k1 = QueryKey::list("users", &[("page", "1".into())]);
        let k2 = QueryKey::list("users", &[("page", "2".into())]);

        cache.write_through(&k1, &row("page-1", 10));
        cache.write_through(&k2, &row("page-2", 20));
        cache.write_through(&k1, &row("page-1-refreshed", 11));

        assert_eq!(cache.lookup::<Row>(&k2), Some(row("page-2", 20)));
        assert_eq!(cache.lookup::<Row>(&k1), Some(row("page-1-refreshed", 11)));
    }

    #[test]
    fn invalidate_prefix_marks_all_lists_stale_but_not_details() {
        let cache = QueryCache::new();
        let list_a = QueryKey::list("users", &[("page", "1".into())]);
        let list_b = QueryKey::list("users", &[("role", "admin".into())]);
        let detail = QueryKey::detail("users", "u1");

        cache.write_through(&list_a, &row("a", 1));
        cache.write_through(&list_b, &row("b", 2));
        cache.write_through(&detail, &row("u1", 3));

        cache.invalidate_prefix(&QueryKey::lists("users"));

        assert_eq!(cache.lookup::<Row>(&list_a), None);
        assert_eq!(cache.lookup::<Row>(&list_b), None);
        assert_eq!(cache.lookup::<Row>(&detail), Some(row("u1", 3)));
    }

    #[test]
    fn write_through_during_inflight_fetch_wins() {
        let cache = QueryCache::new();
        let key = QueryKey::detail("orders", "o1");

        let begun_at = Utc::now();
        // Mutation completes while the (stale) fetch is still in flight.
        cache.write_through(&key, &row("fresh-from-mutation", 2));
        cache.store_fetched(&key, &row("stale-read", 1), begun_at);

        assert_eq!(
            cache.lookup::<Row>(&key),
            Some(row("fresh-from-mutation", 2))
        );
    }

    #[test]
    fn store_fetched_fills_misses_and_refreshes_stale() {
        let cache = QueryCache::new();
        let key = QueryKey::list("deposits", &[]);

        cache.store_fetched(&key, &row("first", 1), Utc::now());
        assert_eq!(cache.lookup::<Row>(&key), Some(row("first", 1)));

        cache.invalidate(&key);
        assert_eq!(cache.lookup::<Row>(&key), None);

        cache.store_fetched(&key, &row("second", 2), Utc::now());
        assert_eq!(cache.lookup::<Row>(&key), Some(row("second", 2)));
    }

    #[tokio::test]
    async fn cached_fetch_serves_fresh_entries_without_fetching() {
        let cache = QueryCache::new();
        let key = QueryKey::list("products", &[]);
        cache.write_through(&key, &row("cached", 5));

        let result: Row = cached_fetch(&cache, &key, || async {
            panic!("must not fetch on a fresh entry")
        })
        .await
        .unwrap();
        assert_eq!(result, row("cached", 5));
    }

    #[tokio::test]
    async fn cached_fetch_fetches_on_miss_and_stores() {
        let cache = QueryCache::new();
        let key = QueryKey::list("products", &[]);

        let result: Row = cached_fetch(&cache, &key, || async { Ok(row("fetched", 7)) })
            .await
            .unwrap();
        assert_eq!(result, row("fetched", 7));
        assert!(cache.contains_fresh(&key));
    }

    #[tokio::test]
    async fn cached_fetch_error_leaves_cache_untouched() {
        let cache = QueryCache::new();
        let key = QueryKey::list("products", &[]);

        let result: ClientResult<Row> = cached_fetch(&cache, &key, || async {
            Err(operis_core::ClientError::Timeout)
        })
        .await;
        assert!(result.is_err());
        assert!(!cache.contains_fresh(&key));
    }
}
