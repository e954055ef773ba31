//! In-memory TTL cache for search results and repositories
//!
//! Two keyspaces: whole result pages keyed by normalized query, and single
//! repositories keyed by id. Writing a result page also seeds the repository
//! keyspace with every item it contains, so direct lookups can hit cache
//! without a prior direct fetch.
//!
//! Entries are only ever dropped by [`CacheStore::clear`] or lazily replaced
//! on write; expired entries stay readable through the `_stale` accessors
//! because the coordinator falls back to them when the remote is down. There
//! is no eviction beyond TTL expiry - unbounded growth is an accepted
//! limitation of this in-memory scope.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::Duration;

use reposcout_client::{Repository, SearchResults};
use tokio::time::Instant;

/// A cached value plus the moment it was stored.
///
/// Never leaves this crate; callers only see the value.
struct CacheEntry<T> {
    value: T,
    stored_at: Instant,
}

impl<T> CacheEntry<T> {
    fn fresh(value: T) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() > ttl
    }
}

/// One TTL-aware keyspace. A poisoned lock reads as a miss and writes as a
/// no-op: a caching failure must never alter the remote path's outcome.
struct TtlMap<K, V> {
    ttl: Duration,
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
}

impl<K: Eq + Hash, V: Clone> TtlMap<K, V> {
    fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Value if present and not expired.
    fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.lock().ok()?;
        let entry = entries.get(key)?;
        if entry.is_expired(self.ttl) {
            return None;
        }
        Some(entry.value.clone())
    }

    /// Value if present, expired or not. Fallback reads only.
    fn get_stale(&self, key: &K) -> Option<V> {
        let entries = self.entries.lock().ok()?;
        entries.get(key).map(|entry| entry.value.clone())
    }

    fn contains_fresh(&self, key: &K) -> bool {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| {
                entries
                    .get(key)
                    .map(|entry| !entry.is_expired(self.ttl))
            })
            .unwrap_or(false)
    }

    fn insert(&self, key: K, value: V) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key, CacheEntry::fresh(value));
        }
    }

    fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

/// Normalize a query into its cache key: trimmed and lowercased, so
/// `"Flutter "` and `"flutter"` share an entry.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Shared in-memory cache for the repository coordinator.
pub struct CacheStore {
    results: TtlMap<String, SearchResults<Repository>>,
    repositories: TtlMap<u64, Repository>,
}

impl CacheStore {
    /// Create a store whose entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            results: TtlMap::new(ttl),
            repositories: TtlMap::new(ttl),
        }
    }

    /// Fresh result page for this query, if any.
    pub fn get_results(&self, query: &str) -> Option<SearchResults<Repository>> {
        self.results.get(&normalize_query(query))
    }

    /// Result page for this query ignoring TTL. Used only by the
    /// remote-failure fallback path.
    pub fn get_results_stale(&self, query: &str) -> Option<SearchResults<Repository>> {
        self.results.get_stale(&normalize_query(query))
    }

    /// True iff a non-expired result page exists for this query.
    pub fn is_fresh(&self, query: &str) -> bool {
        self.results.contains_fresh(&normalize_query(query))
    }

    /// Store a result page, then seed a per-repository entry for every item
    /// it contains (explicit two-step write-through fan-out).
    pub fn put_results(&self, query: &str, results: &SearchResults<Repository>) {
        self.results
            .insert(normalize_query(query), results.clone());
        for repository in &results.items {
            self.repositories.insert(repository.id, repository.clone());
        }
        tracing::debug!(
            query = %normalize_query(query),
            seeded = results.items.len(),
            "cached search results"
        );
    }

    /// Fresh repository entry by id, if any.
    pub fn get_repository(&self, id: u64) -> Option<Repository> {
        self.repositories.get(&id)
    }

    /// Repository entry by id ignoring TTL. Fallback reads only.
    pub fn get_repository_stale(&self, id: u64) -> Option<Repository> {
        self.repositories.get_stale(&id)
    }

    /// Store a single repository entry.
    pub fn put_repository(&self, repository: &Repository) {
        self.repositories.insert(repository.id, repository.clone());
    }

    /// Drop every entry in both keyspaces.
    pub fn clear(&self) {
        self.results.clear();
        self.repositories.clear();
    }
}
