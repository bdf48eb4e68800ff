//! Search result caching.
//!
//! The cache maps a search query to the records it matched. It is populated
//! on miss by the service and cleared in full whenever an employee is
//! created, since a new employee may match any cached query.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::CacheConfig;
use crate::employees::types::EmployeeRecord;
use crate::observability::metrics;

/// Query → results cache used by the service for name searches.
///
/// `epoch` is read before computing a result and passed back to `insert`;
/// an insert whose epoch predates the latest `invalidate_all` is dropped.
pub trait SearchCache: Send + Sync {
    /// Cached results for `query`, if present and fresh.
    fn get(&self, query: &str) -> Option<Vec<EmployeeRecord>>;

    /// Current invalidation epoch.
    fn epoch(&self) -> u64;

    /// Store results computed while `epoch` was current.
    fn insert(&self, query: &str, results: Vec<EmployeeRecord>, epoch: u64);

    /// Drop every entry.
    fn invalidate_all(&self);
}

struct CachedSearch {
    results: Vec<EmployeeRecord>,
    stored_at: Instant,
}

/// Concurrent in-memory search cache.
#[derive(Clone, Default)]
pub struct DashMapSearchCache {
    inner: Arc<DashMap<String, CachedSearch>>,
    epoch: Arc<AtomicU64>,
    ttl: Option<Duration>,
}

impl DashMapSearchCache {
    /// Create a cache whose entries live until invalidated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache whose entries also expire after `ttl`.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl: Some(ttl),
            ..Self::default()
        }
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn is_fresh(&self, entry: &CachedSearch) -> bool {
        self.ttl.map_or(true, |ttl| entry.stored_at.elapsed() < ttl)
    }
}

impl SearchCache for DashMapSearchCache {
    fn get(&self, query: &str) -> Option<Vec<EmployeeRecord>> {
        let hit = self
            .inner
            .get(query)
            .filter(|entry| self.is_fresh(entry.value()))
            .map(|entry| entry.value().results.clone());
        metrics::record_cache_lookup(hit.is_some());
        hit
    }

    fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    fn insert(&self, query: &str, results: Vec<EmployeeRecord>, epoch: u64) {
        if epoch != self.epoch() {
            tracing::debug!(query, "Discarding search result computed before invalidation");
            return;
        }
        self.inner.insert(
            query.to_string(),
            CachedSearch {
                results,
                stored_at: Instant::now(),
            },
        );
        // An invalidation may have landed between the check and the insert.
        if epoch != self.epoch() {
            self.inner.remove(query);
        }
    }

    fn invalidate_all(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        self.inner.clear();
        metrics::record_cache_invalidation();
        tracing::debug!("Search cache invalidated");
    }
}

/// A cache that stores nothing. Every search goes upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSearchCache;

impl SearchCache for NoopSearchCache {
    fn get(&self, _query: &str) -> Option<Vec<EmployeeRecord>> {
        None
    }

    fn epoch(&self) -> u64 {
        0
    }

    fn insert(&self, _query: &str, _results: Vec<EmployeeRecord>, _epoch: u64) {}

    fn invalidate_all(&self) {}
}

/// Build the cache described by `config`.
pub fn from_config(config: &CacheConfig) -> Arc<dyn SearchCache> {
    match (config.enabled, config.ttl_secs) {
        (false, _) => Arc::new(NoopSearchCache),
        (true, Some(ttl)) => Arc::new(DashMapSearchCache::with_ttl(Duration::from_secs(ttl))),
        (true, None) => Arc::new(DashMapSearchCache::new()),
    }
}
