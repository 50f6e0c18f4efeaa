//! Result Cache: per-identity memoization of items and classified errors

use dashmap::DashMap;
use prometheus::Registry;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use super::error::CacheResult;
use super::metrics::ResultCacheMetrics;
use super::types::{CacheEntry, CacheKey, CachedValue, Lookup};
use crate::errors::{QueryError, Result};
use crate::shared::models::Item;

/// Result Cache
///
/// Sharded concurrent map from query identity to a positive or negative
/// entry. Expiry is checked when an entry is read; there is no background
/// sweep. Writers to different keys land on different shards and don't
/// block each other.
pub struct ResultCache {
    store: DashMap<CacheKey, CacheEntry>,
    metrics: Arc<ResultCacheMetrics>,
}

impl ResultCache {
    /// Create a cache whose metrics are registered under `namespace`
    pub fn new(namespace: &str, registry: &Registry) -> CacheResult<Self> {
        Ok(Self {
            store: DashMap::new(),
            metrics: Arc::new(ResultCacheMetrics::new(namespace, registry)?),
        })
    }

    /// Look up `key`
    ///
    /// `bypass = true` forces a miss without touching the stored entry; the
    /// caller's subsequent store still lands.
    pub fn lookup(&self, key: &CacheKey, bypass: bool) -> Lookup {
        if bypass {
            self.metrics.bypassed.inc();
            tracing::debug!(key = %key, "result cache bypassed");
            return Lookup::Miss;
        }

        let now = Instant::now();
        let mut expired = false;

        if let Some(entry) = self.store.get(key) {
            if entry.is_expired(now) {
                expired = true;
            } else {
                match &entry.value {
                    CachedValue::Items(_) => self.metrics.hits.inc(),
                    CachedValue::Error(_) => self.metrics.negative_hits.inc(),
                }
                tracing::debug!(key = %key, "result cache hit");
                return entry.value.clone().into();
            }
        }

        if expired {
            // Only drop it if it is still the expired entry; a concurrent
            // writer may have replaced it since the read guard was released.
            if self
                .store
                .remove_if(key, |_, entry| entry.is_expired(now))
                .is_some()
            {
                self.metrics.expired.inc();
                self.metrics.entries.set(self.store.len() as i64);
                tracing::debug!(key = %key, "result cache entry expired");
            }
        }

        self.metrics.misses.inc();
        Lookup::Miss
    }

    /// Store a success (an empty list is a valid "confirmed nothing")
    pub fn store_items(&self, key: CacheKey, items: Vec<Item>, ttl: Duration) {
        tracing::debug!(key = %key, items = items.len(), "result cache store");
        self.insert(key, CachedValue::Items(items), ttl);
    }

    /// Store a classified error as a negative entry
    pub fn store_error(&self, key: CacheKey, error: QueryError, ttl: Duration) {
        tracing::debug!(key = %key, kind = %error.kind, "result cache store error");
        self.insert(key, CachedValue::Error(error), ttl);
    }

    /// Record the outcome of a resolution under `key` and hand it back
    ///
    /// Successes are always stored; errors only when their kind is
    /// cacheable. Callers invoke this once the upstream call has completed,
    /// so a dropped resolution never writes anything.
    pub fn settle(&self, key: CacheKey, outcome: Result<Vec<Item>>, ttl: Duration) -> Result<Vec<Item>> {
        match &outcome {
            Ok(items) => self.store_items(key, items.clone(), ttl),
            Err(err) if err.is_cacheable() => self.store_error(key, err.clone(), ttl),
            Err(err) => {
                tracing::debug!(key = %key, kind = %err.kind, "not caching error");
            }
        }
        outcome
    }

    fn insert(&self, key: CacheKey, value: CachedValue, ttl: Duration) {
        let entry = CacheEntry::new(value, Instant::now() + ttl);
        self.store.insert(key, entry);
        self.metrics.entries.set(self.store.len() as i64);
    }

    /// Remove a single entry
    pub fn invalidate(&self, key: &CacheKey) {
        self.store.remove(key);
        self.metrics.entries.set(self.store.len() as i64);
    }

    /// Drop every expired entry now
    ///
    /// Lookups already discard expired entries; this only bounds memory for
    /// keys that are never asked for again.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut purged = 0;

        self.store.retain(|_, entry| {
            if entry.is_expired(now) {
                purged += 1;
                false
            } else {
                true
            }
        });

        if purged > 0 {
            tracing::debug!("result cache purged {} expired entries", purged);
            self.metrics.expired.inc_by(purged as u64);
            self.metrics.entries.set(self.store.len() as i64);
        }

        purged
    }

    /// Clear all entries
    pub fn clear(&self) {
        self.store.clear();
        self.metrics.entries.set(0);
    }

    /// Entry count, including entries that expired but weren't read since
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn hit_rate(&self) -> f64 {
        self.metrics.hit_rate()
    }

    pub fn metrics(&self) -> Arc<ResultCacheMetrics> {
        Arc::clone(&self.metrics)
    }
}
