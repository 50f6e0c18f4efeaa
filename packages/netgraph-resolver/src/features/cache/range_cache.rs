//! Range Cache: network allocations queryable by address or sub-network
//!
//! Registries answer with allocations covering many addresses. Once the
//! allocation for one address is known, every other address inside it is
//! answered from here.
//!
//! Overlap policy: when several unexpired ranges contain the target, the
//! most specific (longest prefix) wins; ties go to the most recently stored.

use parking_lot::RwLock;
use prometheus::Registry;
use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use super::error::CacheResult;
use super::metrics::RangeCacheMetrics;
use crate::features::network::{unmap, IpNetwork};

struct RangeRecord<V> {
    network: IpNetwork,
    value: V,
    expires_at: Instant,
    /// Store order, for the most-recent tie-break
    sequence: u64,
}

impl<V> RangeRecord<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Range Cache
///
/// One lock per address family, so IPv4 and IPv6 traffic never contend.
/// Reads take a shared lock; the exclusive lock is only taken to store or
/// to drop ranges found expired during a read.
pub struct RangeCache<V> {
    v4: RwLock<Vec<RangeRecord<V>>>,
    v6: RwLock<Vec<RangeRecord<V>>>,
    sequence: AtomicU64,
    metrics: Arc<RangeCacheMetrics>,
}

impl<V: Clone> RangeCache<V> {
    pub fn new(namespace: &str, registry: &Registry) -> CacheResult<Self> {
        Ok(Self {
            v4: RwLock::new(Vec::new()),
            v6: RwLock::new(Vec::new()),
            sequence: AtomicU64::new(0),
            metrics: Arc::new(RangeCacheMetrics::new(namespace, registry)?),
        })
    }

    /// Narrowest unexpired range containing `addr`
    ///
    /// An IPv4-mapped IPv6 address searches the IPv4 ranges.
    pub fn search_point(&self, addr: &IpAddr) -> Option<V> {
        let canonical = unmap(*addr);
        let found = self.search(canonical.is_ipv4(), |network| network.contains(&canonical));
        tracing::debug!(addr = %addr, hit = found.is_some(), "range cache point search");
        found
    }

    /// Narrowest unexpired range that `network` is a subset of
    pub fn search_network(&self, network: &IpNetwork) -> Option<V> {
        let found = self.search(network.is_ipv4(), |stored| stored.contains_network(network));
        tracing::debug!(network = %network, hit = found.is_some(), "range cache network search");
        found
    }

    /// Store `value` for `network`, replacing an earlier record for the same
    /// network
    pub fn store(&self, network: IpNetwork, value: V, ttl: Duration) {
        let record = RangeRecord {
            network,
            value,
            expires_at: Instant::now() + ttl,
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed),
        };

        let mut records = self.family(network.is_ipv4()).write();
        records.retain(|existing| existing.network != network);
        records.push(record);
        drop(records);

        tracing::debug!(network = %network, "range cache store");
        self.metrics.entries.set(self.len() as i64);
    }

    fn search<F>(&self, ipv4: bool, matches: F) -> Option<V>
    where
        F: Fn(&IpNetwork) -> bool,
    {
        let now = Instant::now();
        let lock = self.family(ipv4);
        let mut saw_expired = false;

        let found = {
            let records = lock.read();
            records
                .iter()
                .filter(|record| {
                    if record.is_expired(now) {
                        saw_expired = true;
                        false
                    } else {
                        matches(&record.network)
                    }
                })
                .max_by_key(|record| (record.network.prefix_len(), record.sequence))
                .map(|record| record.value.clone())
        };

        if saw_expired {
            self.discard_expired(lock, now);
        }

        if found.is_some() {
            self.metrics.hits.inc();
        } else {
            self.metrics.misses.inc();
        }

        found
    }

    fn discard_expired(&self, lock: &RwLock<Vec<RangeRecord<V>>>, now: Instant) {
        let mut records = lock.write();
        let before = records.len();
        records.retain(|record| !record.is_expired(now));
        let removed = before - records.len();
        drop(records);

        if removed > 0 {
            self.metrics.expired.inc_by(removed as u64);
            self.metrics.entries.set(self.len() as i64);
        }
    }

    fn family(&self, ipv4: bool) -> &RwLock<Vec<RangeRecord<V>>> {
        if ipv4 {
            &self.v4
        } else {
            &self.v6
        }
    }

    /// Number of stored ranges (expired ones included until next touched)
    pub fn len(&self) -> usize {
        self.v4.read().len() + self.v6.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.v4.write().clear();
        self.v6.write().clear();
        self.metrics.entries.set(0);
    }

    pub fn hit_rate(&self) -> f64 {
        self.metrics.hit_rate()
    }

    pub fn metrics(&self) -> Arc<RangeCacheMetrics> {
        Arc::clone(&self.metrics)
    }
}
