//! Prometheus metrics for the caches
//!
//! Metric names are prefixed with a caller-chosen namespace so several
//! caches can register into the same `Registry`.

use prometheus::{
    register_int_counter_with_registry, register_int_gauge_with_registry, IntCounter, IntGauge,
    Opts, Registry,
};

/// Result cache metrics
#[derive(Clone)]
pub struct ResultCacheMetrics {
    pub hits: IntCounter,
    pub negative_hits: IntCounter,
    pub misses: IntCounter,
    pub bypassed: IntCounter,
    pub expired: IntCounter,
    pub entries: IntGauge,
}

impl ResultCacheMetrics {
    pub fn new(namespace: &str, registry: &Registry) -> prometheus::Result<Self> {
        Ok(Self {
            hits: register_int_counter_with_registry!(
                Opts::new("result_cache_hits_total", "Result cache hits (items)")
                    .namespace(namespace),
                registry
            )?,
            negative_hits: register_int_counter_with_registry!(
                Opts::new(
                    "result_cache_negative_hits_total",
                    "Result cache hits replaying a cached error"
                )
                .namespace(namespace),
                registry
            )?,
            misses: register_int_counter_with_registry!(
                Opts::new("result_cache_misses_total", "Result cache misses").namespace(namespace),
                registry
            )?,
            bypassed: register_int_counter_with_registry!(
                Opts::new(
                    "result_cache_bypassed_total",
                    "Lookups that ignored the cache on request"
                )
                .namespace(namespace),
                registry
            )?,
            expired: register_int_counter_with_registry!(
                Opts::new(
                    "result_cache_expired_total",
                    "Entries discarded after their TTL elapsed"
                )
                .namespace(namespace),
                registry
            )?,
            entries: register_int_gauge_with_registry!(
                Opts::new("result_cache_entries", "Result cache entry count").namespace(namespace),
                registry
            )?,
        })
    }

    /// Fraction of non-bypassed lookups answered from the cache
    pub fn hit_rate(&self) -> f64 {
        let hits = (self.hits.get() + self.negative_hits.get()) as f64;
        let total = hits + self.misses.get() as f64;
        if total > 0.0 {
            hits / total
        } else {
            0.0
        }
    }
}

/// Range cache metrics
#[derive(Clone)]
pub struct RangeCacheMetrics {
    pub hits: IntCounter,
    pub misses: IntCounter,
    pub expired: IntCounter,
    pub entries: IntGauge,
}

impl RangeCacheMetrics {
    pub fn new(namespace: &str, registry: &Registry) -> prometheus::Result<Self> {
        Ok(Self {
            hits: register_int_counter_with_registry!(
                Opts::new("range_cache_hits_total", "Range cache hits").namespace(namespace),
                registry
            )?,
            misses: register_int_counter_with_registry!(
                Opts::new("range_cache_misses_total", "Range cache misses").namespace(namespace),
                registry
            )?,
            expired: register_int_counter_with_registry!(
                Opts::new(
                    "range_cache_expired_total",
                    "Network ranges discarded after their TTL elapsed"
                )
                .namespace(namespace),
                registry
            )?,
            entries: register_int_gauge_with_registry!(
                Opts::new("range_cache_entries", "Range cache entry count").namespace(namespace),
                registry
            )?,
        })
    }

    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.get() as f64;
        let total = hits + self.misses.get() as f64;
        if total > 0.0 {
            hits / total
        } else {
            0.0
        }
    }
}
