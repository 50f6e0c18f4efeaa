//! Core types for the result cache

use tokio::time::Instant;

use crate::errors::{QueryError, Result};
use crate::shared::models::{Item, QueryIdentity};

/// Cache key: the full query identity
pub type CacheKey = QueryIdentity;

/// What a cache entry holds: a success (possibly empty) or a classified error
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Items(Vec<Item>),
    Error(QueryError),
}

/// Outcome of a result cache lookup
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// Nothing usable stored (absent, expired or bypassed)
    Miss,
    /// A stored success; may be empty
    Items(Vec<Item>),
    /// A stored negative result, replayed with its original classification
    Error(QueryError),
}

impl Lookup {
    pub fn is_hit(&self) -> bool {
        !matches!(self, Lookup::Miss)
    }

    /// Replay a hit as a single-item result
    ///
    /// A hit with no items yields `not_found()`. `None` on a miss.
    pub fn into_single(self, not_found: impl FnOnce() -> QueryError) -> Option<Result<Item>> {
        match self {
            Lookup::Miss => None,
            Lookup::Items(items) => Some(items.into_iter().next().ok_or_else(not_found)),
            Lookup::Error(err) => Some(Err(err)),
        }
    }
}

impl From<CachedValue> for Lookup {
    fn from(value: CachedValue) -> Self {
        match value {
            CachedValue::Items(items) => Lookup::Items(items),
            CachedValue::Error(err) => Lookup::Error(err),
        }
    }
}

/// Stored entry with its expiry instant
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry {
    pub value: CachedValue,
    pub expires_at: Instant,
}

impl CacheEntry {
    pub fn new(value: CachedValue, expires_at: Instant) -> Self {
        Self { value, expires_at }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
