//! Resolution caches
//!
//! - **Result cache**: memoizes items *and* classified errors per query
//!   identity, with a TTL checked lazily on lookup.
//! - **Range cache**: maps observed network allocations to registry
//!   objects so any address inside a known allocation resolves without a
//!   new upstream call.
//!
//! Both are constructed explicitly and shared through `Arc`s handed to the
//! adapters at construction time.

mod error;
mod metrics;
mod range_cache;
mod result_cache;
mod types;

pub use error::{CacheError, CacheResult};
pub use metrics::{RangeCacheMetrics, ResultCacheMetrics};
pub use range_cache::RangeCache;
pub use result_cache::ResultCache;
pub use types::{CacheKey, CachedValue, Lookup};
