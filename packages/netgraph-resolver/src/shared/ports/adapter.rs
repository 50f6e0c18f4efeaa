//! Adapter Port (Trait Interface)
//!
//! The orchestrating engine drives every item type through this trait. It
//! supplies `(scope, query, ignore_cache)` and consumes items with edges.

use async_trait::async_trait;

use crate::errors::{QueryError, Result};
use crate::shared::models::{Item, GLOBAL_SCOPE};

/// Resolves one item type
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Item type produced, e.g. `rdap-domain`
    fn item_type(&self) -> &'static str;

    /// Source name used in cache identities, e.g. `rdap`
    fn name(&self) -> &'static str;

    /// Weighting between duplicate adapters for the same type
    fn weight(&self) -> i32 {
        100
    }

    /// Scopes this adapter can find items in
    fn scopes(&self) -> Vec<String> {
        vec![GLOBAL_SCOPE.to_string()]
    }

    /// Get a single item by its unique attribute value
    async fn get(&self, scope: &str, query: &str, ignore_cache: bool) -> Result<Item>;

    /// List all items in a scope
    async fn list(&self, scope: &str, ignore_cache: bool) -> Result<Vec<Item>>;

    /// Search with an adapter-specific query
    async fn search(&self, scope: &str, query: &str, _ignore_cache: bool) -> Result<Vec<Item>> {
        ensure_scope(self, scope)?;

        Err(QueryError::not_found(format!(
            "{} does not support the SEARCH method (query: {})",
            self.item_type(),
            query
        ))
        .with_scope(scope)
        .with_item_type(self.item_type())
        .with_source_name(self.name()))
    }
}

/// Fail with `NoScope` unless `scope` is served by `adapter`
pub fn ensure_scope<A: Adapter + ?Sized>(adapter: &A, scope: &str) -> Result<()> {
    if adapter.scopes().iter().any(|s| s == scope) {
        Ok(())
    } else {
        Err(QueryError::no_scope(scope)
            .with_item_type(adapter.item_type())
            .with_source_name(adapter.name()))
    }
}
