//! RDAP adapters (source name `rdap`)
//!
//! All five share one [`RdapContext`]: the client, the result cache and the
//! TTL. The IP network adapter additionally owns the range cache.

mod autnum;
mod domain;
mod entity;
mod ip_network;
mod nameserver;

pub use autnum::AsnAdapter;
pub use domain::DomainAdapter;
pub use entity::EntityAdapter;
pub use ip_network::IpNetworkAdapter;
pub use nameserver::NameserverAdapter;

use std::sync::Arc;
use std::time::Duration;

use crate::errors::{QueryError, Result};
use crate::features::cache::{CacheKey, Lookup, ResultCache};
use crate::features::rdap::domain::{
    ClientError, ClientErrorKind, RdapClient, RdapRequest, RdapResponse,
};
use crate::shared::models::{Item, QueryMethod};

pub const SOURCE_NAME: &str = "rdap";

/// Classify a client error
///
/// Only a confirmed "object does not exist" becomes not-found; every other
/// client failure is an upstream error.
pub fn wrap_client_error(err: ClientError) -> QueryError {
    match err.kind {
        ClientErrorKind::ObjectDoesNotExist => QueryError::not_found(err.to_string()),
        _ => QueryError::upstream(err.to_string()),
    }
}

/// Shared state handed to every RDAP adapter
#[derive(Clone)]
pub struct RdapContext {
    pub client: Arc<dyn RdapClient>,
    pub cache: Arc<ResultCache>,
    pub ttl: Duration,
}

impl RdapContext {
    pub fn new(client: Arc<dyn RdapClient>, cache: Arc<ResultCache>, ttl: Duration) -> Self {
        Self { client, cache, ttl }
    }

    pub(crate) fn key(&self, method: QueryMethod, scope: &str, item_type: &str, query: &str) -> CacheKey {
        CacheKey::new(SOURCE_NAME, method, scope, item_type, query)
    }

    pub(crate) fn lookup(&self, key: &CacheKey, ignore_cache: bool) -> Lookup {
        self.cache.lookup(key, ignore_cache)
    }

    /// Run one request, classifying client errors
    pub(crate) async fn fetch(&self, request: RdapRequest) -> Result<RdapResponse> {
        tracing::info!(
            kind = %request.kind,
            query = %request.query,
            server = request.server.as_deref().unwrap_or("bootstrap"),
            "rdap request"
        );

        self.client.execute(request).await.map_err(wrap_client_error)
    }

    pub(crate) fn settle(&self, key: CacheKey, outcome: Result<Vec<Item>>) -> Result<Vec<Item>> {
        self.cache.settle(key, outcome, self.ttl)
    }
}
