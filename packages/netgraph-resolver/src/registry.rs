//! Adapter registry
//!
//! Builds the shared caches once, wires every adapter to them, and
//! dispatches queries (typically edge targets) to the adapter for their
//! item type.

use prometheus::Registry;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::ResolverConfig;
use crate::errors::{QueryError, Result};
use crate::features::cache::{CacheResult, RangeCache, ResultCache};
use crate::features::dns::{DnsAdapter, DnsClient};
use crate::features::http::{HttpAdapter, HttpClient};
use crate::features::ip::IpAdapter;
use crate::features::rdap::domain::RdapIpNetwork;
use crate::features::rdap::{
    AsnAdapter, DomainAdapter, EntityAdapter, IpNetworkAdapter, NameserverAdapter, RdapClient,
    RdapContext,
};
use crate::shared::models::{Item, ItemQuery, QueryMethod};
use crate::shared::ports::Adapter;

/// Metric namespace of the shared caches
pub const METRICS_NAMESPACE: &str = "netgraph";

pub struct AdapterRegistry {
    adapters: BTreeMap<&'static str, Arc<dyn Adapter>>,
    result_cache: Arc<ResultCache>,
    range_cache: Arc<RangeCache<Arc<RdapIpNetwork>>>,
}

impl AdapterRegistry {
    pub fn new(
        config: &ResolverConfig,
        rdap_client: Arc<dyn RdapClient>,
        dns_client: Arc<dyn DnsClient>,
        http_client: Arc<dyn HttpClient>,
        registry: &Registry,
    ) -> CacheResult<Self> {
        let result_cache = Arc::new(ResultCache::new(METRICS_NAMESPACE, registry)?);
        let range_cache = Arc::new(RangeCache::new(METRICS_NAMESPACE, registry)?);

        let ctx = RdapContext::new(rdap_client, Arc::clone(&result_cache), config.rdap_ttl());

        let adapters: Vec<Arc<dyn Adapter>> = vec![
            Arc::new(IpNetworkAdapter::new(ctx.clone(), Arc::clone(&range_cache))),
            Arc::new(DomainAdapter::new(ctx.clone())),
            Arc::new(EntityAdapter::new(ctx.clone())),
            Arc::new(NameserverAdapter::new(ctx.clone())),
            Arc::new(AsnAdapter::new(ctx)),
            Arc::new(DnsAdapter::new(
                dns_client,
                Arc::clone(&result_cache),
                config.dns_ttl(),
                config.dns.reverse_lookup,
            )),
            Arc::new(HttpAdapter::new(
                http_client,
                Arc::clone(&result_cache),
                config.http_ttl(),
            )),
            Arc::new(IpAdapter::new()),
        ];

        let adapters = adapters
            .into_iter()
            .map(|adapter| (adapter.item_type(), adapter))
            .collect();

        Ok(Self {
            adapters,
            result_cache,
            range_cache,
        })
    }

    pub fn get(&self, item_type: &str) -> Option<Arc<dyn Adapter>> {
        self.adapters.get(item_type).cloned()
    }

    /// Registered item types, sorted
    pub fn item_types(&self) -> Vec<&'static str> {
        self.adapters.keys().copied().collect()
    }

    /// Run `query` against the adapter for its type
    ///
    /// A GET yields a one-item list.
    pub async fn execute(&self, query: &ItemQuery, ignore_cache: bool) -> Result<Vec<Item>> {
        let adapter = self.get(&query.item_type).ok_or_else(|| {
            QueryError::not_found(format!("No adapter for type {}", query.item_type))
                .with_scope(query.scope.as_str())
                .with_item_type(query.item_type.as_str())
        })?;

        tracing::debug!(
            item_type = %query.item_type,
            method = %query.method,
            scope = %query.scope,
            query = %query.query,
            "dispatch"
        );

        match query.method {
            QueryMethod::Get => adapter
                .get(&query.scope, &query.query, ignore_cache)
                .await
                .map(|item| vec![item]),
            QueryMethod::List => adapter.list(&query.scope, ignore_cache).await,
            QueryMethod::Search => {
                adapter
                    .search(&query.scope, &query.query, ignore_cache)
                    .await
            }
        }
    }

    pub fn result_cache(&self) -> Arc<ResultCache> {
        Arc::clone(&self.result_cache)
    }

    pub fn range_cache(&self) -> Arc<RangeCache<Arc<RdapIpNetwork>>> {
        Arc::clone(&self.range_cache)
    }
}
