//! `rdap-ip-network`: most specific network containing an IP or CIDR
//!
//! Only SEARCH resolves anything. Networks can't be listed, and their
//! unique attribute (the handle) can't be used to query a registry.

use async_trait::async_trait;
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::Arc;

use super::{RdapContext, SOURCE_NAME};
use crate::errors::{QueryError, Result};
use crate::features::cache::{Lookup, RangeCache};
use crate::features::network::{covering_network, IpNetwork};
use crate::features::rdap::application::attributes::ip_network_attributes;
use crate::features::rdap::application::links::{entity_edges, IP_NETWORK_TYPE};
use crate::features::rdap::domain::{RdapIpNetwork, RdapObject, RdapRequest, RequestKind};
use crate::shared::models::{Item, QueryMethod};
use crate::shared::ports::{ensure_scope, Adapter};

/// The query as something the range cache can answer
enum RangeTarget {
    Point(IpAddr),
    Network(IpNetwork),
}

impl RangeTarget {
    fn parse(query: &str) -> Result<Self> {
        if let Ok(addr) = IpAddr::from_str(query) {
            return Ok(RangeTarget::Point(addr));
        }
        IpNetwork::parse_cidr(query)
            .map(RangeTarget::Network)
            .map_err(|_| QueryError::malformed(format!("Invalid IP or CIDR: {}", query)))
    }
}

pub struct IpNetworkAdapter {
    ctx: RdapContext,
    ranges: Arc<RangeCache<Arc<RdapIpNetwork>>>,
}

impl IpNetworkAdapter {
    pub fn new(ctx: RdapContext, ranges: Arc<RangeCache<Arc<RdapIpNetwork>>>) -> Self {
        Self { ctx, ranges }
    }

    async fn resolve(&self, scope: &str, query: &str) -> Result<Vec<Item>> {
        let target = RangeTarget::parse(query)?;

        let cached = match &target {
            RangeTarget::Point(addr) => self.ranges.search_point(addr),
            RangeTarget::Network(network) => self.ranges.search_network(network),
        };

        let network = match cached {
            Some(network) => network,
            None => self.fetch_network(query).await?,
        };

        let item = Item::new(IP_NETWORK_TYPE, scope, "handle", ip_network_attributes(&network))
            .with_edges(entity_edges(&network.entities));

        Ok(vec![item])
    }

    /// Ask the registry and remember the allocation for every address in it
    async fn fetch_network(&self, query: &str) -> Result<Arc<RdapIpNetwork>> {
        let response = self
            .ctx
            .fetch(RdapRequest::new(RequestKind::IpNetwork, query))
            .await?;

        let network = match response.object {
            Some(RdapObject::IpNetwork(network)) => Arc::new(network),
            Some(other) => {
                tracing::warn!(query = %query, class = other.class_name(), "unexpected RDAP object");
                return Err(QueryError::unexpected_response(format!(
                    "Expected ip network, got {}",
                    other.class_name()
                )));
            }
            None => {
                return Err(QueryError::not_found(format!(
                    "No IP Network found for {}",
                    query
                )))
            }
        };

        let covering = covering_network(&network.start_address, &network.end_address)
            .map_err(|err| QueryError::malformed(err.to_string()))?;

        self.ranges.store(covering, Arc::clone(&network), self.ctx.ttl);

        Ok(network)
    }
}

#[async_trait]
impl Adapter for IpNetworkAdapter {
    fn item_type(&self) -> &'static str {
        IP_NETWORK_TYPE
    }

    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    /// Replays a cached result; never queries the registry
    async fn get(&self, scope: &str, query: &str, ignore_cache: bool) -> Result<Item> {
        ensure_scope(self, scope)?;

        let key = self.ctx.key(QueryMethod::Get, scope, IP_NETWORK_TYPE, query);
        let not_found = || {
            QueryError::not_found(
                "IP networks can't be queried by handle, use the SEARCH method instead",
            )
            .with_scope(scope)
            .with_item_type(IP_NETWORK_TYPE)
            .with_source_name(SOURCE_NAME)
        };

        self.ctx
            .lookup(&key, ignore_cache)
            .into_single(not_found)
            .unwrap_or_else(|| Err(not_found()))
    }

    async fn list(&self, scope: &str, _ignore_cache: bool) -> Result<Vec<Item>> {
        ensure_scope(self, scope)?;

        Err(
            QueryError::not_found("IP networks cannot be listed, use the SEARCH method instead")
                .with_scope(scope)
                .with_item_type(IP_NETWORK_TYPE)
                .with_source_name(SOURCE_NAME),
        )
    }

    async fn search(&self, scope: &str, query: &str, ignore_cache: bool) -> Result<Vec<Item>> {
        ensure_scope(self, scope)?;

        let key = self.ctx.key(QueryMethod::Search, scope, IP_NETWORK_TYPE, query);
        match self.ctx.lookup(&key, ignore_cache) {
            Lookup::Items(items) => return Ok(items),
            Lookup::Error(err) => return Err(err),
            Lookup::Miss => {}
        }

        let outcome = self
            .resolve(scope, query)
            .await
            .map_err(|err| err.in_context(scope, IP_NETWORK_TYPE, SOURCE_NAME));

        self.ctx.settle(key, outcome)
    }
}
