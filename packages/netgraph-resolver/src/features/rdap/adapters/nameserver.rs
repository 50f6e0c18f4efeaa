//! `rdap-nameserver`: nameservers, searched by their RDAP URL

use async_trait::async_trait;

use super::{RdapContext, SOURCE_NAME};
use crate::errors::{QueryError, Result};
use crate::features::cache::Lookup;
use crate::features::rdap::application::attributes::nameserver_attributes;
use crate::features::rdap::application::links::{
    dns_name_edge, entity_edges, ip_edges, NAMESERVER_TYPE,
};
use crate::features::rdap::domain::{RdapObject, RdapRequest, RdapUrl, RequestKind};
use crate::shared::models::{Item, QueryMethod};
use crate::shared::ports::{ensure_scope, Adapter};

pub struct NameserverAdapter {
    ctx: RdapContext,
}

impl NameserverAdapter {
    pub fn new(ctx: RdapContext) -> Self {
        Self { ctx }
    }

    async fn resolve(&self, scope: &str, url: RdapUrl, query: &str) -> Result<Vec<Item>> {
        let request = RdapRequest::new(RequestKind::Nameserver, url.query).with_server(url.server_root);
        let response = self.ctx.fetch(request).await?;

        let nameserver = match response.object {
            Some(RdapObject::Nameserver(nameserver)) => nameserver,
            Some(other) => {
                tracing::warn!(query = %query, class = other.class_name(), "unexpected RDAP object");
                return Err(QueryError::unexpected_response(format!(
                    "Expected nameserver, got {}",
                    other.class_name()
                )));
            }
            None => {
                return Err(QueryError::not_found(format!(
                    "No nameserver found for {}",
                    query
                )))
            }
        };

        let mut edges = entity_edges(&nameserver.entities);
        edges.push(dns_name_edge(&nameserver.ldh_name));
        edges.extend(ip_edges(nameserver.ip_addresses.as_ref()));

        let item = Item::new(NAMESERVER_TYPE, scope, "ldhName", nameserver_attributes(&nameserver))
            .with_edges(edges);

        Ok(vec![item])
    }
}

#[async_trait]
impl Adapter for NameserverAdapter {
    fn item_type(&self) -> &'static str {
        NAMESERVER_TYPE
    }

    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    /// Replays a cached result; never queries the registry
    async fn get(&self, scope: &str, query: &str, ignore_cache: bool) -> Result<Item> {
        ensure_scope(self, scope)?;

        let key = self.ctx.key(QueryMethod::Get, scope, NAMESERVER_TYPE, query);
        let not_found = || {
            QueryError::not_found(
                "Nameservers can't be queried by handle, use the SEARCH method instead",
            )
            .with_scope(scope)
            .with_item_type(NAMESERVER_TYPE)
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
            QueryError::not_found("Nameservers cannot be listed, use the SEARCH method instead")
                .with_scope(scope)
                .with_item_type(NAMESERVER_TYPE)
                .with_source_name(SOURCE_NAME),
        )
    }

    /// Search by full nameserver URL, e.g.
    /// `https://rdap.verisign.com/com/v1/nameserver/NS1.GOOGLE.COM`
    async fn search(&self, scope: &str, query: &str, ignore_cache: bool) -> Result<Vec<Item>> {
        ensure_scope(self, scope)?;

        let key = self.ctx.key(QueryMethod::Search, scope, NAMESERVER_TYPE, query);
        match self.ctx.lookup(&key, ignore_cache) {
            Lookup::Items(items) => return Ok(items),
            Lookup::Error(err) => return Err(err),
            Lookup::Miss => {}
        }

        let url = RdapUrl::parse(query)
            .map_err(|err| err.in_context(scope, NAMESERVER_TYPE, SOURCE_NAME))?;
        if url.kind != RequestKind::Nameserver {
            return Err(QueryError::malformed(format!(
                "Expected URL to lookup nameserver, got {}",
                url.kind
            ))
            .in_context(scope, NAMESERVER_TYPE, SOURCE_NAME));
        }

        let outcome = self
            .resolve(scope, url, query)
            .await
            .map_err(|err| err.in_context(scope, NAMESERVER_TYPE, SOURCE_NAME));

        self.ctx.settle(key, outcome)
    }
}
