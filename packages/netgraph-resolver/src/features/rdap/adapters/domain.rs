//! `rdap-domain`: registered domain for a hostname

use async_trait::async_trait;

use super::{RdapContext, SOURCE_NAME};
use crate::errors::{QueryError, Result};
use crate::features::cache::Lookup;
use crate::features::rdap::application::attributes::domain_attributes;
use crate::features::rdap::application::links::{
    entity_edges, nameserver_edges, network_edge, DOMAIN_TYPE,
};
use crate::features::rdap::application::DomainResolver;
use crate::shared::models::{Item, QueryMethod};
use crate::shared::ports::{ensure_scope, Adapter};

pub struct DomainAdapter {
    ctx: RdapContext,
    resolver: DomainResolver,
}

impl DomainAdapter {
    pub fn new(ctx: RdapContext) -> Self {
        let resolver = DomainResolver::new(ctx.client.clone());
        Self { ctx, resolver }
    }

    async fn resolve(&self, scope: &str, query: &str) -> Result<Vec<Item>> {
        let resolved = self.resolver.search(query).await?;
        let domain = &resolved.domain;

        let mut edges = nameserver_edges(&domain.nameservers, &resolved.urls);
        edges.extend(entity_edges(&domain.entities));
        edges.extend(network_edge(domain.network.as_deref()));

        let item = Item::new(DOMAIN_TYPE, scope, "handle", domain_attributes(domain)).with_edges(edges);

        Ok(vec![item])
    }
}

#[async_trait]
impl Adapter for DomainAdapter {
    fn item_type(&self) -> &'static str {
        DOMAIN_TYPE
    }

    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn get(&self, scope: &str, _query: &str, _ignore_cache: bool) -> Result<Item> {
        ensure_scope(self, scope)?;

        Err(
            QueryError::not_found("Domains can't be queried by handle, use the SEARCH method instead")
                .with_scope(scope)
                .with_item_type(DOMAIN_TYPE)
                .with_source_name(SOURCE_NAME),
        )
    }

    async fn list(&self, scope: &str, _ignore_cache: bool) -> Result<Vec<Item>> {
        ensure_scope(self, scope)?;

        Err(
            QueryError::not_found("Domains cannot be listed, use the SEARCH method instead")
                .with_scope(scope)
                .with_item_type(DOMAIN_TYPE)
                .with_source_name(SOURCE_NAME),
        )
    }

    /// Search by hostname, e.g. `www.google.com`
    async fn search(&self, scope: &str, query: &str, ignore_cache: bool) -> Result<Vec<Item>> {
        ensure_scope(self, scope)?;

        let key = self.ctx.key(QueryMethod::Search, scope, DOMAIN_TYPE, query);
        match self.ctx.lookup(&key, ignore_cache) {
            Lookup::Items(items) => return Ok(items),
            Lookup::Error(err) => return Err(err),
            Lookup::Miss => {}
        }

        let outcome = self
            .resolve(scope, query)
            .await
            .map_err(|err| err.in_context(scope, DOMAIN_TYPE, SOURCE_NAME));

        self.ctx.settle(key, outcome)
    }
}
