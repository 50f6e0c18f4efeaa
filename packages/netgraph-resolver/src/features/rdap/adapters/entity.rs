//! `rdap-entity`: registry contacts and organisations
//!
//! GET takes a bare handle and lets the client bootstrap the server. SEARCH
//! takes the entity's full URL (as found in self links) and queries that
//! server directly.

use async_trait::async_trait;

use super::{RdapContext, SOURCE_NAME};
use crate::errors::{QueryError, Result};
use crate::features::cache::{CacheKey, Lookup};
use crate::features::rdap::application::attributes::entity_attributes;
use crate::features::rdap::application::links::{autnum_edges, entity_edges, ENTITY_TYPE};
use crate::features::rdap::domain::{RdapObject, RdapRequest, RdapUrl, RequestKind};
use crate::shared::models::{Item, QueryMethod};
use crate::shared::ports::{ensure_scope, Adapter};

pub struct EntityAdapter {
    ctx: RdapContext,
}

impl EntityAdapter {
    pub fn new(ctx: RdapContext) -> Self {
        Self { ctx }
    }

    async fn resolve(&self, scope: &str, request: RdapRequest) -> Result<Vec<Item>> {
        let handle = request.query.clone();
        let response = self.ctx.fetch(request).await?;

        let entity = match response.object {
            Some(RdapObject::Entity(entity)) => entity,
            Some(other) => {
                tracing::warn!(query = %handle, class = other.class_name(), "unexpected RDAP object");
                return Err(QueryError::unexpected_response(format!(
                    "Expected entity, got {}",
                    other.class_name()
                )));
            }
            None => {
                return Err(QueryError::not_found(format!(
                    "No entity found for {}",
                    handle
                )))
            }
        };

        // Related networks are left out: some entities hold hundreds
        let mut edges = entity_edges(&entity.entities);
        edges.extend(autnum_edges(&entity.autnums, scope));

        let item = Item::new(ENTITY_TYPE, scope, "handle", entity_attributes(&entity)).with_edges(edges);

        Ok(vec![item])
    }

    async fn run(&self, key: CacheKey, scope: &str, request: RdapRequest) -> Result<Vec<Item>> {
        let outcome = self
            .resolve(scope, request)
            .await
            .map_err(|err| err.in_context(scope, ENTITY_TYPE, SOURCE_NAME));

        self.ctx.settle(key, outcome)
    }
}

#[async_trait]
impl Adapter for EntityAdapter {
    fn item_type(&self) -> &'static str {
        ENTITY_TYPE
    }

    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    /// Get by handle, e.g. `APNIC-LABS`
    async fn get(&self, scope: &str, query: &str, ignore_cache: bool) -> Result<Item> {
        ensure_scope(self, scope)?;

        let key = self.ctx.key(QueryMethod::Get, scope, ENTITY_TYPE, query);
        let not_found = || {
            QueryError::not_found(format!("No entity found for {}", query))
                .with_scope(scope)
                .with_item_type(ENTITY_TYPE)
                .with_source_name(SOURCE_NAME)
        };

        if let Some(replayed) = self.ctx.lookup(&key, ignore_cache).into_single(not_found) {
            return replayed;
        }

        let items = self
            .run(key, scope, RdapRequest::new(RequestKind::Entity, query))
            .await?;

        items.into_iter().next().ok_or_else(not_found)
    }

    /// Entities can't be enumerated; nothing to list
    async fn list(&self, scope: &str, _ignore_cache: bool) -> Result<Vec<Item>> {
        ensure_scope(self, scope)?;
        Ok(Vec::new())
    }

    /// Search by full entity URL, e.g. `https://rdap.apnic.net/entity/AIC3-AP`
    async fn search(&self, scope: &str, query: &str, ignore_cache: bool) -> Result<Vec<Item>> {
        ensure_scope(self, scope)?;

        let key = self.ctx.key(QueryMethod::Search, scope, ENTITY_TYPE, query);
        match self.ctx.lookup(&key, ignore_cache) {
            Lookup::Items(items) => return Ok(items),
            Lookup::Error(err) => return Err(err),
            Lookup::Miss => {}
        }

        let url = RdapUrl::parse(query)
            .map_err(|err| err.in_context(scope, ENTITY_TYPE, SOURCE_NAME))?;
        if url.kind != RequestKind::Entity {
            return Err(
                QueryError::malformed(format!("Expected URL to lookup entity, got {}", url.kind))
                    .in_context(scope, ENTITY_TYPE, SOURCE_NAME),
            );
        }

        let request = RdapRequest::new(RequestKind::Entity, url.query).with_server(url.server_root);
        self.run(key, scope, request).await
    }
}
