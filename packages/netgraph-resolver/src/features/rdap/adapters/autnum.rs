//! `rdap-asn`: autonomous systems by handle (`AS15169` or `15169`)

use async_trait::async_trait;

use super::{RdapContext, SOURCE_NAME};
use crate::errors::{QueryError, Result};
use crate::features::rdap::application::attributes::autnum_attributes;
use crate::features::rdap::application::links::{entity_edges, ASN_TYPE};
use crate::features::rdap::domain::{RdapObject, RdapRequest, RequestKind};
use crate::shared::models::{Item, QueryMethod};
use crate::shared::ports::{ensure_scope, Adapter};

/// Registries want the bare number
fn strip_as_prefix(query: &str) -> &str {
    query.strip_prefix("AS").unwrap_or(query)
}

pub struct AsnAdapter {
    ctx: RdapContext,
}

impl AsnAdapter {
    pub fn new(ctx: RdapContext) -> Self {
        Self { ctx }
    }

    async fn resolve(&self, scope: &str, query: &str) -> Result<Vec<Item>> {
        let number = strip_as_prefix(query);
        let response = self
            .ctx
            .fetch(RdapRequest::new(RequestKind::Autnum, number))
            .await?;

        let autnum = match response.object {
            Some(RdapObject::Autnum(autnum)) => autnum,
            Some(other) => {
                tracing::warn!(query = %query, class = other.class_name(), "unexpected RDAP object");
                return Err(QueryError::unexpected_response(format!(
                    "Expected autnum, got {}",
                    other.class_name()
                )));
            }
            None => return Err(QueryError::not_found(format!("No ASN found for {}", query))),
        };

        let item = Item::new(ASN_TYPE, scope, "handle", autnum_attributes(&autnum))
            .with_edges(entity_edges(&autnum.entities));

        Ok(vec![item])
    }
}

#[async_trait]
impl Adapter for AsnAdapter {
    fn item_type(&self) -> &'static str {
        ASN_TYPE
    }

    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn get(&self, scope: &str, query: &str, ignore_cache: bool) -> Result<Item> {
        ensure_scope(self, scope)?;

        let key = self.ctx.key(QueryMethod::Get, scope, ASN_TYPE, query);
        let not_found = || {
            QueryError::not_found(format!("No ASN found for {}", query))
                .with_scope(scope)
                .with_item_type(ASN_TYPE)
                .with_source_name(SOURCE_NAME)
        };

        if let Some(replayed) = self.ctx.lookup(&key, ignore_cache).into_single(not_found) {
            return replayed;
        }

        let outcome = self
            .resolve(scope, query)
            .await
            .map_err(|err| err.in_context(scope, ASN_TYPE, SOURCE_NAME));

        self.ctx
            .settle(key, outcome)?
            .into_iter()
            .next()
            .ok_or_else(not_found)
    }

    async fn list(&self, scope: &str, _ignore_cache: bool) -> Result<Vec<Item>> {
        ensure_scope(self, scope)?;

        Err(
            QueryError::not_found("ASNs cannot be listed, use the GET method instead")
                .with_scope(scope)
                .with_item_type(ASN_TYPE)
                .with_source_name(SOURCE_NAME),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_as_prefix() {
        assert_eq!(strip_as_prefix("AS15169"), "15169");
        assert_eq!(strip_as_prefix("15169"), "15169");
        assert_eq!(strip_as_prefix("ASAS1"), "AS1");
    }
}
