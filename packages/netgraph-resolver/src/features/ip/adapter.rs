//! `ip`: a graph node for a single address
//!
//! Reports only what is inherent in the address itself. Nothing is looked
//! up and nothing is cached.

use async_trait::async_trait;
use std::net::IpAddr;
use std::str::FromStr;

use super::properties::AddressProperties;
use crate::errors::{QueryError, Result};
use crate::shared::models::{Attributes, Item};
use crate::shared::ports::{ensure_scope, Adapter};

pub const IP_TYPE: &str = "ip";
pub const SOURCE_NAME: &str = "stdlib-ip";

#[derive(Debug, Default, Clone, Copy)]
pub struct IpAdapter;

impl IpAdapter {
    pub fn new() -> Self {
        Self
    }
}

fn properties_to_attributes(properties: &AddressProperties) -> Result<Attributes> {
    match serde_json::to_value(properties) {
        Ok(serde_json::Value::Object(map)) => Ok(Attributes::from_fields(map)),
        Ok(_) => Err(QueryError::unexpected_response("address properties are not a map")),
        Err(err) => Err(QueryError::unexpected_response(err.to_string())),
    }
}

#[async_trait]
impl Adapter for IpAdapter {
    fn item_type(&self) -> &'static str {
        IP_TYPE
    }

    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    /// Get by address, e.g. `192.0.2.1`, `2001:db8::68` or `::ffff:192.0.2.1`
    async fn get(&self, scope: &str, query: &str, _ignore_cache: bool) -> Result<Item> {
        ensure_scope(self, scope)?;

        let addr = IpAddr::from_str(query).map_err(|_| {
            QueryError::malformed(format!("{} is not a valid IP", query))
                .in_context(scope, IP_TYPE, SOURCE_NAME)
        })?;

        let attributes = properties_to_attributes(&AddressProperties::of(addr))
            .map_err(|err| err.in_context(scope, IP_TYPE, SOURCE_NAME))?;

        Ok(Item::new(IP_TYPE, scope, "ip", attributes))
    }

    /// Enumerating every address is not useful
    async fn list(&self, scope: &str, _ignore_cache: bool) -> Result<Vec<Item>> {
        ensure_scope(self, scope)?;
        Ok(Vec::new())
    }
}
