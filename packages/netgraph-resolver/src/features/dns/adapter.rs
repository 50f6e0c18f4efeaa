//! `dns`: A/AAAA resolution with CNAME chains and optional reverse lookup

use async_trait::async_trait;
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use super::application::answers::DNS_TYPE;
use super::application::{answers_to_items, fqdn, group_answers, reverse_name};
use super::domain::{DnsClient, DnsClientError, DnsRecord, RecordData, RecordType};
use crate::errors::{QueryError, Result};
use crate::features::cache::{CacheKey, Lookup, ResultCache};
use crate::shared::models::{Item, QueryMethod};
use crate::shared::ports::{ensure_scope, Adapter};

pub const SOURCE_NAME: &str = "stdlib-dns";

fn wrap_dns_error(err: DnsClientError) -> QueryError {
    QueryError::upstream(err.to_string())
}

pub struct DnsAdapter {
    client: Arc<dyn DnsClient>,
    cache: Arc<ResultCache>,
    ttl: Duration,
    reverse_lookup: bool,
}

impl DnsAdapter {
    pub fn new(
        client: Arc<dyn DnsClient>,
        cache: Arc<ResultCache>,
        ttl: Duration,
        reverse_lookup: bool,
    ) -> Self {
        Self {
            client,
            cache,
            ttl,
            reverse_lookup,
        }
    }

    fn key(&self, method: QueryMethod, scope: &str, query: &str) -> CacheKey {
        CacheKey::new(SOURCE_NAME, method, scope, DNS_TYPE, query)
    }

    async fn exchange(&self, name: &str, record_type: RecordType) -> Result<Vec<DnsRecord>> {
        tracing::info!(name = %name, record_type = %record_type, "dns request");

        self.client
            .query(name, record_type)
            .await
            .map_err(wrap_dns_error)
    }

    /// A then AAAA for `query`, grouped into items
    async fn forward_query(&self, query: &str) -> Result<Vec<Item>> {
        let name = fqdn(query);

        let mut answers = self.exchange(&name, RecordType::A).await?;
        answers.extend(self.exchange(&name, RecordType::Aaaa).await?);

        if answers.is_empty() {
            return Err(QueryError::not_found(format!("No DNS records found for {}", query)));
        }

        Ok(answers_to_items(&group_answers(answers)))
    }

    /// PTR for `addr`, then a forward query per PTR target
    async fn reverse_query(&self, addr: &IpAddr) -> Result<Vec<Item>> {
        let answers = self.exchange(&reverse_name(addr), RecordType::Ptr).await?;

        let mut items = Vec::new();
        for record in answers {
            if let RecordData::Ptr(target) = &record.data {
                items.extend(self.forward_query(target).await?);
            }
        }

        Ok(items)
    }

    fn settle(&self, key: CacheKey, outcome: Result<Vec<Item>>, scope: &str) -> Result<Vec<Item>> {
        let outcome = outcome.map_err(|err| err.in_context(scope, DNS_TYPE, SOURCE_NAME));
        self.cache.settle(key, outcome, self.ttl)
    }
}

#[async_trait]
impl Adapter for DnsAdapter {
    fn item_type(&self) -> &'static str {
        DNS_TYPE
    }

    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    /// Get by DNS name; returns the first item of the forward query
    async fn get(&self, scope: &str, query: &str, ignore_cache: bool) -> Result<Item> {
        ensure_scope(self, scope)?;

        let not_found = |message: String| {
            QueryError::not_found(message)
                .with_scope(scope)
                .with_item_type(DNS_TYPE)
                .with_source_name(SOURCE_NAME)
        };

        if IpAddr::from_str(query).is_ok() {
            return Err(not_found(format!(
                "{} is already an IP address, no DNS entry will be found",
                query
            )));
        }

        let key = self.key(QueryMethod::Get, scope, query);
        let no_records = || not_found(format!("No DNS records found for {}", query));

        if let Some(replayed) = self.cache.lookup(&key, ignore_cache).into_single(no_records) {
            return replayed;
        }

        // GET keeps only the first item, so that is all that gets cached
        let outcome = self
            .forward_query(query)
            .await
            .map(|items| items.into_iter().take(1).collect());

        self.settle(key, outcome, scope)?
            .into_iter()
            .next()
            .ok_or_else(no_records)
    }

    async fn list(&self, scope: &str, _ignore_cache: bool) -> Result<Vec<Item>> {
        ensure_scope(self, scope)?;
        Ok(Vec::new())
    }

    /// Search by DNS name, or by IP for a reverse lookup
    async fn search(&self, scope: &str, query: &str, ignore_cache: bool) -> Result<Vec<Item>> {
        ensure_scope(self, scope)?;

        let addr = IpAddr::from_str(query).ok();
        if addr.is_some() && !self.reverse_lookup {
            return Ok(Vec::new());
        }

        let key = self.key(QueryMethod::Search, scope, query);
        match self.cache.lookup(&key, ignore_cache) {
            Lookup::Items(items) => return Ok(items),
            Lookup::Error(err) => return Err(err),
            Lookup::Miss => {}
        }

        let outcome = match addr {
            Some(addr) => self.reverse_query(&addr).await,
            None => self.forward_query(query).await,
        };

        self.settle(key, outcome, scope)
    }
}
