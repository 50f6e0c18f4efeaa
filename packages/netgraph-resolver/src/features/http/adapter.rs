//! `http`: what a server answers to a HEAD request for a URL
//!
//! GET by URL only. The item links to the host (`ip` for literal addresses,
//! `dns` otherwise) and, for redirects, to the redirect target.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use super::domain::{HeadResponse, HttpClient, HttpClientError, TlsState};
use crate::errors::{QueryError, Result};
use crate::features::cache::{CacheKey, ResultCache};
use crate::shared::models::{
    Attributes, BlastPropagation, EdgeDescriptor, Item, ItemQuery, QueryMethod,
};
use crate::shared::ports::{ensure_scope, Adapter};

pub const HTTP_TYPE: &str = "http";
pub const SOURCE_NAME: &str = "stdlib-http";

static HTTP_URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)(https?)://([^/?#]*)").expect("HTTP URL pattern is valid")
});

/// Scheme and host of a queried URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTarget {
    /// `scheme://authority`, without a trailing slash
    pub origin: String,
    pub scheme: String,
    pub host: String,
}

impl HttpTarget {
    pub fn parse(url: &str) -> Option<Self> {
        let captures = HTTP_URL_PATTERN.captures(url)?;
        let scheme = captures.get(1)?.as_str().to_ascii_lowercase();
        let authority = captures.get(2)?.as_str();

        let host_port = authority
            .rsplit_once('@')
            .map_or(authority, |(_, host_port)| host_port);
        let host = match host_port.strip_prefix('[') {
            Some(rest) => rest.split_once(']')?.0,
            None => host_port.split(':').next().unwrap_or_default(),
        };
        if host.is_empty() {
            return None;
        }

        Some(Self {
            origin: format!("{}://{}", scheme, authority),
            scheme,
            host: host.to_ascii_lowercase(),
        })
    }

    /// Absolute form of a `Location` value
    ///
    /// Absolute, scheme-relative and root-relative values are resolved;
    /// path-relative ones are not followed.
    pub fn resolve(&self, location: &str) -> Option<String> {
        if HTTP_URL_PATTERN.is_match(location) {
            Some(location.to_string())
        } else if location.starts_with("//") {
            Some(format!("{}:{}", self.scheme, location))
        } else if location.starts_with('/') {
            Some(format!("{}{}", self.origin, location))
        } else {
            None
        }
    }

    fn host_edge(&self, scope: &str) -> EdgeDescriptor {
        match IpAddr::from_str(&self.host) {
            Ok(addr) => EdgeDescriptor::new(
                ItemQuery::new("ip", QueryMethod::Get, addr.to_string(), scope),
                BlastPropagation::inbound(),
            ),
            Err(_) => EdgeDescriptor::new(
                ItemQuery::new("dns", QueryMethod::Search, self.host.as_str(), scope),
                BlastPropagation::inbound(),
            ),
        }
    }
}

fn wrap_http_error(err: HttpClientError) -> QueryError {
    match err {
        HttpClientError::InvalidUrl(_) => QueryError::malformed(err.to_string()),
        HttpClientError::Request { .. } => QueryError::upstream(err.to_string()),
    }
}

fn tls_attribute(tls: &TlsState) -> Value {
    let mut value = json!({
        "version": tls.version.as_str(),
        "serverName": tls.server_name,
    });
    if let Some(cert) = &tls.peer_certificate {
        value["certificate"] = json!(cert.display_name());
    }
    value
}

/// Item for the response to `url`
pub fn response_to_item(
    scope: &str,
    url: &str,
    target: &HttpTarget,
    response: &HeadResponse,
) -> Item {
    let mut attributes = Attributes::from_fields([
        ("name", json!(url)),
        ("status", json!(response.status)),
        ("statusString", json!(response.status_text)),
        ("proto", json!(response.proto)),
        ("headers", json!(response.header_map())),
    ]);
    if !response.transfer_encoding.is_empty() {
        attributes.insert("transferEncoding", json!(response.transfer_encoding));
    }
    if let Some(tls) = &response.tls {
        attributes.insert("tls", tls_attribute(tls));
    }

    let mut edges = vec![target.host_edge(scope)];
    if response.is_redirect() {
        if let Some(next) = response.location().and_then(|loc| target.resolve(loc)) {
            edges.push(EdgeDescriptor::new(
                ItemQuery::new(HTTP_TYPE, QueryMethod::Get, next, scope),
                BlastPropagation::inbound(),
            ));
        }
    }

    Item::new(HTTP_TYPE, scope, "name", attributes).with_edges(edges)
}

pub struct HttpAdapter {
    client: Arc<dyn HttpClient>,
    cache: Arc<ResultCache>,
    ttl: Duration,
}

impl HttpAdapter {
    pub fn new(client: Arc<dyn HttpClient>, cache: Arc<ResultCache>, ttl: Duration) -> Self {
        Self { client, cache, ttl }
    }

    async fn head(&self, scope: &str, url: &str, target: &HttpTarget) -> Result<Vec<Item>> {
        tracing::info!(url = %url, "http request");

        let response = self.client.head(url).await.map_err(wrap_http_error)?;
        Ok(vec![response_to_item(scope, url, target, &response)])
    }
}

#[async_trait]
impl Adapter for HttpAdapter {
    fn item_type(&self) -> &'static str {
        HTTP_TYPE
    }

    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    /// Get by `http://` or `https://` URL
    async fn get(&self, scope: &str, query: &str, ignore_cache: bool) -> Result<Item> {
        ensure_scope(self, scope)?;

        let target = HttpTarget::parse(query).ok_or_else(|| {
            QueryError::malformed(format!("{} is not an http(s) URL", query))
                .in_context(scope, HTTP_TYPE, SOURCE_NAME)
        })?;

        let key = CacheKey::new(SOURCE_NAME, QueryMethod::Get, scope, HTTP_TYPE, query);
        let no_response = || {
            QueryError::not_found(format!("No response from {}", query))
                .in_context(scope, HTTP_TYPE, SOURCE_NAME)
        };

        if let Some(replayed) = self.cache.lookup(&key, ignore_cache).into_single(no_response) {
            return replayed;
        }

        let outcome = self
            .head(scope, query, &target)
            .await
            .map_err(|err| err.in_context(scope, HTTP_TYPE, SOURCE_NAME));

        self.cache
            .settle(key, outcome, self.ttl)?
            .into_iter()
            .next()
            .ok_or_else(no_response)
    }

    /// Would mean crawling; nothing to enumerate
    async fn list(&self, scope: &str, _ignore_cache: bool) -> Result<Vec<Item>> {
        ensure_scope(self, scope)?;
        Ok(Vec::new())
    }
}
