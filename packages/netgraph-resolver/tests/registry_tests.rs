//! Registry wiring, configuration and metrics

mod common;

use common::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;

use netgraph_resolver::config::{ENV_DNS_CACHE_TTL, ENV_REVERSE_DNS};
use netgraph_resolver::{AdapterRegistry, ErrorKind, ItemQuery, QueryMethod, ResolverConfig};

#[test]
fn test_env_overrides_reach_the_config() {
    let mut config = ResolverConfig::from_yaml_str("version: 1\n").unwrap();
    config
        .apply_overrides_from(|var| match var {
            v if v == ENV_DNS_CACHE_TTL => Some("42".to_string()),
            v if v == ENV_REVERSE_DNS => Some("1".to_string()),
            _ => None,
        })
        .unwrap();

    assert_eq!(config.cache.dns_ttl_secs, 42);
    assert_eq!(config.cache.rdap_ttl_secs, 1800);
    assert!(config.dns.reverse_lookup);
}

#[tokio::test]
async fn test_metrics_are_exported() {
    let rdap = Arc::new(registry_client());
    let dns = Arc::new(dns_client());
    let metrics = prometheus::Registry::new();
    let registry = AdapterRegistry::new(
        &ResolverConfig::default(),
        rdap.clone(),
        dns.clone(),
        Arc::new(http_client()),
        &metrics,
    )
    .unwrap();

    let query = ItemQuery::new("rdap-ip-network", QueryMethod::Search, "1.1.1.1", "global");
    registry.execute(&query, false).await.unwrap();
    registry.execute(&query, false).await.unwrap();

    let names: Vec<String> = metrics
        .gather()
        .iter()
        .map(|family| family.get_name().to_string())
        .collect();
    assert!(names.contains(&"netgraph_result_cache_hits_total".to_string()));
    assert!(names.contains(&"netgraph_range_cache_entries".to_string()));

    assert_eq!(registry.result_cache().metrics().hits.get(), 1);
    assert_eq!(registry.result_cache().metrics().misses.get(), 1);
    assert_eq!(registry.range_cache().len(), 1);
}

#[tokio::test]
async fn test_identity_separates_sources_and_methods() {
    let rdap = Arc::new(registry_client());
    let dns = Arc::new(dns_client());
    let registry = build_registry(&ResolverConfig::default(), &rdap, &dns);

    let asn = ItemQuery::new("rdap-asn", QueryMethod::Get, "AS15169", "global");
    let dns_query = ItemQuery::new("dns", QueryMethod::Search, "www.example.com", "global");
    let dns_get = ItemQuery::new("dns", QueryMethod::Get, "www.example.com", "global");

    registry.execute(&asn, false).await.unwrap();
    registry.execute(&dns_query, false).await.unwrap();
    registry.execute(&dns_get, false).await.unwrap();

    assert_eq!(registry.result_cache().len(), 3);
    assert_eq!(dns.call_count(), 4);
}

#[tokio::test]
async fn test_items_from_every_adapter_validate() {
    let rdap = Arc::new(registry_client());
    let dns = Arc::new(dns_client());
    let registry = build_registry(&ResolverConfig::default(), &rdap, &dns);

    let queries = [
        ItemQuery::new("rdap-ip-network", QueryMethod::Search, "1.1.1.1", "global"),
        ItemQuery::new("rdap-domain", QueryMethod::Search, "google.com", "global"),
        ItemQuery::new("rdap-entity", QueryMethod::Get, "AIC3-AP", "global"),
        ItemQuery::new(
            "rdap-nameserver",
            QueryMethod::Search,
            "https://rdap.verisign.com/com/v1/nameserver/NS1.GOOGLE.COM",
            "global",
        ),
        ItemQuery::new("rdap-asn", QueryMethod::Get, "15169", "global"),
        ItemQuery::new("dns", QueryMethod::Search, "www.example.com", "global"),
        ItemQuery::new("ip", QueryMethod::Get, "2001:db8::68", "global"),
        ItemQuery::new("http", QueryMethod::Get, "https://www.example.com/", "global"),
    ];

    for query in &queries {
        let items = registry.execute(query, false).await.unwrap();
        assert!(!items.is_empty(), "{} returned nothing", query.item_type);
        for item in &items {
            assert!(item.validate().is_ok(), "{:?}", item);
            assert_eq!(item.item_type, query.item_type);
        }
    }
}

#[tokio::test]
async fn test_unknown_type() {
    let rdap = Arc::new(registry_client());
    let dns = Arc::new(dns_client());
    let registry = build_registry(&ResolverConfig::default(), &rdap, &dns);

    assert!(registry.get("rdap-help").is_none());
    let query = ItemQuery::new("rdap-help", QueryMethod::Get, "x", "global");
    assert_eq!(
        registry.execute(&query, false).await.unwrap_err().kind,
        ErrorKind::NotFound
    );
}
