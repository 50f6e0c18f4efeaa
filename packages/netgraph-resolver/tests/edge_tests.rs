//! Entity, nameserver and ASN adapters and their propagation flags

mod common;

use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

use netgraph_resolver::features::rdap::RequestKind;
use netgraph_resolver::{BlastPropagation, ErrorKind, ItemQuery, QueryMethod, ResolverConfig};

const NS1_URL: &str = "https://rdap.verisign.com/com/v1/nameserver/NS1.GOOGLE.COM";

#[tokio::test]
async fn test_nameserver_edges_are_bidirectional() {
    let rdap = Arc::new(registry_client());
    let dns = Arc::new(dns_client());
    let registry = build_registry(&ResolverConfig::default(), &rdap, &dns);

    let query = ItemQuery::new("rdap-nameserver", QueryMethod::Search, NS1_URL, "global");
    let items = registry.execute(&query, false).await.unwrap();
    let item = &items[0];

    assert_eq!(item.unique_attribute, "ldhName");
    assert_eq!(
        item.attributes.get("ipAddresses"),
        Some(&json!({"v4": ["216.239.32.10"], "v6": ["2001:4860:4802:32::a"]}))
    );

    assert_eq!(edge_types(item), vec!["dns", "ip", "ip"]);
    assert_edge(item, "dns", QueryMethod::Search, "ns1.google.com", BlastPropagation::both());
    assert_edge(item, "ip", QueryMethod::Get, "216.239.32.10", BlastPropagation::both());
    assert_edge(
        item,
        "ip",
        QueryMethod::Get,
        "2001:4860:4802:32::a",
        BlastPropagation::both(),
    );

    let request = &rdap.requests()[0];
    assert_eq!(request.query, "NS1.GOOGLE.COM");
    assert_eq!(request.server.as_deref(), Some("https://rdap.verisign.com/com/v1"));
}

#[tokio::test]
async fn test_nameserver_search_needs_a_nameserver_url() {
    let rdap = Arc::new(registry_client());
    let dns = Arc::new(dns_client());
    let registry = build_registry(&ResolverConfig::default(), &rdap, &dns);

    for bad in ["NS1.GOOGLE.COM", APNIC_ENTITY_URL] {
        let query = ItemQuery::new("rdap-nameserver", QueryMethod::Search, bad, "global");
        let err = registry.execute(&query, false).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedInput, "query {bad}");
    }
    assert_eq!(rdap.call_count(), 0);
}

#[tokio::test]
async fn test_entity_get_links_asns_outbound() {
    let rdap = Arc::new(registry_client());
    let dns = Arc::new(dns_client());
    let registry = build_registry(&ResolverConfig::default(), &rdap, &dns);

    let query = ItemQuery::new("rdap-entity", QueryMethod::Get, "AIC3-AP", "global");
    let items = registry.execute(&query, false).await.unwrap();
    let item = &items[0];

    assert_eq!(item.unique_attribute_value().as_deref(), Some("AIC3-AP"));
    assert_eq!(item.attributes.get("vCard").unwrap()["Name"], json!("APNIC RESEARCH"));
    assert_eq!(item.attributes.get("vCard").unwrap()["Email"], json!("research@apnic.net"));

    assert_edge(item, "rdap-asn", QueryMethod::Get, "AS4608", BlastPropagation::outbound());
    assert_edge(item, "rdap-asn", QueryMethod::Get, "AS4777", BlastPropagation::outbound());
    assert!(!edge_types(item).contains(&"rdap-ip-network"));

    assert_eq!(rdap.requests()[0].server, None);
}

#[tokio::test]
async fn test_entity_search_uses_server_from_url() {
    let rdap = Arc::new(registry_client());
    let dns = Arc::new(dns_client());
    let registry = build_registry(&ResolverConfig::default(), &rdap, &dns);

    let query = ItemQuery::new("rdap-entity", QueryMethod::Search, APNIC_ENTITY_URL, "global");
    let items = registry.execute(&query, false).await.unwrap();
    assert_eq!(items.len(), 1);

    let request = &rdap.requests()[0];
    assert_eq!(request.kind, RequestKind::Entity);
    assert_eq!(request.query, "AIC3-AP");
    assert_eq!(request.server.as_deref(), Some("https://rdap.apnic.net"));

    let list = ItemQuery::new("rdap-entity", QueryMethod::List, "", "global");
    assert!(registry.execute(&list, false).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_asn_prefix_is_stripped() {
    let rdap = Arc::new(registry_client());
    let dns = Arc::new(dns_client());
    let registry = build_registry(&ResolverConfig::default(), &rdap, &dns);

    let query = ItemQuery::new("rdap-asn", QueryMethod::Get, "AS15169", "global");
    let items = registry.execute(&query, false).await.unwrap();

    assert_eq!(rdap.queries(), vec!["15169"]);
    assert_eq!(items[0].unique_attribute_value().as_deref(), Some("AS15169"));
    assert_eq!(items[0].attributes.get("startAutnum"), Some(&json!(15169)));

    registry.execute(&query, false).await.unwrap();
    assert_eq!(rdap.call_count(), 1);
}

#[tokio::test]
async fn test_wrong_scope_is_rejected_everywhere() {
    let rdap = Arc::new(registry_client());
    let dns = Arc::new(dns_client());
    let registry = build_registry(&ResolverConfig::default(), &rdap, &dns);

    for item_type in registry.item_types() {
        let query = ItemQuery::new(item_type, QueryMethod::List, "", "123456789012.us-east-1");
        let err = registry.execute(&query, false).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NoScope, "type {item_type}");
    }
    assert_eq!(rdap.call_count(), 0);
    assert_eq!(dns.call_count(), 0);
}
