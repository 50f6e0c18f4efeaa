//! Domain resolution: the suffix walk, edges and negative caching

mod common;

use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

use netgraph_resolver::features::rdap::{RdapResponse, RequestKind};
use netgraph_resolver::{BlastPropagation, ErrorKind, ItemQuery, QueryMethod, ResolverConfig};

fn search(query: &str) -> ItemQuery {
    ItemQuery::new("rdap-domain", QueryMethod::Search, query, "global")
}

#[tokio::test]
async fn test_walks_from_full_name_down() {
    let rdap = Arc::new(registry_client());
    let dns = Arc::new(dns_client());
    let registry = build_registry(&ResolverConfig::default(), &rdap, &dns);

    let items = registry.execute(&search("www.google.com"), false).await.unwrap();

    assert_eq!(rdap.queries(), vec!["www.google.com", "google.com"]);
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0].unique_attribute_value().as_deref(),
        Some("2138514_DOMAIN_COM-VRSN")
    );
    assert_eq!(items[0].attributes.get("ldhName"), Some(&json!("GOOGLE.COM")));
    assert_eq!(
        items[0].attributes.get("secureDNS"),
        Some(&json!({"delegationSigned": false}))
    );
}

#[tokio::test]
async fn test_trailing_dot_and_empty_labels() {
    let rdap = Arc::new(registry_client());
    let dns = Arc::new(dns_client());
    let registry = build_registry(&ResolverConfig::default(), &rdap, &dns);

    registry.execute(&search("www..google.com."), false).await.unwrap();
    assert_eq!(rdap.queries(), vec!["www.google.com", "google.com"]);
}

#[tokio::test]
async fn test_top_level_label_is_never_queried() {
    let rdap = Arc::new(registry_client());
    let dns = Arc::new(dns_client());
    let registry = build_registry(&ResolverConfig::default(), &rdap, &dns);

    let err = registry.execute(&search("www.nonexistent.invalid"), false).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(err.message.contains("No domain found for www.nonexistent.invalid"));
    assert_eq!(rdap.queries(), vec!["www.nonexistent.invalid", "nonexistent.invalid"]);

    let err = registry.execute(&search("localhost"), false).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(rdap.call_count(), 2);
}

#[tokio::test]
async fn test_not_found_is_replayed_from_cache() {
    let rdap = Arc::new(registry_client());
    let dns = Arc::new(dns_client());
    let registry = build_registry(&ResolverConfig::default(), &rdap, &dns);

    let first = registry.execute(&search("missing.example.org"), false).await.unwrap_err();
    let calls = rdap.call_count();

    let second = registry.execute(&search("missing.example.org"), false).await.unwrap_err();
    assert_eq!(second, first);
    assert_eq!(rdap.call_count(), calls);

    registry.execute(&search("missing.example.org"), true).await.unwrap_err();
    assert_eq!(rdap.call_count(), calls * 2);
}

#[tokio::test]
async fn test_empty_answer_ends_the_walk() {
    let rdap = Arc::new(
        registry_client().respond_with(RequestKind::Domain, "empty.example.com", Ok(RdapResponse::empty())),
    );
    let dns = Arc::new(dns_client());
    let registry = build_registry(&ResolverConfig::default(), &rdap, &dns);

    let err = registry.execute(&search("www.empty.example.com"), false).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(err.message.contains("Empty domain response for empty.example.com"));
    assert_eq!(rdap.queries(), vec!["www.empty.example.com", "empty.example.com"]);
}

#[tokio::test]
async fn test_domain_edges() {
    let rdap = Arc::new(registry_client());
    let dns = Arc::new(dns_client());
    let registry = build_registry(&ResolverConfig::default(), &rdap, &dns);

    let items = registry.execute(&search("google.com"), false).await.unwrap();
    let item = &items[0];

    assert_eq!(
        edge_types(item),
        vec!["rdap-nameserver", "rdap-nameserver", "rdap-entity", "rdap-ip-network"]
    );
    assert_edge(
        item,
        "rdap-nameserver",
        QueryMethod::Search,
        "https://rdap.example.net/nameserver/NS1.GOOGLE.COM",
        BlastPropagation::inbound(),
    );
    assert_edge(
        item,
        "rdap-entity",
        QueryMethod::Search,
        "https://rdap.markmonitor.com/rdap/entity/292",
        BlastPropagation::inert(),
    );
    assert_edge(
        item,
        "rdap-ip-network",
        QueryMethod::Search,
        "142.250.0.0",
        BlastPropagation::inbound(),
    );
}

#[tokio::test]
async fn test_nameserver_edge_resolves() {
    let rdap = Arc::new(registry_client());
    let dns = Arc::new(dns_client());
    let registry = build_registry(&ResolverConfig::default(), &rdap, &dns);

    let domain = registry.execute(&search("google.com"), false).await.unwrap();
    let edge = &domain[0].linked_item_queries[0];

    let nameservers = registry.execute(&edge.query, false).await.unwrap();
    assert_eq!(
        nameservers[0].unique_attribute_value().as_deref(),
        Some("NS1.GOOGLE.COM")
    );

    let request = rdap.requests().pop().unwrap();
    assert_eq!(request.kind, RequestKind::Nameserver);
    assert_eq!(request.server.as_deref(), Some("https://rdap.example.net"));
}

#[tokio::test]
async fn test_get_and_list_are_not_supported() {
    let rdap = Arc::new(registry_client());
    let dns = Arc::new(dns_client());
    let registry = build_registry(&ResolverConfig::default(), &rdap, &dns);

    let get = ItemQuery::new("rdap-domain", QueryMethod::Get, "google.com", "global");
    assert_eq!(
        registry.execute(&get, false).await.unwrap_err().kind,
        ErrorKind::NotFound
    );

    let list = ItemQuery::new("rdap-domain", QueryMethod::List, "", "global");
    assert_eq!(
        registry.execute(&list, false).await.unwrap_err().kind,
        ErrorKind::NotFound
    );
    assert_eq!(rdap.call_count(), 0);
}
