//! Canned registry objects, DNS answers and HTTP responses

use serde_json::json;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use netgraph_resolver::features::dns::{DnsClient, DnsRecord, RecordType};
use netgraph_resolver::features::http::{
    HeadResponse, HttpClient, PeerCertificate, TlsState, TlsVersion,
};
use netgraph_resolver::features::rdap::{RdapClient, RdapObject, RequestKind};
use netgraph_resolver::{AdapterRegistry, ResolverConfig};

use super::fakes::{FakeDnsClient, FakeHttpClient, FakeRdapClient};

pub const APNIC_ENTITY_URL: &str = "https://rdap.apnic.net/entity/AIC3-AP";
pub const VERISIGN_DOMAIN_URL: &str = "https://rdap.verisign.com/com/v1/domain/google.com";

fn object(value: serde_json::Value) -> RdapObject {
    RdapObject::from_json(value).unwrap()
}

fn apnic_entity_json() -> serde_json::Value {
    json!({
        "objectClassName": "entity",
        "handle": "AIC3-AP",
        "roles": ["administrative"],
        "links": [
            {"value": APNIC_ENTITY_URL, "rel": "self", "href": APNIC_ENTITY_URL, "type": "application/rdap+json"}
        ],
        "vcardArray": ["vcard", [
            ["version", {}, "text", "4.0"],
            ["fn", {}, "text", "APNIC RESEARCH"],
            ["kind", {}, "text", "group"],
            ["adr", {"label": "PO Box 3646\nSouth Brisbane, QLD 4101\nAustralia"}, "text", ["", "", "", "", "", "", ""]],
            ["email", {}, "text", "research@apnic.net"]
        ]]
    })
}

/// `1.1.1.0 - 1.1.1.255`, allocated to APNIC Research
pub fn cloudflare_network() -> RdapObject {
    object(json!({
        "objectClassName": "ip network",
        "rdapConformance": ["rdap_level_0"],
        "handle": "1.1.1.0 - 1.1.1.255",
        "startAddress": "1.1.1.0",
        "endAddress": "1.1.1.255",
        "ipVersion": "v4",
        "name": "APNIC-LABS",
        "type": "ASSIGNED PORTABLE",
        "country": "AU",
        "parentHandle": "1.1.1.0 - 1.1.1.255",
        "status": ["active"],
        "links": [
            {"rel": "self", "href": "https://rdap.apnic.net/ip/1.1.1.0/24"}
        ],
        "entities": [apnic_entity_json()]
    }))
}

/// `2001:4860::/32`
pub fn google_v6_network() -> RdapObject {
    object(json!({
        "objectClassName": "ip network",
        "handle": "NET6-2001-4860-1",
        "startAddress": "2001:4860::",
        "endAddress": "2001:4860:ffff:ffff:ffff:ffff:ffff:ffff",
        "ipVersion": "v6",
        "name": "GOOGLE-IPV6",
        "status": ["active"]
    }))
}

/// An ASN record where an ip network was asked for
pub fn mismatched_object() -> RdapObject {
    autnum_15169()
}

pub fn ns1_google() -> RdapObject {
    object(json!({
        "objectClassName": "nameserver",
        "handle": "NS1.GOOGLE.COM",
        "ldhName": "NS1.GOOGLE.COM",
        "ipAddresses": {
            "v4": ["216.239.32.10"],
            "v6": ["2001:4860:4802:32::a"]
        },
        "status": ["active"]
    }))
}

pub fn google_domain() -> RdapObject {
    object(json!({
        "objectClassName": "domain",
        "handle": "2138514_DOMAIN_COM-VRSN",
        "ldhName": "GOOGLE.COM",
        "status": ["client delete prohibited"],
        "nameservers": [
            {"objectClassName": "nameserver", "ldhName": "NS1.GOOGLE.COM"},
            {"objectClassName": "nameserver", "ldhName": "NS2.GOOGLE.COM"}
        ],
        "secureDNS": {"delegationSigned": false},
        "entities": [
            {
                "objectClassName": "entity",
                "handle": "292",
                "roles": ["registrar"],
                "links": [
                    {"rel": "self", "href": "https://rdap.markmonitor.com/rdap/entity/292"}
                ]
            },
            {
                "objectClassName": "entity",
                "handle": "NO-LINK",
                "roles": ["abuse"]
            }
        ],
        "network": {
            "objectClassName": "ip network",
            "startAddress": "142.250.0.0",
            "endAddress": "142.251.255.255"
        },
        "links": [
            {"rel": "self", "href": VERISIGN_DOMAIN_URL}
        ]
    }))
}

pub fn apnic_entity() -> RdapObject {
    let mut entity = apnic_entity_json();
    entity["autnums"] = json!([
        {"objectClassName": "autnum", "handle": "AS4608"},
        {"objectClassName": "autnum", "handle": "AS4777"}
    ]);
    object(entity)
}

pub fn autnum_15169() -> RdapObject {
    object(json!({
        "objectClassName": "autnum",
        "handle": "AS15169",
        "startAutnum": 15169,
        "endAutnum": 15169,
        "name": "GOOGLE",
        "type": "DIRECT ALLOCATION",
        "status": ["active"]
    }))
}

/// RDAP client that knows the objects above
pub fn registry_client() -> FakeRdapClient {
    FakeRdapClient::new()
        .respond(RequestKind::IpNetwork, "1.1.1.1", cloudflare_network())
        .respond(RequestKind::IpNetwork, "2001:4860::8888", google_v6_network())
        .respond(RequestKind::IpNetwork, "192.0.2.1", mismatched_object())
        .respond(RequestKind::Domain, "google.com", google_domain())
        .respond(RequestKind::Nameserver, "NS1.GOOGLE.COM", ns1_google())
        .respond(RequestKind::Entity, "AIC3-AP", apnic_entity())
        .respond(RequestKind::Autnum, "15169", autnum_15169())
}

/// DNS zone with a CNAME chain and a PTR record
pub fn dns_client() -> FakeDnsClient {
    let cname = DnsRecord::cname("www.example.com.", 3600, "example.com.");
    FakeDnsClient::new()
        .answer(
            "www.example.com.",
            RecordType::A,
            vec![
                cname.clone(),
                DnsRecord::a("example.com.", 60, Ipv4Addr::new(93, 184, 216, 34)),
            ],
        )
        .answer(
            "www.example.com.",
            RecordType::Aaaa,
            vec![
                cname,
                DnsRecord::aaaa(
                    "example.com.",
                    60,
                    Ipv6Addr::new(0x2606, 0x2800, 0x220, 1, 0x248, 0x1893, 0x25c8, 0x1946),
                ),
            ],
        )
        .answer(
            "one.one.one.one.",
            RecordType::A,
            vec![
                DnsRecord::a("one.one.one.one.", 300, Ipv4Addr::new(1, 1, 1, 1)),
                DnsRecord::a("one.one.one.one.", 300, Ipv4Addr::new(1, 0, 0, 1)),
            ],
        )
        .answer(
            "1.1.1.1.in-addr.arpa.",
            RecordType::Ptr,
            vec![DnsRecord::ptr("1.1.1.1.in-addr.arpa.", 300, "one.one.one.one.")],
        )
}

/// `www.example.com` over TLS, and a redirect from plain HTTP to it
pub fn http_client() -> FakeHttpClient {
    FakeHttpClient::new()
        .page(
            "https://www.example.com/",
            HeadResponse::new(200, "200 OK", "HTTP/2.0")
                .with_header("Content-Type", "text/html; charset=UTF-8")
                .with_tls(TlsState {
                    version: TlsVersion::Tls13,
                    server_name: "www.example.com".to_string(),
                    peer_certificate: Some(PeerCertificate::new(
                        "www.example.org",
                        "4da25a6d5ef62c5f95c7bd0a73ea3c177b36999d",
                    )),
                }),
        )
        .page(
            "http://www.example.com/",
            HeadResponse::new(301, "301 Moved Permanently", "HTTP/1.1")
                .with_header("Location", "https://www.example.com/"),
        )
}

/// Registry wired to the given fakes, on a fresh metrics registry
pub fn build_registry(
    config: &ResolverConfig,
    rdap: &Arc<FakeRdapClient>,
    dns: &Arc<FakeDnsClient>,
) -> AdapterRegistry {
    build_registry_with_http(config, rdap, dns, &Arc::new(http_client()))
}

pub fn build_registry_with_http(
    config: &ResolverConfig,
    rdap: &Arc<FakeRdapClient>,
    dns: &Arc<FakeDnsClient>,
    http: &Arc<FakeHttpClient>,
) -> AdapterRegistry {
    AdapterRegistry::new(
        config,
        rdap.clone() as Arc<dyn RdapClient>,
        dns.clone() as Arc<dyn DnsClient>,
        http.clone() as Arc<dyn HttpClient>,
        &prometheus::Registry::new(),
    )
    .unwrap()
}
