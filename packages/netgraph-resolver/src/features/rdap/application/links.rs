//! Link Graph Builder
//!
//! Turns the relationships embedded in an RDAP object into edge descriptors.
//! The propagation flags encode who can affect whom:
//!
//! | edge                         | in    | out   |
//! |------------------------------|-------|-------|
//! | any -> entity                | false | false |
//! | domain -> nameserver         | true  | false |
//! | domain -> ip network         | true  | false |
//! | entity -> asn                | false | true  |
//! | nameserver -> dns name       | true  | true  |
//! | nameserver -> ip             | true  | true  |

use crate::features::rdap::domain::{
    Autnum, Entity, IpAddresses, Nameserver, RdapIpNetwork, RdapUrl, RequestKind,
};
use crate::shared::models::{
    BlastPropagation, EdgeDescriptor, ItemQuery, QueryMethod, GLOBAL_SCOPE,
};

pub const DOMAIN_TYPE: &str = "rdap-domain";
pub const ENTITY_TYPE: &str = "rdap-entity";
pub const NAMESERVER_TYPE: &str = "rdap-nameserver";
pub const IP_NETWORK_TYPE: &str = "rdap-ip-network";
pub const ASN_TYPE: &str = "rdap-asn";
pub const DNS_TYPE: &str = "dns";
pub const IP_TYPE: &str = "ip";

/// Edges to entities, searched by their self link
///
/// Entities without a self link can't be resolved again and are skipped.
pub fn entity_edges(entities: &[Entity]) -> Vec<EdgeDescriptor> {
    entities
        .iter()
        .filter_map(Entity::self_link)
        .map(|href| {
            EdgeDescriptor::new(
                ItemQuery::new(ENTITY_TYPE, QueryMethod::Search, href, GLOBAL_SCOPE),
                BlastPropagation::inert(),
            )
        })
        .collect()
}

/// Edges from a domain to its nameservers
///
/// Nameserver URLs are rebuilt on the server that answered for the domain,
/// taken from the first fetched URL that parses as an RDAP URL. Without one
/// no nameserver edges can be built.
pub fn nameserver_edges(nameservers: &[Nameserver], fetched_urls: &[String]) -> Vec<EdgeDescriptor> {
    let Some(origin) = fetched_urls
        .iter()
        .filter(|url| !url.is_empty())
        .find_map(|url| RdapUrl::parse(url).ok())
    else {
        if !nameservers.is_empty() {
            tracing::debug!("no parseable RDAP URL in response, skipping nameserver edges");
        }
        return Vec::new();
    };

    nameservers
        .iter()
        .filter(|ns| !ns.ldh_name.is_empty())
        .map(|ns| {
            EdgeDescriptor::new(
                ItemQuery::new(
                    NAMESERVER_TYPE,
                    QueryMethod::Search,
                    origin.join(RequestKind::Nameserver, &ns.ldh_name),
                    GLOBAL_SCOPE,
                ),
                BlastPropagation::inbound(),
            )
        })
        .collect()
}

/// Edge from a domain to the network it sits in, searched by start address
pub fn network_edge(network: Option<&RdapIpNetwork>) -> Option<EdgeDescriptor> {
    network
        .filter(|n| !n.start_address.is_empty())
        .map(|n| {
            EdgeDescriptor::new(
                ItemQuery::new(
                    IP_NETWORK_TYPE,
                    QueryMethod::Search,
                    n.start_address.as_str(),
                    GLOBAL_SCOPE,
                ),
                BlastPropagation::inbound(),
            )
        })
}

/// Edges from an entity to its autonomous systems
pub fn autnum_edges(autnums: &[Autnum], scope: &str) -> Vec<EdgeDescriptor> {
    autnums
        .iter()
        .filter_map(|autnum| autnum.handle.as_deref())
        .map(|handle| {
            EdgeDescriptor::new(
                ItemQuery::new(ASN_TYPE, QueryMethod::Get, handle, scope),
                BlastPropagation::outbound(),
            )
        })
        .collect()
}

/// Edge from a nameserver to its DNS name
pub fn dns_name_edge(ldh_name: &str) -> EdgeDescriptor {
    EdgeDescriptor::new(
        ItemQuery::new(
            DNS_TYPE,
            QueryMethod::Search,
            ldh_name.to_lowercase(),
            GLOBAL_SCOPE,
        ),
        BlastPropagation::both(),
    )
}

/// Edges from a nameserver to each of its addresses
pub fn ip_edges(addresses: Option<&IpAddresses>) -> Vec<EdgeDescriptor> {
    addresses
        .map(|addrs| {
            addrs
                .all()
                .map(|ip| {
                    EdgeDescriptor::new(
                        ItemQuery::new(IP_TYPE, QueryMethod::Get, ip, GLOBAL_SCOPE),
                        BlastPropagation::both(),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}
