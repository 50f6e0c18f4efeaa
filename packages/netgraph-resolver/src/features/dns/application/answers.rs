//! Answer grouping and item construction
//!
//! One item per CNAME owner and one per address-record owner. Maps are
//! ordered so the item order is stable for the same answers.

use serde_json::{json, Value};
use std::collections::BTreeMap;

use super::names::trim_dns_suffix;
use crate::features::dns::domain::{DnsRecord, RecordData};
use crate::shared::models::{
    Attributes, BlastPropagation, EdgeDescriptor, Item, ItemQuery, QueryMethod, GLOBAL_SCOPE,
};

pub const DNS_TYPE: &str = "dns";
pub const UNIQUE_ATTRIBUTE: &str = "name";

/// Answers keyed by owner name (trailing dot removed)
#[derive(Debug, Default, PartialEq)]
pub struct AnswerGroup {
    /// Last CNAME seen per owner
    pub cnames: BTreeMap<String, DnsRecord>,
    pub addresses: BTreeMap<String, Vec<DnsRecord>>,
}

impl AnswerGroup {
    pub fn is_empty(&self) -> bool {
        self.cnames.is_empty() && self.addresses.is_empty()
    }
}

/// Split answers into CNAME and A/AAAA groups; anything else is ignored
pub fn group_answers<I>(answers: I) -> AnswerGroup
where
    I: IntoIterator<Item = DnsRecord>,
{
    let mut group = AnswerGroup::default();

    for record in answers {
        let owner = trim_dns_suffix(&record.name).to_string();
        match record.data {
            RecordData::Cname(_) => {
                group.cnames.insert(owner, record);
            }
            RecordData::A(_) | RecordData::Aaaa(_) => {
                group.addresses.entry(owner).or_default().push(record);
            }
            RecordData::Ptr(_) => {}
        }
    }

    group
}

fn domain_edge(name: &str) -> EdgeDescriptor {
    EdgeDescriptor::new(
        ItemQuery::new("rdap-domain", QueryMethod::Search, name, GLOBAL_SCOPE),
        BlastPropagation::inbound(),
    )
}

/// Item for a CNAME record
pub fn cname_item(name: &str, record: &DnsRecord) -> Option<Item> {
    let RecordData::Cname(target) = &record.data else {
        return None;
    };
    let target = trim_dns_suffix(target);

    let attributes = Attributes::from_fields([
        ("name", json!(name)),
        ("type", json!("CNAME")),
        ("ttl", json!(record.ttl)),
        ("target", json!(target)),
    ]);

    let edges = vec![
        domain_edge(name),
        EdgeDescriptor::new(
            ItemQuery::new(DNS_TYPE, QueryMethod::Search, target, GLOBAL_SCOPE),
            BlastPropagation::inbound(),
        ),
    ];

    Some(Item::new(DNS_TYPE, GLOBAL_SCOPE, UNIQUE_ATTRIBUTE, attributes).with_edges(edges))
}

/// Item for all A/AAAA records of one owner name
pub fn address_item(name: &str, records: &[DnsRecord]) -> Item {
    let mut entries: Vec<(&'static str, String, u32)> = records
        .iter()
        .filter_map(|record| {
            record
                .ip()
                .map(|ip| (record.record_type().as_str(), ip.to_string(), record.ttl))
        })
        .collect();
    entries.sort();

    let record_values: Vec<Value> = entries
        .iter()
        .map(|(record_type, ip, ttl)| json!({"ttl": ttl, "type": record_type, "ip": ip}))
        .collect();

    let mut edges: Vec<EdgeDescriptor> = entries
        .iter()
        .map(|(_, ip, _)| {
            EdgeDescriptor::new(
                ItemQuery::new("ip", QueryMethod::Get, ip.as_str(), GLOBAL_SCOPE),
                BlastPropagation::both(),
            )
        })
        .collect();
    edges.push(domain_edge(name));

    let attributes = Attributes::from_fields([
        ("name", json!(name)),
        ("type", json!("address")),
        ("records", Value::Array(record_values)),
    ]);

    Item::new(DNS_TYPE, GLOBAL_SCOPE, UNIQUE_ATTRIBUTE, attributes).with_edges(edges)
}

/// Items for a full answer set: CNAMEs first, then address owners
pub fn answers_to_items(group: &AnswerGroup) -> Vec<Item> {
    let cnames = group
        .cnames
        .iter()
        .filter_map(|(name, record)| cname_item(name, record));

    let addresses = group
        .addresses
        .iter()
        .map(|(name, records)| address_item(name, records));

    cnames.chain(addresses).collect()
}
