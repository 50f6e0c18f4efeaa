//! RDAP object model
//!
//! Field names follow the RDAP JSON responses (RFC 9083). Every collection
//! defaults to empty and every scalar to `None`, since registries omit
//! fields freely.
//!
//! Serialization is used to build item attributes, not to reproduce the
//! wire format: a [`Link`] serializes as its `href` and a [`VCard`] as a
//! flat map of its populated fields.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A link to a related resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Link {
    pub value: Option<String>,
    pub rel: Option<String>,
    pub href: String,
    pub hreflang: Vec<String>,
    pub title: Option<String>,
    pub media: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
}

impl Link {
    pub fn is_self(&self) -> bool {
        self.rel.as_deref() == Some("self")
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.href)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Event {
    pub event_action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_actor: Option<String>,
    pub event_date: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

/// Remark or notice
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Remark {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub remark_type: Option<String>,
    pub description: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

pub type Notice = Remark;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicId {
    #[serde(rename = "type")]
    pub id_type: String,
    pub identifier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpAddresses {
    pub v4: Vec<String>,
    pub v6: Vec<String>,
}

impl IpAddresses {
    /// All addresses, IPv4 first
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.v4.iter().chain(self.v6.iter()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.v4.is_empty() && self.v6.is_empty()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// jCard (RFC 7095)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One jCard property: `[name, parameters, type, value, ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct VCardProperty {
    pub name: String,
    pub parameters: serde_json::Map<String, Value>,
    pub value_type: String,
    pub values: Vec<Value>,
}

impl VCardProperty {
    /// Parameter values for `key`, whether given as a string or a list
    fn parameter(&self, key: &str) -> Vec<&str> {
        match self.parameters.get(key) {
            Some(Value::String(s)) => vec![s.as_str()],
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Values flattened to one string
    fn text(&self) -> String {
        self.values
            .iter()
            .map(flatten_value)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn flatten_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .map(flatten_value)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    }
}

/// Contact card in jCard form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VCard {
    pub properties: Vec<VCardProperty>,
}

// Structured `adr` value components
const ADR_PO_BOX: usize = 0;
const ADR_EXTENDED: usize = 1;
const ADR_STREET: usize = 2;
const ADR_LOCALITY: usize = 3;
const ADR_REGION: usize = 4;
const ADR_POSTAL_CODE: usize = 5;
const ADR_COUNTRY: usize = 6;

impl VCard {
    pub fn get(&self, name: &str) -> impl Iterator<Item = &VCardProperty> {
        let name = name.to_ascii_lowercase();
        self.properties.iter().filter(move |p| p.name == name)
    }

    fn first_text(&self, name: &str) -> String {
        self.get(name).next().map(VCardProperty::text).unwrap_or_default()
    }

    fn address_component(&self, index: usize) -> String {
        self.get("adr")
            .next()
            .and_then(|adr| match adr.values.first() {
                Some(Value::Array(components)) => components.get(index).map(flatten_value),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Formatted name (`fn`)
    pub fn name(&self) -> String {
        self.first_text("fn")
    }

    pub fn po_box(&self) -> String {
        self.address_component(ADR_PO_BOX)
    }

    pub fn extended_address(&self) -> String {
        self.address_component(ADR_EXTENDED)
    }

    pub fn street_address(&self) -> String {
        self.address_component(ADR_STREET)
    }

    pub fn locality(&self) -> String {
        self.address_component(ADR_LOCALITY)
    }

    pub fn region(&self) -> String {
        self.address_component(ADR_REGION)
    }

    pub fn postal_code(&self) -> String {
        self.address_component(ADR_POSTAL_CODE)
    }

    pub fn country(&self) -> String {
        self.address_component(ADR_COUNTRY)
    }

    /// First telephone number not typed as a fax
    pub fn tel(&self) -> String {
        self.get("tel")
            .find(|p| !p.parameter("type").contains(&"fax"))
            .map(VCardProperty::text)
            .unwrap_or_default()
    }

    pub fn fax(&self) -> String {
        self.get("tel")
            .find(|p| p.parameter("type").contains(&"fax"))
            .map(VCardProperty::text)
            .unwrap_or_default()
    }

    pub fn email(&self) -> String {
        self.first_text("email")
    }

    pub fn org(&self) -> String {
        self.first_text("org")
    }

    /// Populated fields, keyed by display name
    pub fn details(&self) -> Vec<(&'static str, String)> {
        [
            ("Name", self.name()),
            ("POBox", self.po_box()),
            ("ExtendedAddress", self.extended_address()),
            ("StreetAddress", self.street_address()),
            ("Locality", self.locality()),
            ("Region", self.region()),
            ("PostalCode", self.postal_code()),
            ("Country", self.country()),
            ("Tel", self.tel()),
            ("Fax", self.fax()),
            ("Email", self.email()),
            ("Org", self.org()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }
}

impl<'de> Deserialize<'de> for VCard {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;

        let properties = match raw.as_array().map(Vec::as_slice) {
            Some([Value::String(tag), Value::Array(props)]) if tag == "vcard" => props,
            _ => return Err(de::Error::custom("expected [\"vcard\", [...]]")),
        };

        let mut card = VCard::default();
        for prop in properties {
            let parts = prop
                .as_array()
                .filter(|parts| parts.len() >= 4)
                .ok_or_else(|| de::Error::custom("jCard property needs at least 4 elements"))?;

            card.properties.push(VCardProperty {
                name: parts[0].as_str().unwrap_or_default().to_ascii_lowercase(),
                parameters: parts[1].as_object().cloned().unwrap_or_default(),
                value_type: parts[2].as_str().unwrap_or_default().to_string(),
                values: parts[3..].to_vec(),
            });
        }

        Ok(card)
    }
}

impl Serialize for VCard {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let details = self.details();
        let mut map = serializer.serialize_map(Some(details.len()))?;
        for (key, value) in &details {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Object classes
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Entity {
    pub object_class_name: String,
    #[serde(rename = "rdapConformance")]
    pub conformance: Vec<String>,
    pub notices: Vec<Notice>,
    pub handle: Option<String>,
    #[serde(rename = "vcardArray")]
    pub vcard: Option<VCard>,
    pub roles: Vec<String>,
    #[serde(rename = "publicIDs")]
    pub public_ids: Vec<PublicId>,
    pub entities: Vec<Entity>,
    pub remarks: Vec<Remark>,
    pub links: Vec<Link>,
    pub events: Vec<Event>,
    pub as_event_actor: Vec<Event>,
    pub status: Vec<String>,
    pub port43: Option<String>,
    pub networks: Vec<RdapIpNetwork>,
    pub autnums: Vec<Autnum>,
}

impl Entity {
    /// Href of the `rel = "self"` link
    pub fn self_link(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.is_self())
            .map(|link| link.href.as_str())
            .filter(|href| !href.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RdapIpNetwork {
    pub object_class_name: String,
    #[serde(rename = "rdapConformance")]
    pub conformance: Vec<String>,
    pub notices: Vec<Notice>,
    pub handle: Option<String>,
    pub start_address: String,
    pub end_address: String,
    pub ip_version: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub network_type: Option<String>,
    pub country: Option<String>,
    pub parent_handle: Option<String>,
    pub status: Vec<String>,
    pub entities: Vec<Entity>,
    pub remarks: Vec<Remark>,
    pub links: Vec<Link>,
    pub port43: Option<String>,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Nameserver {
    pub object_class_name: String,
    #[serde(rename = "rdapConformance")]
    pub conformance: Vec<String>,
    pub notices: Vec<Notice>,
    pub handle: Option<String>,
    pub ldh_name: String,
    pub unicode_name: Option<String>,
    pub ip_addresses: Option<IpAddresses>,
    pub entities: Vec<Entity>,
    pub status: Vec<String>,
    pub remarks: Vec<Remark>,
    pub links: Vec<Link>,
    pub port43: Option<String>,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Domain {
    pub object_class_name: String,
    #[serde(rename = "rdapConformance")]
    pub conformance: Vec<String>,
    pub notices: Vec<Notice>,
    pub handle: Option<String>,
    pub ldh_name: Option<String>,
    pub unicode_name: Option<String>,
    /// Passed through as-is
    pub variants: Vec<Value>,
    pub nameservers: Vec<Nameserver>,
    /// Passed through as-is
    #[serde(rename = "secureDNS")]
    pub secure_dns: Option<Value>,
    pub entities: Vec<Entity>,
    pub status: Vec<String>,
    #[serde(rename = "publicIDs")]
    pub public_ids: Vec<PublicId>,
    pub remarks: Vec<Remark>,
    pub links: Vec<Link>,
    pub port43: Option<String>,
    pub events: Vec<Event>,
    pub network: Option<Box<RdapIpNetwork>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Autnum {
    pub object_class_name: String,
    #[serde(rename = "rdapConformance")]
    pub conformance: Vec<String>,
    pub notices: Vec<Notice>,
    pub handle: Option<String>,
    pub start_autnum: Option<u32>,
    pub end_autnum: Option<u32>,
    pub ip_version: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub autnum_type: Option<String>,
    pub status: Vec<String>,
    pub country: Option<String>,
    pub entities: Vec<Entity>,
    pub remarks: Vec<Remark>,
    pub links: Vec<Link>,
    pub port43: Option<String>,
    pub events: Vec<Event>,
}

/// Parsed top-level RDAP response object
#[derive(Debug, Clone, PartialEq)]
pub enum RdapObject {
    IpNetwork(RdapIpNetwork),
    Domain(Domain),
    Entity(Entity),
    Nameserver(Nameserver),
    Autnum(Autnum),
}

impl RdapObject {
    /// Decode a response body, dispatching on `objectClassName`
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        let class = value
            .get("objectClassName")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        match class.as_str() {
            "ip network" => serde_json::from_value(value).map(RdapObject::IpNetwork),
            "domain" => serde_json::from_value(value).map(RdapObject::Domain),
            "entity" => serde_json::from_value(value).map(RdapObject::Entity),
            "nameserver" => serde_json::from_value(value).map(RdapObject::Nameserver),
            "autnum" => serde_json::from_value(value).map(RdapObject::Autnum),
            other => Err(de::Error::custom(format!(
                "unknown objectClassName '{}'",
                other
            ))),
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            RdapObject::IpNetwork(_) => "ip network",
            RdapObject::Domain(_) => "domain",
            RdapObject::Entity(_) => "entity",
            RdapObject::Nameserver(_) => "nameserver",
            RdapObject::Autnum(_) => "autnum",
        }
    }
}
