//! Attribute field tables, one per RDAP object class
//!
//! Absent scalars, empty strings and empty lists are left out. Links
//! serialize as their href and vCards as a flat map wherever they occur,
//! including inside events and remarks.

use serde::Serialize;
use serde_json::Value;

use crate::features::rdap::domain::{Autnum, Domain, Entity, Nameserver, RdapIpNetwork};
use crate::shared::models::Attributes;

fn field<T: Serialize + ?Sized>(value: &T) -> Value {
    match serde_json::to_value(value) {
        Ok(Value::String(s)) if s.is_empty() => Value::Null,
        Ok(Value::Array(items)) if items.is_empty() => Value::Null,
        Ok(Value::Object(map)) if map.is_empty() => Value::Null,
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "dropping attribute that failed to serialize");
            Value::Null
        }
    }
}

pub fn ip_network_attributes(network: &RdapIpNetwork) -> Attributes {
    Attributes::from_fields([
        ("conformance", field(&network.conformance)),
        ("country", field(&network.country)),
        ("endAddress", field(&network.end_address)),
        ("events", field(&network.events)),
        ("handle", field(&network.handle)),
        ("ipVersion", field(&network.ip_version)),
        ("links", field(&network.links)),
        ("name", field(&network.name)),
        ("notices", field(&network.notices)),
        ("objectClassName", field(&network.object_class_name)),
        ("parentHandle", field(&network.parent_handle)),
        ("port43", field(&network.port43)),
        ("remarks", field(&network.remarks)),
        ("startAddress", field(&network.start_address)),
        ("status", field(&network.status)),
        ("type", field(&network.network_type)),
    ])
}

pub fn domain_attributes(domain: &Domain) -> Attributes {
    Attributes::from_fields([
        ("conformance", field(&domain.conformance)),
        ("events", field(&domain.events)),
        ("handle", field(&domain.handle)),
        ("ldhName", field(&domain.ldh_name)),
        ("links", field(&domain.links)),
        ("notices", field(&domain.notices)),
        ("objectClassName", field(&domain.object_class_name)),
        ("port43", field(&domain.port43)),
        ("publicIDs", field(&domain.public_ids)),
        ("remarks", field(&domain.remarks)),
        ("secureDNS", field(&domain.secure_dns)),
        ("status", field(&domain.status)),
        ("unicodeName", field(&domain.unicode_name)),
        ("variants", field(&domain.variants)),
    ])
}

pub fn entity_attributes(entity: &Entity) -> Attributes {
    Attributes::from_fields([
        ("asEventActor", field(&entity.as_event_actor)),
        ("conformance", field(&entity.conformance)),
        ("events", field(&entity.events)),
        ("handle", field(&entity.handle)),
        ("links", field(&entity.links)),
        ("notices", field(&entity.notices)),
        ("objectClassName", field(&entity.object_class_name)),
        ("port43", field(&entity.port43)),
        ("publicIDs", field(&entity.public_ids)),
        ("remarks", field(&entity.remarks)),
        ("roles", field(&entity.roles)),
        ("status", field(&entity.status)),
        ("vCard", field(&entity.vcard)),
    ])
}

pub fn nameserver_attributes(nameserver: &Nameserver) -> Attributes {
    Attributes::from_fields([
        ("conformance", field(&nameserver.conformance)),
        ("events", field(&nameserver.events)),
        ("handle", field(&nameserver.handle)),
        ("ipAddresses", field(&nameserver.ip_addresses)),
        ("ldhName", field(&nameserver.ldh_name)),
        ("links", field(&nameserver.links)),
        ("notices", field(&nameserver.notices)),
        ("objectClassName", field(&nameserver.object_class_name)),
        ("port43", field(&nameserver.port43)),
        ("remarks", field(&nameserver.remarks)),
        ("status", field(&nameserver.status)),
        ("unicodeName", field(&nameserver.unicode_name)),
    ])
}

pub fn autnum_attributes(autnum: &Autnum) -> Attributes {
    Attributes::from_fields([
        ("conformance", field(&autnum.conformance)),
        ("country", field(&autnum.country)),
        ("endAutnum", field(&autnum.end_autnum)),
        ("events", field(&autnum.events)),
        ("handle", field(&autnum.handle)),
        ("ipVersion", field(&autnum.ip_version)),
        ("links", field(&autnum.links)),
        ("name", field(&autnum.name)),
        ("notices", field(&autnum.notices)),
        ("objectClassName", field(&autnum.object_class_name)),
        ("port43", field(&autnum.port43)),
        ("remarks", field(&autnum.remarks)),
        ("startAutnum", field(&autnum.start_autnum)),
        ("status", field(&autnum.status)),
        ("type", field(&autnum.autnum_type)),
    ])
}
