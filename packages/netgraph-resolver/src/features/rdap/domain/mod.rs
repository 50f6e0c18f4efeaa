//! RDAP domain: object model, client port and URL parsing

pub mod models;
pub mod ports;
pub mod rdap_url;

pub use models::{
    Autnum, Domain, Entity, Event, IpAddresses, Link, Nameserver, Notice, PublicId,
    RdapIpNetwork, RdapObject, Remark, VCard, VCardProperty,
};
pub use ports::{
    ClientError, ClientErrorKind, RdapClient, RdapRequest, RdapResponse, RequestKind,
};
pub use rdap_url::RdapUrl;
