//! RDAP feature
//!
//! # Hexagonal Architecture
//! ```text
//! Adapter trait (engine-facing)
//!           ↓
//! adapters/ (ip network, domain, entity, nameserver, asn)
//!           ↓
//! application/ (domain walk, edges, attribute tables)
//!           ↓
//! domain/ (object model, RdapClient port, URLs)
//! ```

pub mod adapters;
pub mod application;
pub mod domain;

pub use adapters::{
    wrap_client_error, AsnAdapter, DomainAdapter, EntityAdapter, IpNetworkAdapter,
    NameserverAdapter, RdapContext,
};
pub use application::{candidate_suffixes, DomainResolver, ResolvedDomain};
pub use domain::{
    ClientError, ClientErrorKind, RdapClient, RdapObject, RdapRequest, RdapResponse, RdapUrl,
    RequestKind,
};
