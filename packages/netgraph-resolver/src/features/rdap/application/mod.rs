//! RDAP application layer: attribute tables, edge building, domain walk

pub mod attributes;
pub mod domain_resolver;
pub mod links;

pub use domain_resolver::{candidate_suffixes, DomainResolver, ResolvedDomain};
