//! Features
//!
//! - `cache`: result cache (per query identity) and range cache (per network)
//! - `network`: IP network type and CIDR calculation
//! - `rdap`: registry object model, link graph builder and RDAP adapters
//! - `dns`: DNS adapter
//! - `http`: HTTP adapter (HEAD status and TLS details)
//! - `ip`: IP adapter (inherent address properties)

pub mod cache;
pub mod dns;
pub mod http;
pub mod ip;
pub mod network;
pub mod rdap;
