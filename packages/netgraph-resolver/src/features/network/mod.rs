//! IP networks and CIDR calculation

mod cidr;
mod ip_network;

pub use cidr::covering_network;
pub use ip_network::{unmap, IpNetwork, NetworkError};
