//! netgraph-resolver: registry (RDAP) and DNS resolution for an asset graph
//!
//! Resolves IP addresses, CIDR blocks, domain names, AS numbers, entity
//! handles, nameserver URLs and HTTP URLs into graph items with typed,
//! directional edges ("blast propagation").
//!
//! ## Core Principles
//!
//! 1. **At most once per window**: every (source, method, scope, type, query)
//!    identity reaches the upstream client at most once per cache TTL,
//!    whether it succeeded or failed
//! 2. **Allocations cover addresses**: once a registry has returned the
//!    network for one address, every address inside it resolves locally
//! 3. **No I/O here**: the wire-level RDAP, DNS and HTTP clients are ports
//!
//! ## Usage
//!
//! ```rust,ignore
//! use netgraph_resolver::{AdapterRegistry, ItemQuery, QueryMethod, ResolverConfig};
//!
//! let mut config = ResolverConfig::from_yaml("netgraph.yaml")?;
//! config.apply_env_overrides()?;
//!
//! let registry = AdapterRegistry::new(
//!     &config,
//!     rdap_client,
//!     dns_client,
//!     http_client,
//!     &prometheus_registry,
//! )?;
//!
//! let query = ItemQuery::new("rdap-ip-network", QueryMethod::Search, "1.1.1.1", "global");
//! let items = registry.execute(&query, false).await?;
//!
//! for edge in &items[0].linked_item_queries {
//!     registry.execute(&edge.query, false).await?;
//! }
//! ```

pub mod config;
pub mod errors;
pub mod features;
pub mod registry;
pub mod shared;

pub use config::{ConfigError, ResolverConfig};
pub use errors::{ErrorKind, QueryError, Result};
pub use registry::AdapterRegistry;
pub use shared::models::{
    Attributes, BlastPropagation, EdgeDescriptor, Item, ItemQuery, QueryIdentity, QueryMethod,
    GLOBAL_SCOPE,
};
pub use shared::ports::Adapter;
