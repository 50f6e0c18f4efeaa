//! Resolver configuration (YAML schema v1 plus `NETGRAPH_*` overrides)
//!
//! ```yaml
//! version: 1
//! cache:
//!   rdap_ttl_secs: 1800
//!   dns_ttl_secs: 300
//!   http_ttl_secs: 300
//! dns:
//!   reverse_lookup: false
//!   servers: ["1.1.1.1:53", "8.8.8.8:53", "8.8.4.4:53"]
//! ```

pub mod error;
pub mod io;
pub mod resolver_config;

pub use error::{ConfigError, ConfigResult};
pub use resolver_config::{
    CacheSettings, DnsSettings, ResolverConfig, DEFAULT_DNS_SERVERS, ENV_DNS_CACHE_TTL,
    ENV_HTTP_CACHE_TTL, ENV_RDAP_CACHE_TTL, ENV_REVERSE_DNS,
};
