//! Resolver configuration
//!
//! Defaults follow the registry and DNS cache windows: 30 minutes for RDAP
//! results, 5 minutes for DNS answers and HTTP responses.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigFileV1, SUPPORTED_VERSIONS};

pub const ENV_RDAP_CACHE_TTL: &str = "NETGRAPH_RDAP_CACHE_TTL";
pub const ENV_DNS_CACHE_TTL: &str = "NETGRAPH_DNS_CACHE_TTL";
pub const ENV_HTTP_CACHE_TTL: &str = "NETGRAPH_HTTP_CACHE_TTL";
pub const ENV_REVERSE_DNS: &str = "NETGRAPH_REVERSE_DNS";

const MIN_TTL_SECS: u64 = 1;
const MAX_TTL_SECS: u64 = 86_400;

pub const DEFAULT_DNS_SERVERS: &[&str] = &["1.1.1.1:53", "8.8.8.8:53", "8.8.4.4:53"];

fn default_rdap_ttl_secs() -> u64 {
    30 * 60
}

fn default_dns_ttl_secs() -> u64 {
    5 * 60
}

fn default_http_ttl_secs() -> u64 {
    5 * 60
}

fn default_dns_servers() -> Vec<String> {
    DEFAULT_DNS_SERVERS.iter().map(|s| s.to_string()).collect()
}

/// Cache windows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheSettings {
    #[serde(default = "default_rdap_ttl_secs")]
    pub rdap_ttl_secs: u64,

    #[serde(default = "default_dns_ttl_secs")]
    pub dns_ttl_secs: u64,

    #[serde(default = "default_http_ttl_secs")]
    pub http_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            rdap_ttl_secs: default_rdap_ttl_secs(),
            dns_ttl_secs: default_dns_ttl_secs(),
            http_ttl_secs: default_http_ttl_secs(),
        }
    }
}

/// DNS adapter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DnsSettings {
    #[serde(default)]
    pub reverse_lookup: bool,

    /// `ip:port` in order of preference
    ///
    /// Nothing here dials them. The host reads [`ResolverConfig::dns_servers`]
    /// when it builds the `DnsClient` it passes to the registry.
    #[serde(default = "default_dns_servers")]
    pub servers: Vec<String>,
}

impl Default for DnsSettings {
    fn default() -> Self {
        Self {
            reverse_lookup: false,
            servers: default_dns_servers(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    pub cache: CacheSettings,
    pub dns: DnsSettings,
}

impl ResolverConfig {
    /// Load and validate a YAML v1 file
    pub fn from_yaml(path: &str) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let config = Self {
            cache: file.cache.unwrap_or_default(),
            dns: file.dns.unwrap_or_default(),
        };
        config.validate()?;

        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            cache: Some(self.cache.clone()),
            dns: Some(self.dns.clone()),
        };
        Ok(serde_yaml::to_string(&file)?)
    }

    /// Apply `NETGRAPH_*` environment overrides, then validate
    pub fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        self.apply_overrides_from(|var| std::env::var(var).ok())
    }

    /// Same as [`apply_env_overrides`](Self::apply_env_overrides) with an
    /// explicit variable source
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_RDAP_CACHE_TTL) {
            self.cache.rdap_ttl_secs = parse_secs(ENV_RDAP_CACHE_TTL, &value)?;
        }
        if let Some(value) = lookup(ENV_DNS_CACHE_TTL) {
            self.cache.dns_ttl_secs = parse_secs(ENV_DNS_CACHE_TTL, &value)?;
        }
        if let Some(value) = lookup(ENV_HTTP_CACHE_TTL) {
            self.cache.http_ttl_secs = parse_secs(ENV_HTTP_CACHE_TTL, &value)?;
        }
        if let Some(value) = lookup(ENV_REVERSE_DNS) {
            self.dns.reverse_lookup = parse_flag(ENV_REVERSE_DNS, &value)?;
        }

        self.validate()
    }

    pub fn validate(&self) -> ConfigResult<()> {
        check_ttl("cache.rdap_ttl_secs", self.cache.rdap_ttl_secs)?;
        check_ttl("cache.dns_ttl_secs", self.cache.dns_ttl_secs)?;
        check_ttl("cache.http_ttl_secs", self.cache.http_ttl_secs)?;

        for server in &self.dns.servers {
            if server.parse::<SocketAddr>().is_err() {
                return Err(ConfigError::Validation(format!(
                    "dns.servers entry '{}' is not an ip:port address",
                    server
                )));
            }
        }

        Ok(())
    }

    pub fn rdap_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.rdap_ttl_secs)
    }

    pub fn dns_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.dns_ttl_secs)
    }

    pub fn http_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.http_ttl_secs)
    }

    /// Servers for the host's `DnsClient`, or the defaults when none are
    /// listed
    pub fn dns_servers(&self) -> Vec<String> {
        if self.dns.servers.is_empty() {
            default_dns_servers()
        } else {
            self.dns.servers.clone()
        }
    }
}

fn check_ttl(field: &str, value: u64) -> ConfigResult<()> {
    if !(MIN_TTL_SECS..=MAX_TTL_SECS).contains(&value) {
        return Err(ConfigError::range_with_hint(
            field,
            value,
            MIN_TTL_SECS,
            MAX_TTL_SECS,
            "Cache entries must live between one second and one day",
        ));
    }
    Ok(())
}

fn parse_secs(var: &str, value: &str) -> ConfigResult<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::env(var, value, "Expected a whole number of seconds"))
}

fn parse_flag(var: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::env(var, value, "Use true or false")),
    }
}
