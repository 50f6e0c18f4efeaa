//! Configuration I/O (YAML schema)
//!
//! Defines the on-disk shape only. Loading and validation live in
//! resolver_config.rs.

use serde::{Deserialize, Serialize};

use super::resolver_config::{CacheSettings, DnsSettings};

/// YAML Schema v1
///
/// `version` is optional here only so a missing one can be reported as
/// such instead of as a generic parse error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    pub version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns: Option<DnsSettings>,
}

pub const SUPPORTED_VERSIONS: &[u32] = &[1];
