//! RDAP object URLs (`<server root>/<kind>/<query>`)

use once_cell::sync::Lazy;
use regex::Regex;

use super::ports::RequestKind;
use crate::errors::{QueryError, Result};

static RDAP_URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://.+)/(ip|nameserver|entity|autnum|domain)/([^/]+)$")
        .expect("RDAP URL pattern is valid")
});

/// Components of an RDAP object URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RdapUrl {
    /// Where queries are run, e.g. `https://rdap.apnic.net`
    pub server_root: String,
    pub kind: RequestKind,
    pub query: String,
}

impl RdapUrl {
    pub fn parse(url: &str) -> Result<Self> {
        let captures = RDAP_URL_PATTERN
            .captures(url)
            .ok_or_else(|| QueryError::malformed(format!("Invalid RDAP URL: {}", url)))?;

        let kind = RequestKind::from_path_segment(&captures[2])
            .ok_or_else(|| QueryError::malformed(format!("Invalid RDAP URL: {}", url)))?;

        Ok(Self {
            server_root: captures[1].to_string(),
            kind,
            query: captures[3].to_string(),
        })
    }

    /// URL of a `kind` object named `query` on the same server
    pub fn join(&self, kind: RequestKind, query: &str) -> String {
        format!(
            "{}/{}/{}",
            self.server_root.trim_end_matches('/'),
            kind.path_segment(),
            query
        )
    }
}
