//! HTTP Client Port (Trait Interface)
//!
//! The client sends a single HEAD request. It must not follow redirects and
//! must not reject untrusted certificates: the point is to report what the
//! server presents, not to trust it.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TlsVersion {
    Ssl3,
    Tls10,
    Tls11,
    Tls12,
    Tls13,
    Unknown,
}

impl TlsVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            TlsVersion::Ssl3 => "SSLv3",
            TlsVersion::Tls10 => "TLSv1.0",
            TlsVersion::Tls11 => "TLSv1.1",
            TlsVersion::Tls12 => "TLSv1.2",
            TlsVersion::Tls13 => "TLSv1.3",
            TlsVersion::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TlsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leaf certificate presented by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerCertificate {
    pub common_name: String,
    /// Lower-case hex SHA-1 of the DER encoding
    pub sha1_fingerprint: String,
}

impl PeerCertificate {
    pub fn new(common_name: impl Into<String>, sha1_fingerprint: impl Into<String>) -> Self {
        Self {
            common_name: common_name.into(),
            sha1_fingerprint: sha1_fingerprint.into(),
        }
    }

    /// `{common name} (SHA-1: {fingerprint})`
    pub fn display_name(&self) -> String {
        format!("{} (SHA-1: {})", self.common_name, self.sha1_fingerprint)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsState {
    pub version: TlsVersion,
    pub server_name: String,
    pub peer_certificate: Option<PeerCertificate>,
}

/// Response to a HEAD request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadResponse {
    pub status: u16,
    /// Status line text, e.g. `301 Moved Permanently`
    pub status_text: String,
    /// e.g. `HTTP/1.1`
    pub proto: String,
    /// In received order; a name may repeat
    pub headers: Vec<(String, String)>,
    pub transfer_encoding: Vec<String>,
    pub tls: Option<TlsState>,
}

impl HeadResponse {
    pub fn new(status: u16, status_text: impl Into<String>, proto: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            proto: proto.into(),
            headers: Vec::new(),
            transfer_encoding: Vec::new(),
            tls: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_tls(mut self, tls: TlsState) -> Self {
        self.tls = Some(tls);
        self
    }

    /// Headers keyed by name, repeated values joined with `, `
    pub fn header_map(&self) -> BTreeMap<String, String> {
        let mut map: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in &self.headers {
            map.entry(name.clone())
                .and_modify(|joined| {
                    joined.push_str(", ");
                    joined.push_str(value);
                })
                .or_insert_with(|| value.clone());
        }
        map
    }

    /// First `Location` header, matched case-insensitively
    pub fn location(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("location"))
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
    }

    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    #[error("invalid request URL {0}")]
    InvalidUrl(String),

    #[error("HEAD {url} failed: {message}")]
    Request { url: String, message: String },
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn head(&self, url: &str) -> Result<HeadResponse, HttpClientError>;
}
