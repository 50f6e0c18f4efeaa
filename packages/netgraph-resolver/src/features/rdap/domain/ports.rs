//! RDAP Client Port (Trait Interface)
//!
//! The wire-level client (bootstrap, HTTP, JSON decoding) lives outside this
//! crate. Adapters hand it a typed request and get back a parsed object.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use super::models::RdapObject;

/// What kind of object a request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    IpNetwork,
    Domain,
    Entity,
    Nameserver,
    Autnum,
}

impl RequestKind {
    /// Path segment used in RDAP URLs
    pub fn path_segment(&self) -> &'static str {
        match self {
            RequestKind::IpNetwork => "ip",
            RequestKind::Domain => "domain",
            RequestKind::Entity => "entity",
            RequestKind::Nameserver => "nameserver",
            RequestKind::Autnum => "autnum",
        }
    }

    pub fn from_path_segment(segment: &str) -> Option<Self> {
        match segment {
            "ip" => Some(RequestKind::IpNetwork),
            "domain" => Some(RequestKind::Domain),
            "entity" => Some(RequestKind::Entity),
            "nameserver" => Some(RequestKind::Nameserver),
            "autnum" => Some(RequestKind::Autnum),
            _ => None,
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}

/// A registry request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RdapRequest {
    pub kind: RequestKind,
    pub query: String,
    /// Explicit server root; `None` means bootstrap from the query
    pub server: Option<String>,
}

impl RdapRequest {
    pub fn new(kind: RequestKind, query: impl Into<String>) -> Self {
        Self {
            kind,
            query: query.into(),
            server: None,
        }
    }

    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }
}

/// A registry response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RdapResponse {
    /// `None` when the registry answered without a usable object
    pub object: Option<RdapObject>,
    /// URLs fetched to produce this response, in request order
    pub urls: Vec<String>,
}

impl RdapResponse {
    pub fn new(object: RdapObject) -> Self {
        Self {
            object: Some(object),
            urls: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.urls.push(url.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientErrorKind {
    /// The registry confirmed the object does not exist (HTTP 404)
    ObjectDoesNotExist,
    /// No bootstrap registry covers the query
    BootstrapNoMatch,
    Transport,
    Decode,
}

impl ClientErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientErrorKind::ObjectDoesNotExist => "object_does_not_exist",
            ClientErrorKind::BootstrapNoMatch => "bootstrap_no_match",
            ClientErrorKind::Transport => "transport",
            ClientErrorKind::Decode => "decode",
        }
    }
}

impl fmt::Display for ClientErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("RDAP client error ({kind}): {message}")]
pub struct ClientError {
    pub kind: ClientErrorKind,
    pub message: String,
}

impl ClientError {
    pub fn new(kind: ClientErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn does_not_exist(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::ObjectDoesNotExist, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Transport, message)
    }
}

/// RDAP Client Port
///
/// Implementations must be cancel-safe: dropping the future abandons the
/// request.
#[async_trait]
pub trait RdapClient: Send + Sync {
    async fn execute(&self, request: RdapRequest) -> Result<RdapResponse, ClientError>;
}
