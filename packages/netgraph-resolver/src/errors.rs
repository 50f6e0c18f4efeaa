//! Error types for netgraph-resolver
//!
//! Every adapter operation returns a [`QueryError`] on failure. The kind is
//! preserved through the result cache, so a cached not-found replays as a
//! not-found rather than a generic failure.

use std::fmt;
use thiserror::Error;

/// Query error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The upstream object does not exist, or the method can't resolve it
    NotFound,
    /// The requested scope is not served by the adapter
    NoScope,
    /// The query string is not the expected shape (IP, CIDR, URL, ...)
    MalformedInput,
    /// The registry/DNS client failed for any other reason
    Upstream,
    /// The client returned an object of the wrong kind
    UnexpectedResponse,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::NoScope => "no_scope",
            ErrorKind::MalformedInput => "malformed_input",
            ErrorKind::Upstream => "upstream",
            ErrorKind::UnexpectedResponse => "unexpected_response",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classified query error
///
/// `Clone + PartialEq` because negative results are stored in the result
/// cache and handed out again verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{kind}] {message}")]
pub struct QueryError {
    pub kind: ErrorKind,
    pub message: String,
    pub scope: Option<String>,
    pub item_type: Option<String>,
    pub source_name: Option<String>,
}

impl QueryError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            scope: None,
            item_type: None,
            source_name: None,
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_item_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = Some(item_type.into());
        self
    }

    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = Some(source_name.into());
        self
    }

    /// Fill in whichever context fields are still unset
    pub fn in_context(mut self, scope: &str, item_type: &str, source_name: &str) -> Self {
        if self.scope.is_none() {
            self.scope = Some(scope.to_string());
        }
        if self.item_type.is_none() {
            self.item_type = Some(item_type.to_string());
        }
        if self.source_name.is_none() {
            self.source_name = Some(source_name.to_string());
        }
        self
    }

    // Convenience constructors
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn no_scope(scope: impl Into<String>) -> Self {
        let scope = scope.into();
        Self::new(
            ErrorKind::NoScope,
            format!("Scope '{}' is not served by this adapter", scope),
        )
        .with_scope(scope)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedInput, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Upstream, message)
    }

    pub fn unexpected_response(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnexpectedResponse, message)
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    /// Whether this error may be stored as a negative cache entry.
    ///
    /// Input and contract errors are returned immediately and never cached.
    pub fn is_cacheable(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound | ErrorKind::Upstream)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, QueryError>;
