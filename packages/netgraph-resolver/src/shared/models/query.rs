//! Query identity (the cache key of every resolution)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Scope used by every registry and DNS item
pub const GLOBAL_SCOPE: &str = "global";

/// Query method
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QueryMethod {
    Get,
    List,
    Search,
}

impl QueryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryMethod::Get => "GET",
            QueryMethod::List => "LIST",
            QueryMethod::Search => "SEARCH",
        }
    }
}

impl fmt::Display for QueryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity of a query: (source, method, scope, item type, query string)
///
/// Two identities with equal tuples are the same request for caching
/// purposes, no matter which caller built them. Uses `Arc<str>` so clones
/// handed to the cache don't copy the strings.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct QueryIdentity {
    pub source: Arc<str>,
    pub method: QueryMethod,
    pub scope: Arc<str>,
    pub item_type: Arc<str>,
    pub query: Arc<str>,
}

impl QueryIdentity {
    pub fn new(
        source: impl Into<Arc<str>>,
        method: QueryMethod,
        scope: impl Into<Arc<str>>,
        item_type: impl Into<Arc<str>>,
        query: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            source: source.into(),
            method,
            scope: scope.into(),
            item_type: item_type.into(),
            query: query.into(),
        }
    }
}

impl fmt::Display for QueryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}",
            self.source, self.method, self.scope, self.item_type, self.query
        )
    }
}
