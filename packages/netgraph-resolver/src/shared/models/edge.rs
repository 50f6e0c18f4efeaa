//! Edge descriptors ("linked item queries") with blast propagation

use serde::{Deserialize, Serialize};

use super::query::QueryMethod;

/// A query the orchestrating engine can run to resolve the target of an edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemQuery {
    #[serde(rename = "type")]
    pub item_type: String,
    pub method: QueryMethod,
    pub query: String,
    pub scope: String,
}

impl ItemQuery {
    pub fn new(
        item_type: impl Into<String>,
        method: QueryMethod,
        query: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            item_type: item_type.into(),
            method,
            query: query.into(),
            scope: scope.into(),
        }
    }
}

/// Direction in which a change is considered to travel along an edge
///
/// - `propagates_in`: a change to the target may affect the source item
/// - `propagates_out`: a change to the source item may affect the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlastPropagation {
    #[serde(rename = "in")]
    pub propagates_in: bool,
    #[serde(rename = "out")]
    pub propagates_out: bool,
}

impl BlastPropagation {
    pub const fn new(propagates_in: bool, propagates_out: bool) -> Self {
        Self {
            propagates_in,
            propagates_out,
        }
    }

    /// Informational only
    pub const fn inert() -> Self {
        Self::new(false, false)
    }

    /// Both sides are the same logical thing
    pub const fn both() -> Self {
        Self::new(true, true)
    }

    pub const fn inbound() -> Self {
        Self::new(true, false)
    }

    pub const fn outbound() -> Self {
        Self::new(false, true)
    }
}

/// Outbound edge of an item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDescriptor {
    pub query: ItemQuery,
    pub blast_propagation: BlastPropagation,
}

impl EdgeDescriptor {
    pub fn new(query: ItemQuery, blast_propagation: BlastPropagation) -> Self {
        Self {
            query,
            blast_propagation,
        }
    }

    pub fn target_type(&self) -> &str {
        &self.query.item_type
    }
}
