//! DNS Client Port (Trait Interface)
//!
//! Server selection and the wire exchange happen behind this trait.

use async_trait::async_trait;
use thiserror::Error;

use super::models::{DnsRecord, RecordType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DnsClientError {
    #[error("no dns servers available")]
    NoServersAvailable,

    #[error("DNS exchange failed for {name} ({record_type}): {message}")]
    Exchange {
        name: String,
        record_type: RecordType,
        message: String,
    },
}

#[async_trait]
pub trait DnsClient: Send + Sync {
    /// Answer section for `name` (fully qualified) and `record_type`
    ///
    /// An empty answer is `Ok(vec![])`, not an error.
    async fn query(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>, DnsClientError>;
}
