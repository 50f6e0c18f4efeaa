//! Domain Resolver: most specific registered domain for a hostname
//!
//! Registry delegation is hierarchical and bootstrapping by name does not
//! reliably land on the most specific zone, so candidates are tried from
//! the full name down and the first answer wins.

use std::sync::Arc;

use crate::errors::{QueryError, Result};
use crate::features::rdap::domain::{
    Domain, RdapClient, RdapObject, RdapRequest, RequestKind,
};

/// Candidate names for `name`, longest first
///
/// `www.example.co.uk` gives `www.example.co.uk`, `example.co.uk` and
/// `co.uk`. The bare top-level label is never a candidate. One trailing dot
/// is ignored and empty labels are dropped.
pub fn candidate_suffixes(name: &str) -> Vec<String> {
    let name = name.strip_suffix('.').unwrap_or(name);
    let labels: Vec<&str> = name.split('.').filter(|label| !label.is_empty()).collect();

    (0..labels.len().saturating_sub(1))
        .map(|start| labels[start..].join("."))
        .collect()
}

/// A domain found by the suffix walk
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDomain {
    /// Candidate that produced the answer
    pub candidate: String,
    pub domain: Domain,
    /// URLs the client fetched for the answer
    pub urls: Vec<String>,
}

pub struct DomainResolver {
    client: Arc<dyn RdapClient>,
}

impl DomainResolver {
    pub fn new(client: Arc<dyn RdapClient>) -> Self {
        Self { client }
    }

    /// Walk the candidates of `name`, stopping at the first answer
    ///
    /// Client errors on a candidate move on to the next one. An answer with
    /// no object ends the walk as not-found, and an answer of the wrong
    /// class as an unexpected response.
    pub async fn search(&self, name: &str) -> Result<ResolvedDomain> {
        for candidate in candidate_suffixes(name) {
            tracing::info!(query = %candidate, "rdap domain request");

            let request = RdapRequest::new(RequestKind::Domain, candidate.as_str());
            let response = match self.client.execute(request).await {
                Ok(response) => response,
                Err(err) => {
                    tracing::debug!(candidate = %candidate, error = %err, "domain candidate failed");
                    continue;
                }
            };

            return match response.object {
                Some(RdapObject::Domain(domain)) => Ok(ResolvedDomain {
                    candidate,
                    domain,
                    urls: response.urls,
                }),
                Some(other) => {
                    tracing::warn!(candidate = %candidate, class = other.class_name(), "unexpected RDAP object");
                    Err(QueryError::unexpected_response(format!(
                        "Expected domain, got {}",
                        other.class_name()
                    )))
                }
                None => Err(QueryError::not_found(format!(
                    "Empty domain response for {}",
                    candidate
                ))),
            };
        }

        Err(QueryError::not_found(format!("No domain found for {}", name)))
    }
}
