use crate::clients::{StreamProvider, bounded};
use crate::models::stream::ProviderCandidate;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Free-text search over the provider catalog.
///
/// Never fails: an unreachable provider, a timeout or an empty result set
/// all come back as "no candidates".
#[derive(Clone)]
pub struct ProviderSearchClient {
    provider: Arc<dyn StreamProvider>,
    timeout: Duration,
}

impl ProviderSearchClient {
    #[must_use]
    pub fn new(provider: Arc<dyn StreamProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub async fn search(&self, query: &str) -> Vec<ProviderCandidate> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        match bounded(self.timeout, self.provider.search(query)).await {
            Ok(candidates) => {
                debug!(
                    provider = self.provider.name(),
                    query,
                    count = candidates.len(),
                    "Provider search finished"
                );
                candidates
            }
            Err(e) => {
                warn!(provider = self.provider.name(), query, error = %e, "Provider search failed");
                Vec::new()
            }
        }
    }
}
