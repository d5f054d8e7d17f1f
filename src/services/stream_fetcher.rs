use crate::clients::{ProviderError, StreamProvider, bounded};
use crate::models::stream::EpisodeSources;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Pass-through to the provider's per-episode source listing.
///
/// Stream URLs are short-lived, so nothing is cached here.
#[derive(Clone)]
pub struct StreamFetcher {
    provider: Arc<dyn StreamProvider>,
    timeout: Duration,
}

impl StreamFetcher {
    #[must_use]
    pub fn new(provider: Arc<dyn StreamProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// `Ok(None)` when the provider does not know the episode. An empty
    /// source list is returned as-is for the caller to judge.
    ///
    /// # Errors
    ///
    /// Only when the provider is unavailable (timeout, transport, 5xx).
    pub async fn fetch_sources(
        &self,
        episode_id: &str,
    ) -> Result<Option<EpisodeSources>, ProviderError> {
        match bounded(self.timeout, self.provider.sources(episode_id)).await {
            Ok(sources) => {
                debug!(episode_id, count = sources.sources.len(), "Fetched stream sources");
                Ok(Some(sources))
            }
            Err(e) if e.is_unavailable() => Err(e),
            Err(e) => {
                info!(episode_id, error = %e, "No stream sources for episode");
                Ok(None)
            }
        }
    }
}
