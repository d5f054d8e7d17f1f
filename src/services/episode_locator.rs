use crate::clients::{ProviderError, StreamProvider, bounded};
use crate::models::stream::ProviderEpisode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Finds the provider's episode id for an episode number.
#[derive(Clone)]
pub struct EpisodeLocator {
    provider: Arc<dyn StreamProvider>,
    timeout: Duration,
}

impl EpisodeLocator {
    #[must_use]
    pub fn new(provider: Arc<dyn StreamProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// `Ok(None)` covers both an unknown provider id and an episode number
    /// missing from the listing.
    ///
    /// # Errors
    ///
    /// Only when the provider is unavailable (timeout, transport, 5xx).
    pub async fn locate_episode(
        &self,
        provider_id: &str,
        episode_number: i32,
    ) -> Result<Option<String>, ProviderError> {
        let episodes = match bounded(self.timeout, self.provider.episodes(provider_id)).await {
            Ok(episodes) => episodes,
            Err(e) if e.is_unavailable() => return Err(e),
            Err(e) => {
                info!(provider_id, error = %e, "Episode listing unavailable for provider id");
                return Ok(None);
            }
        };

        let found = find_episode(&episodes, episode_number).map(|e| e.id.clone());
        debug!(
            provider_id,
            episode_number,
            listed = episodes.len(),
            found = found.is_some(),
            "Episode lookup finished"
        );
        Ok(found)
    }
}

/// Linear scan for the entry numbered exactly `episode_number`.
#[must_use]
pub fn find_episode(episodes: &[ProviderEpisode], episode_number: i32) -> Option<&ProviderEpisode> {
    let target = f64::from(episode_number);
    episodes
        .iter()
        .find(|e| (e.number - target).abs() < f64::EPSILON)
}
