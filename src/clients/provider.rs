use crate::models::stream::{EpisodeSources, ProviderCandidate, ProviderEpisode};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider resource not found")]
    NotFound,

    #[error("Provider request timed out")]
    Timeout,

    #[error("Provider transport error: {0}")]
    Transport(String),

    #[error("Provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode provider response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// True when a retry later might succeed: timeouts, transport failures
    /// and server-side errors.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        match self {
            Self::Timeout | Self::Transport(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::NotFound | Self::Decode(_) => false,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Runs one upstream call with an upper bound. Elapsed means
/// [`ProviderError::Timeout`]; the call is not retried.
pub async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| ProviderError::Timeout)?
}

/// Read-only view of a streaming provider's catalog.
///
/// All three calls are idempotent and safe to repeat.
#[async_trait::async_trait]
pub trait StreamProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Free-text search, in the provider's own relevance order.
    async fn search(&self, query: &str) -> Result<Vec<ProviderCandidate>, ProviderError>;

    /// Full episode listing for a provider catalog entry.
    async fn episodes(&self, provider_id: &str) -> Result<Vec<ProviderEpisode>, ProviderError>;

    /// Playable sources for one provider episode.
    async fn sources(&self, episode_id: &str) -> Result<EpisodeSources, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn bounded_turns_elapsed_into_timeout() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok::<_, ProviderError>(1)
        };
        let result = bounded(Duration::from_secs(1), slow).await;
        assert!(matches!(result, Err(ProviderError::Timeout)));

        let fast = async { Ok::<_, ProviderError>(2) };
        assert_eq!(bounded(Duration::from_secs(1), fast).await.unwrap(), 2);
    }

    #[test]
    fn unavailable_classification() {
        assert!(ProviderError::Timeout.is_unavailable());
        assert!(ProviderError::Transport("reset".to_string()).is_unavailable());
        assert!(
            ProviderError::Status {
                status: 503,
                body: String::new()
            }
            .is_unavailable()
        );
        assert!(
            !ProviderError::Status {
                status: 400,
                body: String::new()
            }
            .is_unavailable()
        );
        assert!(!ProviderError::NotFound.is_unavailable());
        assert!(!ProviderError::Decode("eof".to_string()).is_unavailable());
    }
}
