use crate::clients::provider::{ProviderError, StreamProvider};
use crate::config::ProviderConfig;
use crate::models::stream::{EpisodeSources, ProviderCandidate, ProviderEpisode, StreamSource};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

const DEFAULT_QUALITY_LABEL: &str = "default";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: String,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InfoResponse {
    #[serde(default)]
    episodes: Vec<EpisodeItem>,
}

#[derive(Debug, Deserialize)]
struct EpisodeItem {
    id: String,
    number: f64,
}

#[derive(Debug, Deserialize)]
struct WatchResponse {
    #[serde(default)]
    sources: Vec<SourceItem>,
    #[serde(default)]
    headers: Option<WatchHeaders>,
}

#[derive(Debug, Deserialize)]
struct SourceItem {
    url: String,
    #[serde(default)]
    quality: Option<String>,
    #[serde(rename = "isM3U8", default)]
    is_m3u8: bool,
}

#[derive(Debug, Deserialize)]
struct WatchHeaders {
    #[serde(rename = "Referer", alias = "referer", default)]
    referer: Option<String>,
}

impl From<SearchItem> for ProviderCandidate {
    fn from(item: SearchItem) -> Self {
        let display_title = item.title.unwrap_or_else(|| item.id.clone());
        Self {
            provider_id: item.id,
            display_title,
        }
    }
}

impl From<WatchResponse> for EpisodeSources {
    fn from(resp: WatchResponse) -> Self {
        Self {
            sources: resp
                .sources
                .into_iter()
                .filter(|s| !s.url.trim().is_empty())
                .map(|s| StreamSource {
                    url: s.url,
                    quality_label: s
                        .quality
                        .filter(|q| !q.trim().is_empty())
                        .unwrap_or_else(|| DEFAULT_QUALITY_LABEL.to_string()),
                    is_m3u8: s.is_m3u8,
                })
                .collect(),
            referer: resp.headers.and_then(|h| h.referer),
        }
    }
}

/// Client for a Consumet-compatible anime API.
///
/// Built once from [`ProviderConfig`]; base URL and provider are fixed for
/// the lifetime of the client.
#[derive(Clone)]
pub struct ConsumetClient {
    client: Client,
    base_url: String,
    provider: String,
}

impl ConsumetClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .pool_max_idle_per_host(10)
            .build()?;
        Ok(Self::with_shared_client(client, config))
    }

    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            provider: config.provider.clone(),
        }
    }

    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = format!("{}/anime/{}", self.base_url, self.provider);
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ProviderError> {
        let response = self.client.get(url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound);
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl StreamProvider for ConsumetClient {
    fn name(&self) -> &str {
        &self.provider
    }

    async fn search(&self, query: &str) -> Result<Vec<ProviderCandidate>, ProviderError> {
        let url = self.endpoint(&[query]);
        let response: SearchResponse = self.get_json(&url).await?;
        Ok(response
            .results
            .into_iter()
            .map(ProviderCandidate::from)
            .collect())
    }

    async fn episodes(&self, provider_id: &str) -> Result<Vec<ProviderEpisode>, ProviderError> {
        let url = self.endpoint(&["info", provider_id]);
        let response: InfoResponse = self.get_json(&url).await?;
        Ok(response
            .episodes
            .into_iter()
            .map(|e| ProviderEpisode {
                id: e.id,
                number: e.number,
            })
            .collect())
    }

    async fn sources(&self, episode_id: &str) -> Result<EpisodeSources, ProviderError> {
        let url = self.endpoint(&["watch", episode_id]);
        let response: WatchResponse = self.get_json(&url).await?;
        Ok(response.into())
    }
}
