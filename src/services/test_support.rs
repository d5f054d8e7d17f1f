//! In-process stubs shared by the service tests.

use crate::clients::{ProviderError, StreamProvider};
use crate::domain::{CatalogId, MediaType};
use crate::models::mapping::{Mapping, MappingFilter, MappingInput};
use crate::services::mapping_store::{MappingError, MappingPage, MappingStore};
use crate::models::stream::{EpisodeSources, ProviderCandidate, ProviderEpisode, StreamSource};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Default)]
pub struct StubProvider {
    search_results: HashMap<String, Vec<ProviderCandidate>>,
    episodes: HashMap<String, Vec<ProviderEpisode>>,
    sources: HashMap<String, EpisodeSources>,
    unavailable: bool,
    delay: Option<Duration>,
    pub queries: Mutex<Vec<String>>,
    pub episode_calls: AtomicUsize,
    pub source_calls: AtomicUsize,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: &str, ids: &[(&str, &str)]) -> Self {
        let candidates = ids
            .iter()
            .map(|(id, title)| ProviderCandidate {
                provider_id: (*id).to_string(),
                display_title: (*title).to_string(),
            })
            .collect();
        self.search_results.insert(query.to_string(), candidates);
        self
    }

    pub fn with_episodes(mut self, provider_id: &str, episodes: &[(&str, f64)]) -> Self {
        let listing = episodes
            .iter()
            .map(|(id, number)| ProviderEpisode {
                id: (*id).to_string(),
                number: *number,
            })
            .collect();
        self.episodes.insert(provider_id.to_string(), listing);
        self
    }

    pub fn with_sources(mut self, episode_id: &str, urls: &[&str]) -> Self {
        let sources = urls
            .iter()
            .map(|url| StreamSource {
                url: (*url).to_string(),
                quality_label: "default".to_string(),
                is_m3u8: url.ends_with(".m3u8"),
            })
            .collect();
        self.sources.insert(
            episode_id.to_string(),
            EpisodeSources {
                sources,
                referer: None,
            },
        );
        self
    }

    pub const fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    async fn pause(&self) -> Result<(), ProviderError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.unavailable {
            return Err(ProviderError::Transport("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl StreamProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn search(&self, query: &str) -> Result<Vec<ProviderCandidate>, ProviderError> {
        self.queries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(query.to_string());
        self.pause().await?;
        Ok(self.search_results.get(query).cloned().unwrap_or_default())
    }

    async fn episodes(&self, provider_id: &str) -> Result<Vec<ProviderEpisode>, ProviderError> {
        self.episode_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await?;
        self.episodes
            .get(provider_id)
            .cloned()
            .ok_or(ProviderError::NotFound)
    }

    async fn sources(&self, episode_id: &str) -> Result<EpisodeSources, ProviderError> {
        self.source_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await?;
        self.sources
            .get(episode_id)
            .cloned()
            .ok_or(ProviderError::NotFound)
    }
}

/// Mapping store whose reads miss and whose writes always fail.
pub struct FailingMappingStore;

#[async_trait::async_trait]
impl MappingStore for FailingMappingStore {
    async fn find(
        &self,
        _catalog_id: CatalogId,
        _media_type: MediaType,
        _season_number: Option<i32>,
    ) -> Result<Option<String>, MappingError> {
        Ok(None)
    }

    async fn get(
        &self,
        catalog_id: CatalogId,
        media_type: MediaType,
    ) -> Result<Mapping, MappingError> {
        Err(MappingError::NotFound {
            catalog_id,
            media_type,
        })
    }

    async fn upsert(&self, _input: MappingInput) -> Result<Mapping, MappingError> {
        Err(MappingError::Database("database is locked".to_string()))
    }

    async fn list_all(
        &self,
        _filter: &MappingFilter,
        _page: u64,
        _page_size: u64,
    ) -> Result<MappingPage, MappingError> {
        Err(MappingError::Database("database is locked".to_string()))
    }

    async fn remove(
        &self,
        _catalog_id: CatalogId,
        _media_type: MediaType,
    ) -> Result<(), MappingError> {
        Err(MappingError::Database("database is locked".to_string()))
    }

    async fn mark_verified(
        &self,
        _catalog_id: CatalogId,
        _media_type: MediaType,
    ) -> Result<Mapping, MappingError> {
        Err(MappingError::Database("database is locked".to_string()))
    }
}
