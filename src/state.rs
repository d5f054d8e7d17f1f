use std::sync::Arc;

use crate::clients::{ConsumetClient, StreamProvider};
use crate::config::Config;
use crate::db::Store;
use crate::services::{
    MappingStore, ProviderSearchClient, ResolutionService, SeaOrmMappingStore,
};

/// Build the HTTP client used for all provider calls.
fn build_shared_http_client(config: &Config) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.provider.request_timeout())
        .user_agent(config.provider.user_agent.clone())
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

/// Everything the HTTP surface and the CLI share. Built once at startup;
/// nothing here is mutated afterwards.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub provider: Arc<dyn StreamProvider>,

    pub mappings: Arc<dyn MappingStore>,

    pub provider_search: ProviderSearchClient,

    pub resolution: ResolutionService,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client(&config)?;
        let provider = Arc::new(ConsumetClient::with_shared_client(
            http_client,
            &config.provider,
        )) as Arc<dyn StreamProvider>;

        Self::with_provider(config, provider).await
    }

    /// Same as [`SharedState::new`] with a caller-supplied provider.
    pub async fn with_provider(
        config: Config,
        provider: Arc<dyn StreamProvider>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let mappings =
            Arc::new(SeaOrmMappingStore::new(store.clone())) as Arc<dyn MappingStore>;

        let timeout = config.provider.request_timeout();
        let provider_search = ProviderSearchClient::new(provider.clone(), timeout);
        let resolution = ResolutionService::new(
            mappings.clone(),
            provider.clone(),
            timeout,
            &config.resolver,
        );

        tracing::debug!(provider = provider.name(), "Shared state initialized");

        Ok(Self {
            config: Arc::new(config),
            store,
            provider,
            mappings,
            provider_search,
            resolution,
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}
