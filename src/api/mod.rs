use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, patch, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::{MappingStore, ProviderSearchClient, ResolutionService};
use crate::state::SharedState;

mod error;
pub mod mappings;
mod observability;
mod provider;
mod stream;
mod system;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        self.shared.config()
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn mappings(&self) -> &Arc<dyn MappingStore> {
        &self.shared.mappings
    }

    #[must_use]
    pub fn resolution(&self) -> &ResolutionService {
        &self.shared.resolution
    }

    #[must_use]
    pub fn provider_search(&self) -> &ProviderSearchClient {
        &self.shared.provider_search
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .route("/anime/stream/{catalog_id}", get(stream::resolve_stream))
        .route("/anime/mapping", post(mappings::upsert_mapping))
        .route(
            "/anime/mapping/{catalog_id}",
            get(mappings::get_mapping).delete(mappings::delete_mapping),
        )
        .route(
            "/anime/mapping/{catalog_id}/verify",
            patch(mappings::verify_mapping),
        )
        .route("/anime/mappings", get(mappings::list_mappings))
        .route("/anime/search-provider", get(provider::search_provider))
        .route("/system/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
        .with_state(state);

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}
