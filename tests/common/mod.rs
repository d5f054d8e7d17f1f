#![allow(dead_code)]

use anistream::api::{AppState, create_app_state, router};
use anistream::clients::{ProviderError, StreamProvider};
use anistream::config::Config;
use anistream::models::stream::{EpisodeSources, ProviderCandidate, ProviderEpisode, StreamSource};
use anistream::state::SharedState;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt;

/// Canned provider catalog keyed by query, provider id and episode id.
#[derive(Default)]
pub struct FakeProvider {
    pub search: HashMap<String, Vec<ProviderCandidate>>,
    pub episodes: HashMap<String, Vec<ProviderEpisode>>,
    pub sources: HashMap<String, Vec<StreamSource>>,
    pub down: bool,
    pub search_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn sample() -> Self {
        let mut provider = Self::default();
        provider.search.insert(
            "Sample Anime".to_string(),
            vec![ProviderCandidate {
                provider_id: "sample-anime".to_string(),
                display_title: "Sample Anime".to_string(),
            }],
        );
        provider.search.insert(
            "Example Show".to_string(),
            vec![ProviderCandidate {
                provider_id: "example-show".to_string(),
                display_title: "Example Show".to_string(),
            }],
        );
        provider.episodes.insert(
            "sample-anime".to_string(),
            (1..=4)
                .map(|n| ProviderEpisode {
                    id: format!("sample-anime-episode-{n}"),
                    number: f64::from(n),
                })
                .collect(),
        );
        provider.episodes.insert(
            "example-show".to_string(),
            vec![ProviderEpisode {
                id: "example-show-episode-1".to_string(),
                number: 1.0,
            }],
        );
        provider.sources.insert(
            "sample-anime-episode-3".to_string(),
            vec![StreamSource {
                url: "https://cdn.example/ep3.m3u8".to_string(),
                quality_label: "default".to_string(),
                is_m3u8: true,
            }],
        );
        provider
            .sources
            .insert("sample-anime-episode-4".to_string(), Vec::new());
        provider.sources.insert(
            "example-show-episode-1".to_string(),
            vec![StreamSource {
                url: "https://cdn.example/example-1.mp4".to_string(),
                quality_label: "720p".to_string(),
                is_m3u8: false,
            }],
        );
        provider
    }

    pub fn unavailable() -> Self {
        Self {
            down: true,
            ..Self::sample()
        }
    }

    fn check(&self) -> Result<(), ProviderError> {
        if self.down {
            Err(ProviderError::Status {
                status: 503,
                body: "maintenance".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl StreamProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    async fn search(&self, query: &str) -> Result<Vec<ProviderCandidate>, ProviderError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.search.get(query).cloned().unwrap_or_default())
    }

    async fn episodes(&self, provider_id: &str) -> Result<Vec<ProviderEpisode>, ProviderError> {
        self.check()?;
        self.episodes
            .get(provider_id)
            .cloned()
            .ok_or(ProviderError::NotFound)
    }

    async fn sources(&self, episode_id: &str) -> Result<EpisodeSources, ProviderError> {
        self.check()?;
        self.sources
            .get(episode_id)
            .cloned()
            .map(|sources| EpisodeSources {
                sources,
                referer: Some("https://provider.example/embed".to_string()),
            })
            .ok_or(ProviderError::NotFound)
    }
}

pub async fn spawn_app_with(provider: Arc<FakeProvider>) -> (Arc<AppState>, Router) {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();

    let shared = SharedState::with_provider(config, provider)
        .await
        .expect("Failed to create shared state");
    let state = create_app_state(Arc::new(shared), None);
    (state.clone(), router(state))
}

pub async fn spawn_app() -> Router {
    spawn_app_with(Arc::new(FakeProvider::sample())).await.1
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    body: &serde_json::Value,
    account_id: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(account_id) = account_id {
        builder = builder.header("x-account-id", account_id);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

pub async fn request(app: &Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
    send(
        app,
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}
