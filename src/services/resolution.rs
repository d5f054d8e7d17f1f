//! Stream resolution: catalog id in, playable sources out.
//!
//! Each request walks lookup → discovery → episode lookup → source fetch,
//! strictly in order, and ends in exactly one [`ResolveOutcome`].

use crate::clients::StreamProvider;
use crate::config::ResolverConfig;
use crate::domain::{CatalogId, MediaType};
use crate::models::mapping::{MappingInput, MappingMetadata};
use crate::models::stream::ResolvedStream;
use crate::services::episode_locator::EpisodeLocator;
use crate::services::mapping_store::MappingStore;
use crate::services::provider_search::ProviderSearchClient;
use crate::services::stream_fetcher::StreamFetcher;
use crate::services::title_resolver::TitleResolver;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared, WeakShared};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;
use thiserror::Error;
use tracing::{Instrument, debug, info, info_span, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRequest {
    pub catalog_id: CatalogId,
    pub media_type: MediaType,
    pub season_number: Option<i32>,
    pub episode_number: i32,
    /// Discovery hint, only consulted when no mapping exists.
    pub title: Option<String>,
}

impl StreamRequest {
    fn title_hint(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Expected, caller-facing ways a resolution can end without sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveFailure {
    #[error("No mapping exists and no title was provided")]
    NoMappingAndNoTitle,

    #[error("No provider entry matches the title")]
    TitleNotResolvable,

    #[error("Episode not found in the provider listing")]
    EpisodeNotFound,

    #[error("Provider returned no playable sources")]
    NoPlayableSources,

    #[error("Streaming provider is unavailable")]
    UpstreamUnavailable,
}

impl ResolveFailure {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::NoMappingAndNoTitle => "no_mapping_and_no_title",
            Self::TitleNotResolvable => "title_not_resolvable",
            Self::EpisodeNotFound => "episode_not_found",
            Self::NoPlayableSources => "no_playable_sources",
            Self::UpstreamUnavailable => "upstream_unavailable",
        }
    }

    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::NoMappingAndNoTitle => "This title isn't linked to a video source yet",
            Self::TitleNotResolvable => "We couldn't find this title on the video source",
            Self::EpisodeNotFound => "This episode isn't available yet",
            Self::NoPlayableSources => "No video found for this episode",
            Self::UpstreamUnavailable => {
                "The video source is not responding right now, please try again later"
            }
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Failure(#[from] ResolveFailure),

    /// Unexpected condition such as unreadable stored data.
    #[error("Internal resolution error: {0}")]
    Internal(String),
}

impl ResolveError {
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Failure(failure) => failure.reason(),
            Self::Internal(_) => "internal",
        }
    }
}

pub type ResolveOutcome = Result<ResolvedStream, ResolveError>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RequestKey {
    catalog_id: CatalogId,
    media_type: MediaType,
    season_number: Option<i32>,
    episode_number: i32,
    has_title: bool,
}

impl From<&StreamRequest> for RequestKey {
    fn from(request: &StreamRequest) -> Self {
        Self {
            catalog_id: request.catalog_id,
            media_type: request.media_type,
            season_number: request.season_number,
            episode_number: request.episode_number,
            has_title: request.title_hint().is_some(),
        }
    }
}

type SharedOutcome = Shared<BoxFuture<'static, ResolveOutcome>>;

/// In-flight resolutions by key. Entries are weak: a resolution nobody
/// awaits any more is dropped, not kept alive by the table.
#[derive(Default)]
struct InFlight {
    next_generation: u64,
    entries: HashMap<RequestKey, (u64, WeakShared<BoxFuture<'static, ResolveOutcome>>)>,
}

type InFlightMap = Mutex<InFlight>;

/// Removes its own entry once the leading resolution finishes or is dropped.
struct InFlightGuard {
    in_flight: Weak<InFlightMap>,
    key: RequestKey,
    generation: u64,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let Some(in_flight) = self.in_flight.upgrade() else {
            return;
        };
        let mut in_flight = in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if in_flight
            .entries
            .get(&self.key)
            .is_some_and(|(generation, _)| *generation == self.generation)
        {
            in_flight.entries.remove(&self.key);
        }
    }
}

/// The sequential pipeline. Cheap to clone; every field is shared.
#[derive(Clone)]
struct Pipeline {
    mappings: Arc<dyn MappingStore>,
    titles: TitleResolver,
    locator: EpisodeLocator,
    fetcher: StreamFetcher,
    auto_persist: bool,
    discovery_note: String,
}

impl Pipeline {
    async fn run(&self, request: StreamRequest) -> ResolveOutcome {
        let (provider_id, discovered) = self.provider_id(&request).await?;

        let episode_id = match self
            .locator
            .locate_episode(&provider_id, request.episode_number)
            .await
        {
            Ok(Some(id)) => id,
            Ok(None) => return Err(ResolveFailure::EpisodeNotFound.into()),
            Err(e) => {
                warn!(provider_id = %provider_id, error = %e, "Episode listing failed");
                return Err(ResolveFailure::UpstreamUnavailable.into());
            }
        };

        let sources = match self.fetcher.fetch_sources(&episode_id).await {
            Ok(Some(sources)) if !sources.sources.is_empty() => sources,
            Ok(_) => return Err(ResolveFailure::NoPlayableSources.into()),
            Err(e) => {
                warn!(episode_id = %episode_id, error = %e, "Source fetch failed");
                return Err(ResolveFailure::UpstreamUnavailable.into());
            }
        };

        if discovered
            && self.auto_persist
            && let Some(title) = request.title_hint()
        {
            self.persist_discovery(&request, &provider_id, title).await;
        }

        Ok(ResolvedStream {
            provider_id,
            sources: sources.sources,
            referer: sources.referer,
        })
    }

    /// Stored mapping first, title discovery second. The flag is set when the
    /// id came from discovery and has not been written back yet.
    async fn provider_id(&self, request: &StreamRequest) -> Result<(String, bool), ResolveError> {
        let stored = self
            .mappings
            .find(request.catalog_id, request.media_type, request.season_number)
            .await
            .map_err(|e| ResolveError::Internal(e.to_string()))?;

        if let Some(provider_id) = stored {
            debug!(provider_id = %provider_id, "Mapping hit");
            return Ok((provider_id, false));
        }

        let title = request
            .title_hint()
            .ok_or(ResolveFailure::NoMappingAndNoTitle)?;

        let provider_id = self
            .titles
            .resolve_by_title(title)
            .await
            .ok_or(ResolveFailure::TitleNotResolvable)?;

        metrics::counter!("mapping_discoveries_total").increment(1);
        debug!(provider_id = %provider_id, "Discovered provider id from title");
        Ok((provider_id, true))
    }

    async fn persist_discovery(&self, request: &StreamRequest, provider_id: &str, title: &str) {
        let mut input =
            MappingInput::new(request.catalog_id, request.media_type, provider_id, title);
        input.metadata = Some(MappingMetadata::with_notes(self.discovery_note.clone()));

        if let Err(e) = self.mappings.upsert(input).await {
            metrics::counter!("mapping_persist_failures_total").increment(1);
            warn!(provider_id, error = %e, "Failed to persist discovered mapping");
        }
    }
}

/// Resolution Orchestrator.
///
/// Concurrent identical requests share one upstream resolution when
/// coalescing is enabled.
#[derive(Clone)]
pub struct ResolutionService {
    pipeline: Pipeline,
    coalesce: bool,
    in_flight: Arc<InFlightMap>,
}

impl ResolutionService {
    #[must_use]
    pub fn new(
        mappings: Arc<dyn MappingStore>,
        provider: Arc<dyn StreamProvider>,
        request_timeout: Duration,
        config: &ResolverConfig,
    ) -> Self {
        let search = ProviderSearchClient::new(provider.clone(), request_timeout);
        Self {
            pipeline: Pipeline {
                mappings,
                titles: TitleResolver::new(search),
                locator: EpisodeLocator::new(provider.clone(), request_timeout),
                fetcher: StreamFetcher::new(provider, request_timeout),
                auto_persist: config.auto_persist,
                discovery_note: config.discovery_note.clone(),
            },
            coalesce: config.coalesce_requests,
            in_flight: Arc::new(Mutex::new(InFlight::default())),
        }
    }

    pub async fn resolve_stream(&self, request: StreamRequest) -> ResolveOutcome {
        let span = info_span!(
            "resolve_stream",
            catalog_id = %request.catalog_id,
            media_type = %request.media_type,
            season = ?request.season_number,
            episode = request.episode_number,
        );

        let outcome = if self.coalesce {
            self.coalesced(request).instrument(span.clone()).await
        } else {
            self.pipeline.run(request).instrument(span.clone()).await
        };

        span.in_scope(|| record_outcome(&outcome));
        outcome
    }

    async fn coalesced(&self, request: StreamRequest) -> ResolveOutcome {
        let key = RequestKey::from(&request);

        let shared: SharedOutcome = {
            let mut in_flight = self
                .in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            let existing = in_flight
                .entries
                .get(&key)
                .and_then(|(_, weak)| weak.upgrade());

            if let Some(existing) = existing {
                metrics::counter!("coalesced_requests_total").increment(1);
                debug!("Joining in-flight resolution");
                existing
            } else {
                in_flight.next_generation += 1;
                let generation = in_flight.next_generation;
                let guard = InFlightGuard {
                    in_flight: Arc::downgrade(&self.in_flight),
                    key: key.clone(),
                    generation,
                };
                let pipeline = self.pipeline.clone();
                let fut = async move {
                    let _guard = guard;
                    pipeline.run(request).await
                }
                .boxed()
                .shared();
                if let Some(weak) = fut.downgrade() {
                    in_flight.entries.insert(key, (generation, weak));
                }
                fut
            }
        };

        shared.await
    }

    /// Number of resolutions currently running upstream.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }
}

fn record_outcome(outcome: &ResolveOutcome) {
    match outcome {
        Ok(stream) => {
            metrics::counter!("stream_resolutions_total", "outcome" => "success").increment(1);
            info!(
                provider_id = %stream.provider_id,
                sources = stream.sources.len(),
                "Stream resolved"
            );
        }
        Err(ResolveError::Failure(failure)) => {
            metrics::counter!("stream_resolutions_total", "outcome" => failure.reason())
                .increment(1);
            info!(reason = failure.reason(), "Stream resolution failed");
        }
        Err(ResolveError::Internal(detail)) => {
            metrics::counter!("stream_resolutions_total", "outcome" => "internal").increment(1);
            warn!(error = %detail, "Stream resolution hit an internal error");
        }
    }
}
