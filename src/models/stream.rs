use serde::{Deserialize, Serialize};

/// A provider catalog entry returned by free-text search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCandidate {
    pub provider_id: String,
    pub display_title: String,
}

/// One entry of a provider's episode listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderEpisode {
    pub id: String,
    /// Providers number specials fractionally (e.g. 12.5).
    pub number: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSource {
    pub url: String,
    pub quality_label: String,
    #[serde(default)]
    pub is_m3u8: bool,
}

/// Everything the provider hands back for one episode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeSources {
    pub sources: Vec<StreamSource>,
    /// Referer the player must send when fetching the sources, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
}

/// Successful outcome of a stream resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedStream {
    pub provider_id: String,
    pub sources: Vec<StreamSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
}
