use crate::domain::{CatalogId, MappingStatus, MediaType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-season exception to a mapping's default provider id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonOverride {
    pub season_number: i32,
    pub provider_id: String,
}

/// Advisory fields attached to a mapping. Never read by resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_episodes: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MappingMetadata {
    #[must_use]
    pub fn with_notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
            ..Self::default()
        }
    }
}

/// A stored correspondence between a catalog item and a provider entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mapping {
    pub id: i32,
    pub catalog_id: CatalogId,
    pub media_type: MediaType,
    pub provider_id: String,
    pub title: String,
    pub original_title: Option<String>,
    pub season_overrides: Vec<SeasonOverride>,
    pub status: MappingStatus,
    pub metadata: MappingMetadata,
    pub created_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Mapping {
    /// Provider id to use for `season`: the matching override if one exists,
    /// the top-level id otherwise.
    #[must_use]
    pub fn provider_id_for_season(&self, season: Option<i32>) -> &str {
        season
            .and_then(|n| {
                self.season_overrides
                    .iter()
                    .find(|o| o.season_number == n)
            })
            .map_or(self.provider_id.as_str(), |o| o.provider_id.as_str())
    }
}

/// Fields supplied to an upsert.
///
/// `None` on an optional field means "not supplied": on update the stored
/// value is kept. Supplying `season_overrides` replaces the whole list.
#[derive(Debug, Clone)]
pub struct MappingInput {
    pub catalog_id: CatalogId,
    pub media_type: MediaType,
    pub provider_id: String,
    pub title: String,
    pub original_title: Option<String>,
    pub season_overrides: Option<Vec<SeasonOverride>>,
    pub metadata: Option<MappingMetadata>,
    pub created_by: Option<String>,
}

impl MappingInput {
    #[must_use]
    pub fn new(
        catalog_id: CatalogId,
        media_type: MediaType,
        provider_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            catalog_id,
            media_type,
            provider_id: provider_id.into(),
            title: title.into(),
            original_title: None,
            season_overrides: None,
            metadata: None,
            created_by: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.provider_id.trim().is_empty() {
            return Err("provider_id is required".to_string());
        }
        if self.title.trim().is_empty() {
            return Err("title is required".to_string());
        }
        if let Some(overrides) = &self.season_overrides {
            validate_season_overrides(overrides)?;
        }
        Ok(())
    }
}

pub fn validate_season_overrides(overrides: &[SeasonOverride]) -> Result<(), String> {
    let mut seen = HashSet::with_capacity(overrides.len());
    for o in overrides {
        if o.season_number < 0 {
            return Err(format!(
                "Invalid season number {}: must be zero or greater",
                o.season_number
            ));
        }
        if o.provider_id.trim().is_empty() {
            return Err(format!(
                "Season {} override has an empty provider_id",
                o.season_number
            ));
        }
        if !seen.insert(o.season_number) {
            return Err(format!(
                "Duplicate override for season {}",
                o.season_number
            ));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct MappingFilter {
    pub status: Option<MappingStatus>,
    pub media_type: Option<MediaType>,
    /// Case-insensitive substring over title, original title and provider id.
    pub search: Option<String>,
}
