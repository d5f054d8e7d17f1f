use serde::{Deserialize, Serialize};

use crate::domain::{CatalogId, MediaType};
use crate::models::mapping::{Mapping, MappingMetadata, SeasonOverride};

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Machine-readable failure code, set for stream resolution failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            reason: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            reason: None,
        }
    }

    pub fn failure(message: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            reason: Some(reason.into()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    #[must_use]
    pub const fn new(page: u64, limit: u64, total: u64) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MappingListDto {
    pub items: Vec<Mapping>,
    pub pagination: Pagination,
}

/// Provider id for a catalog entry after applying season overrides.
#[derive(Debug, Serialize, Deserialize)]
pub struct MappingLookupDto {
    pub catalog_id: CatalogId,
    pub media_type: MediaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_number: Option<i32>,
    pub provider_id: String,
    pub mapping: Mapping,
}

#[derive(Debug, Deserialize)]
pub struct UpsertMappingRequest {
    pub catalog_id: i32,
    pub media_type: Option<String>,
    pub provider_id: String,
    pub title: String,
    pub original_title: Option<String>,
    pub season_overrides: Option<Vec<SeasonOverride>>,
    pub metadata: Option<MappingMetadata>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    pub version: String,
    pub uptime: u64,
    pub database: bool,
    pub provider: String,
    pub in_flight_resolutions: usize,
}
