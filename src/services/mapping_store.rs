//! Persistent catalog-id → provider-id mappings.
//!
//! The store is the only shared mutable resource of the resolution path.
//! Every write is a single upsert keyed by (catalog id, media type).

use crate::domain::{CatalogId, MediaType};
use crate::models::mapping::{Mapping, MappingFilter, MappingInput};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("No mapping for catalog id {catalog_id} ({media_type})")]
    NotFound {
        catalog_id: CatalogId,
        media_type: MediaType,
    },

    #[error("Invalid mapping data: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    /// A stored row that cannot be decoded. Never expected in normal operation.
    #[error("Corrupt mapping data: {0}")]
    Corrupt(String),
}

impl From<sea_orm::DbErr> for MappingError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct MappingPage {
    pub items: Vec<Mapping>,
    pub total: u64,
}

/// Mapping Store contract shared by the orchestrator and the admin surface.
#[async_trait::async_trait]
pub trait MappingStore: Send + Sync {
    /// Provider id for the key, preferring a matching season override.
    ///
    /// Pure lookup: `Ok(None)` when no mapping exists.
    async fn find(
        &self,
        catalog_id: CatalogId,
        media_type: MediaType,
        season_number: Option<i32>,
    ) -> Result<Option<String>, MappingError>;

    /// # Errors
    ///
    /// Returns [`MappingError::NotFound`] if no mapping exists for the key.
    async fn get(&self, catalog_id: CatalogId, media_type: MediaType)
    -> Result<Mapping, MappingError>;

    /// Creates the mapping or overwrites the supplied fields of an existing one.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Validation`] when `provider_id` or `title` is
    /// blank, or season overrides repeat a season number.
    async fn upsert(&self, input: MappingInput) -> Result<Mapping, MappingError>;

    /// Filtered page of mappings, newest first. `page` is 1-based.
    async fn list_all(
        &self,
        filter: &MappingFilter,
        page: u64,
        page_size: u64,
    ) -> Result<MappingPage, MappingError>;

    async fn remove(&self, catalog_id: CatalogId, media_type: MediaType)
    -> Result<(), MappingError>;

    async fn mark_verified(
        &self,
        catalog_id: CatalogId,
        media_type: MediaType,
    ) -> Result<Mapping, MappingError>;
}
