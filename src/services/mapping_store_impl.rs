//! `SeaORM` implementation of the [`MappingStore`] trait.

use crate::db::Store;
use crate::domain::{CatalogId, MappingStatus, MediaType};
use crate::models::mapping::{Mapping, MappingFilter, MappingInput};
use crate::services::mapping_store::{MappingError, MappingPage, MappingStore};
use tracing::info;

pub struct SeaOrmMappingStore {
    store: Store,
}

impl SeaOrmMappingStore {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl MappingStore for SeaOrmMappingStore {
    async fn find(
        &self,
        catalog_id: CatalogId,
        media_type: MediaType,
        season_number: Option<i32>,
    ) -> Result<Option<String>, MappingError> {
        let mapping = self.store.get_mapping(catalog_id, media_type).await?;
        Ok(mapping.map(|m| m.provider_id_for_season(season_number).to_string()))
    }

    async fn get(
        &self,
        catalog_id: CatalogId,
        media_type: MediaType,
    ) -> Result<Mapping, MappingError> {
        self.store
            .get_mapping(catalog_id, media_type)
            .await?
            .ok_or(MappingError::NotFound {
                catalog_id,
                media_type,
            })
    }

    async fn upsert(&self, input: MappingInput) -> Result<Mapping, MappingError> {
        let mapping = self.store.upsert_mapping(&input).await?;
        info!(
            catalog_id = %mapping.catalog_id,
            media_type = %mapping.media_type,
            provider_id = %mapping.provider_id,
            "Mapping saved"
        );
        Ok(mapping)
    }

    async fn list_all(
        &self,
        filter: &MappingFilter,
        page: u64,
        page_size: u64,
    ) -> Result<MappingPage, MappingError> {
        let (items, total) = self.store.list_mappings(filter, page, page_size).await?;
        Ok(MappingPage { items, total })
    }

    async fn remove(
        &self,
        catalog_id: CatalogId,
        media_type: MediaType,
    ) -> Result<(), MappingError> {
        if self.store.remove_mapping(catalog_id, media_type).await? {
            info!(%catalog_id, %media_type, "Mapping removed");
            Ok(())
        } else {
            Err(MappingError::NotFound {
                catalog_id,
                media_type,
            })
        }
    }

    async fn mark_verified(
        &self,
        catalog_id: CatalogId,
        media_type: MediaType,
    ) -> Result<Mapping, MappingError> {
        let mapping = self
            .store
            .set_mapping_status(catalog_id, media_type, MappingStatus::Verified)
            .await?
            .ok_or(MappingError::NotFound {
                catalog_id,
                media_type,
            })?;
        info!(%catalog_id, %media_type, "Mapping verified");
        Ok(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mapping::SeasonOverride;

    async fn store() -> SeaOrmMappingStore {
        SeaOrmMappingStore::new(Store::new("sqlite::memory:").await.unwrap())
    }

    #[tokio::test]
    async fn find_prefers_season_override() {
        let store = store().await;
        let mut input = MappingInput::new(CatalogId::new(9), MediaType::Series, "A", "Show");
        input.season_overrides = Some(vec![SeasonOverride {
            season_number: 2,
            provider_id: "B".to_string(),
        }]);
        store.upsert(input).await.unwrap();

        let id = CatalogId::new(9);
        assert_eq!(
            store.find(id, MediaType::Series, Some(2)).await.unwrap().as_deref(),
            Some("B")
        );
        assert_eq!(
            store.find(id, MediaType::Series, Some(1)).await.unwrap().as_deref(),
            Some("A")
        );
        assert_eq!(
            store.find(id, MediaType::Series, None).await.unwrap().as_deref(),
            Some("A")
        );
        assert_eq!(store.find(id, MediaType::Movie, None).await.unwrap(), None);
    }

    #[tokio::test]
    async fn remove_and_verify_report_not_found() {
        let store = store().await;
        let id = CatalogId::new(77);

        assert!(matches!(
            store.remove(id, MediaType::Series).await,
            Err(MappingError::NotFound { .. })
        ));
        assert!(matches!(
            store.mark_verified(id, MediaType::Series).await,
            Err(MappingError::NotFound { .. })
        ));
        assert!(matches!(
            store.get(id, MediaType::Series).await,
            Err(MappingError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn mark_verified_sets_status() {
        let store = store().await;
        let id = CatalogId::new(78);
        store
            .upsert(MappingInput::new(id, MediaType::Movie, "film", "Film"))
            .await
            .unwrap();

        let verified = store.mark_verified(id, MediaType::Movie).await.unwrap();
        assert_eq!(verified.status, MappingStatus::Verified);
    }
}
