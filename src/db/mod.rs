use crate::domain::{CatalogId, MappingStatus, MediaType};
use crate::models::mapping::{Mapping, MappingFilter, MappingInput};
use crate::services::mapping_store::MappingError;
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        if in_memory {
            // every sqlite connection gets its own in-memory database
            opt.max_connections(1).min_connections(1);
        } else {
            opt.max_connections(max_connections)
                .min_connections(min_connections)
                .idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn mapping_repo(&self) -> repositories::mapping::MappingRepository {
        repositories::mapping::MappingRepository::new(self.conn.clone())
    }

    pub async fn get_mapping(
        &self,
        catalog_id: CatalogId,
        media_type: MediaType,
    ) -> Result<Option<Mapping>, MappingError> {
        self.mapping_repo().get(catalog_id, media_type).await
    }

    pub async fn upsert_mapping(&self, input: &MappingInput) -> Result<Mapping, MappingError> {
        self.mapping_repo().upsert(input).await
    }

    pub async fn list_mappings(
        &self,
        filter: &MappingFilter,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<Mapping>, u64), MappingError> {
        self.mapping_repo().list(filter, page, page_size).await
    }

    pub async fn remove_mapping(
        &self,
        catalog_id: CatalogId,
        media_type: MediaType,
    ) -> Result<bool, MappingError> {
        self.mapping_repo().remove(catalog_id, media_type).await
    }

    pub async fn set_mapping_status(
        &self,
        catalog_id: CatalogId,
        media_type: MediaType,
        status: MappingStatus,
    ) -> Result<Option<Mapping>, MappingError> {
        self.mapping_repo()
            .set_status(catalog_id, media_type, status)
            .await
    }
}
