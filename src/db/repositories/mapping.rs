use crate::domain::{CatalogId, MappingStatus, MediaType};
use crate::entities::{anime_mappings, prelude::*};
use crate::models::mapping::{Mapping, MappingFilter, MappingInput, MappingMetadata, SeasonOverride};
use crate::services::mapping_store::MappingError;
use sea_orm::sea_query::{LikeExpr, OnConflict};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

pub struct MappingRepository {
    conn: DatabaseConnection,
}

impl MappingRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: anime_mappings::Model) -> Result<Mapping, MappingError> {
        let corrupt = |what: &str, detail: String| {
            MappingError::Corrupt(format!("mapping {}: {what}: {detail}", model.id))
        };

        let media_type = model
            .media_type
            .parse::<MediaType>()
            .map_err(|e| corrupt("media_type", e))?;
        let status = model
            .status
            .parse::<MappingStatus>()
            .map_err(|e| corrupt("status", e))?;
        let season_overrides: Vec<SeasonOverride> = serde_json::from_str(&model.season_overrides)
            .map_err(|e| corrupt("season_overrides", e.to_string()))?;
        let metadata: MappingMetadata = serde_json::from_str(&model.metadata)
            .map_err(|e| corrupt("metadata", e.to_string()))?;

        Ok(Mapping {
            id: model.id,
            catalog_id: CatalogId::new(model.catalog_id),
            media_type,
            provider_id: model.provider_id,
            title: model.title,
            original_title: model.original_title,
            season_overrides,
            status,
            metadata,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    fn key_filter(catalog_id: CatalogId, media_type: MediaType) -> Condition {
        Condition::all()
            .add(anime_mappings::Column::CatalogId.eq(catalog_id.value()))
            .add(anime_mappings::Column::MediaType.eq(media_type.as_str()))
    }

    pub async fn get(
        &self,
        catalog_id: CatalogId,
        media_type: MediaType,
    ) -> Result<Option<Mapping>, MappingError> {
        AnimeMappings::find()
            .filter(Self::key_filter(catalog_id, media_type))
            .one(&self.conn)
            .await?
            .map(Self::map_model)
            .transpose()
    }

    /// Inserts or merges a mapping in one statement.
    ///
    /// Only supplied fields are written on conflict, so a racing upsert for
    /// the same key can never produce a second row or reset fields it did
    /// not touch.
    pub async fn upsert(&self, input: &MappingInput) -> Result<Mapping, MappingError> {
        input.validate().map_err(MappingError::Validation)?;

        let now = timestamp_now();
        let season_overrides = input
            .season_overrides
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| MappingError::Validation(e.to_string()))?;
        let metadata = input
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| MappingError::Validation(e.to_string()))?;

        let mut update_columns = vec![
            anime_mappings::Column::ProviderId,
            anime_mappings::Column::Title,
            anime_mappings::Column::UpdatedAt,
        ];
        if input.original_title.is_some() {
            update_columns.push(anime_mappings::Column::OriginalTitle);
        }
        if season_overrides.is_some() {
            update_columns.push(anime_mappings::Column::SeasonOverrides);
        }
        if metadata.is_some() {
            update_columns.push(anime_mappings::Column::Metadata);
        }
        if input.created_by.is_some() {
            update_columns.push(anime_mappings::Column::CreatedBy);
        }

        let active_model = anime_mappings::ActiveModel {
            catalog_id: Set(input.catalog_id.value()),
            media_type: Set(input.media_type.as_str().to_string()),
            provider_id: Set(input.provider_id.trim().to_string()),
            title: Set(input.title.trim().to_string()),
            original_title: Set(input.original_title.clone()),
            season_overrides: Set(season_overrides.unwrap_or_else(|| "[]".to_string())),
            status: Set(MappingStatus::Unverified.as_str().to_string()),
            metadata: Set(metadata.unwrap_or_else(|| "{}".to_string())),
            created_by: Set(input.created_by.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            search_key: Set(search_key(
                input.title.trim(),
                input.original_title.as_deref(),
                input.provider_id.trim(),
            )),
            ..Default::default()
        };

        AnimeMappings::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    anime_mappings::Column::CatalogId,
                    anime_mappings::Column::MediaType,
                ])
                .update_columns(update_columns)
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        let mut model = AnimeMappings::find()
            .filter(Self::key_filter(input.catalog_id, input.media_type))
            .one(&self.conn)
            .await?
            .ok_or_else(|| {
                MappingError::Database(format!(
                    "mapping {}/{} missing after upsert",
                    input.catalog_id, input.media_type
                ))
            })?;

        // A kept original title is not part of the conflict update.
        let key = search_key(&model.title, model.original_title.as_deref(), &model.provider_id);
        if model.search_key != key {
            AnimeMappings::update_many()
                .col_expr(
                    anime_mappings::Column::SearchKey,
                    sea_orm::sea_query::Expr::value(key.clone()),
                )
                .filter(anime_mappings::Column::Id.eq(model.id))
                .exec(&self.conn)
                .await?;
            model.search_key = key;
        }

        Self::map_model(model)
    }

    pub async fn list(
        &self,
        filter: &MappingFilter,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<Mapping>, u64), MappingError> {
        let mut query = AnimeMappings::find()
            .order_by_desc(anime_mappings::Column::CreatedAt)
            .order_by_desc(anime_mappings::Column::Id);

        if let Some(status) = filter.status {
            query = query.filter(anime_mappings::Column::Status.eq(status.as_str()));
        }

        if let Some(media_type) = filter.media_type {
            query = query.filter(anime_mappings::Column::MediaType.eq(media_type.as_str()));
        }

        if let Some(search) = filter.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            let pattern = format!("%{}%", escape_like(&search.to_lowercase()));
            query = query.filter(
                anime_mappings::Column::SearchKey.like(LikeExpr::new(pattern).escape('\\')),
            );
        }

        let paginator = query.paginate(&self.conn, page_size.max(1));
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;

        let items = models
            .into_iter()
            .map(Self::map_model)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((items, total))
    }

    pub async fn remove(
        &self,
        catalog_id: CatalogId,
        media_type: MediaType,
    ) -> Result<bool, MappingError> {
        let result = AnimeMappings::delete_many()
            .filter(Self::key_filter(catalog_id, media_type))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn set_status(
        &self,
        catalog_id: CatalogId,
        media_type: MediaType,
        status: MappingStatus,
    ) -> Result<Option<Mapping>, MappingError> {
        let result = AnimeMappings::update_many()
            .col_expr(
                anime_mappings::Column::Status,
                sea_orm::sea_query::Expr::value(status.as_str()),
            )
            .col_expr(
                anime_mappings::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(timestamp_now()),
            )
            .filter(Self::key_filter(catalog_id, media_type))
            .exec(&self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get(catalog_id, media_type).await
    }
}

/// Fixed-width so timestamps order correctly as text.
fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

/// Case-folded text the list search matches against. SQLite's own `LIKE`
/// and `lower()` only fold ASCII.
fn search_key(title: &str, original_title: Option<&str>, provider_id: &str) -> String {
    [title, original_title.unwrap_or_default(), provider_id]
        .join("\n")
        .to_lowercase()
}

/// Only the wildcards need escaping; the pattern is already lower-cased.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
