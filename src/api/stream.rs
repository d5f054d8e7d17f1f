use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::api::validation::{
    parse_media_type, resolve_episode_number, validate_catalog_id, validate_season_number,
};
use crate::models::stream::ResolvedStream;
use crate::services::StreamRequest;

#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    pub media_type: Option<String>,
    pub season_number: Option<i32>,
    pub episode_number: Option<i32>,
    /// Fallback discovery hint, already resolved by the caller from the
    /// metadata catalog.
    pub title: Option<String>,
}

/// `GET /api/anime/stream/{catalog_id}`
pub async fn resolve_stream(
    State(state): State<Arc<AppState>>,
    Path(catalog_id): Path<i32>,
    Query(query): Query<StreamQuery>,
) -> Result<Json<ApiResponse<ResolvedStream>>, ApiError> {
    let catalog_id = validate_catalog_id(catalog_id)?;
    let media_type = parse_media_type(query.media_type.as_deref())?;
    let season_number = validate_season_number(query.season_number)?;
    let episode_number = resolve_episode_number(media_type, query.episode_number)?;

    let stream = state
        .resolution()
        .resolve_stream(StreamRequest {
            catalog_id,
            media_type,
            season_number,
            episode_number,
            title: query.title,
        })
        .await?;

    Ok(Json(ApiResponse::success(stream)))
}
