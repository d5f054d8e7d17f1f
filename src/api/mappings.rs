use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{
    ApiError, ApiResponse, AppState, MappingListDto, MappingLookupDto, Pagination,
    UpsertMappingRequest,
};
use crate::api::validation::{
    parse_media_type, parse_optional_media_type, parse_status, validate_catalog_id,
    validate_limit, validate_page, validate_season_number,
};
use crate::models::mapping::{Mapping, MappingFilter, MappingInput};

/// Set by the access-control layer in front of this service.
pub const ACCOUNT_ID_HEADER: &str = "x-account-id";

const DEFAULT_PAGE_SIZE: u64 = 20;

#[derive(Debug, Deserialize)]
pub struct MappingKeyQuery {
    pub media_type: Option<String>,
    pub season_number: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ListMappingsQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<String>,
    pub media_type: Option<String>,
    pub search: Option<String>,
}

fn account_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(ACCOUNT_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// `GET /api/anime/mapping/{catalog_id}`
pub async fn get_mapping(
    State(state): State<Arc<AppState>>,
    Path(catalog_id): Path<i32>,
    Query(query): Query<MappingKeyQuery>,
) -> Result<Json<ApiResponse<MappingLookupDto>>, ApiError> {
    let catalog_id = validate_catalog_id(catalog_id)?;
    let media_type = parse_media_type(query.media_type.as_deref())?;
    let season_number = validate_season_number(query.season_number)?;

    let mapping = state.mappings().get(catalog_id, media_type).await?;
    let provider_id = mapping.provider_id_for_season(season_number).to_string();

    Ok(Json(ApiResponse::success(MappingLookupDto {
        catalog_id,
        media_type,
        season_number,
        provider_id,
        mapping,
    })))
}

/// `POST /api/anime/mapping`
///
/// Creates the mapping or overwrites the supplied fields of an existing one.
pub async fn upsert_mapping(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<UpsertMappingRequest>,
) -> Result<Json<ApiResponse<Mapping>>, ApiError> {
    let catalog_id = validate_catalog_id(request.catalog_id)?;
    let media_type = parse_media_type(request.media_type.as_deref())?;

    let mut input = MappingInput::new(
        catalog_id,
        media_type,
        request.provider_id.trim(),
        request.title.trim(),
    );
    input.original_title = request.original_title;
    input.season_overrides = request.season_overrides;
    input.metadata = request.metadata;
    input.created_by = account_id(&headers);

    let mapping = state.mappings().upsert(input).await?;
    Ok(Json(ApiResponse::success(mapping)))
}

/// `GET /api/anime/mappings`
pub async fn list_mappings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListMappingsQuery>,
) -> Result<Json<ApiResponse<MappingListDto>>, ApiError> {
    let page = validate_page(query.page.unwrap_or(1))?;
    let limit = validate_limit(query.limit.unwrap_or(DEFAULT_PAGE_SIZE))?;

    let filter = MappingFilter {
        status: parse_status(query.status.as_deref())?,
        media_type: parse_optional_media_type(query.media_type.as_deref())?,
        search: query
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    };

    let result = state.mappings().list_all(&filter, page, limit).await?;

    Ok(Json(ApiResponse::success(MappingListDto {
        items: result.items,
        pagination: Pagination::new(page, limit, result.total),
    })))
}

/// `DELETE /api/anime/mapping/{catalog_id}`
pub async fn delete_mapping(
    State(state): State<Arc<AppState>>,
    Path(catalog_id): Path<i32>,
    Query(query): Query<MappingKeyQuery>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let catalog_id = validate_catalog_id(catalog_id)?;
    let media_type = parse_media_type(query.media_type.as_deref())?;

    state.mappings().remove(catalog_id, media_type).await?;
    Ok(Json(ApiResponse::success(())))
}

/// `PATCH /api/anime/mapping/{catalog_id}/verify`
pub async fn verify_mapping(
    State(state): State<Arc<AppState>>,
    Path(catalog_id): Path<i32>,
    Query(query): Query<MappingKeyQuery>,
) -> Result<Json<ApiResponse<Mapping>>, ApiError> {
    let catalog_id = validate_catalog_id(catalog_id)?;
    let media_type = parse_media_type(query.media_type.as_deref())?;

    let mapping = state.mappings().mark_verified(catalog_id, media_type).await?;
    Ok(Json(ApiResponse::success(mapping)))
}
