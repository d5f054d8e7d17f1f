use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::api::validation::validate_search_query;
use crate::models::stream::ProviderCandidate;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// `GET /api/anime/search-provider?q=`
///
/// Operator aid for picking a provider id by hand. Provider failures come
/// back as an empty list.
pub async fn search_provider(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<ProviderCandidate>>>, ApiError> {
    let q = validate_search_query(&query.q)?;
    let candidates = state.provider_search().search(q).await;
    Ok(Json(ApiResponse::success(candidates)))
}
