use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{ApiResponse, AppState, HealthDto};

/// `GET /api/system/health`
///
/// 503 when the mapping database cannot be reached.
pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    let database = state.store().ping().await.is_ok();

    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ApiResponse::success(HealthDto {
            status: if database { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime: state.start_time.elapsed().as_secs(),
            database,
            provider: state.shared.provider.name().to_string(),
            in_flight_resolutions: state.resolution().in_flight(),
        })),
    )
        .into_response()
}
