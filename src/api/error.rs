use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::services::{MappingError, ResolveError, ResolveFailure};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    DatabaseError(String),

    ValidationError(String),

    /// Expected stream resolution failure, rendered with its reason code.
    Resolution(ResolveFailure),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            Self::Resolution(failure) => write!(f, "Resolution failed: {failure}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, ApiResponse::<()>::error(msg.clone())),
            Self::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("A database error occurred"),
                )
            }
            Self::ValidationError(msg) => {
                (StatusCode::BAD_REQUEST, ApiResponse::error(msg.clone()))
            }
            Self::Resolution(failure) => {
                let status = match failure {
                    ResolveFailure::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
                    ResolveFailure::NoMappingAndNoTitle
                    | ResolveFailure::TitleNotResolvable
                    | ResolveFailure::EpisodeNotFound
                    | ResolveFailure::NoPlayableSources => StatusCode::NOT_FOUND,
                };
                (
                    status,
                    ApiResponse::failure(failure.user_message(), failure.reason()),
                )
            }
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("An internal error occurred"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<MappingError> for ApiError {
    fn from(err: MappingError) -> Self {
        match err {
            MappingError::NotFound { .. } => Self::NotFound(err.to_string()),
            MappingError::Validation(msg) => Self::ValidationError(msg),
            MappingError::Database(msg) => Self::DatabaseError(msg),
            MappingError::Corrupt(msg) => Self::InternalError(msg),
        }
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Failure(failure) => Self::Resolution(failure),
            ResolveError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CatalogId, MediaType};

    #[test]
    fn test_resolution_failure_status_codes() {
        let resp = ApiError::Resolution(ResolveFailure::EpisodeNotFound).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = ApiError::Resolution(ResolveFailure::UpstreamUnavailable).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let resp = ApiError::from(ResolveError::Internal("bad row".to_string())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_code_per_variant() {
        let cases = [
            (ApiError::NotFound("mapping".into()), StatusCode::NOT_FOUND),
            (ApiError::DatabaseError("locked".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ApiError::validation("bad page"), StatusCode::BAD_REQUEST),
            (
                ApiError::Resolution(ResolveFailure::NoPlayableSources),
                StatusCode::NOT_FOUND,
            ),
            (ApiError::InternalError("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_mapping_error_conversion() {
        let err = ApiError::from(MappingError::NotFound {
            catalog_id: CatalogId::new(1),
            media_type: MediaType::Movie,
        });
        assert!(matches!(err, ApiError::NotFound(_)));

        let err = ApiError::from(MappingError::Validation("title is required".to_string()));
        assert!(matches!(err, ApiError::ValidationError(_)));

        let err = ApiError::from(MappingError::Corrupt("metadata".to_string()));
        assert!(matches!(err, ApiError::InternalError(_)));
    }
}
