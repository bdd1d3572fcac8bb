use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ResourceNotFound(_) | StoreError::ProjectNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            StoreError::NotAvailable { .. } | StoreError::AlreadyAssigned { .. } => {
                AppError::Conflict(err.to_string())
            }
            StoreError::Invalid(msg) => AppError::Validation(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Import(msg) => (StatusCode::BAD_REQUEST, "IMPORT_ERROR", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_http_semantics() {
        let not_found: AppError = StoreError::ResourceNotFound("RES-404".to_string()).into();
        assert!(matches!(not_found, AppError::NotFound(_)));

        let conflict: AppError = StoreError::NotAvailable {
            resource_id: "RES-001".to_string(),
            status: crate::models::ResourceStatus::Assigned,
        }
        .into();
        assert!(matches!(conflict, AppError::Conflict(_)));

        let invalid: AppError = StoreError::Invalid("name is required".to_string()).into();
        assert!(matches!(invalid, AppError::Validation(msg) if msg == "name is required"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Conflict("taken".into()).into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Import("no header".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("boom")).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
