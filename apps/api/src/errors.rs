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
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Store(e) => match e {
                StoreError::UserNotFound(_) => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
                StoreError::JobNotFound(_) => (StatusCode::NOT_FOUND, "JOB_NOT_FOUND"),
                StoreError::EmployerNotFound(_) => (StatusCode::NOT_FOUND, "EMPLOYER_NOT_FOUND"),
                StoreError::ApplicationNotFound(_) => {
                    (StatusCode::NOT_FOUND, "APPLICATION_NOT_FOUND")
                }
                StoreError::DuplicateEmail(_) => (StatusCode::CONFLICT, "DUPLICATE_EMAIL"),
                StoreError::DuplicatePhone(_) => (StatusCode::CONFLICT, "DUPLICATE_PHONE"),
                StoreError::DuplicateApplication { .. } => {
                    (StatusCode::CONFLICT, "DUPLICATE_APPLICATION")
                }
                StoreError::MissingCv(_) => (StatusCode::UNPROCESSABLE_ENTITY, "MISSING_CV"),
                StoreError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
                }
                StoreError::InvalidStatusTransition { .. } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "INVALID_STATUS_TRANSITION",
                ),
                StoreError::InvalidSalaryRange { .. } => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
                }
                StoreError::Persistence(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "PERSISTENCE_FAILURE")
                }
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match &self {
            AppError::Store(StoreError::Persistence(e)) => {
                tracing::error!("Persistence error: {e}");
                "A storage error occurred".to_string()
            }
            other => other.to_string(),
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
