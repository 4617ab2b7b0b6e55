use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::admission::AdmissionError;
use crate::services::lifecycle::LifecycleError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error(transparent)]
    Admission(#[from] AdmissionError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("{0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Admission(e) => match e {
                AdmissionError::ServiceNotFound(_) => StatusCode::NOT_FOUND,
                AdmissionError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            },
            AppError::Lifecycle(e) => match e {
                LifecycleError::BookingNotFound(_) => StatusCode::NOT_FOUND,
                LifecycleError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            },
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
