use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::GenerationError;
use crate::persistence::SessionError;
use crate::transfer::codec::TransferError;

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

    #[error("Draft not loaded yet")]
    NotHydrated,

    #[error("Invalid resume file format")]
    InvalidResumeFile(#[source] TransferError),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::NotHydrated => AppError::NotHydrated,
        }
    }
}

impl From<TransferError> for AppError {
    fn from(e: TransferError) -> Self {
        AppError::InvalidResumeFile(e)
    }
}

impl From<GenerationError> for AppError {
    fn from(e: GenerationError) -> Self {
        match e {
            GenerationError::MissingNameOrTitle
            | GenerationError::MissingRoleOrCompany
            | GenerationError::NoSkills
            | GenerationError::MissingExperienceId => AppError::Validation(e.to_string()),
            GenerationError::UnknownExperience(_) => AppError::NotFound(e.to_string()),
            GenerationError::Superseded => AppError::Conflict(e.to_string()),
            GenerationError::Backend(msg) => AppError::Generation(msg),
            GenerationError::Session(e) => e.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::NotHydrated => (
                StatusCode::SERVICE_UNAVAILABLE,
                "NOT_HYDRATED",
                "The draft has not been loaded yet".to_string(),
            ),
            AppError::InvalidResumeFile(e) => {
                tracing::warn!("Rejected resume file: {e}");
                (
                    StatusCode::BAD_REQUEST,
                    "INVALID_RESUME_FILE",
                    "Invalid resume file format".to_string(),
                )
            }
            AppError::Generation(msg) => {
                tracing::error!("Generation error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_ERROR",
                    "Text generation failed".to_string(),
                )
            }
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
