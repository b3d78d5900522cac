use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::evaluation::evaluator::EvaluationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Model output error: {0}")]
    ModelOutput(String),
}

impl From<EvaluationError> for AppError {
    fn from(err: EvaluationError) -> Self {
        match err {
            EvaluationError::InvalidInput(msg) => AppError::Validation(msg),
            EvaluationError::ProviderUnavailable(reason) => AppError::ProviderUnavailable(reason),
            EvaluationError::Provider(e) => AppError::Llm(e.to_string()),
            EvaluationError::Extract(e) => AppError::ModelOutput(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::ProviderUnavailable(reason) => {
                tracing::error!("Provider unavailable: {reason}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "PROVIDER_UNAVAILABLE",
                    format!("LLM provider not available: {reason}"),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::ModelOutput(msg) => {
                tracing::error!("Model output error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MODEL_OUTPUT_ERROR",
                    msg.clone(),
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
