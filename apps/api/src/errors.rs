use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Empty or missing required input. Always raised before any LLM call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The completion service failed or returned nothing usable.
    #[error("LLM error: {0}")]
    Service(#[from] LlmError),

    /// The uploaded document could not be parsed.
    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Machine-readable code sent in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Service(_) => "LLM_ERROR",
            AppError::Extraction(_) => "EXTRACTION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Service(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Extraction(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
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
    fn test_validation_maps_to_bad_request() {
        let response = AppError::Validation("resume cannot be empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_service_error_maps_to_bad_gateway() {
        let response = AppError::from(LlmError::EmptyContent).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_extraction_maps_to_unprocessable_entity() {
        let response = AppError::Extraction("not a PDF".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(AppError::Validation(String::new()).code(), "VALIDATION_ERROR");
        assert_eq!(AppError::from(LlmError::EmptyContent).code(), "LLM_ERROR");
        assert_eq!(AppError::Extraction(String::new()).code(), "EXTRACTION_ERROR");
        assert_eq!(
            AppError::from(anyhow::anyhow!("boom")).code(),
            "INTERNAL_ERROR"
        );
    }
}
