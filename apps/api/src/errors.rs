use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Pipeline error type, one variant per stage that can fail.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AnalysisError>`.
///
/// Every stage fails closed: no variant is ever swallowed, retried, or
/// replaced with partial data further down the pipeline.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Model call error: {0}")]
    ModelCall(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AnalysisError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    msg.clone(),
                )
            }
            AnalysisError::Input(msg) => (StatusCode::BAD_REQUEST, "INPUT_ERROR", msg.clone()),
            AnalysisError::UnsupportedFormat(msg) => {
                (StatusCode::BAD_REQUEST, "UNSUPPORTED_FORMAT", msg.clone())
            }
            AnalysisError::Extraction(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_ERROR",
                msg.clone(),
            ),
            AnalysisError::ModelCall(msg) => {
                tracing::error!("Model call error: {msg}");
                (StatusCode::BAD_GATEWAY, "MODEL_CALL_ERROR", msg.clone())
            }
            AnalysisError::MalformedResponse(msg) => {
                tracing::error!("Malformed model response: {msg}");
                (StatusCode::BAD_GATEWAY, "MALFORMED_RESPONSE", msg.clone())
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
