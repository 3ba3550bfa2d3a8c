use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extract::ExtractError;
use crate::llm_client::normalize::NormalizeError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders the same envelope: `{success: false, error, message}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Malformed AI response: {snippet}")]
    MalformedAiResponse { snippet: String },

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Configuration(_)
            | AppError::Upstream { .. }
            | AppError::MalformedAiResponse { .. }
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, message) = match &self {
            AppError::Validation(msg) => ("Invalid input", msg.clone()),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    "Server configuration error",
                    "API key not configured. Please contact administrator.".to_string(),
                )
            }
            AppError::Upstream { status, body } => {
                tracing::error!("Upstream AI error (status {status}): {body}");
                (
                    "Upstream AI service error",
                    format!("The AI service returned status {status}"),
                )
            }
            AppError::MalformedAiResponse { snippet } => {
                tracing::error!("Malformed AI response, attempted to parse: {snippet}");
                (
                    "Malformed AI response",
                    "Failed to parse JSON response from AI".to_string(),
                )
            }
            AppError::Extraction(msg) => ("Extraction failed", msg.clone()),
            AppError::NotFound(msg) => ("Not Found", msg.clone()),
            AppError::Conflict(msg) => ("Conflict", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    "Internal server error",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": error,
            "message": message
        }));

        (status, body).into_response()
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::MissingCredential => {
                AppError::Configuration("ANTHROPIC_API_KEY not configured".to_string())
            }
            LlmError::Api { status, body } => AppError::Upstream { status, body },
            // Transport failures have no upstream status; 502 marks them in logs.
            LlmError::Http(e) => AppError::Upstream {
                status: 502,
                body: e.to_string(),
            },
            LlmError::EmptyContent => AppError::Upstream {
                status: 502,
                body: "completion contained no text block".to_string(),
            },
            LlmError::Normalize(e) => e.into(),
        }
    }
}

impl From<NormalizeError> for AppError {
    fn from(e: NormalizeError) -> Self {
        match e {
            NormalizeError::Malformed { snippet } => AppError::MalformedAiResponse { snippet },
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<ExtractError> for AppError {
    fn from(e: ExtractError) -> Self {
        match &e {
            ExtractError::Unsupported(_) | ExtractError::Empty => AppError::Validation(e.to_string()),
            _ => AppError::Extraction(e.to_string()),
        }
    }
}
