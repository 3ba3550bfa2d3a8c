//! Axum route handlers for resume parsing.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::portfolio::PortfolioDocument;
use crate::resume::parser::parse_resume;
use crate::routes::ApiSuccess;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ParseResumeRequest {
    #[serde(rename = "resumeText", default)]
    pub resume_text: Option<String>,
}

/// POST /api/parse-resume
///
/// Extracts a `PortfolioDocument` from raw resume text. Stateless: the result
/// is returned to the caller and not stored.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    payload: Result<Json<ParseResumeRequest>, JsonRejection>,
) -> Result<Json<ApiSuccess<PortfolioDocument>>, AppError> {
    let Json(request) = payload?;
    let resume_text = request.resume_text.unwrap_or_default();

    let document = parse_resume(&resume_text, &state.llm).await?;

    Ok(ApiSuccess::json(document))
}
