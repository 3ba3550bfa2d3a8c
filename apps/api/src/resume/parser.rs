//! Resume parser: raw resume text in, `PortfolioDocument` out.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, PARSE_MAX_TOKENS};
use crate::models::portfolio::{decode_portfolio, PortfolioDocument};
use crate::resume::prompts::build_parsing_prompt;

/// Inputs longer than this are rejected before a prompt is built.
pub const MAX_RESUME_CHARS: usize = 50_000;

/// Rejects empty or oversized resume text. Length counts characters, not bytes.
pub fn validate_resume_text(text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "resumeText is required and must be a non-empty string".to_string(),
        ));
    }
    if text.chars().count() > MAX_RESUME_CHARS {
        return Err(AppError::Validation(
            "Resume text must be less than 50,000 characters".to_string(),
        ));
    }
    Ok(())
}

/// Validates, prompts, and decodes a resume into the portfolio schema.
pub async fn parse_resume(text: &str, llm: &LlmClient) -> Result<PortfolioDocument, AppError> {
    validate_resume_text(text)?;

    info!("Parsing resume, length: {}", text.chars().count());
    let prompt = build_parsing_prompt(text);
    let value = llm
        .complete_structured(&prompt, JSON_ONLY_SYSTEM, PARSE_MAX_TOKENS)
        .await?;
    let document = decode_portfolio(&value)?;

    info!(
        "Resume parsed: {} skills, {} jobs, {} projects, {} schools",
        document.skills.len(),
        document.experience.len(),
        document.projects.len(),
        document.education.len()
    );
    Ok(document)
}
