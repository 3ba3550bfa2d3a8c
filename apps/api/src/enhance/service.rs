//! Enhancer: pluggable backend that rewrites one field at a time.
//!
//! `AppState` holds an `Arc<dyn Enhancer>`; production uses `LlmEnhancer`,
//! tests swap in scripted fakes.

use async_trait::async_trait;
use tracing::info;

use crate::enhance::prompts::build_enhancement_prompt;
use crate::errors::AppError;
use crate::llm_client::normalize::strip_markdown;
use crate::llm_client::prompts::PLAIN_TEXT_SYSTEM;
use crate::llm_client::{LlmClient, ENHANCE_MAX_TOKENS};
use crate::models::enhancement::{EnhancementRequest, EnhancementResult};

#[async_trait]
pub trait Enhancer: Send + Sync {
    /// Returns the trimmed completion. Markdown is left in place; callers
    /// that need clean text go through `enhance_field`.
    async fn enhance(&self, request: &EnhancementRequest) -> Result<String, AppError>;
}

/// Enhancer backed by the Claude gateway client.
pub struct LlmEnhancer {
    llm: LlmClient,
}

impl LlmEnhancer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Enhancer for LlmEnhancer {
    async fn enhance(&self, request: &EnhancementRequest) -> Result<String, AppError> {
        info!("Enhancing content, type: {}", request.kind());
        let prompt = build_enhancement_prompt(request);
        let enhanced = self
            .llm
            .complete_plain(&prompt, PLAIN_TEXT_SYSTEM, ENHANCE_MAX_TOKENS)
            .await?;
        Ok(enhanced)
    }
}

/// Runs one enhancement and strips emphasis markers from the result.
pub async fn enhance_field(
    enhancer: &dyn Enhancer,
    request: EnhancementRequest,
) -> Result<EnhancementResult, AppError> {
    let enhanced = enhancer.enhance(&request).await?;
    Ok(EnhancementResult {
        original: request.original_text,
        enhanced: strip_markdown(&enhanced),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enhancement::EnhancementContext;

    struct Shouty;

    #[async_trait]
    impl Enhancer for Shouty {
        async fn enhance(&self, request: &EnhancementRequest) -> Result<String, AppError> {
            Ok(format!("  **{}!**  ", request.original_text))
        }
    }

    #[tokio::test]
    async fn test_enhance_field_strips_markdown() {
        let result = enhance_field(
            &Shouty,
            EnhancementRequest {
                original_text: "Shipped it".into(),
                context: EnhancementContext::BulletPoint {
                    title: None,
                    company: None,
                },
            },
        )
        .await
        .unwrap();
        assert_eq!(result.original, "Shipped it");
        assert_eq!(result.enhanced, "Shipped it!");
    }

    #[tokio::test]
    async fn test_llm_enhancer_without_key_is_configuration_error() {
        let enhancer = LlmEnhancer::new(LlmClient::new(None).unwrap());
        let err = enhancer
            .enhance(&EnhancementRequest {
                original_text: "x".into(),
                context: EnhancementContext::Bio { experience: None },
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
