//! Axum route handlers for content enhancement.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::enhance::workflow::{EnhancementBatch, Selection, WorkflowState};
use crate::errors::AppError;
use crate::models::enhancement::{
    EnhancementContext, EnhancementKind, EnhancementRequest,
};
use crate::models::portfolio::PortfolioDocument;
use crate::routes::ApiSuccess;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EnhanceContentRequest {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub context: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct EnhanceContentResponse {
    #[serde(rename = "type")]
    pub kind: EnhancementKind,
    pub original: String,
    pub enhanced: String,
}

/// POST /api/enhance-content
///
/// Rewrites one field. `enhanced` is the trimmed completion; emphasis markers
/// are left for the caller to strip.
pub async fn handle_enhance_content(
    State(state): State<AppState>,
    payload: Result<Json<EnhanceContentRequest>, JsonRejection>,
) -> Result<Json<ApiSuccess<EnhanceContentResponse>>, AppError> {
    let Json(request) = payload?;

    let (Some(kind), Some(content)) = (
        request.kind.filter(|k| !k.is_empty()),
        request.content.filter(|c| !c.is_empty()),
    ) else {
        return Err(AppError::Validation(
            "type and content are required".to_string(),
        ));
    };
    let kind: EnhancementKind = kind.parse()?;

    let context = EnhancementContext::from_value(kind, &request.context.unwrap_or(Value::Null));
    let request = EnhancementRequest {
        original_text: content,
        context,
    };
    let enhanced = state.enhancer.enhance(&request).await?;

    Ok(ApiSuccess::json(EnhanceContentResponse {
        kind,
        original: request.original_text,
        enhanced,
    }))
}

/// GET /api/portfolio/enhance
///
/// A batch holds the workflow lock for its whole run, so a busy lock is
/// reported as processing.
pub async fn handle_workflow_state(
    State(state): State<AppState>,
) -> Result<Json<ApiSuccess<Value>>, AppError> {
    let snapshot = match state.workflow.try_lock() {
        Ok(workflow) => {
            serde_json::to_value(workflow.state()).map_err(|e| AppError::Internal(e.into()))?
        }
        Err(_) => serde_json::json!({ "state": "processing" }),
    };
    Ok(ApiSuccess::json(snapshot))
}

/// POST /api/portfolio/enhance
///
/// Runs a batch over the stored document. The batch runs on its own task, so a
/// client that disconnects mid-run does not cancel it; the review is still
/// waiting when the client returns.
pub async fn handle_run_enhancement(
    State(state): State<AppState>,
    payload: Result<Json<Selection>, JsonRejection>,
) -> Result<Json<ApiSuccess<EnhancementBatch>>, AppError> {
    let Json(selection) = payload?;

    let document = state
        .store
        .load()
        .await?
        .ok_or_else(|| AppError::NotFound("No portfolio has been uploaded yet".to_string()))?;

    let mut workflow = state.workflow.clone().try_lock_owned().map_err(|_| {
        AppError::Conflict("An enhancement batch is already running".to_string())
    })?;

    info!("Starting enhancement batch: {selection:?}");
    let enhancer = state.enhancer.clone();
    let batch = tokio::spawn(async move {
        workflow
            .run(selection, &document, enhancer.as_ref())
            .await
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))??;

    Ok(ApiSuccess::json(batch))
}

/// POST /api/portfolio/enhance/accept
///
/// The review is only left once the merged document is saved, so a failed
/// save can be retried without re-running the batch.
pub async fn handle_accept_enhancement(
    State(state): State<AppState>,
) -> Result<Json<ApiSuccess<PortfolioDocument>>, AppError> {
    let mut workflow = state.workflow.try_lock().map_err(|_| {
        AppError::Conflict("An enhancement batch is still running".to_string())
    })?;

    let document = state
        .store
        .load()
        .await?
        .ok_or_else(|| AppError::NotFound("No portfolio has been uploaded yet".to_string()))?;

    let updated = workflow.merged(&document)?;
    state.store.save(&updated).await?;
    workflow.complete_review();
    info!("Enhancements accepted and saved");

    Ok(ApiSuccess::json(updated))
}

/// POST /api/portfolio/enhance/reject
pub async fn handle_reject_enhancement(
    State(state): State<AppState>,
) -> Result<Json<ApiSuccess<WorkflowState>>, AppError> {
    let mut workflow = state.workflow.try_lock().map_err(|_| {
        AppError::Conflict("An enhancement batch is still running".to_string())
    })?;
    workflow.reject()?;
    Ok(ApiSuccess::json(workflow.state().clone()))
}
