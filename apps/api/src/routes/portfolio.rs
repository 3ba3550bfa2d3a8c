//! The stored portfolio document: read, replace, start over.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;

use crate::errors::AppError;
use crate::models::portfolio::PortfolioDocument;
use crate::routes::ApiSuccess;
use crate::state::AppState;

/// GET /api/portfolio
pub async fn handle_get_portfolio(
    State(state): State<AppState>,
) -> Result<Json<ApiSuccess<PortfolioDocument>>, AppError> {
    let document = state
        .store
        .load()
        .await?
        .ok_or_else(|| AppError::NotFound("No portfolio has been uploaded yet".to_string()))?;
    Ok(ApiSuccess::json(document))
}

/// PUT /api/portfolio
///
/// The body goes through the same lenient decoding as parser output.
pub async fn handle_put_portfolio(
    State(state): State<AppState>,
    payload: Result<Json<PortfolioDocument>, JsonRejection>,
) -> Result<Json<ApiSuccess<PortfolioDocument>>, AppError> {
    let Json(document) = payload?;
    state.store.save(&document).await?;
    Ok(ApiSuccess::json(document))
}

/// DELETE /api/portfolio
pub async fn handle_delete_portfolio(
    State(state): State<AppState>,
) -> Result<Json<ApiSuccess<bool>>, AppError> {
    let mut workflow = state.workflow.try_lock().map_err(|_| {
        AppError::Conflict("An enhancement batch is still running".to_string())
    })?;
    state.store.clear().await?;
    workflow.reject()?;
    info!("Starting over: stored portfolio and pending review cleared");
    Ok(ApiSuccess::json(true))
}
