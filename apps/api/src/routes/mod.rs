pub mod health;
pub mod portfolio;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::enhance::handlers as enhance;
use crate::extract::handlers::{self as extract, MAX_UPLOAD_BYTES};
use crate::render::handlers as render;
use crate::resume::handlers as resume;
use crate::state::AppState;

/// Success envelope shared by every JSON endpoint: `{success: true, data}`.
#[derive(Debug, Serialize)]
pub struct ApiSuccess<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiSuccess<T> {
    pub fn json(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not Found",
            "message": "Available endpoints: GET /, POST /api/parse-resume, POST /api/enhance-content"
        })),
    )
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::health_handler))
        // Gateway
        .route("/api/parse-resume", post(resume::handle_parse_resume))
        .route("/api/enhance-content", post(enhance::handle_enhance_content))
        .route("/api/extract-text", post(extract::handle_extract_text))
        // Stored portfolio
        .route(
            "/api/portfolio",
            get(portfolio::handle_get_portfolio)
                .put(portfolio::handle_put_portfolio)
                .delete(portfolio::handle_delete_portfolio),
        )
        .route(
            "/api/portfolio/enhance",
            get(enhance::handle_workflow_state).post(enhance::handle_run_enhancement),
        )
        .route(
            "/api/portfolio/enhance/accept",
            post(enhance::handle_accept_enhancement),
        )
        .route(
            "/api/portfolio/enhance/reject",
            post(enhance::handle_reject_enhancement),
        )
        // Pages and export
        .route(
            "/upload",
            get(render::handle_upload_page).post(render::handle_upload),
        )
        .route("/preview/:template", get(render::handle_preview))
        .route(
            "/api/portfolio/export/:template",
            get(render::handle_export_stored),
        )
        .route("/api/export/:template", post(render::handle_export))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        // Browser clients call the gateway cross-origin; preflights are
        // answered here before routing.
        .layer(CorsLayer::permissive())
        .with_state(state)
}
