use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Service status plus the gateway endpoints it exposes.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "online",
        "service": "CareerCanvas Gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /",
            "parseResume": "POST /api/parse-resume",
            "enhanceContent": "POST /api/enhance-content"
        },
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
