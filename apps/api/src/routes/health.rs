use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME")
    }))
}

/// GET /
/// Static description of what the service offers.
pub async fn index_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "Topic generator API. POST a topic to /generate to receive a PDF report or PPTX deck.",
        "model": state.config.gemini_model,
        "endpoints": {
            "POST /generate": {
                "body": { "topic": "string (required)", "format": "pdf | ppt (default ppt)" },
                "returns": "message, file_path, download_url"
            },
            "GET /files/{name}": "download a generated document",
            "GET /health": "liveness check"
        }
    }))
}
