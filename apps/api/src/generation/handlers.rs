//! Axum route handlers for the Generation API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::generator::generate_topic_content;
use crate::models::OutputFormat;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub topic: Option<String>,
    /// `pdf` or `ppt` (`pptx` accepted). Defaults to `ppt`.
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub message: String,
    pub file_path: String,
    pub download_url: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate
///
/// Validates the request, asks the model for an outline, renders it and
/// returns where the document was written. The model is never called for an
/// invalid request.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let topic = request
        .topic
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::MissingTopic)?;
    let format = parse_format(request.format.as_deref())?;

    info!("Generating {} for topic {:?}", format, topic);
    let content = generate_topic_content(state.llm.as_ref(), topic).await?;
    let path = state.renderer.render(content, format).await?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("rendered path has no file name: {}", path.display()))?;

    Ok(Json(GenerateResponse {
        message: format!("{} generated successfully", format.to_string().to_uppercase()),
        file_path: path.display().to_string(),
        download_url: format!("/files/{}", encode_path_segment(file_name)),
    }))
}

fn parse_format(raw: Option<&str>) -> Result<OutputFormat, AppError> {
    match raw.map(str::trim).filter(|f| !f.is_empty()) {
        None => Ok(OutputFormat::default()),
        Some(raw) => raw
            .parse::<OutputFormat>()
            .map_err(|e| AppError::InvalidFormat(e.0)),
    }
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
fn encode_path_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::generation::generator::tests::{outline_json, ScriptedGenerator};
    use crate::routes::build_router;
    use crate::routes::tests::test_state;

    fn app(llm: Arc<ScriptedGenerator>, dir: &std::path::Path) -> Router {
        build_router(test_state(llm, dir))
    }

    async fn post_generate(app: Router, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::post("/generate")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_topic_is_400_without_model_call() {
        let dir = tempfile::tempdir().unwrap();
        let llm = Arc::new(ScriptedGenerator::replying(&outline_json("T", 5)));

        let (status, body) = post_generate(app(llm.clone(), dir.path()), r#"{"format":"pdf"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MISSING_TOPIC");

        let (status, _) = post_generate(app(llm.clone(), dir.path()), r#"{"topic":"   "}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(llm.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_format_is_400_without_model_call() {
        let dir = tempfile::tempdir().unwrap();
        let llm = Arc::new(ScriptedGenerator::replying(&outline_json("T", 5)));

        let (status, body) = post_generate(
            app(llm.clone(), dir.path()),
            r#"{"topic":"Quantum Computing","format":"docx"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_FORMAT");
        assert!(body["error"].as_str().unwrap().contains("docx"));
        assert!(llm.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_is_400() {
        let dir = tempfile::tempdir().unwrap();
        let llm = Arc::new(ScriptedGenerator::replying(&outline_json("T", 5)));
        let (status, body) = post_generate(app(llm, dir.path()), "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_invalid_model_output_is_500_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let llm = Arc::new(ScriptedGenerator::replying("Sorry, I can't help with that"));
        let (status, body) = post_generate(
            app(llm, dir.path()),
            r#"{"topic":"Quantum Computing","format":"pdf"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "INVALID_MODEL_OUTPUT");
        assert!(!body["error"].as_str().unwrap().is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_model_failure_is_500() {
        let dir = tempfile::tempdir().unwrap();
        let llm = Arc::new(ScriptedGenerator::failing("quota exceeded"));
        let (status, body) =
            post_generate(app(llm, dir.path()), r#"{"topic":"Quantum Computing"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "GENERATION_FAILED");
    }

    #[tokio::test]
    async fn test_generate_pdf_then_download() {
        let dir = tempfile::tempdir().unwrap();
        let llm = Arc::new(ScriptedGenerator::replying(&outline_json("Quantum Computing", 5)));

        let (status, body) = post_generate(
            app(llm.clone(), dir.path()),
            r#"{"topic":"Quantum Computing","format":"pdf"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK, "body: {body}");
        assert_eq!(body["download_url"], "/files/Quantum_Computing.pdf");
        let written = dir.path().join("Quantum_Computing.pdf");
        assert_eq!(body["file_path"], written.display().to_string());
        assert!(written.exists());

        let response = app(llm, dir.path())
            .oneshot(
                Request::get("/files/Quantum_Computing.pdf")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_format_defaults_to_pptx() {
        let dir = tempfile::tempdir().unwrap();
        let llm = Arc::new(ScriptedGenerator::replying(&outline_json("Deck", 5)));
        let (status, body) = post_generate(app(llm, dir.path()), r#"{"topic":"Decks"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["download_url"], "/files/Deck.pptx");
        assert!(dir.path().join("Deck.pptx").exists());
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format(None).unwrap(), OutputFormat::Ppt);
        assert_eq!(parse_format(Some("  ")).unwrap(), OutputFormat::Ppt);
        assert_eq!(parse_format(Some("PDF")).unwrap(), OutputFormat::Pdf);
        assert!(matches!(parse_format(Some("txt")), Err(AppError::InvalidFormat(f)) if f == "txt"));
    }

    #[test]
    fn test_encode_path_segment() {
        assert_eq!(encode_path_segment("AI_FutureNow.pdf"), "AI_FutureNow.pdf");
        assert_eq!(encode_path_segment("Caf\u{e9}?.pdf"), "Caf%C3%A9%3F.pdf");
    }
}
