use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::render::RenderService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Gemini in production; a scripted generator in tests.
    pub llm: Arc<dyn TextGenerator>,
    pub renderer: RenderService,
    pub config: Config,
}
