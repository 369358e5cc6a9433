pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let files = ServeDir::new(state.renderer.output_dir());

    Router::new()
        .route("/", get(health::index_handler))
        .route("/health", get(health::health_handler))
        .route("/generate", post(handlers::handle_generate))
        .nest_service("/files", files)
        .with_state(state)
}
