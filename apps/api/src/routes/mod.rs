pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};

use crate::cover_letter::handlers as cover_letter;
use crate::extraction::handlers as extraction;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Cover letter API
        .route("/api/v1/cover-letters", post(cover_letter::handle_generate))
        .route(
            "/api/v1/cover-letters/upload",
            post(cover_letter::handle_generate_from_upload),
        )
        // Resume text extraction
        .route("/api/v1/resumes/extract", post(extraction::handle_extract))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
