pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::gap::handlers::handle_analyze_gap;
use crate::generation::handlers::handle_generate_job;
use crate::parsing::handlers::handle_parse_resume;
use crate::profile::handlers::handle_save_profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/parse-resume",
            post(handle_parse_resume).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/generate-job", post(handle_generate_job))
        .route("/api/save-profile", post(handle_save_profile))
        .route("/api/analyze-gap", post(handle_analyze_gap))
        .with_state(state)
}
