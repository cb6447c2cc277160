pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::description::handlers as descriptions;
use crate::jobs::handlers as jobs;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

/// Headroom over the resume size limit for multipart framing.
const UPLOAD_BODY_LIMIT: usize = resumes::MAX_UPLOAD_BYTES + 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Description API
        .route(
            "/api/v1/descriptions/format",
            post(descriptions::handle_format_description),
        )
        // Jobs API
        .route("/api/v1/jobs", get(jobs::handle_list_jobs))
        .route("/api/v1/jobs/refresh", post(jobs::handle_refresh_jobs))
        .route("/api/v1/jobs/match", post(jobs::handle_match_jobs))
        .route("/api/v1/jobs/:job_id", get(jobs::handle_get_job))
        // Resume API
        .route(
            "/api/v1/resumes/analyze",
            post(resumes::handle_analyze_resume).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .with_state(state)
}
