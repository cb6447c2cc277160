//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::description::excerpt::DisplayState;
use crate::errors::AppError;
use crate::jobs::cards::{build_cards, JobCard};
use crate::jobs::sort::{sort_jobs, SortOrder};
use crate::state::AppState;

pub const DEFAULT_JOB_LIMIT: u32 = 20;
pub const MAX_JOB_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct ListJobsQuery {
    pub search: Option<String>,
    pub limit: Option<u32>,
    #[serde(default)]
    pub sort: SortOrder,
    #[serde(default)]
    pub expanded: bool,
}

#[derive(Debug, Deserialize)]
pub struct CardQuery {
    #[serde(default)]
    pub expanded: bool,
}

#[derive(Debug, Deserialize)]
pub struct MatchJobsRequest {
    pub resume_text: String,
    #[serde(default)]
    pub sort: SortOrder,
    #[serde(default)]
    pub expanded: bool,
}

/// GET /api/v1/jobs?search=&limit=&sort=&expanded=
///
/// Lists jobs from the Job API as display cards. A blank search lists everything.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(query): Query<ListJobsQuery>,
) -> Result<Json<Vec<JobCard>>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_JOB_LIMIT);
    if !(1..=MAX_JOB_LIMIT).contains(&limit) {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {MAX_JOB_LIMIT}"
        )));
    }

    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let jobs = state.job_board.fetch_jobs(search, limit).await?;
    let jobs = sort_jobs(&jobs, query.sort);

    Ok(Json(build_cards(
        &jobs,
        &state.formatter,
        query.expanded,
        false,
    )))
}

/// GET /api/v1/jobs/:job_id?expanded=
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Query(query): Query<CardQuery>,
) -> Result<Json<JobCard>, AppError> {
    let posting = state.job_board.job_details(&job_id).await?;
    let display = DisplayState::collapsed(posting.job_id.as_str()).with_expanded(query.expanded);

    Ok(Json(JobCard::build(
        &posting,
        &state.formatter,
        &display,
        posting.match_score.is_some(),
    )))
}

/// POST /api/v1/jobs/refresh
///
/// Asks the Job API to re-pull its listings.
pub async fn handle_refresh_jobs(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state.job_board.refresh_jobs().await?;
    info!("Job API refresh triggered");
    Ok(Json(json!({ "status": "refreshed" })))
}

/// POST /api/v1/jobs/match
///
/// Ranks jobs against resume text. Cards carry match scores and tiers.
pub async fn handle_match_jobs(
    State(state): State<AppState>,
    Json(request): Json<MatchJobsRequest>,
) -> Result<Json<Vec<JobCard>>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }

    let matches = state.job_board.match_jobs(&request.resume_text).await?;
    let matches = sort_jobs(&matches, request.sort);

    Ok(Json(build_cards(
        &matches,
        &state.formatter,
        request.expanded,
        true,
    )))
}
