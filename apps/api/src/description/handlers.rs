//! Axum route handlers for the Description API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::description::RenderedDescription;
use crate::errors::AppError;
use crate::state::AppState;

/// Upper bound on a caller-supplied preview length.
const MAX_PREVIEW_CHARS: usize = 20_000;

#[derive(Debug, Deserialize)]
pub struct FormatDescriptionRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub expanded: bool,
    #[serde(default)]
    pub max_chars: Option<usize>,
}

/// POST /api/v1/descriptions/format
///
/// Runs a raw description through the pipeline. Absent or empty descriptions
/// render as empty strings rather than errors.
pub async fn handle_format_description(
    State(state): State<AppState>,
    Json(request): Json<FormatDescriptionRequest>,
) -> Result<Json<RenderedDescription>, AppError> {
    let max_chars = request
        .max_chars
        .unwrap_or_else(|| state.formatter.preview_chars());
    if max_chars == 0 || max_chars > MAX_PREVIEW_CHARS {
        return Err(AppError::Validation(format!(
            "max_chars must be between 1 and {MAX_PREVIEW_CHARS}"
        )));
    }

    let rendered = state.formatter.render_with_limit(
        request.description.as_deref(),
        request.expanded,
        max_chars,
    );

    Ok(Json(rendered))
}
