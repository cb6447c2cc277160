use std::sync::Arc;

use crate::description::DescriptionFormatter;
use crate::jobs::client::JobBoard;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Upstream Job/Resume API. Default: `JobApiClient`; tests swap in a stub.
    pub job_board: Arc<dyn JobBoard>,
    /// Description pipeline with the configured heading catalog and preview length.
    pub formatter: Arc<DescriptionFormatter>,
}
