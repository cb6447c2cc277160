mod config;
mod description;
mod errors;
mod jobs;
mod models;
mod resumes;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::description::DescriptionFormatter;
use crate::jobs::client::JobApiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobfeed API v{}", env!("CARGO_PKG_VERSION"));

    // Description pipeline (heading catalog from SECTION_HEADINGS_FILE or built-in)
    let headings = config.heading_catalog()?;
    info!(
        "Section heading catalog loaded: {} phrases{}",
        headings.len(),
        config
            .section_headings_file
            .as_ref()
            .map(|p| format!(" from {}", p.display()))
            .unwrap_or_default()
    );
    debug!("Section headings: {:?}", headings.phrases());
    let formatter = Arc::new(DescriptionFormatter::new(
        headings,
        config.description_preview_chars,
    ));

    // Initialize Job API client
    let job_board = Arc::new(
        JobApiClient::new(&config.job_api_base_url).context("Failed to build Job API client")?,
    );
    info!("Job API client initialized ({})", job_board.base_url());

    // Build app state
    let state = AppState {
        job_board,
        formatter,
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()), // TODO: restrict origins once the frontend host is fixed
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
