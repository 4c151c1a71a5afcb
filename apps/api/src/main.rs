mod config;
mod editor;
mod errors;
mod export;
mod extraction;
mod llm_client;
mod models;
mod preview;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::editor::store::SessionStore;
use crate::extraction::ModelExtractor;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
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

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.gemini_api_key.clone(),
        config.gemini_base_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    );
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let sessions = SessionStore::new();
    sessions.spawn_idle_sweeper(
        Duration::from_secs(config.session_ttl_secs),
        SESSION_SWEEP_INTERVAL,
    );

    let state = AppState {
        extractor: Arc::new(ModelExtractor::new(Arc::new(llm))),
        sessions,
        config: config.clone(),
    };
    info!(
        "Upload limit: {} bytes, AI timeout: {}s, session TTL: {}s",
        config.max_upload_bytes, config.request_timeout_secs, config.session_ttl_secs
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
