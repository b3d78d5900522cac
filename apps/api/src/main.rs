mod config;
mod errors;
mod evaluation;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::evaluation::evaluator::Evaluator;
use crate::llm_client::Provider;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview Screener API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM provider; a missing key degrades the service instead of stopping it
    let provider = Provider::groq(config.groq_api_key.clone());
    match &provider {
        Provider::Ready(_) => info!("LLM client initialized (model: {})", llm_client::MODEL),
        Provider::Unavailable(reason) => warn!("LLM client not available: {reason}"),
    }

    let evaluator = Evaluator::new(provider, config.max_concurrent_evaluations);
    info!(
        "Batch evaluation concurrency: {}",
        evaluator.max_concurrency()
    );

    // Build app state
    let state = AppState {
        config: Arc::new(config.clone()),
        evaluator,
        started_at: chrono::Utc::now(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
