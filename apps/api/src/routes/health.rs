use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::llm_client::{Provider, MODEL, PROVIDER_NAME};
use crate::state::AppState;

const SERVICE_NAME: &str = "AI Interview Screener";

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "screener-api"
    }))
}

/// GET /
/// Service descriptor, including whether the model provider is usable.
pub async fn status_handler(State(state): State<AppState>) -> Json<Value> {
    let provider_status = match state.evaluator.provider() {
        Provider::Ready(_) => "connected".to_string(),
        Provider::Unavailable(reason) => format!("not available: {reason}"),
    };

    Json(json!({
        "status": "running",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "ai_provider": PROVIDER_NAME,
        "model": MODEL,
        "provider_available": state.evaluator.provider().is_available(),
        "provider_status": provider_status,
        "max_concurrent_evaluations": state.config.max_concurrent_evaluations,
        "endpoints": ["/evaluate-answer", "/rank-candidates"],
        "uptime_secs": (Utc::now() - state.started_at).num_seconds(),
    }))
}
