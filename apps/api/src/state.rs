use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::evaluation::evaluator::Evaluator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Carries the model provider. Built once in `main`, replaced by fakes in tests.
    pub evaluator: Evaluator,
    pub started_at: DateTime<Utc>,
}
