//! Evaluator — the "evaluate one answer" step.
//!
//! Flow: build prompt → model call → extract evaluation.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::evaluation::extractor::{extract_evaluation, ExtractError};
use crate::evaluation::models::Evaluation;
use crate::evaluation::prompts::{build_evaluation_prompt, evaluation_system};
use crate::llm_client::{CompletionRequest, LlmError, Provider};

const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 500;
const TOP_P: f32 = 0.9;

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("LLM provider not available: {0}")]
    ProviderUnavailable(String),

    #[error("LLM API error: {0}")]
    Provider(#[from] LlmError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Evaluates candidate answers against the configured model provider.
#[derive(Clone)]
pub struct Evaluator {
    provider: Provider,
    max_concurrency: usize,
}

impl Evaluator {
    pub fn new(provider: Provider, max_concurrency: usize) -> Self {
        Self {
            provider,
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Evaluates a single answer. Rejects blank answers before any model call.
    pub async fn evaluate(
        &self,
        answer: &str,
        question_context: &str,
    ) -> Result<Evaluation, EvaluationError> {
        if answer.trim().is_empty() {
            return Err(EvaluationError::InvalidInput(
                "Candidate answer cannot be empty".to_string(),
            ));
        }

        let model = match &self.provider {
            Provider::Ready(model) => model,
            Provider::Unavailable(reason) => {
                return Err(EvaluationError::ProviderUnavailable(reason.clone()))
            }
        };

        debug!(
            "Evaluating answer ({} chars, question context: {})",
            answer.chars().count(),
            !question_context.is_empty()
        );

        let request = CompletionRequest {
            system: evaluation_system(),
            prompt: build_evaluation_prompt(answer, question_context),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
        };

        let raw = model.complete(&request).await.map_err(|e| {
            warn!("Model call failed: {e}");
            e
        })?;

        match extract_evaluation(&raw) {
            Ok(evaluation) => {
                info!("Answer evaluated: score={}", evaluation.score);
                Ok(evaluation)
            }
            Err(e) => {
                warn!("Unusable model output: {e}");
                Err(e.into())
            }
        }
    }
}
