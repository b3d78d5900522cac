//! Axum route handlers for the Evaluation API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::evaluation::models::{EvaluateAnswerRequest, Evaluation, RankRequest, RankResponse};
use crate::evaluation::ranking::rank_candidates;
use crate::state::AppState;

/// POST /evaluate-answer
///
/// Evaluates a single candidate answer. Blank answers are rejected before any model call.
pub async fn handle_evaluate_answer(
    State(state): State<AppState>,
    Json(request): Json<EvaluateAnswerRequest>,
) -> Result<Json<Evaluation>, AppError> {
    if request.candidate_says.trim().is_empty() {
        return Err(AppError::Validation(
            "Candidate answer cannot be empty".to_string(),
        ));
    }

    let evaluation = state
        .evaluator
        .evaluate(&request.candidate_says, &request.question_context)
        .await?;

    Ok(Json(evaluation))
}

/// POST /rank-candidates
///
/// Evaluates every candidate and returns them ranked by score.
/// Individual failures show up as zero-score entries instead of failing the request.
pub async fn handle_rank_candidates(
    State(state): State<AppState>,
    Json(request): Json<RankRequest>,
) -> Result<Json<RankResponse>, AppError> {
    if request.candidates.is_empty() {
        return Err(AppError::Validation(
            "Candidates list cannot be empty".to_string(),
        ));
    }

    let ranked_candidates = rank_candidates(&state.evaluator, request.candidates).await;

    Ok(Json(RankResponse { ranked_candidates }))
}
