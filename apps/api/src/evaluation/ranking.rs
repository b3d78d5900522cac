//! Batch Ranker — evaluates many candidates and orders them by score.
//!
//! Each candidate is evaluated on its own. A failed evaluation never aborts
//! the batch: it becomes a zero-score placeholder so the output always has one
//! entry per input candidate.
//!
//! Ranks are dense positions (1, 2, 3, ...) after a stable descending sort on
//! score, so tied candidates keep their input order and never share a rank.

use futures::stream::{self, StreamExt};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::evaluation::evaluator::{EvaluationError, Evaluator};
use crate::evaluation::models::{CandidateAnswer, Evaluation, RankedCandidate};

/// Score assigned to candidates whose evaluation failed.
pub const PLACEHOLDER_SCORE: u8 = 0;
pub const RETRY_SUGGESTION: &str = "Please retry evaluation";

/// Evaluates every candidate (bounded concurrency, input order preserved) and ranks them.
pub async fn rank_candidates(
    evaluator: &Evaluator,
    candidates: Vec<CandidateAnswer>,
) -> Vec<RankedCandidate> {
    let batch_id = Uuid::new_v4();
    let total = candidates.len();

    async move {
        info!("Evaluating {total} candidates");

        let outcomes: Vec<(CandidateAnswer, Result<Evaluation, EvaluationError>)> =
            stream::iter(candidates)
                .map(move |candidate| async move {
                    let result = evaluator
                        .evaluate(&candidate.answer, &candidate.question_context)
                        .await;
                    (candidate, result)
                })
                .buffered(evaluator.max_concurrency())
                .collect()
                .await;

        let ranked = rank_outcomes(outcomes);
        let failed = ranked
            .iter()
            .filter(|c| c.score == PLACEHOLDER_SCORE)
            .count();
        info!("Ranked {total} candidates ({failed} failed)");
        ranked
    }
    .instrument(info_span!("rank_candidates", %batch_id))
    .await
}

/// Converts per-candidate outcomes into ranked results.
///
/// `outcomes` must be in input order; that order is the tie-break.
pub fn rank_outcomes(
    outcomes: Vec<(CandidateAnswer, Result<Evaluation, EvaluationError>)>,
) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = outcomes
        .into_iter()
        .map(|(candidate, result)| match result {
            Ok(evaluation) => RankedCandidate {
                candidate_id: candidate.candidate_id,
                answer: candidate.answer,
                score: evaluation.score,
                summary: evaluation.summary,
                improvement: evaluation.improvement,
                rank: 0,
            },
            Err(e) => {
                warn!("Evaluation failed for candidate {}: {e}", candidate.candidate_id);
                placeholder(candidate, &e)
            }
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    for (idx, candidate) in ranked.iter_mut().enumerate() {
        candidate.rank = idx + 1;
    }

    ranked
}

fn placeholder(candidate: CandidateAnswer, error: &EvaluationError) -> RankedCandidate {
    RankedCandidate {
        candidate_id: candidate.candidate_id,
        answer: candidate.answer,
        score: PLACEHOLDER_SCORE,
        summary: format!("Evaluation failed: {error}"),
        improvement: RETRY_SUGGESTION.to_string(),
        rank: 0,
    }
}
