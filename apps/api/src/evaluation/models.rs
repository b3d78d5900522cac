use serde::{Deserialize, Serialize};

/// Body of `POST /evaluate-answer`.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateAnswerRequest {
    pub candidate_says: String,
    #[serde(default)]
    pub question_context: String,
}

/// Structured result for one candidate answer.
///
/// Only built by the response extractor, which guarantees `score` is in 1..=5
/// and both text fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: u8,
    pub summary: String,
    pub improvement: String,
}

/// One entry of `POST /rank-candidates`.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateAnswer {
    pub candidate_id: String,
    pub answer: String,
    #[serde(default)]
    pub question_context: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankRequest {
    pub candidates: Vec<CandidateAnswer>,
}

/// A candidate after evaluation and ranking. `score` is 0 for placeholder results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCandidate {
    pub candidate_id: String,
    pub answer: String,
    pub score: u8,
    pub summary: String,
    pub improvement: String,
    pub rank: usize,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub ranked_candidates: Vec<RankedCandidate>,
}
