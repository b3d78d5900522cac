// LLM prompts for the Evaluation module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// System prompt persona for answer evaluation.
const EVALUATION_PERSONA: &str = "You are an expert technical interviewer.";

/// Full system instruction sent alongside every evaluation prompt.
pub fn evaluation_system() -> String {
    format!("{EVALUATION_PERSONA} {JSON_ONLY_SYSTEM}")
}

/// Builds the user prompt for a single answer evaluation.
///
/// The question line is only present when `question_context` is non-empty.
/// Both inputs are embedded verbatim in one `format!` pass.
pub fn build_evaluation_prompt(answer: &str, question_context: &str) -> String {
    let context_block = if question_context.is_empty() {
        String::new()
    } else {
        format!("\nInterview Question: {question_context}\n")
    };

    format!(
        r#"You are an expert technical interviewer evaluating candidate responses.

{context_block}
Candidate's Answer: {answer}

Evaluate this answer and respond with ONLY a valid JSON object (no markdown, no explanation, no code fences):
{{
  "score": <integer 1-5>,
  "summary": "<one concise sentence summarizing the answer>",
  "improvement": "<one specific, actionable suggestion for improvement>"
}}

Scoring Guide:
- 1: Poor - Incorrect, irrelevant, or demonstrates lack of understanding
- 2: Below Average - Partially correct but significant gaps in knowledge
- 3: Average - Correct but lacks depth or misses key points
- 4: Good - Solid answer with good understanding and detail
- 5: Excellent - Comprehensive, insightful, demonstrates deep expertise

Be concise but constructive. Return ONLY the JSON object."#
    )
}
