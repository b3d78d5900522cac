// Answer evaluation and candidate ranking.
// All LLM calls go through llm_client — no direct Groq API calls here.

pub mod evaluator;
pub mod extractor;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod ranking;
