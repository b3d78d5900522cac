//! Response Extractor — turns free-text model output into a validated `Evaluation`.
//!
//! The model is told to return bare JSON but frequently doesn't, so extraction
//! runs as a staged fallback pipeline:
//!
//! 1. trim, strip a leading code fence (and its `json` tag) and a bare `json` token
//! 2. parse the cleaned text as a JSON object
//! 3. otherwise parse the span from the first `{` to the last `}`
//! 4. otherwise fail with `ExtractError::Parse` and a bounded excerpt
//!
//! The parsed object is then checked for the three required keys and coerced.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::evaluation::models::Evaluation;

/// Upper bound on the diagnostic excerpt carried by a parse failure.
pub const EXCERPT_MAX_CHARS: usize = 300;

const FENCE: &str = "```";
const LANGUAGE_TAG: &str = "json";
const REQUIRED_FIELDS: [&str; 3] = ["score", "summary", "improvement"];
const MIN_SCORE: i64 = 1;
const MAX_SCORE: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("Failed to parse JSON from model. Raw response: {excerpt}")]
    Parse { excerpt: String },

    #[error("{0}")]
    Validation(String),
}

/// Runs the full pipeline on a raw model response.
pub fn extract_evaluation(raw: &str) -> Result<Evaluation, ExtractError> {
    let cleaned = strip_markdown(raw);
    let object = parse_object(cleaned).ok_or_else(|| ExtractError::Parse {
        excerpt: excerpt(cleaned),
    })?;
    evaluation_from_object(object)
}

/// Removes surrounding whitespace, a leading fenced block and a leading bare `json` token.
///
/// Only the content of the first fenced block is kept. An unterminated fence is
/// left in place for the brace-span fallback to deal with.
pub fn strip_markdown(text: &str) -> &str {
    let mut text = text.trim();

    if let Some(rest) = text.strip_prefix(FENCE) {
        let rest = strip_language_tag(rest);
        if let Some(end) = rest.find(FENCE) {
            text = rest[..end].trim();
        }
    }

    strip_language_tag(text).trim()
}

/// Drops a leading `json` token, but not the prefix of a longer word like `jsonl`.
fn strip_language_tag(text: &str) -> &str {
    match text.strip_prefix(LANGUAGE_TAG) {
        Some(rest) if rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace() || c == '{') => {
            rest
        }
        _ => text,
    }
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    parse_json_object(text).or_else(|| brace_span(text).and_then(parse_json_object))
}

fn parse_json_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Greedy span from the first `{` to the last `}`.
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_MAX_CHARS).collect()
}

fn evaluation_from_object(object: Map<String, Value>) -> Result<Evaluation, ExtractError> {
    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !object.contains_key(*field))
        .collect();

    if !missing.is_empty() {
        return Err(ExtractError::Validation(format!(
            "Missing required fields in response ({}): {}",
            missing.join(", "),
            Value::Object(object)
        )));
    }

    Ok(Evaluation {
        score: coerce_score(&object["score"])?,
        summary: coerce_text("summary", &object["summary"])?,
        improvement: coerce_text("improvement", &object["improvement"])?,
    })
}

/// Accepts integers, floats (truncated toward zero) and numeric strings.
fn coerce_score(value: &Value) -> Result<u8, ExtractError> {
    let score = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| ExtractError::Validation(format!("score is not an integer: {value}")))?;

    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(ExtractError::Validation(format!(
            "score must be between {MIN_SCORE} and {MAX_SCORE}, got {score}"
        )));
    }

    Ok(score as u8)
}

fn coerce_text(field: &str, value: &Value) -> Result<String, ExtractError> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        // null, arrays and objects carry no usable text; `Evaluation` requires non-empty fields
        other => {
            return Err(ExtractError::Validation(format!(
                "{field} is not a string: {other}"
            )))
        }
    };

    if text.trim().is_empty() {
        return Err(ExtractError::Validation(format!("{field} is empty")));
    }

    Ok(text)
}
