use crate::error::{Result, RewriteError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const REWRITTEN_QUESTION_KEY: &str = "rewritten_question";

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^```(?:json)?[ \t]*\n?(.*?)\n?```$").expect("fence regex"));

/// The model's reply: exactly one key, `rewritten_question`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RewriteResponse {
    pub rewritten_question: String,
}

impl RewriteResponse {
    /// Canonical single-line JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Strip a single Markdown code fence wrapping the whole reply; backticks inside are kept
pub fn clean_response(raw: &str) -> String {
    let trimmed = raw.trim();
    match FENCE_RE.captures(trimmed).and_then(|caps| caps.get(1)) {
        Some(body) => body.as_str().trim().to_string(),
        None => trimmed.to_string(),
    }
}

/// Parse and validate a reply against the output contract
pub fn parse_response(raw: &str, strip_fences: bool) -> Result<RewriteResponse> {
    let text = if strip_fences {
        clean_response(raw)
    } else {
        raw.trim().to_string()
    };
    log::debug!("Parsing response ({} bytes)", text.len());

    if text.is_empty() {
        return Err(RewriteError::EmptyResponse);
    }

    let value: serde_json::Value = serde_json::from_str(&text)?;
    let object = value.as_object().ok_or(RewriteError::NotAnObject)?;

    let field = object.get(REWRITTEN_QUESTION_KEY).ok_or(RewriteError::MissingField)?;

    let mut extra: Vec<String> = object
        .keys()
        .filter(|k| k.as_str() != REWRITTEN_QUESTION_KEY)
        .cloned()
        .collect();
    if !extra.is_empty() {
        extra.sort();
        return Err(RewriteError::UnexpectedFields(extra));
    }

    let rewritten = field.as_str().ok_or(RewriteError::FieldNotString)?;
    if rewritten.trim().is_empty() {
        return Err(RewriteError::BlankRewrite);
    }

    Ok(serde_json::from_value(value)?)
}
