//! Turns free-form model replies into a `ClassificationResult`.
//!
//! Models are told to answer with bare JSON but regularly wrap it in prose
//! or markdown fences, or answer in prose only. Extraction walks down three
//! trust levels and never fails:
//!
//! 1. the whole (trimmed) reply is a JSON object with a `status` key;
//! 2. the span from the first `{` to the last `}` parses as a JSON object;
//! 3. nothing parses, so the fixed "unparseable" result is returned.
//!
//! Step 2 is greedy. A reply holding two separate objects
//! yields a span that is not valid JSON and falls through to step 3.

use serde_json::{Map, Value};

use super::models::{ClassificationResult, DEFAULT_CONFIDENCE, DEFAULT_REASONING, DEFAULT_STATUS};

/// Which extraction step produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustLevel {
    WholeReply,
    EmbeddedObject,
    Fallback,
}

impl TrustLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrustLevel::WholeReply => "whole_reply",
            TrustLevel::EmbeddedObject => "embedded_object",
            TrustLevel::Fallback => "fallback",
        }
    }
}

/// Extract a classification from raw completion text.
pub fn extract(raw: &str) -> ClassificationResult {
    extract_with_trust(raw).0
}

/// Like [`extract`], also reporting which step succeeded.
pub fn extract_with_trust(raw: &str) -> (ClassificationResult, TrustLevel) {
    let (result, trust) = run_extraction(raw);
    tracing::debug!(
        trust = trust.as_str(),
        status = %result.status,
        confidence = result.confidence,
        reply_length = raw.len(),
        "Extracted classification from completion"
    );
    (result, trust)
}

fn run_extraction(raw: &str) -> (ClassificationResult, TrustLevel) {
    if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(raw.trim()) {
        if object.contains_key("status") {
            return (from_object(&object), TrustLevel::WholeReply);
        }
    }

    if let Some(span) = embedded_object_span(raw) {
        if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(span) {
            return (from_object(&object), TrustLevel::EmbeddedObject);
        }
    }

    (ClassificationResult::unparseable(), TrustLevel::Fallback)
}

/// First `{` through last `}`, inclusive.
fn embedded_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn from_object(object: &Map<String, Value>) -> ClassificationResult {
    let mut result = ClassificationResult::new(
        string_field(object, "status").unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        string_field(object, "reasoning").unwrap_or_else(|| DEFAULT_REASONING.to_string()),
        object
            .get("confidence")
            .and_then(coerce_confidence)
            .unwrap_or(DEFAULT_CONFIDENCE),
    );

    result.category = string_field(object, "category");
    result.matched_rules = string_list(object, "matched_rules");
    result.evidence = string_list(object, "evidence");
    result.missing_information = string_list(object, "missing_information");
    result.fetch_error = string_field(object, "fetch_error");
    result
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key)?.as_str().map(str::to_string)
}

/// Accepts an array of strings (non-strings dropped) or a single string.
fn string_list(object: &Map<String, Value>, key: &str) -> Vec<String> {
    match object.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        Some(Value::String(item)) if !item.trim().is_empty() => vec![item.clone()],
        _ => Vec::new(),
    }
}

/// Numbers pass through; numeric strings ("0.85") are parsed. Anything
/// else, including non-finite values, counts as absent.
fn coerce_confidence(value: &Value) -> Option<f64> {
    let confidence = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    confidence.is_finite().then_some(confidence)
}
