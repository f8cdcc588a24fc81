use serde::{Deserialize, Serialize};

/// Status used whenever the model gave no usable verdict.
pub const DEFAULT_STATUS: &str = "Uncertain";

/// Reasoning used when a parsed reply omits its explanation.
pub const DEFAULT_REASONING: &str = "Analysis completed";

/// Confidence used when a parsed reply omits its score.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

pub const UNPARSEABLE_REASONING: &str = "Unable to parse AI response. Please try again.";
pub const UNPARSEABLE_CONFIDENCE: f64 = 0.3;

pub const COMPLETION_FAILED_CONFIDENCE: f64 = 0.1;

/// Incoming request body for `POST /check-product`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRequest {
    /// Product page URL. Opaque: embedded in the prompt, never fetched.
    pub url: String,
}

/// Legality verdict for one product.
///
/// The three core fields are always populated. The remaining fields are
/// extra detail some prompt variants ask for; they are only serialized when
/// the model actually supplied them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Open vocabulary ("legal", "likely illegal", "Uncertain", ...)
    pub status: String,
    pub reasoning: String,
    /// Nominally 0.0..=1.0, passed through unclamped
    pub confidence: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched_rules: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_information: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_error: Option<String>,
}

impl ClassificationResult {
    pub fn new(
        status: impl Into<String>,
        reasoning: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            status: status.into(),
            reasoning: reasoning.into(),
            confidence,
            category: None,
            matched_rules: Vec::new(),
            evidence: Vec::new(),
            missing_information: Vec::new(),
            fetch_error: None,
        }
    }

    /// Result when no JSON object could be recovered from the reply.
    pub fn unparseable() -> Self {
        Self::new(DEFAULT_STATUS, UNPARSEABLE_REASONING, UNPARSEABLE_CONFIDENCE)
    }

    /// Result when the completion call itself failed.
    pub fn completion_failed(error: &str) -> Self {
        Self::new(
            DEFAULT_STATUS,
            format!("Unable to complete analysis: {}", error),
            COMPLETION_FAILED_CONFIDENCE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_fields_only_on_the_wire_when_details_absent() {
        let result = ClassificationResult::new("legal", "ok", 0.9);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "status": "legal", "reasoning": "ok", "confidence": 0.9 })
        );
    }

    #[test]
    fn details_serialized_when_present() {
        let mut result = ClassificationResult::new("illegal", "laser", 0.95);
        result.category = Some("laser pointer".into());
        result.matched_rules = vec!["LaserV Art. 4".into()];

        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["category"], "laser pointer");
        assert_eq!(json["matched_rules"][0], "LaserV Art. 4");
        assert!(json.get("evidence").is_none());
    }

    #[test]
    fn completion_failure_embeds_message() {
        let result = ClassificationResult::completion_failed("connection reset");

        assert_eq!(result.status, "Uncertain");
        assert_eq!(result.confidence, 0.1);
        assert!(result.reasoning.contains("connection reset"));
    }
}
