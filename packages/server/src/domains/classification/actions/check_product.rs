//! Classify a product URL end to end.

use tracing::{info, warn};

use crate::domains::classification::extractor::extract_with_trust;
use crate::domains::classification::models::{normalize_status, ClassificationResult};
use crate::domains::classification::prompts::{build_classification_prompt, SYSTEM_PROMPT};
use crate::kernel::ServerDeps;

/// Ask the completion service about `url` and normalize its answer.
///
/// Never fails: a failed or timed-out completion becomes an "Uncertain"
/// result with low confidence, and unparseable replies are handled by the
/// extractor.
pub async fn check_product(url: &str, deps: &ServerDeps) -> ClassificationResult {
    let prompt = build_classification_prompt(url);

    let completion = tokio::time::timeout(
        deps.completion_deadline,
        deps.ai.complete_with_system(SYSTEM_PROMPT, &prompt),
    )
    .await;

    let text = match completion {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!(url = %url, error = %e, "Completion failed, returning uncertain result");
            return ClassificationResult::completion_failed(&format!("{:#}", e));
        }
        Err(_) => {
            warn!(
                url = %url,
                deadline_secs = deps.completion_deadline.as_secs_f64(),
                "Completion timed out, returning uncertain result"
            );
            return ClassificationResult::completion_failed(&format!(
                "completion timed out after {:.1}s",
                deps.completion_deadline.as_secs_f64()
            ));
        }
    };

    let (mut result, trust) = extract_with_trust(&text);

    if deps.strict_status_vocabulary {
        let normalized = normalize_status(&result.status);
        if normalized != result.status {
            warn!(status = %result.status, "Unknown status from model, downgrading");
            result.status = normalized;
        }
    }

    info!(
        url = %url,
        status = %result.status,
        confidence = result.confidence,
        trust = trust.as_str(),
        "Product classified"
    );

    result
}
