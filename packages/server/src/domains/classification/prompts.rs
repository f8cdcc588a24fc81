//! LLM prompts for product legality classification.
//!
//! The wording is policy and may change freely. The one contract the rest
//! of the domain relies on is that the model is told to answer with a single
//! JSON object whose top-level keys are `status`, `reasoning` and
//! `confidence`.

/// System instruction sent alongside every classification prompt.
pub const SYSTEM_PROMPT: &str = "You are an expert in Swiss import and sales regulations. \
Always respond with exactly one valid JSON object and nothing else.";

/// Prompt for classifying a product. `{url}` is replaced verbatim.
pub const CLASSIFY_PRODUCT_PROMPT: &str = r#"Determine whether the product at the URL below may legally be imported into, or possessed in, Switzerland by a private person.

Product URL: {url}

Classify the product with exactly one of these statuses:
- "legal": clearly allowed for import and possession
- "likely legal": allowed unless an unusual variant applies
- "possibly legal": allowed under conditions (permits, certification, age limits)
- "possibly illegal": restricted; import only under conditions that private buyers rarely meet
- "likely illegal": prohibited for most variants of this product
- "illegal": clearly prohibited
- "Uncertain": the URL does not reveal enough to decide

Confidence bands:
- 0.8 to 1.0: the product type is unambiguous and a specific rule applies
- 0.5 to 0.8: the product type is clear but the applicable rule depends on details
- below 0.5: the product type or the rule is unclear

Consider these factors:
1. Product type and category
2. Swiss import restrictions and customs rules
3. Product safety regulations (electrical safety, CE/CH conformity)
4. Prohibited items (e.g. laser pointers of class 2 and above, certain weapons, signal jammers)
5. Age restrictions
6. Chemical, biological and medicinal substance restrictions

Respond with ONLY this JSON object. No markdown fences, no text before or after it:
{
    "status": "one of the statuses above",
    "reasoning": "Specific explanation citing the relevant Swiss rules",
    "confidence": 0.85,
    "category": "optional: product category",
    "matched_rules": ["optional: rules that decided the outcome"],
    "evidence": ["optional: facts about the product you relied on"],
    "missing_information": ["optional: facts that would change the outcome"]
}"#;

/// Build the user prompt for classifying the product at `url`.
pub fn build_classification_prompt(url: &str) -> String {
    CLASSIFY_PRODUCT_PROMPT.replace("{url}", url)
}
