pub mod actions;
pub mod extractor;
pub mod models;
pub mod prompts;

// Re-export commonly used types
pub use actions::check_product;
pub use extractor::{extract, extract_with_trust, TrustLevel};
pub use models::{ClassificationRequest, ClassificationResult};
