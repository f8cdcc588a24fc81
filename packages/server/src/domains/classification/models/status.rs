use super::classification::DEFAULT_STATUS;

/// Statuses the prompt asks the model to choose from, lowercased.
///
/// "uncertain" appears here because the fallback paths emit it; matching is
/// case-insensitive so the original "Legal"/"Illegal" spellings also pass.
pub const KNOWN_STATUSES: &[&str] = &[
    "legal",
    "illegal",
    "possibly legal",
    "possibly illegal",
    "likely legal",
    "likely illegal",
    "uncertain",
];

pub fn is_known_status(status: &str) -> bool {
    let normalized = status.trim().to_lowercase();
    KNOWN_STATUSES.contains(&normalized.as_str())
}

/// Keep known statuses verbatim, downgrade anything else to "Uncertain".
pub fn normalize_status(status: &str) -> String {
    if is_known_status(status) {
        status.to_string()
    } else {
        DEFAULT_STATUS.to_string()
    }
}
