pub mod classification;
pub mod status;

pub use classification::*;
pub use status::{is_known_status, normalize_status, KNOWN_STATUSES};
