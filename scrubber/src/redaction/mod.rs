//! Redaction passes, traversal, and entrypoints.
//!
//! This module ties the pieces together:
//!
//! - **`policy`**: sentinels and limits (`REDACTED_PLACEHOLDER`, `RedactorConfig`)
//! - **`scrub`**: string content scrubbing (`scrub_string`)
//! - **`redact`**: the recursive walk (`Redactor`)
//! - **`database`**: driver error text (`sanitize_database_error`)
//!
//! Field-name classification lives in `crate::classification`.

mod database;
mod policy;
mod redact;
mod scrub;

pub use database::sanitize_database_error;
pub use policy::{
    RedactorConfig, CARD_PLACEHOLDER, CIRCULAR_REFERENCE_PLACEHOLDER, DEFAULT_MAX_DEPTH,
    EMAIL_PLACEHOLDER, JWT_PLACEHOLDER, MAX_DEPTH_PLACEHOLDER, REDACTED_PLACEHOLDER,
    SSN_PLACEHOLDER,
};
pub use redact::Redactor;
pub use scrub::scrub_string;
