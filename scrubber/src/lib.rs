//! Heuristic redaction of secrets in unstructured data.
//!
//! Error handlers and loggers hand this crate whatever they are about to
//! surface (request bodies, driver errors, ad hoc context maps) and get back a
//! structurally identical copy with secrets removed. There is no schema:
//! decisions are made per field name and per string value.
//!
//! The pieces:
//! - **Classification**: is a field name sensitive, structural, or neither?
//! - **Scrubbing**: which substrings of a free-text value look like secrets?
//! - **Redaction**: the recursive walk that applies both and breaks cycles.
//! - **Database errors**: a narrower scrubber for raw driver messages.
//!
//! Key rules:
//! - A field whose name is an exact sensitive term has its scalar value
//!   replaced with `"[REDACTED]"`, whatever its type. Objects under such names
//!   are walked so their non-sensitive members survive.
//! - A field whose name merely resembles a sensitive term is replaced
//!   wholesale, containers included.
//! - Strings under other names are scrubbed for embedded credentials, tokens,
//!   card numbers, SSNs and emails, except under structural names such as
//!   `userId` or `createdAt`, which are left alone.
//! - A container reached again from inside itself becomes
//!   `"[CIRCULAR_REFERENCE]"`. Shared children that do not form a cycle are
//!   redacted once and reused.
//!
//! What this crate does not do:
//! - perform I/O or logging of its own
//! - guarantee zero false negatives; it is a best-effort operational filter,
//!   not a DLP system
//!
//! A `slog` adapter is available behind the `slog` feature.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    missing_docs,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

// Module declarations
mod api_key;
mod classification;
mod redaction;
mod response;
#[cfg(feature = "slog")]
pub mod slog;
mod value;

// Re-exports
pub use api_key::validate_api_key;
pub use classification::{classify_field, FieldClass};
pub use redaction::{
    sanitize_database_error, scrub_string, Redactor, RedactorConfig, CARD_PLACEHOLDER,
    CIRCULAR_REFERENCE_PLACEHOLDER, DEFAULT_MAX_DEPTH, EMAIL_PLACEHOLDER, JWT_PLACEHOLDER,
    MAX_DEPTH_PLACEHOLDER, REDACTED_PLACEHOLDER, SSN_PLACEHOLDER,
};
pub use response::{
    ConfigError, Environment, ErrorResponse, ServiceError, ENVIRONMENT_VAR,
    FALLBACK_ENVIRONMENT_VAR,
};
pub use value::{Array, Object, Value};

/// Returns a redacted copy of `value` using the default [`Redactor`].
///
/// ```rust
/// use scrubber::{redact_sensitive_data, Object, Value};
///
/// let input = Value::from(
///     Object::new()
///         .with("userId", "user123")
///         .with("password", "hunter2")
///         .with("notes", "call 123-45-6789"),
/// );
/// let redacted = redact_sensitive_data(&input);
/// assert_eq!(redacted.get("userId"), Some(Value::from("user123")));
/// assert_eq!(redacted.get("password"), Some(Value::from("[REDACTED]")));
/// assert_eq!(redacted.get("notes"), Some(Value::from("call [SSN_REDACTED]")));
/// ```
pub fn redact_sensitive_data(value: &Value) -> Value {
    Redactor::new().redact(value)
}

/// Returns a redacted copy of a `serde_json::Value` using the default
/// [`Redactor`].
pub fn redact_json(value: &serde_json::Value) -> serde_json::Value {
    Redactor::new().redact_json(value)
}
