//! Adapters for emitting redacted values through `slog`.
//!
//! This module connects the redactor with `slog` by providing a `slog::Value`
//! that serializes an already-redacted payload as structured JSON via
//! `slog`'s nested-value support.
//!
//! It is responsible for:
//! - Ensuring the logged representation is derived from the redactor's
//!   output, never from the original value.
//! - Avoiding fallible logging APIs: serialization failures are represented as
//!   placeholder strings rather than propagated as errors.
//!
//! It does not configure `slog` or decide what is sensitive.

use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{redact_sensitive_data, response::ErrorResponse, value::Value};

/// A `slog::Value` that emits an owned redacted payload as structured JSON.
///
/// Construct it through [`IntoRedactedJson`]; there is no way to build one
/// from an unredacted value.
#[derive(Clone, Debug)]
pub struct RedactedJson {
    value: JsonValue,
}

impl RedactedJson {
    fn new(value: JsonValue) -> Self {
        Self { value }
    }

    /// The redacted payload that will be logged.
    pub fn as_json(&self) -> &JsonValue {
        &self.value
    }
}

impl SlogValue for RedactedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Converts values into a `slog::Value` that logs their redacted form.
///
/// ## Example
/// ```ignore
/// use scrubber::slog::IntoRedactedJson;
///
/// error!(logger, "request failed"; "context" => request_context.into_redacted_json());
/// ```
pub trait IntoRedactedJson {
    /// Redacts `self` and returns a `slog::Value` that serializes as
    /// structured JSON.
    fn into_redacted_json(self) -> RedactedJson;
}

impl IntoRedactedJson for Value {
    fn into_redacted_json(self) -> RedactedJson {
        RedactedJson::new(redact_sensitive_data(&self).to_json())
    }
}

impl IntoRedactedJson for &Value {
    fn into_redacted_json(self) -> RedactedJson {
        RedactedJson::new(redact_sensitive_data(self).to_json())
    }
}

impl IntoRedactedJson for JsonValue {
    fn into_redacted_json(self) -> RedactedJson {
        Value::from(self).into_redacted_json()
    }
}

impl IntoRedactedJson for ErrorResponse {
    /// The response context is redacted on construction; it is redacted again
    /// here so the payload is safe even if it was built by hand.
    fn into_redacted_json(self) -> RedactedJson {
        let json = serde_json::to_value(&self).unwrap_or_else(|_| {
            JsonValue::String("Failed to serialize redacted value".to_string())
        });
        json.into_redacted_json()
    }
}
