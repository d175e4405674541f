//! Application layer: the recursive walk over caller-supplied values.
//!
//! The walk builds a new value and never mutates its input. Each call tracks
//! container identities two ways:
//!
//! - the ancestors of the current position: reaching one of them again closes
//!   a cycle, which becomes [`CIRCULAR_REFERENCE_PLACEHOLDER`];
//! - containers already finished: a shared child reached again reuses its
//!   redacted copy, so every container is walked at most once.

use std::collections::{HashMap, HashSet};

use serde_json::Value as JsonValue;

use super::{
    policy::{
        RedactorConfig, CIRCULAR_REFERENCE_PLACEHOLDER, MAX_DEPTH_PLACEHOLDER,
        REDACTED_PLACEHOLDER,
    },
    scrub::{scrub_classified, scrub_list_item},
};
use crate::{
    classification::{classify_field, FieldClass},
    value::{Array, Object, Value},
};

/// Redacts sensitive data from arbitrary values.
///
/// A `Redactor` holds only configuration; every call to [`Redactor::redact`]
/// is independent, so one instance can be shared across threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct Redactor {
    config: RedactorConfig,
}

impl Redactor {
    /// Creates a redactor with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a redactor with an explicit configuration.
    pub fn with_config(config: RedactorConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> RedactorConfig {
        self.config
    }

    /// Returns a redacted copy of `value`.
    ///
    /// Scalars at the root have no field name to classify against and are
    /// returned unchanged. This method never panics.
    pub fn redact(&self, value: &Value) -> Value {
        if !value.is_container() {
            return value.clone();
        }
        Walk::new(self.config).container(value, 0)
    }

    /// Redacts a `serde_json::Value`.
    pub fn redact_json(&self, value: &JsonValue) -> JsonValue {
        self.redact(&Value::from(value)).to_json()
    }
}

/// State for one top-level call.
struct Walk {
    ancestors: HashSet<usize>,
    finished: HashMap<usize, Value>,
    max_depth: usize,
}

impl Walk {
    fn new(config: RedactorConfig) -> Self {
        Self {
            ancestors: HashSet::new(),
            finished: HashMap::new(),
            max_depth: config.max_depth(),
        }
    }

    fn container(&mut self, value: &Value, depth: usize) -> Value {
        let Some(id) = value.container_id() else {
            return value.clone();
        };
        if self.ancestors.contains(&id) {
            return Value::from(CIRCULAR_REFERENCE_PLACEHOLDER);
        }
        if let Some(redacted) = self.finished.get(&id) {
            return redacted.clone();
        }
        if depth > self.max_depth {
            return Value::from(MAX_DEPTH_PLACEHOLDER);
        }

        self.ancestors.insert(id);
        let redacted = match value {
            Value::Object(object) => Value::Object(self.object(object, depth)),
            Value::Array(array) => Value::Array(self.array(array, depth)),
            _ => value.clone(),
        };
        self.ancestors.remove(&id);
        self.finished.insert(id, redacted.clone());
        redacted
    }

    fn object(&mut self, object: &Object, depth: usize) -> Object {
        let entries = object.entries();
        let redacted = Object::with_capacity(entries.len());
        for (name, member) in entries {
            let class = classify_field(&name);
            let member = match (class, member) {
                // Objects under an exact name are walked so their safe members
                // survive; anything else under a sensitive name is replaced.
                (FieldClass::ExactSensitive, member @ Value::Object(_)) => {
                    self.container(&member, depth + 1)
                }
                (FieldClass::ExactSensitive | FieldClass::PatternSensitive, _) => {
                    Value::from(REDACTED_PLACEHOLDER)
                }
                (_, member @ (Value::Object(_) | Value::Array(_))) => {
                    self.container(&member, depth + 1)
                }
                (_, Value::String(text)) => {
                    Value::String(scrub_classified(&text, &name, class).into_owned())
                }
                (_, member) => member,
            };
            redacted.insert(name, member);
        }
        redacted
    }

    fn array(&mut self, array: &Array, depth: usize) -> Array {
        let items = array.items();
        let redacted = Array::with_capacity(items.len());
        for item in items {
            let item = match item {
                Value::Object(_) | Value::Array(_) => self.container(&item, depth + 1),
                Value::String(text) => Value::String(scrub_list_item(&text).into_owned()),
                other => other,
            };
            redacted.push(item);
        }
        redacted
    }
}
