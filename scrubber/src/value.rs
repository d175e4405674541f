//! Dynamically shaped values handed to the redactor.
//!
//! Callers pass whatever they are about to log or return: parsed request
//! bodies, ORM error objects, ad hoc context maps. [`Value`] models that data
//! as a sum type instead of a fixed schema.
//!
//! Containers ([`Object`] and [`Array`]) are shared handles. Cloning a handle
//! clones the reference, so the same container can be reachable from several
//! places, including from itself. The redactor relies on container identity
//! (the handle's allocation) to detect such cycles.
//!
//! Reads always take a snapshot of a container's members, so no lock is ever
//! held while the caller recurses into children.

use std::{
    collections::HashSet,
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map as JsonMap, Number, Value as JsonValue};

use crate::redaction::CIRCULAR_REFERENCE_PLACEHOLDER;

/// A JSON-like value with an explicit `Undefined` and shareable containers.
#[derive(Clone, Default)]
pub enum Value {
    /// A missing value. Kept apart from `Null` because sensitive fields redact
    /// both, but serialization drops `Undefined` object members.
    #[default]
    Undefined,
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number, stored with `serde_json`'s arbitrary representation.
    Number(Number),
    /// A string.
    String(String),
    /// A shared, ordered sequence.
    Array(Array),
    /// A shared, insertion-ordered mapping.
    Object(Object),
}

impl Value {
    /// Returns `true` for objects and arrays.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    /// Returns the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the object handle, if this is an object.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the array handle, if this is an array.
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Looks up `key` when this is an object.
    ///
    /// Returns `None` for non-objects and for missing keys.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.as_object().and_then(|object| object.get(key))
    }

    /// Looks up the element at `index` when this is an array.
    pub fn index(&self, index: usize) -> Option<Value> {
        self.as_array().and_then(|array| array.get(index))
    }

    pub(crate) fn container_id(&self) -> Option<usize> {
        match self {
            Value::Array(array) => Some(array.id()),
            Value::Object(object) => Some(object.id()),
            _ => None,
        }
    }

    /// Converts to a `serde_json::Value`.
    ///
    /// This is total. A container that contains itself is emitted as
    /// `"[CIRCULAR_REFERENCE]"` at the point the cycle closes. `Undefined`
    /// object members are skipped, and `Undefined` elsewhere becomes `null`.
    pub fn to_json(&self) -> JsonValue {
        let mut ancestors = HashSet::new();
        to_json_inner(self, &mut ancestors)
    }
}

fn to_json_inner(value: &Value, ancestors: &mut HashSet<usize>) -> JsonValue {
    let id = match value {
        Value::Undefined | Value::Null => return JsonValue::Null,
        Value::Bool(flag) => return JsonValue::Bool(*flag),
        Value::Number(number) => return JsonValue::Number(number.clone()),
        Value::String(text) => return JsonValue::String(text.clone()),
        Value::Array(array) => array.id(),
        Value::Object(object) => object.id(),
    };
    if !ancestors.insert(id) {
        return JsonValue::String(CIRCULAR_REFERENCE_PLACEHOLDER.to_string());
    }
    let json = match value {
        Value::Array(array) => JsonValue::Array(
            array
                .items()
                .iter()
                .map(|item| to_json_inner(item, ancestors))
                .collect(),
        ),
        Value::Object(object) => {
            let mut map = JsonMap::new();
            for (key, member) in object.entries() {
                if matches!(member, Value::Undefined) {
                    continue;
                }
                map.insert(key, to_json_inner(&member, ancestors));
            }
            JsonValue::Object(map)
        }
        _ => JsonValue::Null,
    };
    ancestors.remove(&id);
    json
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("Undefined"),
            Value::Null => f.write_str("Null"),
            Value::Bool(flag) => write!(f, "Bool({flag})"),
            Value::Number(number) => write!(f, "Number({number})"),
            Value::String(text) => write!(f, "String({text:?})"),
            Value::Array(_) | Value::Object(_) => write!(f, "{}", self.to_json()),
        }
    }
}

// =============================================================================
// Equality
// =============================================================================

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        let mut in_progress = HashSet::new();
        eq_inner(self, other, &mut in_progress)
    }
}

// Pairs already being compared are assumed equal, so cyclic graphs terminate.
fn eq_inner(left: &Value, right: &Value, in_progress: &mut HashSet<(usize, usize)>) -> bool {
    match (left, right) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            if a.id() == b.id() || !in_progress.insert((a.id(), b.id())) {
                return true;
            }
            let (a, b) = (a.items(), b.items());
            a.len() == b.len()
                && a.iter()
                    .zip(b.iter())
                    .all(|(x, y)| eq_inner(x, y, in_progress))
        }
        (Value::Object(a), Value::Object(b)) => {
            if a.id() == b.id() || !in_progress.insert((a.id(), b.id())) {
                return true;
            }
            let b = b.snapshot();
            let a = a.entries();
            a.len() == b.len()
                && a.iter().all(|(key, x)| {
                    b.get(key).is_some_and(|y| eq_inner(x, y, in_progress))
                })
        }
        _ => false,
    }
}

// =============================================================================
// Containers
// =============================================================================

/// A shared, insertion-ordered mapping from field names to values.
///
/// `clone()` returns another handle to the same mapping. Inserting a handle
/// into itself creates a cycle; such graphs are never freed (`Arc` cycles)
/// and are meant for short-lived diagnostic payloads.
#[derive(Clone, Default)]
pub struct Object(Arc<RwLock<IndexMap<String, Value>>>);

impl Object {
    /// Creates an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty object with room for `capacity` members.
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Arc::new(RwLock::new(IndexMap::with_capacity(capacity))))
    }

    /// Inserts or replaces a member, returning the previous value.
    ///
    /// Replacing keeps the member's original position.
    pub fn insert<K, V>(&self, key: K, value: V) -> Option<Value>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into())
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with<K, V>(self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.insert(key, value);
        self
    }

    /// Returns a copy of the member stored under `key`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.0.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` when the object has no members.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Snapshot of all members in insertion order.
    ///
    /// Nested containers in the snapshot are handles, not copies.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Returns `true` if `self` and `other` are handles to the same object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn snapshot(&self) -> IndexMap<String, Value> {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<()>() as usize
    }
}

impl<K, V> FromIterator<(K, V)> for Object
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self(Arc::new(RwLock::new(map)))
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Value::Object(self.clone()), f)
    }
}

/// A shared, ordered sequence of values.
///
/// Like [`Object`], `clone()` shares the underlying storage.
#[derive(Clone, Default)]
pub struct Array(Arc<RwLock<Vec<Value>>>);

impl Array {
    /// Creates an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty array with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Arc::new(RwLock::new(Vec::with_capacity(capacity))))
    }

    /// Appends an element.
    pub fn push<V: Into<Value>>(&self, value: V) {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(value.into());
    }

    /// Returns a copy of the element at `index`.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(index)
            .cloned()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.0.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` when the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all elements.
    pub fn items(&self) -> Vec<Value> {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Returns `true` if `self` and `other` are handles to the same array.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<()>() as usize
    }
}

impl<V: Into<Value>> FromIterator<V> for Array {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let items = iter.into_iter().map(Into::into).collect();
        Self(Arc::new(RwLock::new(items)))
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Value::Array(self.clone()), f)
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(flag) => Value::Bool(flag),
            JsonValue::Number(number) => Value::Number(number),
            JsonValue::String(text) => Value::String(text),
            JsonValue::Array(items) => Value::Array(items.into_iter().collect()),
            JsonValue::Object(map) => Value::Object(map.into_iter().collect()),
        }
    }
}

impl From<&JsonValue> for Value {
    fn from(json: &JsonValue) -> Self {
        Value::from(json.clone())
    }
}

impl From<&Value> for JsonValue {
    fn from(value: &Value) -> Self {
        value.to_json()
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Value::Array(array)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Array(Arc::new(RwLock::new(items))))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::String(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::String(text.to_owned())
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Bool(flag)
    }
}

impl From<f64> for Value {
    /// Non-finite floats have no JSON representation and become `Null`.
    fn from(number: f64) -> Self {
        Number::from_f64(number).map_or(Value::Null, Value::Number)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Value::Null, Into::into)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(number: $ty) -> Self {
                    Value::Number(Number::from(number))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        JsonValue::deserialize(deserializer).map(Value::from)
    }
}
