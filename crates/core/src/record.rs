//! Record type
//!
//! A record is an open-ended mapping of field name to JSON value. The engine
//! never enforces a schema; type tags are advisory metadata owned by the
//! adapter facade.

use crate::error::{Error, Result};
use crate::path::FieldPath;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Shared, read-only handle to a stored record.
///
/// Collections hold `RecordRef`s; queries hand out clones of the handle rather
/// than copies of the record. Updates use copy-on-write, so a handle held by a
/// caller keeps the contents it had when it was emitted.
pub type RecordRef = Arc<Record>;

/// A single record: field name → value
///
/// Newtype around `serde_json::Map` with direct access via Deref/DerefMut.
///
/// # Examples
///
/// ```
/// use recstore_core::Record;
/// use serde_json::json;
///
/// let mut rec = Record::try_from(json!({"id": 1, "x": 1})).unwrap();
/// rec.merge(&Record::try_from(json!({"y": 9})).unwrap());
/// assert_eq!(rec.get("y"), Some(&json!(9)));
/// assert_eq!(rec.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Record(Map::new())
    }

    /// Get the underlying map
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// Get a reference to the underlying map
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Look up a possibly nested field
    pub fn get_path(&self, path: &FieldPath) -> Option<&Value> {
        path.resolve_in(&self.0)
    }

    /// Builder-style field insertion
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Shallow merge: every key of `patch` overwrites or is added to `self`.
    ///
    /// Nested objects are replaced wholesale, never merged recursively.
    pub fn merge(&mut self, patch: &Record) {
        for (key, value) in &patch.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Convert into a JSON object value
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl Deref for Record {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Record {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.0.clone()))
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Record(map)
    }
}

impl From<Record> for Value {
    fn from(rec: Record) -> Self {
        Value::Object(rec.0)
    }
}

impl TryFrom<Value> for Record {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Record(map)),
            other => Err(Error::invalid_record(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Parse a JSON array of objects into records
pub fn records_from_value(value: Value) -> Result<Vec<Record>> {
    match value {
        Value::Array(items) => items.into_iter().map(Record::try_from).collect(),
        Value::Object(map) => Ok(vec![Record(map)]),
        other => Err(Error::invalid_record(format!(
            "expected an object or array of objects, got {}",
            json_kind(&other)
        ))),
    }
}

/// Human-readable name of a JSON value's kind
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
