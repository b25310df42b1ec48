//! # Configuration Value
//!
//! The canonical in-memory representation of configuration data: a JSON
//! object. Wire encodings (structured bus bodies, UTF-8 byte buffers) are
//! all resolved into this type.

use crate::errors::ValueError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A structured key/value configuration.
///
/// An empty value is what a store reports before it has received anything;
/// it is indistinguishable from an explicitly published `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigValue(Map<String, Value>);

impl ConfigValue {
    /// Create an empty configuration.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the configuration has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of top-level keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Look up a top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a top-level key holding a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Insert a top-level key, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Parse JSON text that must contain an object.
    pub fn from_json_str(text: &str) -> Result<Self, ValueError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| ValueError::Malformed(e.to_string()))?;
        Self::try_from(value)
    }

    /// Decode UTF-8 bytes that must contain a JSON object.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ValueError> {
        let text = std::str::from_utf8(bytes).map_err(|e| ValueError::InvalidUtf8 {
            valid_up_to: e.valid_up_to(),
        })?;
        Self::from_json_str(text)
    }

    /// Compact JSON text.
    #[must_use]
    pub fn encode(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }

    /// Compact JSON as UTF-8 bytes.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode().into_bytes()
    }

    /// Borrow the underlying map.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into the underlying map.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ConfigValue {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<ConfigValue> for Value {
    fn from(config: ConfigValue) -> Self {
        Value::Object(config.0)
    }
}

impl TryFrom<Value> for ConfigValue {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ValueError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
