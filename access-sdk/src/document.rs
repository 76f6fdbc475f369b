//! Parsed Access response documents

use crate::{Error, Result};
use serde_json::{Map, Value};
use std::fmt;

/// A JSON object returned by the Access service.
///
/// The service's response shape is open-ended, so fields are read by key
/// through typed accessors rather than a fixed schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseDocument {
    fields: Map<String, Value>,
}

impl ResponseDocument {
    /// Parse a response body; anything other than a JSON object is rejected
    pub fn parse(body: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(fields)) => Ok(Self { fields }),
            _ => Err(Error::invalid("Unable to parse response.")),
        }
    }

    /// Wrap an existing JSON object
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Raw value for a key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Whether a key is present (even if null)
    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// String value
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Integer value
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// Numeric value as float
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// Boolean value
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Array value
    pub fn get_array(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    /// Nested object
    pub fn get_document(&self, key: &str) -> Option<ResponseDocument> {
        self.get(key)
            .and_then(Value::as_object)
            .map(|fields| Self::from_map(fields.clone()))
    }

    /// Top-level keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of top-level fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the object has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Borrow the underlying object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Convert into a `serde_json::Value`
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl fmt::Display for ResponseDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.fields) {
            Ok(s) => f.write_str(&s),
            Err(_) => Err(fmt::Error),
        }
    }
}
