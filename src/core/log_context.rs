//! Structured key/value fields attached to log events
//!
//! This module provides:
//! - `FieldValue`: a typed field value with a canonical text rendering
//! - `LogContext`: an ordered list of fields, as given at the call site

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Null => serde_json::Value::Null,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<usize> for FieldValue {
    fn from(i: usize) -> Self {
        i64::try_from(i)
            .map(FieldValue::Int)
            .unwrap_or_else(|_| FieldValue::String(i.to_string()))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Escape line breaks and tabs so a value can never split a rendered line
pub(crate) fn escape_line_breaks(text: &str) -> String {
    text.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Ordered key/value fields for one log call
///
/// Insertion order is preserved; adding a key that already exists replaces
/// its value in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogContext {
    fields: Vec<(String, FieldValue)>,
}

impl LogContext {
    /// Create a new empty log context
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field to the context
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.add_field(key, value);
        self
    }

    /// Add a field to the context (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Get a field by key
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Get all fields in insertion order
    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    /// Check if context has any fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Merge `base` fields in front of this context's own fields
    ///
    /// Keys already present here take priority over the ones from `base`.
    pub fn merged_over(&self, base: &LogContext) -> LogContext {
        let mut fields: Vec<(String, FieldValue)> = base
            .fields
            .iter()
            .filter(|(k, _)| self.get(k).is_none())
            .cloned()
            .collect();
        fields.extend(self.fields.iter().cloned());
        LogContext { fields }
    }

    /// Format fields as key=value pairs, each on the same line
    pub fn format_fields(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| match v {
                FieldValue::String(s) => {
                    format!("{}={}", escape_line_breaks(k), escape_line_breaks(s))
                }
                other => format!("{}={}", escape_line_breaks(k), other),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Render fields as a JSON object
    pub fn to_json_object(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut map = serde_json::Map::new();
        for (key, value) in &self.fields {
            map.insert(key.clone(), value.to_json_value());
        }
        map
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl<K, V> FromIterator<(K, V)> for LogContext
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ctx = LogContext::new();
        for (k, v) in iter {
            ctx.add_field(k, v);
        }
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_context_creation() {
        let ctx = LogContext::new();
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_log_context_preserves_order() {
        let ctx = LogContext::new()
            .with_field("name", "tangfire")
            .with_field("age", 24)
            .with_field("isok", true);

        let keys: Vec<&str> = ctx.fields().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["name", "age", "isok"]);
        assert_eq!(ctx.format_fields(), "name=tangfire age=24 isok=true");
    }

    #[test]
    fn test_duplicate_key_replaces_in_place() {
        let ctx = LogContext::new()
            .with_field("a", 1)
            .with_field("b", 2)
            .with_field("a", 3);

        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.format_fields(), "a=3 b=2");
    }

    #[test]
    fn test_format_fields_escapes_line_breaks() {
        let ctx = LogContext::new()
            .with_field("path", "/tmp/a\r\nb")
            .with_field("odd\tkey", 1);

        assert_eq!(ctx.format_fields(), "path=/tmp/a\\r\\nb odd\\tkey=1");
        // the stored value is untouched; JSON escapes it on its own
        assert_eq!(ctx.to_json_object()["path"], "/tmp/a\r\nb");
    }

    #[test]
    fn test_merged_over_priority() {
        let base = LogContext::new()
            .with_field("service", "api")
            .with_field("key", "logger_value");
        let entry = LogContext::new().with_field("key", "entry_value");

        let merged = entry.merged_over(&base);
        assert_eq!(merged.len(), 2);
        assert_eq!(
            merged.get("key"),
            Some(&FieldValue::String("entry_value".to_string()))
        );
        assert_eq!(merged.fields()[0].0, "service");
    }

    #[test]
    fn test_json_object() {
        let ctx = LogContext::new()
            .with_field("latency_ms", 42)
            .with_field("missing", None::<i64>);
        let obj = ctx.to_json_object();
        assert_eq!(obj["latency_ms"], 42);
        assert!(obj["missing"].is_null());
    }

    #[test]
    fn test_from_iterator() {
        let ctx: LogContext = vec![("k1", "v1"), ("k2", "v2")].into_iter().collect();
        assert_eq!(ctx.format_fields(), "k1=v1 k2=v2");
    }
}
