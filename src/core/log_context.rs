//! Structured context for key-value fields
//!
//! `LogContext` is the data mapping attached to every record. Keys are unique
//! and kept sorted so that serialized output is stable; inserting an existing
//! key replaces its value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single context value, kept typed until rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    /// Arbitrary structured value (objects, arrays)
    Json(serde_json::Value),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(text) => f.write_str(text),
            FieldValue::Int(number) => fmt::Display::fmt(number, f),
            FieldValue::Float(number) => fmt::Display::fmt(number, f),
            FieldValue::Bool(flag) => fmt::Display::fmt(flag, f),
            FieldValue::Null => f.write_str("null"),
            FieldValue::Json(value) => fmt::Display::fmt(value, f),
        }
    }
}

impl FieldValue {
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
            FieldValue::Json(v) => v.clone(),
        }
    }
}

macro_rules! field_value_from {
    ($($source:ty => |$value:ident| $convert:expr;)+) => {
        $(
            impl From<$source> for FieldValue {
                fn from($value: $source) -> Self {
                    $convert
                }
            }
        )+
    };
}

field_value_from! {
    String => |text| FieldValue::String(text);
    &str => |text| FieldValue::String(text.to_owned());
    &String => |text| FieldValue::String(text.clone());
    i64 => |number| FieldValue::Int(number);
    i32 => |number| FieldValue::Int(i64::from(number));
    i16 => |number| FieldValue::Int(i64::from(number));
    u32 => |number| FieldValue::Int(i64::from(number));
    u16 => |number| FieldValue::Int(i64::from(number));
    u8 => |number| FieldValue::Int(i64::from(number));
    f64 => |number| FieldValue::Float(number);
    f32 => |number| FieldValue::Float(f64::from(number));
    bool => |flag| FieldValue::Bool(flag);
}

// Values beyond i64::MAX keep their digits as text
impl From<u64> for FieldValue {
    fn from(number: u64) -> Self {
        i64::try_from(number)
            .map(FieldValue::Int)
            .unwrap_or_else(|_| FieldValue::String(number.to_string()))
    }
}

impl From<usize> for FieldValue {
    fn from(number: usize) -> Self {
        FieldValue::from(number as u64)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Bool(b),
            serde_json::Value::String(s) => FieldValue::String(s),
            serde_json::Value::Number(ref n) => match n.as_i64() {
                Some(i) => FieldValue::Int(i),
                None => n.as_f64().map(FieldValue::Float).unwrap_or(FieldValue::Json(v)),
            },
            other => FieldValue::Json(other),
        }
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Key/value fields attached to one record
///
/// Keys are unique and iterate in sorted order, so rendered output is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogContext {
    fields: BTreeMap<String, FieldValue>,
}

impl LogContext {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Builder form; a repeated key replaces the earlier value
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// The `data` object of a cloud record
    pub fn to_json_map(&self) -> serde_json::Map<String, serde_json::Value> {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json_value()))
            .collect()
    }

    /// `key=value` pairs in key order, space separated
    pub fn format_fields(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_fields())
    }
}

impl<K, V> FromIterator<(K, V)> for LogContext
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = LogContext::new();
        for (key, value) in iter {
            context.add_field(key, value);
        }
        context
    }
}
