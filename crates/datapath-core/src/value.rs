//! Owned host value model.
//!
//! [`Value`] covers the shapes the helpers traverse: scalars, indexed
//! sequences, insertion-ordered keyed maps and typed records with named
//! fields. Conversions exist from JSON and TOML trees and from any
//! [`serde::Serialize`] type.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PathError, PathResult};

/// Insertion-ordered keyed map of values.
pub type Map = IndexMap<String, Value>;

/// A structured object: a type name plus declaration-ordered fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    /// The record's type identity (e.g. `User`).
    pub type_name: String,
    /// Named fields in declaration order.
    pub fields: Map,
}

impl Record {
    /// Create an empty record of the given type.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Map::new(),
        }
    }

    /// Add a field (builder style).
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Build a record from a serializable struct.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::UnsupportedNode`] if `value` cannot be
    /// represented, or does not serialize to a keyed shape.
    pub fn from_serialize<T: Serialize + ?Sized>(
        type_name: impl Into<String>,
        value: &T,
    ) -> PathResult<Self> {
        let type_name = type_name.into();
        match Value::from_serialize(value)? {
            Value::Map(fields) => Ok(Self { type_name, fields }),
            other => Err(PathError::UnsupportedNode {
                reason: format!(
                    "record '{type_name}' must serialize to named fields, got {}",
                    other.type_label()
                ),
            }),
        }
    }
}

/// A node of a nested data tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent or explicit null.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Indexed sequence.
    List(Vec<Value>),
    /// Keyed map in insertion order.
    Map(Map),
    /// Typed record with named fields.
    Record(Record),
}

impl Value {
    /// Convert any serializable value into a tree.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::UnsupportedNode`] when the value has no tree
    /// representation (for example a map with non-string keys).
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> PathResult<Self> {
        serde_json::to_value(value)
            .map(Self::from)
            .map_err(|e| PathError::UnsupportedNode {
                reason: e.to_string(),
            })
    }

    /// Whether this is [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The string payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The integer payload, if any.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The numeric payload as a float (integers widen).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// The boolean payload, if any.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The sequence payload, if any.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The keyed payload of a map or record, if any.
    #[must_use]
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(map) => Some(map),
            Self::Record(record) => Some(&record.fields),
            _ => None,
        }
    }

    /// Semantic type label used by structure introspection.
    ///
    /// Sequences and maps are both `array`; records report their type name.
    #[must_use]
    pub fn type_label(&self) -> String {
        match self {
            Self::Null => "null".to_owned(),
            Self::Bool(_) => "bool".to_owned(),
            Self::Int(_) => "int".to_owned(),
            Self::Float(_) => "float".to_owned(),
            Self::String(_) => "string".to_owned(),
            Self::List(_) | Self::Map(_) => "array".to_owned(),
            Self::Record(record) if record.type_name.is_empty() => "object".to_owned(),
            Self::Record(record) => record.type_name.clone(),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            },
            serde_json::Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            },
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Int(i) => Self::from(i),
            // Non-finite floats have no JSON form.
            Value::Float(f) => serde_json::Number::from_f64(f).map_or(Self::Null, Self::Number),
            Value::String(s) => Self::String(s),
            Value::List(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Map(map) | Value::Record(Record { fields: map, .. }) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            },
        }
    }
}

impl From<toml::Value> for Value {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Self::String(s),
            toml::Value::Integer(i) => Self::Int(i),
            toml::Value::Float(f) => Self::Float(f),
            toml::Value::Boolean(b) => Self::Bool(b),
            toml::Value::Datetime(dt) => Self::String(dt.to_string()),
            toml::Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            toml::Value::Table(table) => {
                Self::Map(table.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            },
        }
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Self::Map(map)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::String(s) => serializer.serialize_str(s),
            Self::List(items) => items.serialize(serializer),
            Self::Map(map) | Self::Record(Record { fields: map, .. }) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Serialize)]
    struct User {
        name: String,
        age: u32,
    }

    #[test]
    fn test_from_json_keeps_key_order() {
        let value = Value::from(json!({"z": 1, "a": 2, "m": 3}));
        let keys: Vec<_> = value.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_json_round_trip() {
        let source = json!({"users": [{"name": "Ann", "score": 1.5, "active": true, "tag": null}]});
        let value = Value::from(source.clone());
        assert_eq!(serde_json::Value::from(value), source);
    }

    #[test]
    fn test_record_from_serialize() {
        let user = User {
            name: "Ann".to_string(),
            age: 31,
        };
        let record = Record::from_serialize("User", &user).unwrap();
        assert_eq!(record.type_name, "User");
        assert_eq!(record.fields["name"], Value::from("Ann"));
        assert_eq!(record.fields["age"], Value::Int(31));
        assert_eq!(Value::from(record).type_label(), "User");
    }

    #[test]
    fn test_record_from_scalar_is_unsupported() {
        let err = Record::from_serialize("Count", &5).unwrap_err();
        assert!(matches!(err, PathError::UnsupportedNode { .. }));
    }

    #[test]
    fn test_non_string_map_keys_are_unsupported() {
        let mut map = std::collections::HashMap::new();
        map.insert(vec![1u8], "x");
        let err = Value::from_serialize(&map).unwrap_err();
        assert!(matches!(err, PathError::UnsupportedNode { .. }));
    }

    #[test]
    fn test_from_toml() {
        let table: toml::Value = toml::from_str(
            r#"
            [server]
            host = "localhost"
            port = 8080
        "#,
        )
        .unwrap();
        let value = Value::from(table);
        let server = value.as_map().unwrap()["server"].as_map().unwrap();
        assert_eq!(server["host"].as_str(), Some("localhost"));
        assert_eq!(server["port"].as_i64(), Some(8080));
    }

    #[test]
    fn test_type_labels() {
        assert_eq!(Value::Null.type_label(), "null");
        assert_eq!(Value::from("x").type_label(), "string");
        assert_eq!(Value::from(vec![1, 2]).type_label(), "array");
        assert_eq!(Value::from(Map::new()).type_label(), "array");
        assert_eq!(Value::from(Record::default()).type_label(), "object");
    }

    #[test]
    fn test_record_serializes_as_map() {
        let record = Record::new("User").with_field("name", "Ann");
        let json = serde_json::to_value(Value::from(record)).unwrap();
        assert_eq!(json, json!({"name": "Ann"}));
    }
}
