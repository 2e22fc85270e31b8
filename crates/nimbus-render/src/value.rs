use crate::error::Result;
use crate::tabs::TabWriter;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Read};

/// Escape hatch for values that carry their own table layout.
///
/// Checked by the classifier before the generic record path, so a curated
/// type (e.g. [`crate::Summary`]) wins over structural rendering. The
/// structured encoders still need data, hence `as_value`.
pub trait CustomRender: fmt::Debug {
    /// Write the table representation into the shared tab writer.
    /// Implementations must not flush the writer.
    fn print_table(&self, out: &mut TabWriter<'_>) -> Result<()>;

    /// Structured representation used by the json/yaml encoders.
    fn as_value(&self) -> Value;
}

/// A value to render, shape decided at runtime.
///
/// This is a closed tagged union: every renderer dispatches through
/// [`crate::classify`] rather than ad-hoc matching, so behavior is the same
/// at every recursion depth. Values are built either directly, from
/// `serde_json::Value`, or from any `Serialize` type via [`crate::to_value`].
#[derive(Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Record(Record),
    Stream(ByteStream),
    Custom(Box<dyn CustomRender>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn stream(reader: impl Read + 'static) -> Value {
        Value::Stream(ByteStream::new(reader))
    }

    pub fn custom(value: impl CustomRender + 'static) -> Value {
        Value::Custom(Box::new(value))
    }

    /// Human-facing type label, used in complex-field headers and errors.
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::Uint(_) => "uint".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::Str(_) => "string".to_string(),
            Value::Bytes(_) => "bytes".to_string(),
            Value::List(items) => match items.first() {
                Some(first) => format!("[]{}", first.type_name()),
                None => "[]".to_string(),
            },
            Value::Map(_) => "map".to_string(),
            Value::Record(record) => record.type_name().to_string(),
            Value::Stream(_) => "stream".to_string(),
            Value::Custom(custom) => custom.as_value().type_name(),
        }
    }
}

/// A labeled record: named fields kept in declaration order.
#[derive(Debug, Default)]
pub struct Record {
    type_name: String,
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new(type_name: impl Into<String>) -> Self {
        Record {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Builder-style field append.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.fields.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Field (name, value) pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A sequential byte source, copied through verbatim by the table renderer.
///
/// Interior mutability keeps rendering signatures uniform over `&Value`;
/// a stream is consumed the first time it is rendered.
pub struct ByteStream(RefCell<Box<dyn Read>>);

impl ByteStream {
    pub fn new(reader: impl Read + 'static) -> Self {
        ByteStream(RefCell::new(Box::new(reader)))
    }

    pub(crate) fn copy_to(&self, out: &mut dyn io::Write) -> io::Result<u64> {
        io::copy(&mut **self.0.borrow_mut(), out)
    }
}

impl fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ByteStream(..)")
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Uint(u) => serializer.serialize_u64(*u),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Bytes(b) => serializer.serialize_bytes(b),
            Value::List(items) => serializer.collect_seq(items),
            Value::Map(entries) => serializer.collect_map(entries),
            Value::Record(record) => {
                let mut map = serializer.serialize_map(Some(record.len()))?;
                for (name, value) in record.fields() {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
            Value::Stream(_) => Err(serde::ser::Error::custom(
                "byte streams cannot be encoded",
            )),
            Value::Custom(custom) => custom.as_value().serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Value {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Value {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Value {
        Value::Uint(u64::from(u))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Value {
        Value::Uint(u)
    }
}

impl From<usize> for Value {
    fn from(u: usize) -> Value {
        Value::Uint(u as u64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Value {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Str(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Value {
        Value::List(items.into_iter().map(Value::Str).collect())
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Value {
        Value::Record(record)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Value {
        match value {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Value {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Uint(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_collapses_to_null() {
        assert!(Value::from(None::<String>).is_null());
        assert!(matches!(Value::from(Some(3i64)), Value::Int(3)));
        // Double indirection unwraps all the way down.
        let nested: Option<Option<i64>> = Some(None);
        assert!(Value::from(nested.flatten()).is_null());
    }

    #[test]
    fn record_preserves_declaration_order() {
        let record = Record::new("App")
            .field("Zeta", 1i64)
            .field("Alpha", "x");
        let names: Vec<&str> = record.fields().map(|(name, _)| name).collect();
        assert_eq!(names, ["Zeta", "Alpha"]);
        assert!(matches!(record.get("Alpha"), Some(Value::Str(_))));
    }

    #[test]
    fn json_value_conversion() {
        let json = serde_json::json!({"name": "myapp", "deploys": 7, "cname": null});
        let value = Value::from(json);
        let Value::Map(entries) = value else {
            panic!("expected a map");
        };
        assert!(matches!(entries.get("deploys"), Some(Value::Int(7))));
        assert!(entries.get("cname").unwrap().is_null());
    }

    #[test]
    fn record_serializes_in_declaration_order() {
        let record = Record::new("App")
            .field("Zeta", 1i64)
            .field("Alpha", "x");
        let text = serde_json::to_string(&Value::Record(record)).unwrap();
        assert_eq!(text, r#"{"Zeta":1,"Alpha":"x"}"#);
    }

    #[test]
    fn stream_refuses_structured_encoding() {
        let value = Value::stream(std::io::empty());
        assert!(serde_json::to_string(&value).is_err());
    }
}
