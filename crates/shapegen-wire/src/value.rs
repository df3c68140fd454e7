//! Dynamic typed values

use std::collections::BTreeMap;

/// A typed value before normalization or after deserialization
///
/// Structure members keep declaration order; absent optionals are simply
/// not present.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    /// Byte, Short, Integer and Long
    Int(i64),
    BigInt(i128),
    Float(f32),
    Double(f64),
    String(String),
    Enum(String),
    /// Milliseconds since the Unix epoch
    Timestamp(i64),
    Blob(Vec<u8>),
    Document(serde_json::Value),
    List(Vec<Value>),
    Set(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Struct(Vec<(String, Value)>),
    Union(String, Box<Value>),
}

impl Value {
    /// Build a structure value from `(member, value)` pairs
    pub fn structure<K: Into<String>>(members: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Struct(members.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn union(member: impl Into<String>, value: Value) -> Self {
        Value::Union(member.into(), Box::new(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    /// Member value of a structure
    pub fn get(&self, member: &str) -> Option<&Value> {
        match self {
            Value::Struct(members) => members.iter().find(|(k, _)| k == member).map(|(_, v)| v),
            Value::Union(name, value) if name == member => Some(value),
            _ => None,
        }
    }

    /// Variant name used in mismatch diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::BigInt(_) => "bigint",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Enum(_) => "enum",
            Value::Timestamp(_) => "timestamp",
            Value::Blob(_) => "blob",
            Value::Document(_) => "document",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
            Value::Struct(_) => "struct",
            Value::Union(..) => "union",
        }
    }
}

#[cfg(test)]
#[path = "value/value_tests.rs"]
mod value_tests;
