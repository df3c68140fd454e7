//! Canonical wire transforms
//!
//! The wire form of a typed value is JSON: structures and unions are keyed
//! objects, absent optionals are omitted (never `null`), blobs are base64
//! text and timestamps are epoch seconds with millisecond precision.
//! Every error carries the JSON path of the failing value, rooted at `$`.

use crate::error::{WireError, WireResult};
use crate::value::Value;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Number, Value as Json};
use shapegen_core::{Member, Shape, ShapeGraph, ShapeId, ShapeKind, ShapeType};
use std::collections::BTreeMap;
use tracing::debug;

const ROOT: &str = "$";

/// Epoch milliseconds as fractional epoch seconds
pub fn epoch_seconds(millis: i64) -> f64 {
    millis as f64 / 1000.0
}

/// Fractional epoch seconds rounded to the nearest millisecond; `None` when
/// the result does not fit an `i64`
pub fn epoch_millis(seconds: f64) -> Option<i64> {
    let millis = (seconds * 1000.0).round();
    (millis.is_finite() && millis >= i64::MIN as f64 && millis < i64::MAX as f64)
        .then_some(millis as i64)
}

/// Normalize/serialize/deserialize/validate over one shape graph
#[derive(Debug, Clone, Copy)]
pub struct WireCodec<'a> {
    graph: &'a ShapeGraph,
}

impl<'a> WireCodec<'a> {
    pub fn new(graph: &'a ShapeGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'a ShapeGraph {
        self.graph
    }

    /// Typed value to its plain wire value
    pub fn normalize(&self, id: &ShapeId, value: &Value) -> WireResult<Json> {
        self.normalize_at(id, value, ROOT)
    }

    /// Store a plain wire value under `key`
    pub fn serialize(object: &mut Map<String, Json>, key: &str, plain: Json) {
        object.insert(key.to_string(), plain);
    }

    /// Wire value back to a typed value
    pub fn deserialize(&self, id: &ShapeId, wire: &Json) -> WireResult<Value> {
        self.deserialize_at(id, wire, ROOT)
    }

    /// Required members present, values conform to their shapes
    pub fn validate(&self, id: &ShapeId, value: &Value) -> WireResult<()> {
        self.validate_at(id, value, ROOT)
    }

    /// Validate, normalize and render as JSON text
    pub fn encode(&self, id: &ShapeId, value: &Value) -> WireResult<String> {
        self.validate(id, value)?;
        let wire = self.normalize(id, value)?;
        Ok(serde_json::to_string(&wire)?)
    }

    /// Parse JSON text and deserialize it
    pub fn decode(&self, id: &ShapeId, text: &str) -> WireResult<Value> {
        debug!(shape = %id, bytes = text.len(), "decoding wire payload");
        let wire: Json = serde_json::from_str(text)?;
        self.deserialize(id, &wire)
    }

    fn normalize_at(&self, id: &ShapeId, value: &Value, path: &str) -> WireResult<Json> {
        let shape = self.graph.resolve(id)?;

        match (&shape.kind, value) {
            (ShapeKind::Boolean, Value::Bool(b)) => Ok(Json::Bool(*b)),
            (
                ShapeKind::Byte | ShapeKind::Short | ShapeKind::Integer | ShapeKind::Long,
                Value::Int(n),
            ) => {
                check_range(shape.shape_type(), i128::from(*n), path)?;
                Ok(Json::from(*n))
            }
            (ShapeKind::BigInteger, Value::BigInt(n)) => {
                if let Ok(n) = i64::try_from(*n) {
                    Ok(Json::from(n))
                } else if let Ok(n) = u64::try_from(*n) {
                    Ok(Json::from(n))
                } else {
                    Err(out_of_range(ShapeType::BigInteger, n, path))
                }
            }
            (ShapeKind::Float, Value::Float(f)) => number(f64::from(*f), ShapeType::Float, path),
            (ShapeKind::Double, Value::Double(d)) => number(*d, ShapeType::Double, path),
            (ShapeKind::String, Value::String(s)) | (ShapeKind::Enum(_), Value::Enum(s)) => {
                Ok(Json::String(s.clone()))
            }
            (ShapeKind::Timestamp, Value::Timestamp(millis)) => {
                number(epoch_seconds(*millis), ShapeType::Timestamp, path)
            }
            (ShapeKind::Blob, Value::Blob(bytes)) => Ok(Json::String(encode_blob(bytes))),
            (ShapeKind::Document, Value::Document(document)) => Ok(document.clone()),
            (ShapeKind::List(element), Value::List(items))
            | (ShapeKind::Set(element), Value::Set(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| self.normalize_at(element, item, &index_path(path, i)))
                .collect::<WireResult<Vec<_>>>()
                .map(Json::Array),
            (ShapeKind::Map { value: target, .. }, Value::Map(entries)) => {
                let mut object = Map::new();
                for (key, item) in entries {
                    let plain = self.normalize_at(target, item, &key_path(path, key))?;
                    Self::serialize(&mut object, key, plain);
                }
                Ok(Json::Object(object))
            }
            (ShapeKind::Structure(_), Value::Struct(fields)) => {
                for (name, _) in fields {
                    inline_member(shape, name, path)?;
                }

                let mut object = Map::new();
                for member in shape.inline_members() {
                    if let Some(item) = value.get(&member.name) {
                        let plain =
                            self.normalize_at(&member.target, item, &member_path(path, &member.name))?;
                        Self::serialize(&mut object, &member.name, plain);
                    }
                }
                Ok(Json::Object(object))
            }
            (ShapeKind::Union(_), Value::Union(name, item)) => {
                let member = inline_member(shape, name, path)?;
                let plain = self.normalize_at(&member.target, item, &member_path(path, name))?;

                let mut object = Map::new();
                Self::serialize(&mut object, &member.name, plain);
                Ok(Json::Object(object))
            }
            (_, other) => Err(mismatch(shape, path, other.kind_name())),
        }
    }

    fn deserialize_at(&self, id: &ShapeId, wire: &Json, path: &str) -> WireResult<Value> {
        let shape = self.graph.resolve(id)?;
        let mismatched = || mismatch(shape, path, json_kind(wire));

        match &shape.kind {
            ShapeKind::Boolean => wire.as_bool().map(Value::Bool).ok_or_else(mismatched),
            ShapeKind::Byte | ShapeKind::Short | ShapeKind::Integer | ShapeKind::Long => {
                let n = wire.as_i64().ok_or_else(mismatched)?;
                check_range(shape.shape_type(), i128::from(n), path)?;
                Ok(Value::Int(n))
            }
            ShapeKind::BigInteger => wire
                .as_i64()
                .map(i128::from)
                .or_else(|| wire.as_u64().map(i128::from))
                .map(Value::BigInt)
                .ok_or_else(mismatched),
            ShapeKind::Float => {
                let f = wire.as_f64().ok_or_else(mismatched)?;
                if f.is_finite() && f.abs() <= f64::from(f32::MAX) {
                    Ok(Value::Float(f as f32))
                } else {
                    Err(out_of_range(ShapeType::Float, &f, path))
                }
            }
            ShapeKind::Double => wire.as_f64().map(Value::Double).ok_or_else(mismatched),
            ShapeKind::String => wire
                .as_str()
                .map(|s| Value::String(s.to_string()))
                .ok_or_else(mismatched),
            ShapeKind::Enum(_) => wire
                .as_str()
                .map(|s| Value::Enum(s.to_string()))
                .ok_or_else(mismatched),
            ShapeKind::Timestamp => {
                let seconds = wire.as_f64().ok_or_else(mismatched)?;
                epoch_millis(seconds)
                    .map(Value::Timestamp)
                    .ok_or_else(|| out_of_range(ShapeType::Timestamp, &seconds, path))
            }
            ShapeKind::Blob => {
                let text = wire.as_str().ok_or_else(mismatched)?;
                decode_blob(text, path).map(Value::Blob)
            }
            ShapeKind::Document => Ok(Value::Document(wire.clone())),
            ShapeKind::List(element) | ShapeKind::Set(element) => {
                let items = wire
                    .as_array()
                    .ok_or_else(mismatched)?
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.deserialize_at(element, item, &index_path(path, i)))
                    .collect::<WireResult<Vec<_>>>()?;
                Ok(match shape.kind {
                    ShapeKind::Set(_) => Value::Set(items),
                    _ => Value::List(items),
                })
            }
            ShapeKind::Map { value: target, .. } => {
                let mut entries = BTreeMap::new();
                for (key, item) in wire.as_object().ok_or_else(mismatched)? {
                    let value = self.deserialize_at(target, item, &key_path(path, key))?;
                    entries.insert(key.clone(), value);
                }
                Ok(Value::Map(entries))
            }
            ShapeKind::Structure(_) => {
                let object = wire.as_object().ok_or_else(mismatched)?;
                let mut fields = Vec::new();
                for member in shape.inline_members() {
                    let member_path = member_path(path, &member.name);
                    match present(object, &member.name) {
                        Some(item) => fields.push((
                            member.name.clone(),
                            self.deserialize_at(&member.target, item, &member_path)?,
                        )),
                        None if member.required => {
                            if self.is_blob(member)? {
                                fields.push((member.name.clone(), Value::Blob(Vec::new())));
                            }
                        }
                        None => {}
                    }
                }
                Ok(Value::Struct(fields))
            }
            ShapeKind::Union(_) => {
                let object = wire.as_object().ok_or_else(mismatched)?;
                let set: Vec<(&Member, &Json)> = shape
                    .inline_members()
                    .filter_map(|m| present(object, &m.name).map(|item| (m, item)))
                    .collect();

                match set.as_slice() {
                    [(member, item)] => {
                        let value = self.deserialize_at(
                            &member.target,
                            item,
                            &member_path(path, &member.name),
                        )?;
                        Ok(Value::union(member.name.clone(), value))
                    }
                    other => Err(WireError::UnionArity {
                        path: path.to_string(),
                        count: other.len(),
                    }),
                }
            }
            ShapeKind::Member(_) => Err(mismatched()),
        }
    }

    fn validate_at(&self, id: &ShapeId, value: &Value, path: &str) -> WireResult<()> {
        let shape = self.graph.resolve(id)?;

        match (&shape.kind, value) {
            (ShapeKind::Boolean, Value::Bool(_))
            | (ShapeKind::Float, Value::Float(_))
            | (ShapeKind::Double, Value::Double(_))
            | (ShapeKind::String, Value::String(_))
            | (ShapeKind::Timestamp, Value::Timestamp(_))
            | (ShapeKind::Blob, Value::Blob(_))
            | (ShapeKind::Document, Value::Document(_)) => Ok(()),
            (
                ShapeKind::Byte | ShapeKind::Short | ShapeKind::Integer | ShapeKind::Long,
                Value::Int(n),
            ) => check_range(shape.shape_type(), i128::from(*n), path),
            (ShapeKind::BigInteger, Value::BigInt(n)) => {
                check_range(ShapeType::BigInteger, *n, path)
            }
            (ShapeKind::Enum(values), Value::Enum(literal)) => {
                if values.iter().any(|v| &v.value == literal) {
                    Ok(())
                } else {
                    Err(WireError::UnknownEnumValue {
                        path: path.to_string(),
                        shape: shape.id.to_string(),
                        value: literal.clone(),
                    })
                }
            }
            (ShapeKind::List(element), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    self.validate_at(element, item, &index_path(path, i))?;
                }
                Ok(())
            }
            (ShapeKind::Set(element), Value::Set(items)) => {
                for (i, item) in items.iter().enumerate() {
                    let item_path = index_path(path, i);
                    self.validate_at(element, item, &item_path)?;
                    if items[..i].contains(item) {
                        return Err(WireError::DuplicateElement { path: item_path });
                    }
                }
                Ok(())
            }
            (ShapeKind::Map { value: target, .. }, Value::Map(entries)) => {
                for (key, item) in entries {
                    self.validate_at(target, item, &key_path(path, key))?;
                }
                Ok(())
            }
            (ShapeKind::Structure(_), Value::Struct(fields)) => {
                for (name, _) in fields {
                    inline_member(shape, name, path)?;
                }
                for member in shape.inline_members() {
                    let member_path = member_path(path, &member.name);
                    match value.get(&member.name) {
                        Some(item) => self.validate_at(&member.target, item, &member_path)?,
                        None if member.required => {
                            return Err(WireError::MissingRequired { path: member_path });
                        }
                        None => {}
                    }
                }
                Ok(())
            }
            (ShapeKind::Union(_), Value::Union(name, item)) => {
                let member = inline_member(shape, name, path)?;
                self.validate_at(&member.target, item, &member_path(path, name))
            }
            (_, other) => Err(mismatch(shape, path, other.kind_name())),
        }
    }

    fn is_blob(&self, member: &Member) -> WireResult<bool> {
        Ok(self.graph.shape_type(&member.target)? == ShapeType::Blob)
    }
}

/// A wire key counts as present unless it is missing or `null`
fn present<'j>(object: &'j Map<String, Json>, key: &str) -> Option<&'j Json> {
    object.get(key).filter(|v| !v.is_null())
}

fn inline_member<'s>(shape: &'s Shape, name: &str, path: &str) -> WireResult<&'s Member> {
    shape
        .inline_members()
        .find(|m| m.name == name)
        .ok_or_else(|| WireError::UnknownMember {
            path: path.to_string(),
            shape: shape.id.to_string(),
            member: name.to_string(),
        })
}

/// Empty payloads never reach the encoder
fn encode_blob(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        String::new()
    } else {
        STANDARD.encode(bytes)
    }
}

fn decode_blob(text: &str, path: &str) -> WireResult<Vec<u8>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    STANDARD.decode(text).map_err(|e| WireError::Base64 {
        path: path.to_string(),
        message: e.to_string(),
    })
}

fn check_range(expected: ShapeType, n: i128, path: &str) -> WireResult<()> {
    let (min, max) = match expected {
        ShapeType::Byte => (i128::from(i8::MIN), i128::from(i8::MAX)),
        ShapeType::Short => (i128::from(i16::MIN), i128::from(i16::MAX)),
        ShapeType::Integer => (i128::from(i32::MIN), i128::from(i32::MAX)),
        ShapeType::Long => (i128::from(i64::MIN), i128::from(i64::MAX)),
        _ => (i128::from(i64::MIN), i128::from(u64::MAX)),
    };
    if (min..=max).contains(&n) {
        Ok(())
    } else {
        Err(out_of_range(expected, &n, path))
    }
}

/// Non-finite floats have no JSON spelling
fn number(value: f64, expected: ShapeType, path: &str) -> WireResult<Json> {
    Number::from_f64(value)
        .map(Json::Number)
        .ok_or_else(|| out_of_range(expected, &value, path))
}

fn out_of_range(expected: ShapeType, value: &dyn std::fmt::Display, path: &str) -> WireError {
    WireError::OutOfRange {
        path: path.to_string(),
        expected,
        value: value.to_string(),
    }
}

fn mismatch(shape: &Shape, path: &str, found: &str) -> WireError {
    WireError::TypeMismatch {
        path: path.to_string(),
        expected: shape.shape_type(),
        found: found.to_string(),
    }
}

fn json_kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

fn member_path(path: &str, member: &str) -> String {
    format!("{}.{}", path, member)
}

fn index_path(path: &str, index: usize) -> String {
    format!("{}[{}]", path, index)
}

fn key_path(path: &str, key: &str) -> String {
    format!("{}[{:?}]", path, key)
}

#[cfg(test)]
#[path = "codec/codec_tests.rs"]
mod codec_tests;
