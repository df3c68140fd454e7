//! Target type mapping
//!
//! [`TypeMapper`] resolves a shape through member indirection and spells it
//! in the active profile's type system.
//!
//! | Kind | C++ | Python | TypeScript | Java |
//! |------|-----|--------|------------|------|
//! | Integer | `int32_t` | `int` | `number` | `int` / `Integer` |
//! | Timestamp | `Aws::Crt::DateTime` | `datetime.datetime` | `Date` | `Instant` |
//! | Blob | `Aws::Crt::Vector<uint8_t>` | `bytes` | `Uint8Array` | `byte[]` |
//! | List | `Aws::Crt::Vector<T>` | `typing.List[T]` | `Array<T>` | `List<T>` |
//! | Set | - | `typing.Set[T]` | - | `Set<T>` |
//! | BigInteger | `int64_t` | `int` | - | - |

use crate::naming::to_pascal_case;
use crate::profile::{BackendProfile, fill};
use shapegen_core::{
    CodegenError, CodegenResult, Member, Shape, ShapeGraph, ShapeId, ShapeKind, ShapeType,
};

/// A target type with an optional boxed form for generic arguments
#[derive(Debug, Clone, PartialEq)]
pub struct TargetType {
    pub name: String,
    pub boxed: Option<String>,
}

impl TargetType {
    /// Same spelling in every position
    pub fn reference(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            boxed: None,
        }
    }

    pub fn primitive(name: impl Into<String>, boxed: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            boxed: Some(boxed.into()),
        }
    }

    /// Spelling usable as a generic argument or nullable field
    pub fn generic_arg(&self) -> &str {
        self.boxed.as_deref().unwrap_or(&self.name)
    }
}

/// Maps shapes to type expressions of one profile
pub struct TypeMapper<'a> {
    graph: &'a ShapeGraph,
    profile: &'static BackendProfile,
}

impl<'a> TypeMapper<'a> {
    pub fn new(graph: &'a ShapeGraph, profile: &'static BackendProfile) -> Self {
        Self { graph, profile }
    }

    pub fn profile(&self) -> &'static BackendProfile {
        self.profile
    }

    /// Map a shape to its target type
    pub fn map(&self, id: &ShapeId) -> CodegenResult<TargetType> {
        let shape = self.graph.resolve(id)?;

        match &shape.kind {
            ShapeKind::Structure(_) | ShapeKind::Union(_) => {
                Ok(TargetType::reference(named_type(&shape.id)))
            }
            ShapeKind::Enum(_) if !self.profile.enum_as_string => {
                Ok(TargetType::reference(named_type(&shape.id)))
            }
            ShapeKind::List(element) => {
                let element = self.map(element)?;
                Ok(TargetType::reference(fill(
                    self.profile.list_type,
                    &[("t", element.generic_arg())],
                )))
            }
            ShapeKind::Set(element) => {
                let template = self
                    .profile
                    .set_type
                    .ok_or_else(|| self.unsupported(shape))?;
                let element = self.map(element)?;
                Ok(TargetType::reference(fill(
                    template,
                    &[("t", element.generic_arg())],
                )))
            }
            ShapeKind::Map { key, value } => {
                self.check_map_key(&shape.id, key)?;
                let value = self.map(value)?;
                Ok(TargetType::reference(fill(
                    self.profile.map_type,
                    &[("t", value.generic_arg())],
                )))
            }
            ShapeKind::Member(target) => self.map(target),
            kind => {
                let shape_type = match kind {
                    ShapeKind::Enum(_) => ShapeType::String,
                    _ => shape.shape_type(),
                };
                let scalar = (self.profile.scalars)(shape_type).ok_or_else(|| self.unsupported(shape))?;
                Ok(match scalar.boxed {
                    Some(boxed) => TargetType::primitive(scalar.name, boxed),
                    None => TargetType::reference(scalar.name),
                })
            }
        }
    }

    /// Declared type of a structure member; every member may be absent
    pub fn field_type(&self, member: &Member) -> CodegenResult<String> {
        let target = self.map(&member.target)?;
        Ok(fill(
            self.profile.optional_type,
            &[("t", target.generic_arg())],
        ))
    }

    /// Map keys must resolve to a string or a string enum
    pub fn check_map_key(&self, map: &ShapeId, key: &ShapeId) -> CodegenResult<()> {
        match self.graph.shape_type(key)? {
            ShapeType::String | ShapeType::Enum => Ok(()),
            _ => Err(CodegenError::NonStringMapKey {
                map: map.clone(),
                key: key.clone(),
            }),
        }
    }

    fn unsupported(&self, shape: &Shape) -> CodegenError {
        CodegenError::UnsupportedShape {
            shape: shape.id.clone(),
            kind: shape.shape_type(),
            backend: self.profile.display_name.to_string(),
        }
    }
}

/// Declared name of a structure, union or enum
pub fn named_type(id: &ShapeId) -> String {
    to_pascal_case(id.name())
}


#[cfg(test)]
#[path = "types/types_parameterized_tests.rs"]
mod types_parameterized_tests;
