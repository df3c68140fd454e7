//! Model document loading
//!
//! Reads the JSON AST form of a model (a `shapes` object keyed by absolute
//! shape id) into a [`ShapeGraph`]. Member order follows document order.

use crate::error::{CodegenError, CodegenResult};
use crate::graph::{ShapeGraph, ShapeGraphBuilder};
use crate::shape::{
    EnumValue, ErrorFault, Member, Operation, Service, Shape, ShapeId, ShapeKind, ShapeType,
    Traits,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Top-level model document
#[derive(Debug, Deserialize)]
pub struct ModelDocument {
    /// IDL version marker, informational only
    #[serde(default)]
    pub smithy: Option<String>,

    #[serde(default)]
    pub shapes: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct TargetRef {
    target: String,
}

#[derive(Debug, Deserialize)]
struct MemberDocument {
    target: String,

    #[serde(default)]
    traits: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ShapeDocument {
    #[serde(rename = "type")]
    shape_type: String,

    #[serde(default)]
    members: Map<String, Value>,

    member: Option<TargetRef>,
    key: Option<TargetRef>,
    value: Option<TargetRef>,
    target: Option<String>,

    input: Option<TargetRef>,
    output: Option<TargetRef>,

    #[serde(default)]
    errors: Vec<TargetRef>,

    #[serde(default)]
    operations: Vec<TargetRef>,

    version: Option<String>,

    #[serde(default)]
    traits: Map<String, Value>,
}

impl ShapeGraph {
    /// Load a graph from a model document string
    pub fn from_json_str(content: &str) -> CodegenResult<Self> {
        let document: ModelDocument = serde_json::from_str(content)?;
        document.into_graph()
    }

    /// Load a graph from a model document file
    pub fn from_file(path: impl AsRef<Path>) -> CodegenResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            CodegenError::Io(format!("failed to read model {:?}: {}", path.as_ref(), e))
        })?;
        Self::from_json_str(&content)
    }
}

impl ModelDocument {
    /// Convert the document into a validated graph
    pub fn into_graph(self) -> CodegenResult<ShapeGraph> {
        let mut builder = ShapeGraph::builder();

        for (raw_id, body) in self.shapes {
            let id = ShapeId::parse(&raw_id)?;
            let document: ShapeDocument = serde_json::from_value(body)
                .map_err(|e| CodegenError::InvalidModel(format!("shape {}: {}", id, e)))?;
            builder = add_shape(builder, id, document)?;
        }

        builder.build()
    }
}

fn add_shape(
    builder: ShapeGraphBuilder,
    id: ShapeId,
    document: ShapeDocument,
) -> CodegenResult<ShapeGraphBuilder> {
    let traits = parse_traits(&document.traits)?;
    let documentation = traits.documentation.clone();

    match document.shape_type.as_str() {
        "service" => {
            let mut service = Service::new(id);
            service.version = document.version;
            service.documentation = documentation;
            for operation in &document.operations {
                service = service.with_operation(ShapeId::parse(&operation.target)?);
            }
            return Ok(builder.service(service));
        }
        "operation" => {
            let mut operation = Operation::new(id);
            operation.input = parse_ref(document.input.as_ref())?;
            operation.output = parse_ref(document.output.as_ref())?;
            operation.errors = document
                .errors
                .iter()
                .map(|e| ShapeId::parse(&e.target))
                .collect::<CodegenResult<_>>()?;
            operation.documentation = documentation;
            return Ok(builder.operation(operation));
        }
        _ => {}
    }

    let shape_type = ShapeType::from_name(&document.shape_type).ok_or_else(|| {
        CodegenError::InvalidModel(format!(
            "shape {} has unknown type '{}'",
            id, document.shape_type
        ))
    })?;

    let kind = match shape_type {
        ShapeType::Boolean => ShapeKind::Boolean,
        ShapeType::Byte => ShapeKind::Byte,
        ShapeType::Short => ShapeKind::Short,
        ShapeType::Integer => ShapeKind::Integer,
        ShapeType::Long => ShapeKind::Long,
        ShapeType::BigInteger => ShapeKind::BigInteger,
        ShapeType::Float => ShapeKind::Float,
        ShapeType::Double => ShapeKind::Double,
        ShapeType::String | ShapeType::Enum => match find_trait(&document.traits, "enum") {
            Some(values) => ShapeKind::Enum(
                serde_json::from_value::<Vec<EnumValue>>(values.clone())
                    .map_err(|e| CodegenError::InvalidModel(format!("shape {}: {}", id, e)))?,
            ),
            None if shape_type == ShapeType::Enum => {
                return Err(CodegenError::InvalidModel(format!(
                    "enum shape {} declares no values",
                    id
                )));
            }
            None => ShapeKind::String,
        },
        ShapeType::Timestamp => ShapeKind::Timestamp,
        ShapeType::Blob => ShapeKind::Blob,
        ShapeType::Document => ShapeKind::Document,
        ShapeType::List => ShapeKind::List(required_ref(&id, "member", &document.member)?),
        ShapeType::Set => ShapeKind::Set(required_ref(&id, "member", &document.member)?),
        ShapeType::Map => ShapeKind::Map {
            key: required_ref(&id, "key", &document.key)?,
            value: required_ref(&id, "value", &document.value)?,
        },
        ShapeType::Structure => ShapeKind::Structure(parse_members(&id, document.members)?),
        ShapeType::Union => ShapeKind::Union(parse_members(&id, document.members)?),
        ShapeType::Member => {
            let target = document.target.as_deref().ok_or_else(|| {
                CodegenError::InvalidModel(format!("member shape {} has no target", id))
            })?;
            ShapeKind::Member(ShapeId::parse(target)?)
        }
    };

    Ok(builder.shape(Shape::new(id, kind).with_traits(traits)))
}

fn parse_ref(reference: Option<&TargetRef>) -> CodegenResult<Option<ShapeId>> {
    reference.map(|r| ShapeId::parse(&r.target)).transpose()
}

fn required_ref(id: &ShapeId, role: &str, reference: &Option<TargetRef>) -> CodegenResult<ShapeId> {
    parse_ref(reference.as_ref())?
        .ok_or_else(|| CodegenError::InvalidModel(format!("shape {} has no {} target", id, role)))
}

fn parse_members(owner: &ShapeId, members: Map<String, Value>) -> CodegenResult<Vec<Member>> {
    members
        .into_iter()
        .map(|(name, body)| {
            let document: MemberDocument = serde_json::from_value(body).map_err(|e| {
                CodegenError::InvalidModel(format!("member {}${}: {}", owner, name, e))
            })?;
            let traits = parse_traits(&document.traits)?;

            let mut member = Member::new(name, ShapeId::parse(&document.target)?);
            member.required = has_trait(&document.traits, "required");
            member.deprecated = traits.deprecated;
            member.streaming = traits.streaming;
            member.documentation = traits.documentation;
            Ok(member)
        })
        .collect()
}

/// Trait keys may be absolute (`smithy.api#required`) or bare (`required`)
fn find_trait<'a>(traits: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    traits
        .get(&format!("{}#{}", crate::shape::PRELUDE_NAMESPACE, name))
        .or_else(|| traits.get(name))
}

fn has_trait(traits: &Map<String, Value>, name: &str) -> bool {
    find_trait(traits, name).is_some()
}

fn parse_traits(traits: &Map<String, Value>) -> CodegenResult<Traits> {
    let error = match find_trait(traits, "error") {
        Some(value) => Some(
            serde_json::from_value::<ErrorFault>(value.clone())
                .map_err(|e| CodegenError::InvalidModel(format!("error trait: {}", e)))?,
        ),
        None => None,
    };

    Ok(Traits {
        streaming: has_trait(traits, "streaming"),
        error,
        deprecated: has_trait(traits, "deprecated"),
        documentation: find_trait(traits, "documentation")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}
