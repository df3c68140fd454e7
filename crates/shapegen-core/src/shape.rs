//! Shape identifiers and the shape sum type
//!
//! Shapes reference each other only through [`ShapeId`] values. Nothing in
//! this module owns another shape, so cyclic schemas are representable.

use crate::error::{CodegenError, CodegenResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Namespace of the built-in prelude shapes
pub const PRELUDE_NAMESPACE: &str = "smithy.api";

/// Any namespace starting with this prefix is treated as built-in
pub const PRELUDE_PREFIX: &str = "smithy";

/// Globally unique `(namespace, name)` pair, written `namespace#Name`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShapeId {
    namespace: String,
    name: String,
}

impl ShapeId {
    /// Create a shape id from its parts
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Create an id in the prelude namespace
    pub fn prelude(name: impl Into<String>) -> Self {
        Self::new(PRELUDE_NAMESPACE, name)
    }

    /// Parse `namespace#Name`
    pub fn parse(value: &str) -> CodegenResult<Self> {
        let (namespace, name) = value
            .split_once('#')
            .ok_or_else(|| CodegenError::InvalidShapeId(value.to_string()))?;

        if namespace.is_empty() || name.is_empty() || name.contains('#') {
            return Err(CodegenError::InvalidShapeId(value.to_string()));
        }

        Ok(Self::new(namespace, name))
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this id lives in a built-in namespace
    pub fn is_prelude(&self) -> bool {
        self.namespace.starts_with(PRELUDE_PREFIX)
    }

    /// Create a sibling id in the same namespace
    pub fn sibling(&self, name: impl Into<String>) -> Self {
        Self::new(self.namespace.clone(), name)
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.namespace, self.name)
    }
}

impl FromStr for ShapeId {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ShapeId {
    type Error = CodegenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ShapeId> for String {
    fn from(id: ShapeId) -> Self {
        id.to_string()
    }
}

/// Fieldless discriminant of [`ShapeKind`], used in diagnostics and tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShapeType {
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    BigInteger,
    Float,
    Double,
    String,
    Enum,
    Timestamp,
    Blob,
    Document,
    List,
    Set,
    Map,
    Structure,
    Union,
    Member,
}

impl ShapeType {
    /// Parse the model document spelling of a data shape type
    pub fn from_name(name: &str) -> Option<Self> {
        let ty = match name {
            "boolean" => ShapeType::Boolean,
            "byte" => ShapeType::Byte,
            "short" => ShapeType::Short,
            "integer" => ShapeType::Integer,
            "long" => ShapeType::Long,
            "bigInteger" => ShapeType::BigInteger,
            "float" => ShapeType::Float,
            "double" => ShapeType::Double,
            "string" => ShapeType::String,
            "enum" => ShapeType::Enum,
            "timestamp" => ShapeType::Timestamp,
            "blob" => ShapeType::Blob,
            "document" => ShapeType::Document,
            "list" => ShapeType::List,
            "set" => ShapeType::Set,
            "map" => ShapeType::Map,
            "structure" => ShapeType::Structure,
            "union" => ShapeType::Union,
            "member" => ShapeType::Member,
            _ => return None,
        };
        Some(ty)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeType::Boolean => "boolean",
            ShapeType::Byte => "byte",
            ShapeType::Short => "short",
            ShapeType::Integer => "integer",
            ShapeType::Long => "long",
            ShapeType::BigInteger => "bigInteger",
            ShapeType::Float => "float",
            ShapeType::Double => "double",
            ShapeType::String => "string",
            ShapeType::Enum => "enum",
            ShapeType::Timestamp => "timestamp",
            ShapeType::Blob => "blob",
            ShapeType::Document => "document",
            ShapeType::List => "list",
            ShapeType::Set => "set",
            ShapeType::Map => "map",
            ShapeType::Structure => "structure",
            ShapeType::Union => "union",
            ShapeType::Member => "member",
        }
    }

    /// List, Set and Map are type-level aliases, never standalone units
    pub fn is_collection(&self) -> bool {
        matches!(self, ShapeType::List | ShapeType::Set | ShapeType::Map)
    }

    /// Kinds that get their own declaration and entry points
    pub fn is_named(&self) -> bool {
        matches!(self, ShapeType::Structure | ShapeType::Union | ShapeType::Enum)
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One literal of an enum-constrained string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub value: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub documentation: Option<String>,
}

impl EnumValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: None,
            documentation: None,
        }
    }

    /// Constant name for generated code: the declared name, or the value
    /// upper-cased with non-alphanumerics replaced by `_`
    pub fn constant_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self
                .value
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() {
                        c.to_ascii_uppercase()
                    } else {
                        '_'
                    }
                })
                .collect(),
        }
    }
}

/// A named member of a structure or union
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Member name; also the wire key
    pub name: String,
    pub target: ShapeId,
    pub required: bool,
    pub deprecated: bool,
    /// Set when the member or its target carries the streaming trait
    pub streaming: bool,
    pub documentation: Option<String>,
}

impl Member {
    pub fn new(name: impl Into<String>, target: ShapeId) -> Self {
        Self {
            name: name.into(),
            target,
            required: false,
            deprecated: false,
            streaming: false,
            documentation: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    pub fn streaming(mut self) -> Self {
        self.streaming = true;
        self
    }

    pub fn documented(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }
}

/// Tagged union over data shape kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeKind {
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    BigInteger,
    Float,
    Double,
    String,
    /// String constrained to an ordered set of literals
    Enum(Vec<EnumValue>),
    Timestamp,
    Blob,
    Document,
    List(ShapeId),
    Set(ShapeId),
    Map {
        key: ShapeId,
        value: ShapeId,
    },
    Structure(Vec<Member>),
    Union(Vec<Member>),
    /// Pure indirection, resolved when the graph is built
    Member(ShapeId),
}

impl ShapeKind {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            ShapeKind::Boolean => ShapeType::Boolean,
            ShapeKind::Byte => ShapeType::Byte,
            ShapeKind::Short => ShapeType::Short,
            ShapeKind::Integer => ShapeType::Integer,
            ShapeKind::Long => ShapeType::Long,
            ShapeKind::BigInteger => ShapeType::BigInteger,
            ShapeKind::Float => ShapeType::Float,
            ShapeKind::Double => ShapeType::Double,
            ShapeKind::String => ShapeType::String,
            ShapeKind::Enum(_) => ShapeType::Enum,
            ShapeKind::Timestamp => ShapeType::Timestamp,
            ShapeKind::Blob => ShapeType::Blob,
            ShapeKind::Document => ShapeType::Document,
            ShapeKind::List(_) => ShapeType::List,
            ShapeKind::Set(_) => ShapeType::Set,
            ShapeKind::Map { .. } => ShapeType::Map,
            ShapeKind::Structure(_) => ShapeType::Structure,
            ShapeKind::Union(_) => ShapeType::Union,
            ShapeKind::Member(_) => ShapeType::Member,
        }
    }

    /// Ids this kind points at, in declaration order
    pub fn references(&self) -> Vec<&ShapeId> {
        match self {
            ShapeKind::List(element) | ShapeKind::Set(element) | ShapeKind::Member(element) => {
                vec![element]
            }
            ShapeKind::Map { key, value } => vec![key, value],
            ShapeKind::Structure(members) | ShapeKind::Union(members) => {
                members.iter().map(|m| &m.target).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Error trait value: which side of the call is at fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorFault {
    Client,
    Server,
}

impl ErrorFault {
    /// Trait value as written in the model
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorFault::Client => "client",
            ErrorFault::Server => "server",
        }
    }
}

/// Traits that affect generation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Traits {
    pub streaming: bool,
    pub error: Option<ErrorFault>,
    pub deprecated: bool,
    pub documentation: Option<String>,
}

/// A node of the shape graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub traits: Traits,
}

impl Shape {
    pub fn new(id: ShapeId, kind: ShapeKind) -> Self {
        Self {
            id,
            kind,
            traits: Traits::default(),
        }
    }

    pub fn with_traits(mut self, traits: Traits) -> Self {
        self.traits = traits;
        self
    }

    pub fn shape_type(&self) -> ShapeType {
        self.kind.shape_type()
    }

    /// Members of a structure or union; empty for every other kind
    pub fn members(&self) -> &[Member] {
        match &self.kind {
            ShapeKind::Structure(members) | ShapeKind::Union(members) => members,
            _ => &[],
        }
    }

    /// Members carried inline on the wire
    pub fn inline_members(&self) -> impl Iterator<Item = &Member> {
        self.members().iter().filter(|m| !m.streaming)
    }

    pub fn is_error(&self) -> bool {
        self.traits.error.is_some()
    }
}

/// The streaming channel of one side of an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventStreamInfo {
    /// Member of the input/output structure that carries the stream
    pub member: String,
    /// Union of event types flowing over the stream
    pub target: ShapeId,
}

/// An RPC operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub id: ShapeId,
    pub input: Option<ShapeId>,
    pub output: Option<ShapeId>,
    pub errors: Vec<ShapeId>,
    pub documentation: Option<String>,
    /// Filled in when the graph is built
    pub input_stream: Option<EventStreamInfo>,
    /// Filled in when the graph is built
    pub output_stream: Option<EventStreamInfo>,
}

impl Operation {
    pub fn new(id: ShapeId) -> Self {
        Self {
            id,
            input: None,
            output: None,
            errors: Vec::new(),
            documentation: None,
            input_stream: None,
            output_stream: None,
        }
    }

    pub fn with_input(mut self, input: ShapeId) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_output(mut self, output: ShapeId) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_error(mut self, error: ShapeId) -> Self {
        self.errors.push(error);
        self
    }

    pub fn name(&self) -> &str {
        self.id.name()
    }

    /// True when either side carries an event stream
    pub fn has_streaming(&self) -> bool {
        self.input_stream.is_some() || self.output_stream.is_some()
    }
}

/// A service: a named, ordered set of operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub id: ShapeId,
    pub version: Option<String>,
    pub operations: Vec<ShapeId>,
    pub documentation: Option<String>,
}

impl Service {
    pub fn new(id: ShapeId) -> Self {
        Self {
            id,
            version: None,
            operations: Vec::new(),
            documentation: None,
        }
    }

    pub fn with_operation(mut self, operation: ShapeId) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn name(&self) -> &str {
        self.id.name()
    }
}
