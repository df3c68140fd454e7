//! Statement/expression IR for transform code
//!
//! The emitter builds these trees once per shape and the renderer turns
//! them into target text at the leaves, so nested transforms compose
//! without any textual escaping between levels.

use crate::naming::{capitalize, to_camel_case, to_snake_case};
use shapegen_core::ShapeType;
use std::collections::BTreeSet;

/// Value kinds of the canonical wire representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireKind {
    Bool,
    Int,
    Int64,
    Double,
    String,
    Object,
    Array,
    Document,
}

impl WireKind {
    /// Wire kind carrying a shape kind; `None` for member indirection
    pub fn of(shape_type: ShapeType) -> Option<Self> {
        let kind = match shape_type {
            ShapeType::Boolean => WireKind::Bool,
            ShapeType::Byte | ShapeType::Short | ShapeType::Integer => WireKind::Int,
            ShapeType::Long | ShapeType::BigInteger => WireKind::Int64,
            ShapeType::Float | ShapeType::Double | ShapeType::Timestamp => WireKind::Double,
            ShapeType::String | ShapeType::Enum | ShapeType::Blob => WireKind::String,
            ShapeType::Document => WireKind::Document,
            ShapeType::List | ShapeType::Set => WireKind::Array,
            ShapeType::Map | ShapeType::Structure | ShapeType::Union => WireKind::Object,
            ShapeType::Member => return None,
        };
        Some(kind)
    }
}

/// Per-type generated functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    ToWire,
    FromWire,
    Validate,
}

impl EntryPoint {
    pub const ALL: [EntryPoint; 3] = [EntryPoint::ToWire, EntryPoint::FromWire, EntryPoint::Validate];
}

/// Value conversions between the typed and the wire side
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion {
    /// Numeric cast from a shape's native width to its wire width
    Widen(ShapeType),
    /// Numeric cast from wire width back to the shape's native width
    Narrow(ShapeType),
    Base64Encode,
    Base64Decode,
    TimestampToEpoch,
    EpochToTimestamp,
    EnumToWire(String),
    EnumFromWire(String),
}

/// Objects the generated code constructs
#[derive(Debug, Clone, PartialEq)]
pub enum Construct {
    WireObject,
    WireArray,
    /// Typed collections carry their full target type
    List(String),
    Set(String),
    Map(String),
    Instance(String),
    EmptyBlob,
}

/// Receiver of a method call
#[derive(Debug, Clone, PartialEq)]
pub enum CallTarget {
    Free,
    This,
    Value(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Var(String),
    Str(String),
    Int(i64),
    Null,
    FieldGet {
        object: Box<Expr>,
        field: String,
    },
    /// Raw wire element stored under `key` in a wire object
    WireField {
        object: Box<Expr>,
        key: Box<Expr>,
    },
    /// Read a wire element as a value of the given kind
    WireAs {
        kind: WireKind,
        value: Box<Expr>,
    },
    /// Turn a plain value into a wire element of the given kind
    WireWrap {
        kind: WireKind,
        value: Box<Expr>,
    },
    Convert {
        conversion: Conversion,
        value: Box<Expr>,
    },
    /// Call a named type's generated function
    Entry {
        point: EntryPoint,
        type_name: String,
        value: Box<Expr>,
    },
    /// Reference a named type's generated function without calling it
    EntryRef {
        point: EntryPoint,
        type_name: String,
    },
    New(Construct),
    /// Contained value of an optional
    Unwrap(Box<Expr>),
    Call {
        target: CallTarget,
        method: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn str(value: impl Into<String>) -> Self {
        Expr::Str(value.into())
    }

    pub fn field(object: Expr, field: impl Into<String>) -> Self {
        Expr::FieldGet {
            object: Box::new(object),
            field: field.into(),
        }
    }

    pub fn wire_field(object: Expr, key: impl Into<String>) -> Self {
        Expr::WireField {
            object: Box::new(object),
            key: Box::new(Expr::Str(key.into())),
        }
    }

    pub fn wire_as(kind: WireKind, value: Expr) -> Self {
        Expr::WireAs {
            kind,
            value: Box::new(value),
        }
    }

    pub fn wire_wrap(kind: WireKind, value: Expr) -> Self {
        Expr::WireWrap {
            kind,
            value: Box::new(value),
        }
    }

    pub fn convert(conversion: Conversion, value: Expr) -> Self {
        Expr::Convert {
            conversion,
            value: Box::new(value),
        }
    }

    pub fn entry(point: EntryPoint, type_name: impl Into<String>, value: Expr) -> Self {
        Expr::Entry {
            point,
            type_name: type_name.into(),
            value: Box::new(value),
        }
    }

    pub fn unwrap(value: Expr) -> Self {
        Expr::Unwrap(Box::new(value))
    }
}

/// Emptiness checks differ between text and byte payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    Text,
    Bytes,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cond {
    Present(Expr),
    Absent(Expr),
    WireHas { object: Expr, key: Expr },
    NotEmpty { payload: Payload, value: Expr },
    /// Value does not conform to the shape kind
    Mismatch { expected: ShapeType, value: Expr },
    CountIsNot { counter: String, expected: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendKind {
    List,
    Set,
}

/// One key/value iteration source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySource {
    Typed,
    Wire,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Declare {
        name: String,
        ty: String,
        value: Expr,
    },
    Assign {
        name: String,
        value: Expr,
    },
    /// Store a plain value of `kind` under `key` in a wire object
    WireSet {
        object: Expr,
        key: Expr,
        kind: WireKind,
        value: Expr,
    },
    FieldSet {
        object: Expr,
        field: String,
        value: Expr,
    },
    Append {
        kind: AppendKind,
        collection: Expr,
        value: Expr,
    },
    Insert {
        map: Expr,
        key: Expr,
        value: Expr,
    },
    ForEach {
        item: String,
        source: Expr,
        body: Vec<Stmt>,
    },
    ForEachEntry {
        entry: String,
        key: String,
        value: String,
        source: Expr,
        from: EntrySource,
        body: Vec<Stmt>,
    },
    If {
        cond: Cond,
        then: Vec<Stmt>,
        otherwise: Vec<Stmt>,
    },
    Eval(Expr),
    Return(Expr),
    Fail(String),
    Increment(String),
}

impl Stmt {
    pub fn when(cond: Cond, then: Vec<Stmt>) -> Self {
        Stmt::If {
            cond,
            then,
            otherwise: Vec::new(),
        }
    }
}

/// Statements that compute a value, plus the expression holding it
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub stmts: Vec<Stmt>,
    pub result: Expr,
}

impl Fragment {
    /// A pure expression with no supporting statements
    pub fn value(result: Expr) -> Self {
        Self {
            stmts: Vec::new(),
            result,
        }
    }

    pub fn is_identity_of(&self, expr: &Expr) -> bool {
        self.stmts.is_empty() && &self.result == expr
    }
}

/// Case used for generated local variable names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCase {
    Camel,
    Snake,
    Pascal,
}

impl NameCase {
    pub fn apply(&self, name: &str) -> String {
        match self {
            NameCase::Camel => to_camel_case(name),
            NameCase::Snake => to_snake_case(name),
            NameCase::Pascal => capitalize(&to_camel_case(name)),
        }
    }
}

/// Hands out local variable names that never collide within one function
#[derive(Debug, Clone)]
pub struct NameAllocator {
    case: NameCase,
    used: BTreeSet<String>,
}

impl NameAllocator {
    pub fn new(case: NameCase) -> Self {
        Self {
            case,
            used: BTreeSet::new(),
        }
    }

    /// Mark names the surrounding function already binds
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.used.insert(name.into());
    }

    /// `hint` plus `role`, e.g. `items` + `Item` → `itemsItem`, numbered on collision
    pub fn fresh(&mut self, hint: &str, role: &str) -> String {
        let base = match self.case {
            NameCase::Snake => format!("{}_{}", to_snake_case(hint), to_snake_case(role)),
            NameCase::Camel | NameCase::Pascal => {
                format!("{}{}", to_camel_case(hint), capitalize(role))
            }
        };

        let mut candidate = base.clone();
        let mut n = 2;
        while !self.used.insert(candidate.clone()) {
            candidate = format!("{}{}", base, n);
            n += 1;
        }
        candidate
    }
}
