//! Wire codec errors

use shapegen_core::{CodegenError, ShapeType};
use thiserror::Error;

/// Result type alias for wire transforms
pub type WireResult<T> = Result<T, WireError>;

/// A value that does not fit its shape, located by JSON path
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WireError {
    #[error("{path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: ShapeType,
        found: String,
    },

    #[error("{path}: required member is absent")]
    MissingRequired { path: String },

    #[error("{path}: {member} is not a member of {shape}")]
    UnknownMember {
        path: String,
        shape: String,
        member: String,
    },

    #[error("{path}: union must have exactly one member set, found {count}")]
    UnionArity { path: String, count: usize },

    #[error("{path}: invalid base64: {message}")]
    Base64 { path: String, message: String },

    #[error("{path}: {value} is out of range for {expected}")]
    OutOfRange {
        path: String,
        expected: ShapeType,
        value: String,
    },

    #[error("{path}: '{value}' is not a value of enum {shape}")]
    UnknownEnumValue {
        path: String,
        shape: String,
        value: String,
    },

    #[error("{path}: duplicate set element")]
    DuplicateElement { path: String },

    #[error("malformed wire payload: {0}")]
    Malformed(String),

    #[error(transparent)]
    Model(#[from] CodegenError),
}

impl From<serde_json::Error> for WireError {
    fn from(err: serde_json::Error) -> Self {
        WireError::Malformed(err.to_string())
    }
}

impl WireError {
    /// JSON path of the failing value, when the error concerns one
    pub fn path(&self) -> Option<&str> {
        match self {
            WireError::TypeMismatch { path, .. }
            | WireError::MissingRequired { path }
            | WireError::UnknownMember { path, .. }
            | WireError::UnionArity { path, .. }
            | WireError::Base64 { path, .. }
            | WireError::OutOfRange { path, .. }
            | WireError::UnknownEnumValue { path, .. }
            | WireError::DuplicateElement { path } => Some(path),
            WireError::Malformed(_) | WireError::Model(_) => None,
        }
    }
}
