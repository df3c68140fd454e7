//! Error types for shapegen code generation

use crate::shape::{ShapeId, ShapeType};
use thiserror::Error;

/// Result type alias for generation operations
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Fatal, run-aborting generation failure
///
/// Every variant that concerns a particular shape or operation carries its
/// id so the message alone locates the problem in the model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodegenError {
    /// Operation declares no input or no output while settings require both
    #[error("operation {operation} must define both an input shape and an output shape")]
    MissingOperationIo { operation: ShapeId },

    /// A referenced id is not in the graph
    #[error("unresolvable shape id: {0}")]
    UnknownShape(ShapeId),

    /// A locally-namespaced shape the orderer cannot produce a unit for
    #[error("no generator for shape {0}")]
    NoGenerator(ShapeId),

    /// The active backend has no mapping or transform for this kind
    #[error("shape {shape} of kind {kind} is not supported by the {backend} backend")]
    UnsupportedShape {
        shape: ShapeId,
        kind: ShapeType,
        backend: String,
    },

    /// Map keys must resolve to a string
    #[error("map {map} has key {key} which does not resolve to a string")]
    NonStringMapKey { map: ShapeId, key: ShapeId },

    /// A chain of member indirections loops back on itself
    #[error("member indirection cycle through shape {0}")]
    MemberCycle(ShapeId),

    /// Malformed `namespace#Name`
    #[error("invalid shape id: {0}")]
    InvalidShapeId(String),

    /// The configured service is not in the model
    #[error("service shape not found: {0}")]
    ServiceNotFound(ShapeId),

    /// Requested feature is recognized but not implemented
    #[error("{0} not implemented yet")]
    NotImplemented(String),

    /// Model document could not be read into a graph
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// Settings are missing or inconsistent
    #[error("settings error: {0}")]
    SettingsError(String),

    /// I/O failure while reading inputs
    #[error("I/O error: {0}")]
    Io(String),
}

impl CodegenError {
    /// Stable numeric code, used as the process exit status
    pub fn error_code(&self) -> u32 {
        match self {
            CodegenError::MissingOperationIo { .. } => 1,
            CodegenError::UnknownShape(_) => 2,
            CodegenError::NoGenerator(_) => 3,
            CodegenError::UnsupportedShape { .. } => 4,
            CodegenError::NonStringMapKey { .. } => 5,
            CodegenError::MemberCycle(_) => 6,
            CodegenError::InvalidShapeId(_) => 7,
            CodegenError::ServiceNotFound(_) => 8,
            CodegenError::NotImplemented(_) => 9,
            CodegenError::InvalidModel(_) => 10,
            CodegenError::SettingsError(_) => 11,
            CodegenError::Io(_) => 12,
        }
    }

    /// The shape or operation the error is about, when there is one
    pub fn shape_id(&self) -> Option<&ShapeId> {
        match self {
            CodegenError::MissingOperationIo { operation } => Some(operation),
            CodegenError::UnknownShape(id)
            | CodegenError::NoGenerator(id)
            | CodegenError::MemberCycle(id)
            | CodegenError::ServiceNotFound(id) => Some(id),
            CodegenError::UnsupportedShape { shape, .. } => Some(shape),
            CodegenError::NonStringMapKey { map, .. } => Some(map),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CodegenError {
    fn from(err: serde_json::Error) -> Self {
        CodegenError::InvalidModel(err.to_string())
    }
}

impl From<toml::de::Error> for CodegenError {
    fn from(err: toml::de::Error) -> Self {
        CodegenError::SettingsError(err.to_string())
    }
}

impl From<std::io::Error> for CodegenError {
    fn from(err: std::io::Error) -> Self {
        CodegenError::Io(err.to_string())
    }
}


#[cfg(test)]
#[path = "error/error_parameterized_tests.rs"]
mod error_parameterized_tests;
