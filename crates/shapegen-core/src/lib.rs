//! shapegen-core - Shape graph, declaration ordering, settings and errors
//!
//! This crate provides the foundational types for the shapegen generator:
//! - [`ShapeId`], [`Shape`] and [`ShapeKind`] for the schema type graph
//! - [`ShapeGraph`] for validated, id-indexed shape lookup
//! - [`DependencyOrderer`] for forward-reference-safe declaration order
//! - [`GeneratorSettings`] for run configuration
//! - [`CodegenError`] for fatal generation failures

mod error;
mod graph;
mod model;
mod orderer;
mod settings;
mod shape;

use std::str::FromStr;

pub use error::{CodegenError, CodegenResult};
pub use graph::{ShapeGraph, ShapeGraphBuilder};
pub use model::ModelDocument;
pub use orderer::{DataModelObject, DependencyOrderer, OperationSide};
pub use settings::{Backend, CppFileKind, GeneratorSettings, namespace_to_path};
pub use shape::{
    EnumValue, ErrorFault, EventStreamInfo, Member, Operation, PRELUDE_NAMESPACE, PRELUDE_PREFIX,
    Service, Shape, ShapeId, ShapeKind, ShapeType, Traits,
};

/// Log levels shared by the CLI and the logging crate
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl FromStr for LogLevel {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" => Ok(LogLevel::Off),
            other => Err(CodegenError::SettingsError(format!(
                "unknown log level '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Backend, CodegenError, CodegenResult, DataModelObject, DependencyOrderer,
        GeneratorSettings, LogLevel, Member, Operation, Service, Shape, ShapeGraph, ShapeId,
        ShapeKind, ShapeType,
    };
}

#[cfg(test)]
mod lib_tests;
