//! shapegen-codegen - Multi-backend code generation from a shape graph
//!
//! This crate turns an ordered list of declaration units into source text:
//! - [`profile::BackendProfile`] tables for C++, Python, TypeScript and Java
//! - [`types::TypeMapper`] for shape-to-type mapping
//! - [`emitter::ShapeCodeEmitter`] for the normalize/serialize/deserialize/validate transforms
//! - [`client::ClientStubComposer`] for client methods and stream handlers
//! - [`compose::OutputComposer`] for laying the results out as output units
//! - [`generate`] to run every configured backend in memory

pub mod client;
pub mod code_writer;
pub mod compose;
pub mod emitter;
pub mod ir;
pub mod naming;
pub mod profile;
pub mod render;
pub mod types;

pub use compose::{OutputComposer, OutputUnit, TemplateInput};
pub use emitter::{EntryFunction, ShapeCodeEmitter};
pub use profile::BackendProfile;
pub use types::TypeMapper;

use shapegen_core::{CodegenResult, DependencyOrderer, GeneratorSettings, ShapeGraph};
use tracing::{debug, info};

/// Generate every unit for every configured backend
///
/// Either all units are returned or the first error is; callers write
/// nothing on failure.
pub fn generate(graph: &ShapeGraph, settings: &GeneratorSettings) -> CodegenResult<Vec<OutputUnit>> {
    settings.validate()?;
    let service = settings.service_id()?;

    let units = DependencyOrderer::new(graph, &service)?
        .require_operation_io(settings.require_operation_io)
        .order()?;
    debug!(service = %service, units = units.len(), "declaration order computed");

    let composer = OutputComposer::new(graph, settings, &units)?;
    let mut outputs = Vec::new();
    for backend in &settings.backends {
        let produced = composer.compose(*backend)?;
        info!(backend = %backend, units = produced.len(), "backend generated");
        outputs.extend(produced);
    }

    Ok(outputs)
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::client::{ClientStubComposer, MethodStub, StreamHandler};
    pub use crate::compose::{OutputComposer, OutputUnit, TemplateInput};
    pub use crate::emitter::{EntryFunction, ShapeCodeEmitter};
    pub use crate::generate;
    pub use crate::profile::BackendProfile;
    pub use crate::render::Renderer;
    pub use crate::types::{TargetType, TypeMapper};
}
