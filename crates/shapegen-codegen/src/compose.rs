//! Output composition
//!
//! [`OutputComposer`] gathers everything a backend layout needs into a
//! [`TemplateInput`] (declarations, field types, entry points, operation
//! list) and hands it to that backend's layout, which arranges the rendered
//! text into [`OutputUnit`]s. Nothing here touches the filesystem.

mod cpp;
mod java;
mod python;
mod typescript;

use crate::client::{ClientStubComposer, MethodStub, StreamHandler};
use crate::code_writer::CodeWriter;
use crate::emitter::{EntryFunction, ShapeCodeEmitter};
use crate::profile::BackendProfile;
use crate::types::named_type;
use serde::Serialize;
use shapegen_core::{
    Backend, CodegenResult, DataModelObject, GeneratorSettings, Service, ShapeGraph, ShapeId,
    ShapeKind, ShapeType,
};
use std::path::PathBuf;

/// One named text unit produced by a backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputUnit {
    pub backend: Backend,
    /// Path relative to the output root
    pub path: PathBuf,
    pub contents: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Structure,
    Union,
    Enum,
    /// Synthesized empty request or response
    Placeholder,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    /// Field name in the target's naming convention
    pub name: String,
    pub wire_name: String,
    /// Declared (optional) field type
    pub ty: String,
    pub required: bool,
    pub deprecated: bool,
    /// Byte payload; compared by content rather than identity
    pub blob: bool,
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumView {
    pub constant: String,
    pub value: String,
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitView {
    pub name: String,
    pub wire_type: String,
    pub kind: UnitKind,
    pub is_error: bool,
    /// `client` or `server` for faults
    pub error_type: Option<&'static str>,
    /// Field carrying a fault's text: a string member named `message`
    pub message_field: Option<String>,
    pub documentation: Option<String>,
    pub fields: Vec<FieldView>,
    pub enum_values: Vec<EnumView>,
    #[serde(skip)]
    pub entry_points: Vec<EntryFunction>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamView {
    pub member: String,
    pub event: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationView {
    pub name: String,
    pub id: String,
    pub request: String,
    pub response: String,
    pub errors: Vec<String>,
    pub input_stream: Option<StreamView>,
    pub output_stream: Option<StreamView>,
    pub documentation: Option<String>,
}

/// Data map handed to a backend layout
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInput {
    pub service: String,
    pub service_id: String,
    pub namespace: String,
    pub version: Option<String>,
    pub documentation: Option<String>,
    pub backend: Backend,
    /// Base class of every generated fault
    pub error_base: String,
    pub units: Vec<UnitView>,
    pub operations: Vec<OperationView>,
    pub generate_client_stubs: bool,
}

/// Client stubs for one backend
#[derive(Debug, Clone, Default)]
pub struct ClientInput {
    pub methods: Vec<MethodStub>,
    pub handlers: Vec<StreamHandler>,
}

/// Everything a layout reads
pub(crate) struct Layout<'a> {
    pub settings: &'a GeneratorSettings,
    pub profile: &'static BackendProfile,
    pub service_id: ShapeId,
    pub input: TemplateInput,
    pub client: Option<ClientInput>,
}

impl Layout<'_> {
    /// First lines of every unit
    pub fn header(&self, w: &mut CodeWriter) {
        w.writeln(&format!(
            "{} Generated by shapegen from {}. Do not edit.",
            self.profile.line_comment, self.input.service_id
        ));
        w.blank_line();
    }

    pub fn unit(&self, path: PathBuf, contents: String) -> OutputUnit {
        OutputUnit {
            backend: self.profile.backend,
            path,
            contents,
        }
    }
}

pub struct OutputComposer<'a> {
    graph: &'a ShapeGraph,
    settings: &'a GeneratorSettings,
    service: &'a Service,
    units: &'a [DataModelObject],
}

impl<'a> OutputComposer<'a> {
    /// `units` is the declaration order computed for the configured service
    pub fn new(
        graph: &'a ShapeGraph,
        settings: &'a GeneratorSettings,
        units: &'a [DataModelObject],
    ) -> CodegenResult<Self> {
        let service = graph.service(&settings.service_id()?)?;
        Ok(Self {
            graph,
            settings,
            service,
            units,
        })
    }

    /// Template data for one backend as a JSON value
    pub fn template_input(&self, backend: Backend) -> CodegenResult<serde_json::Value> {
        Ok(serde_json::to_value(self.input(backend)?)?)
    }

    pub fn input(&self, backend: Backend) -> CodegenResult<TemplateInput> {
        let profile = BackendProfile::for_backend(backend);
        let emitter = ShapeCodeEmitter::new(self.graph, profile);

        let units = self
            .units
            .iter()
            .map(|unit| self.unit_view(&emitter, unit))
            .collect::<CodegenResult<Vec<_>>>()?;

        let operations = self
            .graph
            .service_operations(&self.service.id)?
            .into_iter()
            .map(|operation| {
                let side = |shape: Option<&ShapeId>, suffix: &str| match shape {
                    Some(id) => named_type(id),
                    None => format!("{}{}", named_type(&operation.id), suffix),
                };
                let stream = |info: &shapegen_core::EventStreamInfo| StreamView {
                    member: info.member.clone(),
                    event: named_type(&info.target),
                };
                OperationView {
                    name: operation.name().to_string(),
                    id: operation.id.to_string(),
                    request: side(operation.input.as_ref(), "Request"),
                    response: side(operation.output.as_ref(), "Response"),
                    errors: operation.errors.iter().map(named_type).collect(),
                    input_stream: operation.input_stream.as_ref().map(stream),
                    output_stream: operation.output_stream.as_ref().map(stream),
                    documentation: operation.documentation.clone(),
                }
            })
            .collect();

        Ok(TemplateInput {
            service: self.service.name().to_string(),
            service_id: self.service.id.to_string(),
            namespace: self.service.id.namespace().to_string(),
            version: self.service.version.clone(),
            documentation: self.service.documentation.clone(),
            backend,
            error_base: format!("{}Error", named_type(&self.service.id)),
            units,
            operations,
            generate_client_stubs: self.settings.generate_client_stubs,
        })
    }

    /// Render every unit of one backend
    pub fn compose(&self, backend: Backend) -> CodegenResult<Vec<OutputUnit>> {
        let profile = BackendProfile::for_backend(backend);
        let client = if self.settings.generate_client_stubs {
            let stubs = ClientStubComposer::new(self.graph, profile);
            Some(ClientInput {
                methods: stubs.methods(&self.service.id)?,
                handlers: stubs.stream_handlers(&self.service.id)?,
            })
        } else {
            None
        };

        let layout = Layout {
            settings: self.settings,
            profile,
            service_id: self.service.id.clone(),
            input: self.input(backend)?,
            client,
        };

        Ok(match backend {
            Backend::Cpp => cpp::compose(&layout),
            Backend::Python => python::compose(&layout),
            Backend::Javascript => typescript::compose(&layout),
            Backend::Java => java::compose(&layout),
        })
    }

    fn unit_view(
        &self,
        emitter: &ShapeCodeEmitter<'_>,
        unit: &DataModelObject,
    ) -> CodegenResult<UnitView> {
        let profile = emitter.types().profile();
        let entry_points = emitter.entry_points(unit)?;

        let Some(id) = &unit.shape else {
            return Ok(UnitView {
                name: unit.name.clone(),
                wire_type: unit.wire_type.clone(),
                kind: UnitKind::Placeholder,
                is_error: false,
                error_type: None,
                message_field: None,
                documentation: None,
                fields: Vec::new(),
                enum_values: Vec::new(),
                entry_points,
            });
        };

        let shape = self.graph.resolve(id)?;
        let kind = match &shape.kind {
            ShapeKind::Union(_) => UnitKind::Union,
            ShapeKind::Enum(_) => UnitKind::Enum,
            _ => UnitKind::Structure,
        };

        let fields = shape
            .inline_members()
            .map(|member| {
                Ok(FieldView {
                    name: profile.field_name(&member.name),
                    wire_name: member.name.clone(),
                    ty: emitter.types().field_type(member)?,
                    required: member.required,
                    deprecated: member.deprecated,
                    blob: self.graph.shape_type(&member.target)? == ShapeType::Blob,
                    documentation: member.documentation.clone(),
                })
            })
            .collect::<CodegenResult<Vec<_>>>()?;

        let message_field = match shape.traits.error {
            Some(_) => shape
                .inline_members()
                .zip(&fields)
                .find(|(member, _)| member.name == "message")
                .filter(|(member, _)| {
                    matches!(self.graph.shape_type(&member.target), Ok(ShapeType::String))
                })
                .map(|(_, field)| field.name.clone()),
            None => None,
        };

        let enum_values = match &shape.kind {
            ShapeKind::Enum(values) => values
                .iter()
                .map(|v| EnumView {
                    constant: v.constant_name(),
                    value: v.value.clone(),
                    documentation: v.documentation.clone(),
                })
                .collect(),
            _ => Vec::new(),
        };

        Ok(UnitView {
            name: named_type(&shape.id),
            wire_type: unit.wire_type.clone(),
            kind,
            is_error: shape.is_error(),
            error_type: shape.traits.error.map(|fault| fault.as_str()),
            message_field,
            documentation: shape.traits.documentation.clone(),
            fields,
            enum_values,
            entry_points,
        })
    }
}
