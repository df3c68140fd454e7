//! Id-indexed shape arena
//!
//! [`ShapeGraph`] is built once through [`ShapeGraphBuilder`] and is
//! read-only afterwards. Building validates every edge, resolves member
//! indirection to a concrete shape and derives event-stream metadata, so
//! later stages never have to re-check any of it.

use crate::error::{CodegenError, CodegenResult};
use crate::shape::{
    EnumValue, EventStreamInfo, Operation, Service, Shape, ShapeId, ShapeKind, ShapeType,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Prelude shapes available to every model without being declared
const PRELUDE: &[(&str, ShapeType)] = &[
    ("Boolean", ShapeType::Boolean),
    ("PrimitiveBoolean", ShapeType::Boolean),
    ("Byte", ShapeType::Byte),
    ("PrimitiveByte", ShapeType::Byte),
    ("Short", ShapeType::Short),
    ("PrimitiveShort", ShapeType::Short),
    ("Integer", ShapeType::Integer),
    ("PrimitiveInteger", ShapeType::Integer),
    ("Long", ShapeType::Long),
    ("PrimitiveLong", ShapeType::Long),
    ("BigInteger", ShapeType::BigInteger),
    ("Float", ShapeType::Float),
    ("PrimitiveFloat", ShapeType::Float),
    ("Double", ShapeType::Double),
    ("PrimitiveDouble", ShapeType::Double),
    ("String", ShapeType::String),
    ("Timestamp", ShapeType::Timestamp),
    ("Blob", ShapeType::Blob),
    ("Document", ShapeType::Document),
];

fn prelude_kind(ty: ShapeType) -> ShapeKind {
    match ty {
        ShapeType::Boolean => ShapeKind::Boolean,
        ShapeType::Byte => ShapeKind::Byte,
        ShapeType::Short => ShapeKind::Short,
        ShapeType::Integer => ShapeKind::Integer,
        ShapeType::Long => ShapeKind::Long,
        ShapeType::BigInteger => ShapeKind::BigInteger,
        ShapeType::Float => ShapeKind::Float,
        ShapeType::Double => ShapeKind::Double,
        ShapeType::Timestamp => ShapeKind::Timestamp,
        ShapeType::Blob => ShapeKind::Blob,
        ShapeType::Document => ShapeKind::Document,
        _ => ShapeKind::String,
    }
}

/// Immutable, validated shape graph
#[derive(Debug, Clone)]
pub struct ShapeGraph {
    shapes: BTreeMap<ShapeId, Shape>,
    /// Member-indirection shape id to its concrete target
    resolved: BTreeMap<ShapeId, ShapeId>,
    operations: BTreeMap<ShapeId, Operation>,
    services: BTreeMap<ShapeId, Service>,
}

impl ShapeGraph {
    pub fn builder() -> ShapeGraphBuilder {
        ShapeGraphBuilder::default()
    }

    /// Raw lookup; member-indirection shapes are returned as-is
    pub fn shape(&self, id: &ShapeId) -> CodegenResult<&Shape> {
        self.shapes
            .get(id)
            .ok_or_else(|| CodegenError::UnknownShape(id.clone()))
    }

    /// Lookup through member indirection to the concrete shape
    pub fn resolve(&self, id: &ShapeId) -> CodegenResult<&Shape> {
        let target = self.resolved.get(id).unwrap_or(id);
        self.shape(target)
    }

    /// Resolved kind discriminant of a shape
    pub fn shape_type(&self, id: &ShapeId) -> CodegenResult<ShapeType> {
        Ok(self.resolve(id)?.shape_type())
    }

    pub fn contains(&self, id: &ShapeId) -> bool {
        self.shapes.contains_key(id)
    }

    /// Enum literals, when the shape resolves to an enum
    pub fn enum_values(&self, id: &ShapeId) -> Option<&[EnumValue]> {
        match &self.resolve(id).ok()?.kind {
            ShapeKind::Enum(values) => Some(values),
            _ => None,
        }
    }

    pub fn is_error(&self, id: &ShapeId) -> bool {
        self.resolve(id).map(Shape::is_error).unwrap_or(false)
    }

    pub fn is_streaming(&self, id: &ShapeId) -> bool {
        self.resolve(id).map(|s| s.traits.streaming).unwrap_or(false)
    }

    pub fn operation(&self, id: &ShapeId) -> CodegenResult<&Operation> {
        self.operations
            .get(id)
            .ok_or_else(|| CodegenError::UnknownShape(id.clone()))
    }

    pub fn service(&self, id: &ShapeId) -> CodegenResult<&Service> {
        self.services
            .get(id)
            .ok_or_else(|| CodegenError::ServiceNotFound(id.clone()))
    }

    /// Operations of a service, sorted by id
    pub fn service_operations(&self, service: &ShapeId) -> CodegenResult<Vec<&Operation>> {
        let service = self.service(service)?;
        let ids: BTreeSet<&ShapeId> = service.operations.iter().collect();
        ids.into_iter().map(|id| self.operation(id)).collect()
    }

    /// Every data shape, in id order
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    pub fn services(&self) -> impl Iterator<Item = &Service> {
        self.services.values()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Accumulates shapes, operations and services, then validates them
#[derive(Debug, Default)]
pub struct ShapeGraphBuilder {
    shapes: BTreeMap<ShapeId, Shape>,
    operations: BTreeMap<ShapeId, Operation>,
    services: BTreeMap<ShapeId, Service>,
}

impl ShapeGraphBuilder {
    pub fn shape(mut self, shape: Shape) -> Self {
        self.shapes.insert(shape.id.clone(), shape);
        self
    }

    pub fn operation(mut self, operation: Operation) -> Self {
        self.operations.insert(operation.id.clone(), operation);
        self
    }

    pub fn service(mut self, service: Service) -> Self {
        self.services.insert(service.id.clone(), service);
        self
    }

    /// Validate every edge and freeze the graph
    pub fn build(mut self) -> CodegenResult<ShapeGraph> {
        for (name, ty) in PRELUDE {
            let id = ShapeId::prelude(*name);
            self.shapes
                .entry(id.clone())
                .or_insert_with(|| Shape::new(id, prelude_kind(*ty)));
        }

        for shape in self.shapes.values() {
            for target in shape.kind.references() {
                if !self.shapes.contains_key(target) {
                    return Err(CodegenError::UnknownShape(target.clone()));
                }
            }
        }

        self.check_unique_names()?;
        let resolved = self.resolve_members()?;
        let mut graph = ShapeGraph {
            shapes: self.shapes,
            resolved,
            operations: BTreeMap::new(),
            services: BTreeMap::new(),
        };

        graph.check_map_keys()?;
        graph.propagate_streaming();

        for (id, mut operation) in self.operations {
            let sides = operation.input.iter().chain(&operation.output);
            for target in sides.chain(&operation.errors) {
                graph.shape(target)?;
            }
            operation.input_stream = graph.event_stream(operation.input.as_ref())?;
            operation.output_stream = graph.event_stream(operation.output.as_ref())?;
            graph.operations.insert(id, operation);
        }

        for (id, service) in self.services {
            for operation in &service.operations {
                graph.operation(operation)?;
            }
            graph.services.insert(id, service);
        }

        debug!(
            shapes = graph.shapes.len(),
            operations = graph.operations.len(),
            services = graph.services.len(),
            "shape graph built"
        );

        Ok(graph)
    }

    /// Generated types are named by shape name alone, so two declared
    /// types may not share one across namespaces
    fn check_unique_names(&self) -> CodegenResult<()> {
        let mut names: BTreeMap<&str, &ShapeId> = BTreeMap::new();
        let declared = self.shapes.values().filter(|shape| {
            !shape.id.is_prelude()
                && matches!(
                    shape.kind,
                    ShapeKind::Structure(_) | ShapeKind::Union(_) | ShapeKind::Enum(_)
                )
        });

        for shape in declared {
            if let Some(previous) = names.insert(shape.id.name(), &shape.id) {
                return Err(CodegenError::InvalidModel(format!(
                    "shapes {} and {} would both generate type {}",
                    previous,
                    shape.id,
                    shape.id.name()
                )));
            }
        }
        Ok(())
    }

    fn resolve_members(&self) -> CodegenResult<BTreeMap<ShapeId, ShapeId>> {
        let mut resolved = BTreeMap::new();

        for shape in self.shapes.values() {
            let ShapeKind::Member(first) = &shape.kind else {
                continue;
            };

            let mut seen = BTreeSet::from([shape.id.clone()]);
            let mut current = first;
            while let Some(Shape {
                kind: ShapeKind::Member(next),
                ..
            }) = self.shapes.get(current)
            {
                if !seen.insert(current.clone()) {
                    return Err(CodegenError::MemberCycle(shape.id.clone()));
                }
                current = next;
            }

            resolved.insert(shape.id.clone(), current.clone());
        }

        Ok(resolved)
    }
}

impl ShapeGraph {
    fn check_map_keys(&self) -> CodegenResult<()> {
        for shape in self.shapes.values() {
            if let ShapeKind::Map { key, .. } = &shape.kind {
                let key_type = self.shape_type(key)?;
                if !matches!(key_type, ShapeType::String | ShapeType::Enum) {
                    return Err(CodegenError::NonStringMapKey {
                        map: shape.id.clone(),
                        key: key.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn propagate_streaming(&mut self) {
        let streaming: BTreeSet<ShapeId> = self
            .shapes
            .keys()
            .filter(|id| self.is_streaming(id))
            .cloned()
            .collect();

        for shape in self.shapes.values_mut() {
            if let ShapeKind::Structure(members) | ShapeKind::Union(members) = &mut shape.kind {
                for member in members.iter_mut() {
                    if streaming.contains(&member.target) {
                        member.streaming = true;
                    }
                }
            }
        }
    }

    fn event_stream(&self, side: Option<&ShapeId>) -> CodegenResult<Option<EventStreamInfo>> {
        let Some(side) = side else {
            return Ok(None);
        };

        let info = self.resolve(side)?.members().iter().find(|m| m.streaming);
        match info {
            Some(member) => Ok(Some(EventStreamInfo {
                member: member.name.clone(),
                target: self.resolve(&member.target)?.id.clone(),
            })),
            None => Ok(None),
        }
    }
}
