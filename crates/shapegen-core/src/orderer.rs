//! Declaration ordering
//!
//! [`DependencyOrderer`] walks the shapes reachable from a service's
//! operations breadth-first. Every structure, union or enum seen is moved
//! to the end of the result when it is seen again, so after the final
//! reversal each type precedes every type that contains it.

use crate::error::{CodegenError, CodegenResult};
use crate::graph::ShapeGraph;
use crate::shape::{Operation, Service, ShapeId, ShapeKind};
use std::collections::HashSet;
use tracing::debug;

/// Unit of named-type declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataModelObject {
    /// Declared type name
    pub name: String,

    /// Backing shape; `None` for a synthesized empty request or response
    pub shape: Option<ShapeId>,

    /// Canonical wire-type identifier, `namespace#Name`
    pub wire_type: String,
}

impl DataModelObject {
    pub fn for_shape(id: &ShapeId) -> Self {
        Self {
            name: id.name().to_string(),
            shape: Some(id.clone()),
            wire_type: id.to_string(),
        }
    }

    /// Empty stand-in for an operation side the model leaves undeclared
    pub fn placeholder(operation: &ShapeId, side: OperationSide) -> Self {
        let id = operation.sibling(format!("{}{}", operation.name(), side.suffix()));
        Self {
            name: id.name().to_string(),
            shape: None,
            wire_type: id.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.shape.is_none()
    }
}

/// Which side of an operation a shape sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationSide {
    Request,
    Response,
}

impl OperationSide {
    pub fn suffix(&self) -> &'static str {
        match self {
            OperationSide::Request => "Request",
            OperationSide::Response => "Response",
        }
    }
}

/// Computes a forward-reference-safe declaration order for one service
pub struct DependencyOrderer<'a> {
    graph: &'a ShapeGraph,
    service: &'a Service,
    require_operation_io: bool,
}

impl<'a> DependencyOrderer<'a> {
    pub fn new(graph: &'a ShapeGraph, service: &ShapeId) -> CodegenResult<Self> {
        Ok(Self {
            graph,
            service: graph.service(service)?,
            require_operation_io: true,
        })
    }

    /// When false, a missing input or output becomes a placeholder unit
    pub fn require_operation_io(mut self, required: bool) -> Self {
        self.require_operation_io = required;
        self
    }

    /// Compute the declaration order
    pub fn order(&self) -> CodegenResult<Vec<DataModelObject>> {
        let mut units = Vec::new();
        let mut level = Vec::new();

        for operation in self.graph.service_operations(&self.service.id)? {
            self.seed(operation, &mut units, &mut level)?;
        }

        let mut seen_levels: HashSet<Vec<ShapeId>> = HashSet::new();
        let mut depth = 0usize;

        while !level.is_empty() {
            let current = dedup_keep_last(level);
            if !seen_levels.insert(current.clone()) {
                debug!(depth, "sweep level repeats, stopping at collection cycle");
                break;
            }

            debug!(depth, shapes = current.len(), "ordering sweep");
            let mut next = Vec::new();
            for id in &current {
                self.visit(id, &mut units, &mut next)?;
            }

            level = next;
            depth += 1;
        }

        units.reverse();
        Ok(units)
    }

    fn seed(
        &self,
        operation: &Operation,
        units: &mut Vec<DataModelObject>,
        level: &mut Vec<ShapeId>,
    ) -> CodegenResult<()> {
        let sides = [
            (OperationSide::Request, &operation.input, &operation.input_stream),
            (OperationSide::Response, &operation.output, &operation.output_stream),
        ];

        for (side, shape, stream) in sides {
            match shape {
                Some(id) => level.push(id.clone()),
                None if self.require_operation_io => {
                    return Err(CodegenError::MissingOperationIo {
                        operation: operation.id.clone(),
                    });
                }
                None => units.push(DataModelObject::placeholder(&operation.id, side)),
            }
            if let Some(stream) = stream {
                level.push(stream.target.clone());
            }
        }

        level.extend(operation.errors.iter().cloned());
        Ok(())
    }

    fn visit(
        &self,
        id: &ShapeId,
        units: &mut Vec<DataModelObject>,
        next: &mut Vec<ShapeId>,
    ) -> CodegenResult<()> {
        let shape = self.graph.resolve(id)?;
        if shape.id.is_prelude() {
            return Ok(());
        }

        match &shape.kind {
            ShapeKind::Structure(_) | ShapeKind::Union(_) => {
                bump(units, DataModelObject::for_shape(&shape.id));
                next.extend(shape.inline_members().map(|m| m.target.clone()));
            }
            ShapeKind::Enum(_) => bump(units, DataModelObject::for_shape(&shape.id)),
            ShapeKind::List(element) | ShapeKind::Set(element) => next.push(element.clone()),
            ShapeKind::Map { key, value } => {
                next.push(key.clone());
                next.push(value.clone());
            }
            _ if shape.id.namespace() == self.service.id.namespace() => {
                return Err(CodegenError::NoGenerator(shape.id.clone()));
            }
            _ => {}
        }

        Ok(())
    }
}

/// Remove any earlier unit with the same name and append this one
fn bump(units: &mut Vec<DataModelObject>, unit: DataModelObject) {
    units.retain(|u| u.name != unit.name);
    units.push(unit);
}

/// Keep only the last occurrence of each id, preserving relative order
fn dedup_keep_last(level: Vec<ShapeId>) -> Vec<ShapeId> {
    let mut seen = HashSet::new();
    let mut kept: Vec<ShapeId> = level
        .into_iter()
        .rev()
        .filter(|id| seen.insert(id.clone()))
        .collect();
    kept.reverse();
    kept
}
