//! Client stub composition
//!
//! For every operation of a service, [`ClientStubComposer`] produces an
//! async method (validate the request, hand the wire form to the
//! connection) and, where the profile can block on a future, a sync method
//! that unwraps the async result. Operations with an event stream get a
//! handler interface and an executor-marshalling decorator.

use crate::ir::{CallTarget, EntryPoint, Expr, Stmt};
use crate::naming::to_snake_case;
use crate::profile::{BackendProfile, fill};
use crate::types::named_type;
use shapegen_core::{CodegenResult, Operation, OperationSide, ShapeGraph, ShapeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodVariant {
    Async,
    Sync,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

/// One generated client method
#[derive(Debug, Clone, PartialEq)]
pub struct MethodStub {
    pub operation: ShapeId,
    pub name: String,
    pub variant: MethodVariant,
    pub params: Vec<Param>,
    pub return_type: String,
    pub body: Vec<Stmt>,
}

/// Callback interface for an operation's event stream
#[derive(Debug, Clone, PartialEq)]
pub struct StreamHandler {
    pub operation: ShapeId,
    pub name: String,
    /// Qualified type of the events delivered to the handler
    pub event_type: String,
    /// Name of the executor-marshalling wrapper function
    pub marshal: String,
}

pub struct ClientStubComposer<'a> {
    graph: &'a ShapeGraph,
    profile: &'static BackendProfile,
}

impl<'a> ClientStubComposer<'a> {
    pub fn new(graph: &'a ShapeGraph, profile: &'static BackendProfile) -> Self {
        Self { graph, profile }
    }

    /// Methods for every operation of the service, in operation id order
    pub fn methods(&self, service: &ShapeId) -> CodegenResult<Vec<MethodStub>> {
        let mut methods = Vec::new();
        for operation in self.graph.service_operations(service)? {
            methods.extend(self.operation_methods(operation));
        }
        Ok(methods)
    }

    pub fn stream_handlers(&self, service: &ShapeId) -> CodegenResult<Vec<StreamHandler>> {
        Ok(self
            .graph
            .service_operations(service)?
            .into_iter()
            .filter_map(|operation| self.stream_handler(operation))
            .collect())
    }

    /// Async method, then the sync method when the profile has one
    pub fn operation_methods(&self, operation: &Operation) -> Vec<MethodStub> {
        let client = &self.profile.client;
        let handler = self.stream_handler(operation);
        let request_type = side_type(operation, OperationSide::Request);
        let response_type = side_type(operation, OperationSide::Response);
        let qualified_request = format!("{}{}", client.model_prefix, request_type);
        let qualified_response = format!("{}{}", client.model_prefix, response_type);

        let request = self.local("request");
        let mut params = vec![Param {
            name: request.clone(),
            ty: qualified_request,
        }];

        let handler_arg = match &handler {
            Some(handler) => {
                let handler_name = self.local("streamHandler");
                let executor_name = self.local("executor");
                params.push(Param {
                    name: handler_name.clone(),
                    ty: fill(client.handler_param, &[("handler", &handler.name)]),
                });
                params.push(Param {
                    name: executor_name.clone(),
                    ty: client.executor_param.to_string(),
                });
                Expr::Call {
                    target: CallTarget::Free,
                    method: handler.marshal.clone(),
                    args: vec![Expr::var(handler_name), Expr::var(executor_name)],
                }
            }
            None => Expr::Null,
        };

        let base_name = client.method_case.apply(operation.name());
        let async_name = format!("{}{}", base_name, client.async_suffix);

        let async_body = vec![
            Stmt::Eval(Expr::entry(
                EntryPoint::Validate,
                request_type.clone(),
                Expr::var(&request),
            )),
            Stmt::Return(Expr::Call {
                target: CallTarget::Value(Box::new(Expr::var(client.connection))),
                method: client.invoke.to_string(),
                args: vec![
                    Expr::str(operation.id.to_string()),
                    Expr::entry(EntryPoint::ToWire, request_type, Expr::var(&request)),
                    Expr::EntryRef {
                        point: EntryPoint::FromWire,
                        type_name: response_type,
                    },
                    handler_arg,
                ],
            }),
        ];

        let mut methods = vec![MethodStub {
            operation: operation.id.clone(),
            name: async_name.clone(),
            variant: MethodVariant::Async,
            params: params.clone(),
            return_type: fill(client.async_return, &[("t", &qualified_response)]),
            body: async_body,
        }];

        if client.has_sync {
            let forwarded = params.iter().map(|p| Expr::var(&p.name)).collect();
            methods.push(MethodStub {
                operation: operation.id.clone(),
                name: base_name,
                variant: MethodVariant::Sync,
                params,
                return_type: qualified_response,
                body: vec![Stmt::Return(Expr::Call {
                    target: CallTarget::Free,
                    method: client.unwrap.to_string(),
                    args: vec![Expr::Call {
                        target: CallTarget::This,
                        method: async_name,
                        args: forwarded,
                    }],
                })],
            });
        }

        methods
    }

    /// Handler for an operation with event-stream info; output stream wins
    pub fn stream_handler(&self, operation: &Operation) -> Option<StreamHandler> {
        let stream = operation
            .output_stream
            .as_ref()
            .or(operation.input_stream.as_ref())?;

        let name = format!("{}StreamHandler", named_type(&operation.id));
        let marshal = fill(
            self.profile.client.marshal,
            &[("handler", &name), ("handler_snake", &to_snake_case(&name))],
        );

        Some(StreamHandler {
            operation: operation.id.clone(),
            event_type: format!(
                "{}{}",
                self.profile.client.model_prefix,
                named_type(&stream.target)
            ),
            name,
            marshal,
        })
    }

    fn local(&self, name: &str) -> String {
        self.profile.variable_case.apply(name)
    }
}

/// Declared type of one operation side, or its placeholder name
fn side_type(operation: &Operation, side: OperationSide) -> String {
    let shape = match side {
        OperationSide::Request => operation.input.as_ref(),
        OperationSide::Response => operation.output.as_ref(),
    };
    match shape {
        Some(id) => named_type(id),
        None => format!("{}{}", named_type(&operation.id), side.suffix()),
    }
}
