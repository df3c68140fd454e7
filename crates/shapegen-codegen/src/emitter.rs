//! Shape code emitter
//!
//! One engine for every backend: dispatch is on the resolved shape kind and
//! all language differences come from the [`BackendProfile`]. Each transform
//! returns IR; nothing here produces text.
//!
//! Containers only contribute iteration glue. Structures and unions nested
//! anywhere inside them are handled by calling that type's own generated
//! entry point.

use crate::ir::{
    AppendKind, Cond, Construct, Conversion, EntryPoint, EntrySource, Expr, Fragment,
    NameAllocator, Payload, Stmt, WireKind,
};
use crate::profile::BackendProfile;
use crate::types::{TypeMapper, named_type};
use shapegen_core::{
    CodegenError, CodegenResult, DataModelObject, Member, ShapeGraph, ShapeId, ShapeKind,
    ShapeType,
};
use std::collections::BTreeMap;

/// Local bound to the instance under construction in `from_wire`
pub const RESULT_NAME: &str = "value";

/// A generated per-type function: signature comes from the profile
#[derive(Debug, Clone, PartialEq)]
pub struct EntryFunction {
    pub point: EntryPoint,
    pub type_name: String,
    pub body: Vec<Stmt>,
}

pub struct ShapeCodeEmitter<'a> {
    graph: &'a ShapeGraph,
    profile: &'static BackendProfile,
    types: TypeMapper<'a>,
}

impl<'a> ShapeCodeEmitter<'a> {
    pub fn new(graph: &'a ShapeGraph, profile: &'static BackendProfile) -> Self {
        Self {
            graph,
            profile,
            types: TypeMapper::new(graph, profile),
        }
    }

    pub fn types(&self) -> &TypeMapper<'a> {
        &self.types
    }

    /// Allocator with the names every entry function binds already taken
    pub fn names(&self) -> NameAllocator {
        let mut names = NameAllocator::new(self.profile.variable_case);
        names.reserve(self.profile.this_name);
        names.reserve(self.profile.payload_name);
        names.reserve(RESULT_NAME);
        names.reserve("cls");
        names
    }

    /// Typed value → plain wire value
    pub fn normalize(
        &self,
        id: &ShapeId,
        source: Expr,
        hint: &str,
        names: &mut NameAllocator,
    ) -> CodegenResult<Fragment> {
        let target = self.types.map(id)?;
        let shape = self.graph.resolve(id)?;
        let shape_type = shape.shape_type();

        match &shape.kind {
            ShapeKind::Structure(_) | ShapeKind::Union(_) => Ok(Fragment::value(Expr::entry(
                EntryPoint::ToWire,
                target.name,
                source,
            ))),
            ShapeKind::Enum(_) => Ok(Fragment::value(self.convert(
                self.profile.enum_to_wire,
                Conversion::EnumToWire(named_type(&shape.id)),
                source,
            ))),
            ShapeKind::Timestamp => Ok(Fragment::value(Expr::convert(
                Conversion::TimestampToEpoch,
                source,
            ))),
            ShapeKind::Blob => {
                let encoded = names.fresh(hint, "encoded");
                let stmts = vec![
                    Stmt::Declare {
                        name: encoded.clone(),
                        ty: self.wire_type(WireKind::String),
                        value: Expr::str(""),
                    },
                    Stmt::when(
                        Cond::NotEmpty {
                            payload: Payload::Bytes,
                            value: source.clone(),
                        },
                        vec![Stmt::Assign {
                            name: encoded.clone(),
                            value: Expr::convert(Conversion::Base64Encode, source),
                        }],
                    ),
                ];
                Ok(Fragment {
                    stmts,
                    result: Expr::var(encoded),
                })
            }
            ShapeKind::List(element) | ShapeKind::Set(element) => {
                let item = names.fresh(hint, "item");
                let element_kind = self.wire_kind(element)?;
                let inner = self.normalize(element, Expr::var(&item), &item, names)?;

                let is_list = shape_type == ShapeType::List;
                if is_list && self.elides(&inner, &item, element_kind) {
                    return Ok(Fragment::value(source));
                }

                let out = names.fresh(hint, "wire");
                let mut body = inner.stmts;
                body.push(Stmt::Append {
                    kind: AppendKind::List,
                    collection: Expr::var(&out),
                    value: Expr::wire_wrap(element_kind, inner.result),
                });

                Ok(Fragment {
                    stmts: vec![
                        Stmt::Declare {
                            name: out.clone(),
                            ty: self.wire_type(WireKind::Array),
                            value: Expr::New(Construct::WireArray),
                        },
                        Stmt::ForEach { item, source, body },
                    ],
                    result: Expr::var(out),
                })
            }
            ShapeKind::Map { key, value } => {
                self.types.check_map_key(&shape.id, key)?;
                let entry = names.fresh(hint, "entry");
                let key_var = names.fresh(hint, "key");
                let value_var = names.fresh(hint, "value");
                let value_kind = self.wire_kind(value)?;
                let inner = self.normalize(value, Expr::var(&value_var), &value_var, names)?;

                if self.elides(&inner, &value_var, value_kind) {
                    return Ok(Fragment::value(source));
                }

                let out = names.fresh(hint, "wire");
                let mut body = inner.stmts;
                body.push(Stmt::WireSet {
                    object: Expr::var(&out),
                    key: Expr::var(&key_var),
                    kind: value_kind,
                    value: inner.result,
                });

                Ok(Fragment {
                    stmts: vec![
                        Stmt::Declare {
                            name: out.clone(),
                            ty: self.wire_type(WireKind::Object),
                            value: Expr::New(Construct::WireObject),
                        },
                        Stmt::ForEachEntry {
                            entry,
                            key: key_var,
                            value: value_var,
                            source,
                            from: EntrySource::Typed,
                            body,
                        },
                    ],
                    result: Expr::var(out),
                })
            }
            ShapeKind::Member(target) => self.normalize(target, source, hint, names),
            _ => Ok(Fragment::value(self.convert(
                (self.profile.widen)(shape_type).unwrap_or("{v}"),
                Conversion::Widen(shape_type),
                source,
            ))),
        }
    }

    /// Plain wire value → keyed field of a wire object
    pub fn serialize(
        &self,
        id: &ShapeId,
        plain: Expr,
        object: Expr,
        key: &str,
    ) -> CodegenResult<Vec<Stmt>> {
        Ok(vec![Stmt::WireSet {
            object,
            key: Expr::str(key),
            kind: self.wire_kind(id)?,
            value: plain,
        }])
    }

    /// Wire element → typed value
    pub fn deserialize(
        &self,
        id: &ShapeId,
        wire: Expr,
        hint: &str,
        names: &mut NameAllocator,
    ) -> CodegenResult<Fragment> {
        let target = self.types.map(id)?;
        let shape = self.graph.resolve(id)?;
        let shape_type = shape.shape_type();

        match &shape.kind {
            ShapeKind::Structure(_) | ShapeKind::Union(_) => Ok(Fragment::value(Expr::entry(
                EntryPoint::FromWire,
                target.name,
                Expr::wire_as(WireKind::Object, wire),
            ))),
            ShapeKind::Enum(_) => Ok(Fragment::value(self.convert(
                self.profile.enum_from_wire,
                Conversion::EnumFromWire(named_type(&shape.id)),
                Expr::wire_as(WireKind::String, wire),
            ))),
            ShapeKind::Timestamp => Ok(Fragment::value(Expr::convert(
                Conversion::EpochToTimestamp,
                Expr::wire_as(WireKind::Double, wire),
            ))),
            ShapeKind::Blob => {
                let decoded = names.fresh(hint, "decoded");
                let text = names.fresh(hint, "text");
                let stmts = vec![
                    Stmt::Declare {
                        name: decoded.clone(),
                        ty: target.name,
                        value: Expr::New(Construct::EmptyBlob),
                    },
                    Stmt::Declare {
                        name: text.clone(),
                        ty: self.wire_type(WireKind::String),
                        value: Expr::wire_as(WireKind::String, wire),
                    },
                    Stmt::when(
                        Cond::NotEmpty {
                            payload: Payload::Text,
                            value: Expr::var(&text),
                        },
                        vec![Stmt::Assign {
                            name: decoded.clone(),
                            value: Expr::convert(Conversion::Base64Decode, Expr::var(&text)),
                        }],
                    ),
                ];
                Ok(Fragment {
                    stmts,
                    result: Expr::var(decoded),
                })
            }
            ShapeKind::List(element) | ShapeKind::Set(element) => {
                let is_list = shape_type == ShapeType::List;
                let item = names.fresh(hint, "item");
                let inner = self.deserialize(element, Expr::var(&item), &item, names)?;
                let source = Expr::wire_as(WireKind::Array, wire);

                if is_list && self.profile.native_wire_containers && inner.is_identity_of(&Expr::var(&item)) {
                    return Ok(Fragment::value(source));
                }

                let out = names.fresh(hint, "decoded");
                let (construct, kind) = if is_list {
                    (Construct::List(target.name.clone()), AppendKind::List)
                } else {
                    (Construct::Set(target.name.clone()), AppendKind::Set)
                };
                let mut body = inner.stmts;
                body.push(Stmt::Append {
                    kind,
                    collection: Expr::var(&out),
                    value: inner.result,
                });

                Ok(Fragment {
                    stmts: vec![
                        Stmt::Declare {
                            name: out.clone(),
                            ty: target.name,
                            value: Expr::New(construct),
                        },
                        Stmt::ForEach { item, source, body },
                    ],
                    result: Expr::var(out),
                })
            }
            ShapeKind::Map { key, value } => {
                self.types.check_map_key(&shape.id, key)?;
                let entry = names.fresh(hint, "entry");
                let key_var = names.fresh(hint, "key");
                let value_var = names.fresh(hint, "value");
                let inner = self.deserialize(value, Expr::var(&value_var), &value_var, names)?;
                let source = Expr::wire_as(WireKind::Object, wire);

                if self.profile.native_wire_containers && inner.is_identity_of(&Expr::var(&value_var)) {
                    return Ok(Fragment::value(source));
                }

                let out = names.fresh(hint, "decoded");
                let mut body = inner.stmts;
                body.push(Stmt::Insert {
                    map: Expr::var(&out),
                    key: Expr::var(&key_var),
                    value: inner.result,
                });

                Ok(Fragment {
                    stmts: vec![
                        Stmt::Declare {
                            name: out.clone(),
                            ty: target.name.clone(),
                            value: Expr::New(Construct::Map(target.name)),
                        },
                        Stmt::ForEachEntry {
                            entry,
                            key: key_var,
                            value: value_var,
                            source,
                            from: EntrySource::Wire,
                            body,
                        },
                    ],
                    result: Expr::var(out),
                })
            }
            ShapeKind::Member(target) => self.deserialize(target, wire, hint, names),
            ShapeKind::Document => Ok(Fragment::value(Expr::wire_as(WireKind::Document, wire))),
            _ => {
                let kind = self.wire_kind(id)?;
                Ok(Fragment::value(self.convert(
                    (self.profile.narrow)(shape_type).unwrap_or("{v}"),
                    Conversion::Narrow(shape_type),
                    Expr::wire_as(kind, wire),
                )))
            }
        }
    }

    /// Type-conformance checks for a present value; `path` names it in failures
    pub fn validate(
        &self,
        id: &ShapeId,
        value: Expr,
        path: &str,
        hint: &str,
        names: &mut NameAllocator,
    ) -> CodegenResult<Vec<Stmt>> {
        let target = self.types.map(id)?;
        let shape = self.graph.resolve(id)?;
        let shape_type = shape.shape_type();

        match &shape.kind {
            ShapeKind::Structure(_) | ShapeKind::Union(_) => Ok(vec![Stmt::Eval(Expr::entry(
                EntryPoint::Validate,
                target.name,
                value,
            ))]),
            ShapeKind::List(element) | ShapeKind::Set(element) => {
                let mut stmts = self.mismatch(shape_type, &value, path);
                let item = names.fresh(hint, "item");
                let inner = self.validate(
                    element,
                    Expr::var(&item),
                    &format!("{}[]", path),
                    &item,
                    names,
                )?;
                if !inner.is_empty() {
                    stmts.push(Stmt::ForEach {
                        item,
                        source: value,
                        body: inner,
                    });
                }
                Ok(stmts)
            }
            ShapeKind::Map { key, value: element } => {
                self.types.check_map_key(&shape.id, key)?;
                let mut stmts = self.mismatch(shape_type, &value, path);
                let entry = names.fresh(hint, "entry");
                let key_var = names.fresh(hint, "key");
                let value_var = names.fresh(hint, "value");
                let inner = self.validate(
                    element,
                    Expr::var(&value_var),
                    &format!("{}{{}}", path),
                    &value_var,
                    names,
                )?;
                if !inner.is_empty() {
                    stmts.push(Stmt::ForEachEntry {
                        entry,
                        key: key_var,
                        value: value_var,
                        source: value,
                        from: EntrySource::Typed,
                        body: inner,
                    });
                }
                Ok(stmts)
            }
            ShapeKind::Member(target) => self.validate(target, value, path, hint, names),
            _ => Ok(self.mismatch(shape_type, &value, path)),
        }
    }

    /// `to_wire`, `from_wire` and `validate` for a structure, union or placeholder.
    /// Enums get none.
    pub fn entry_points(&self, unit: &DataModelObject) -> CodegenResult<Vec<EntryFunction>> {
        let (type_name, members, is_union) = match &unit.shape {
            None => (unit.name.clone(), Vec::new(), false),
            Some(id) => {
                let shape = self.graph.resolve(id)?;
                let is_union = match &shape.kind {
                    ShapeKind::Structure(_) => false,
                    ShapeKind::Union(_) => true,
                    _ => return Ok(Vec::new()),
                };
                self.check_field_names(shape.id.clone(), shape.inline_members())?;
                (
                    named_type(&shape.id),
                    shape.inline_members().collect::<Vec<_>>(),
                    is_union,
                )
            }
        };

        Ok(vec![
            self.to_wire_entry(&type_name, &members)?,
            self.from_wire_entry(&type_name, &members)?,
            self.validate_entry(&type_name, &members, is_union)?,
        ])
    }

    /// Two members whose field names coincide after case conversion cannot
    /// share one generated type
    fn check_field_names<'m>(
        &self,
        shape: ShapeId,
        members: impl Iterator<Item = &'m Member>,
    ) -> CodegenResult<()> {
        let mut seen: BTreeMap<String, &str> = BTreeMap::new();
        for member in members {
            let field = self.profile.field_name(&member.name);
            if let Some(previous) = seen.insert(field.clone(), &member.name) {
                return Err(CodegenError::InvalidModel(format!(
                    "{}: members `{}` and `{}` both become {} field `{}`",
                    shape, previous, member.name, self.profile.display_name, field
                )));
            }
        }
        Ok(())
    }

    fn to_wire_entry(&self, type_name: &str, members: &[&Member]) -> CodegenResult<EntryFunction> {
        let mut names = self.names();
        let this = Expr::var(self.profile.this_name);
        let payload = Expr::var(self.profile.payload_name);

        let mut body = vec![Stmt::Declare {
            name: self.profile.payload_name.to_string(),
            ty: self.wire_type(WireKind::Object),
            value: Expr::New(Construct::WireObject),
        }];

        for member in members {
            let field = Expr::field(this.clone(), &member.name);
            let plain = self.normalize(
                &member.target,
                Expr::unwrap(field.clone()),
                &member.name,
                &mut names,
            )?;
            let mut then = plain.stmts;
            then.extend(self.serialize(&member.target, plain.result, payload.clone(), &member.name)?);
            body.push(Stmt::when(Cond::Present(field), then));
        }

        body.push(Stmt::Return(payload));
        Ok(EntryFunction {
            point: EntryPoint::ToWire,
            type_name: type_name.to_string(),
            body,
        })
    }

    fn from_wire_entry(&self, type_name: &str, members: &[&Member]) -> CodegenResult<EntryFunction> {
        let mut names = self.names();
        let payload = Expr::var(self.profile.payload_name);
        let result = Expr::var(RESULT_NAME);

        let mut body = vec![Stmt::Declare {
            name: RESULT_NAME.to_string(),
            ty: type_name.to_string(),
            value: Expr::New(Construct::Instance(type_name.to_string())),
        }];

        for member in members {
            let wire = Expr::wire_field(payload.clone(), &member.name);
            let typed = self.deserialize(&member.target, wire, &member.name, &mut names)?;

            let mut then = typed.stmts;
            then.push(Stmt::FieldSet {
                object: result.clone(),
                field: member.name.clone(),
                value: typed.result,
            });

            let otherwise = if member.required && self.graph.shape_type(&member.target)? == ShapeType::Blob {
                vec![Stmt::FieldSet {
                    object: result.clone(),
                    field: member.name.clone(),
                    value: Expr::New(Construct::EmptyBlob),
                }]
            } else {
                Vec::new()
            };

            body.push(Stmt::If {
                cond: Cond::WireHas {
                    object: payload.clone(),
                    key: Expr::str(&member.name),
                },
                then,
                otherwise,
            });
        }

        body.push(Stmt::Return(result));
        Ok(EntryFunction {
            point: EntryPoint::FromWire,
            type_name: type_name.to_string(),
            body,
        })
    }

    fn validate_entry(
        &self,
        type_name: &str,
        members: &[&Member],
        is_union: bool,
    ) -> CodegenResult<EntryFunction> {
        let mut names = self.names();
        let this = Expr::var(self.profile.this_name);
        let mut body = Vec::new();

        if is_union {
            let counter = names.fresh("members", "set");
            body.push(Stmt::Declare {
                name: counter.clone(),
                ty: self.wire_type(WireKind::Int),
                value: Expr::Int(0),
            });
            for member in members {
                body.push(Stmt::when(
                    Cond::Present(Expr::field(this.clone(), &member.name)),
                    vec![Stmt::Increment(counter.clone())],
                ));
            }
            body.push(Stmt::when(
                Cond::CountIsNot {
                    counter,
                    expected: 1,
                },
                vec![Stmt::Fail(format!(
                    "{} must have exactly one member set",
                    type_name
                ))],
            ));
        }

        for member in members {
            let field = Expr::field(this.clone(), &member.name);
            let path = format!("{}.{}", type_name, member.name);

            if member.required {
                body.push(Stmt::when(
                    Cond::Absent(field.clone()),
                    vec![Stmt::Fail(format!("{} is required", path))],
                ));
            }

            let checks = self.validate(
                &member.target,
                Expr::unwrap(field.clone()),
                &path,
                &member.name,
                &mut names,
            )?;
            if !checks.is_empty() {
                body.push(Stmt::when(Cond::Present(field), checks));
            }
        }

        Ok(EntryFunction {
            point: EntryPoint::Validate,
            type_name: type_name.to_string(),
            body,
        })
    }

    fn wire_kind(&self, id: &ShapeId) -> CodegenResult<WireKind> {
        let shape = self.graph.resolve(id)?;
        WireKind::of(shape.shape_type()).ok_or_else(|| CodegenError::UnsupportedShape {
            shape: shape.id.clone(),
            kind: shape.shape_type(),
            backend: self.profile.display_name.to_string(),
        })
    }

    fn wire_type(&self, kind: WireKind) -> String {
        (self.profile.wire_type)(kind).to_string()
    }

    /// Identity templates produce no conversion node
    fn convert(&self, template: &str, conversion: Conversion, value: Expr) -> Expr {
        if template == "{v}" {
            value
        } else {
            Expr::convert(conversion, value)
        }
    }

    /// An element loop that copies values unchanged is dropped when the
    /// profile's collections already are wire values
    fn elides(&self, inner: &Fragment, var: &str, kind: WireKind) -> bool {
        self.profile.native_wire_containers
            && (self.profile.wire_wrap)(kind) == "{v}"
            && inner.is_identity_of(&Expr::var(var))
    }

    fn mismatch(&self, shape_type: ShapeType, value: &Expr, path: &str) -> Vec<Stmt> {
        match (self.profile.mismatch)(shape_type) {
            Some(_) => vec![Stmt::when(
                Cond::Mismatch {
                    expected: shape_type,
                    value: value.clone(),
                },
                vec![Stmt::Fail(format!("{} must be a {}", path, shape_type))],
            )],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "emitter/emitter_tests.rs"]
mod emitter_tests;
