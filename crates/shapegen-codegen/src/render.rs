//! IR to text
//!
//! [`Renderer`] fills profile templates bottom-up: an expression is rendered
//! only after its operands, and statements are written through a
//! [`CodeWriter`] so nesting depth never has to be tracked by hand.

use crate::code_writer::CodeWriter;
use crate::emitter::EntryFunction;
use crate::ir::{AppendKind, CallTarget, Cond, Construct, Conversion, EntrySource, Expr, Payload, Stmt};
use crate::naming::capitalize;
use crate::profile::{BackendProfile, BlockStyle, fill};

/// Renders IR with one profile's syntax
#[derive(Debug, Clone)]
pub struct Renderer {
    profile: &'static BackendProfile,
    /// Qualifier for model types when rendering outside the model unit
    model_prefix: String,
    /// Class holding generated functions, for profiles that need one
    codec: String,
}

impl Renderer {
    pub fn new(profile: &'static BackendProfile) -> Self {
        Self {
            profile,
            model_prefix: String::new(),
            codec: String::new(),
        }
    }

    pub fn with_model_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.model_prefix = prefix.into();
        self
    }

    pub fn with_codec(mut self, codec: impl Into<String>) -> Self {
        self.codec = codec.into();
        self
    }

    pub fn profile(&self) -> &'static BackendProfile {
        self.profile
    }

    /// A new writer using the profile's indentation
    pub fn writer(&self) -> CodeWriter {
        CodeWriter::new(self.profile.indent)
    }

    pub fn expr(&self, expr: &Expr) -> String {
        let p = self.profile;
        match expr {
            Expr::Var(name) => name.clone(),
            Expr::Str(value) => quote(value),
            Expr::Int(n) => n.to_string(),
            Expr::Null => p.null.to_string(),
            Expr::FieldGet { object, field } => self.field(p.field_get, object, field, None),
            Expr::WireField { object, key } => fill(
                p.wire_field,
                &[("obj", &self.expr(object)), ("key", &self.expr(key))],
            ),
            Expr::WireAs { kind, value } => fill((p.wire_as)(*kind), &[("v", &self.expr(value))]),
            Expr::WireWrap { kind, value } => {
                fill((p.wire_wrap)(*kind), &[("v", &self.expr(value))])
            }
            Expr::Convert { conversion, value } => self.conversion(conversion, &self.expr(value)),
            Expr::Entry {
                point,
                type_name,
                value,
            } => self.entry((p.entry_call)(*point), type_name, &self.expr(value)),
            Expr::EntryRef { point, type_name } => {
                self.entry((p.entry_ref)(*point), type_name, "")
            }
            Expr::New(construct) => self.construct(construct),
            Expr::Unwrap(value) => fill(p.unwrap_optional, &[("v", &self.expr(value))]),
            Expr::Call {
                target,
                method,
                args,
            } => {
                let args = args
                    .iter()
                    .map(|a| self.expr(a))
                    .collect::<Vec<_>>()
                    .join(", ");
                match target {
                    CallTarget::Free => format!("{}({})", method, args),
                    CallTarget::This => {
                        fill(p.this_call, &[("method", method), ("args", &args)])
                    }
                    CallTarget::Value(receiver) => {
                        format!("{}.{}({})", self.expr(receiver), method, args)
                    }
                }
            }
        }
    }

    pub fn cond(&self, cond: &Cond) -> String {
        let p = self.profile;
        match cond {
            Cond::Present(value) => fill(p.present, &[("v", &self.expr(value))]),
            Cond::Absent(value) => fill(p.absent, &[("v", &self.expr(value))]),
            Cond::WireHas { object, key } => fill(
                p.wire_has,
                &[("obj", &self.expr(object)), ("key", &self.expr(key))],
            ),
            Cond::NotEmpty { payload, value } => {
                let template = match payload {
                    Payload::Text => p.not_empty_text,
                    Payload::Bytes => p.not_empty_bytes,
                };
                fill(template, &[("v", &self.expr(value))])
            }
            Cond::Mismatch { expected, value } => match (p.mismatch)(*expected) {
                Some(template) => fill(template, &[("v", &self.expr(value))]),
                None if p.block == BlockStyle::Indent => "False".to_string(),
                None => "false".to_string(),
            },
            Cond::CountIsNot { counter, expected } => format!("{} != {}", counter, expected),
        }
    }

    pub fn stmts(&self, w: &mut CodeWriter, stmts: &[Stmt]) {
        for stmt in stmts {
            self.stmt(w, stmt);
        }
    }

    pub fn stmt(&self, w: &mut CodeWriter, stmt: &Stmt) {
        let p = self.profile;
        match stmt {
            Stmt::Declare { name, ty, value } => self.simple(
                w,
                fill(
                    p.declare,
                    &[("ty", ty), ("name", name), ("v", &self.expr(value))],
                ),
            ),
            Stmt::Assign { name, value } => self.simple(
                w,
                fill(p.assign, &[("name", name), ("v", &self.expr(value))]),
            ),
            Stmt::WireSet {
                object,
                key,
                kind,
                value,
            } => self.simple(
                w,
                fill(
                    (p.wire_set)(*kind),
                    &[
                        ("obj", &self.expr(object)),
                        ("key", &self.expr(key)),
                        ("v", &self.expr(value)),
                    ],
                ),
            ),
            Stmt::FieldSet {
                object,
                field,
                value,
            } => {
                let line = self.field(p.field_set, object, field, Some(value));
                self.simple(w, line)
            }
            Stmt::Append {
                kind,
                collection,
                value,
            } => {
                let template = match kind {
                    AppendKind::List => p.append_list,
                    AppendKind::Set => p.append_set,
                };
                self.simple(
                    w,
                    fill(
                        template,
                        &[("c", &self.expr(collection)), ("v", &self.expr(value))],
                    ),
                )
            }
            Stmt::Insert { map, key, value } => self.simple(
                w,
                fill(
                    p.insert,
                    &[
                        ("c", &self.expr(map)),
                        ("key", &self.expr(key)),
                        ("v", &self.expr(value)),
                    ],
                ),
            ),
            Stmt::ForEach { item, source, body } => {
                let header = fill(p.for_each, &[("item", item), ("source", &self.expr(source))]);
                self.block(w, &header, &[], body);
            }
            Stmt::ForEachEntry {
                entry,
                key,
                value,
                source,
                from,
                body,
            } => {
                let entries = match from {
                    EntrySource::Typed => p.entries_typed,
                    EntrySource::Wire => p.entries_wire,
                };
                let source = fill(entries, &[("v", &self.expr(source))]);
                let bindings: [(&str, &str); 3] = [("entry", entry), ("key", key), ("value", value)];
                let header = fill(
                    p.for_entries,
                    &[
                        ("entry", entry),
                        ("key", key),
                        ("value", value),
                        ("source", &source),
                    ],
                );
                let prelude: Vec<String> = p
                    .entry_bindings
                    .iter()
                    .map(|b| fill(b, &bindings))
                    .collect();
                self.block(w, &header, &prelude, body);
            }
            Stmt::If {
                cond,
                then,
                otherwise,
            } => self.if_else(w, cond, then, otherwise),
            Stmt::Eval(expr) => self.simple(w, self.expr(expr)),
            Stmt::Return(expr) => self.simple(w, format!("return {}", self.expr(expr))),
            Stmt::Fail(message) => self.simple(w, fill(p.fail, &[("msg", &quote(message))])),
            Stmt::Increment(counter) => self.simple(w, format!("{} += 1", counter)),
        }
    }

    /// Function with the given header and body
    pub fn function(&self, w: &mut CodeWriter, header: &str, body: &[Stmt]) {
        self.block(w, header, &[], body);
    }

    pub fn entry_function(&self, w: &mut CodeWriter, function: &EntryFunction) {
        let header = fill(
            (self.profile.entry_header)(function.point),
            &[("type", &function.type_name)],
        );
        self.function(w, &header, &function.body);
    }

    /// Open a block, write `body` one level deeper, close it
    pub fn scoped<F>(&self, w: &mut CodeWriter, header: &str, body: F)
    where
        F: FnOnce(&mut CodeWriter),
    {
        self.open(w, header);
        {
            let _indent = w.indent();
            body(w);
        }
        self.close(w);
    }

    /// Like [`Renderer::scoped`] for type declarations that end in `};`
    pub fn declaration<F>(&self, w: &mut CodeWriter, header: &str, body: F)
    where
        F: FnOnce(&mut CodeWriter),
    {
        self.open(w, header);
        {
            let _indent = w.indent();
            body(w);
        }
        match self.profile.block {
            BlockStyle::Braces | BlockStyle::Allman => w.writeln("};"),
            BlockStyle::Indent => {}
        }
    }

    fn block(&self, w: &mut CodeWriter, header: &str, prelude: &[String], body: &[Stmt]) {
        self.open(w, header);
        {
            let _indent = w.indent();
            for line in prelude {
                w.writeln(line);
            }
            self.body(w, prelude.is_empty(), body);
        }
        self.close(w);
    }

    fn if_else(&self, w: &mut CodeWriter, cond: &Cond, then: &[Stmt], otherwise: &[Stmt]) {
        let header = fill(self.profile.if_header, &[("cond", &self.cond(cond))]);
        self.open(w, &header);
        {
            let _indent = w.indent();
            self.body(w, true, then);
        }

        if !otherwise.is_empty() {
            match self.profile.block {
                BlockStyle::Braces => w.writeln("} else {"),
                BlockStyle::Allman => {
                    w.writeln("}");
                    w.writeln("else");
                    w.writeln("{");
                }
                BlockStyle::Indent => w.writeln("else:"),
            }
            let _indent = w.indent();
            self.body(w, true, otherwise);
        }

        self.close(w);
    }

    fn body(&self, w: &mut CodeWriter, may_be_empty: bool, stmts: &[Stmt]) {
        if stmts.is_empty() && may_be_empty && self.profile.block == BlockStyle::Indent {
            w.writeln("pass");
        }
        self.stmts(w, stmts);
    }

    fn open(&self, w: &mut CodeWriter, header: &str) {
        match self.profile.block {
            BlockStyle::Braces => w.writeln(&format!("{} {{", header)),
            BlockStyle::Allman => {
                w.writeln(header);
                w.writeln("{");
            }
            BlockStyle::Indent => w.writeln(&format!("{}:", header)),
        }
    }

    fn close(&self, w: &mut CodeWriter) {
        match self.profile.block {
            BlockStyle::Braces | BlockStyle::Allman => w.writeln("}"),
            BlockStyle::Indent => {}
        }
    }

    fn simple(&self, w: &mut CodeWriter, line: String) {
        w.writeln(&format!("{}{}", line, self.profile.terminator));
    }

    fn field(&self, template: &str, object: &Expr, field: &str, value: Option<&Expr>) -> String {
        let name = self.profile.field_name(field);
        let value = value.map(|v| self.expr(v)).unwrap_or_default();
        fill(
            template,
            &[
                ("obj", &self.expr(object)),
                ("field", &name),
                ("Field", &capitalize(&name)),
                ("v", &value),
            ],
        )
    }

    fn entry(&self, template: &str, type_name: &str, value: &str) -> String {
        fill(
            template,
            &[
                ("prefix", &self.model_prefix),
                ("codec", &self.codec),
                ("type", type_name),
                ("v", value),
            ],
        )
    }

    fn construct(&self, construct: &Construct) -> String {
        let p = self.profile;
        match construct {
            Construct::WireObject => p.new_wire_object.to_string(),
            Construct::WireArray => p.new_wire_array.to_string(),
            Construct::List(ty) => fill(p.new_list, &[("type", ty)]),
            Construct::Set(ty) => fill(p.new_set, &[("type", ty)]),
            Construct::Map(ty) => fill(p.new_map, &[("type", ty)]),
            Construct::Instance(ty) => fill(
                p.new_instance,
                &[("type", &format!("{}{}", self.model_prefix, ty))],
            ),
            Construct::EmptyBlob => p.empty_blob.to_string(),
        }
    }

    fn conversion(&self, conversion: &Conversion, value: &str) -> String {
        let p = self.profile;
        let template = match conversion {
            Conversion::Widen(ty) => (p.widen)(*ty).unwrap_or("{v}"),
            Conversion::Narrow(ty) => (p.narrow)(*ty).unwrap_or("{v}"),
            Conversion::Base64Encode => p.base64_encode,
            Conversion::Base64Decode => p.base64_decode,
            Conversion::TimestampToEpoch => p.timestamp_to_epoch,
            Conversion::EpochToTimestamp => p.epoch_to_timestamp,
            Conversion::EnumToWire(_) => p.enum_to_wire,
            Conversion::EnumFromWire(_) => p.enum_from_wire,
        };
        let ty = match conversion {
            Conversion::EnumToWire(ty) | Conversion::EnumFromWire(ty) => {
                format!("{}{}", self.model_prefix, ty)
            }
            _ => String::new(),
        };
        fill(template, &[("type", &ty), ("v", value)])
    }
}

/// Double-quoted string literal
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
