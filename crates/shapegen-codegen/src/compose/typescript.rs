//! TypeScript layout: `model.ts` plus `client.ts` in the service module directory

use super::{Layout, OutputUnit, UnitKind, UnitView};
use crate::code_writer::CodeWriter;
use crate::profile::fill;
use crate::render::{Renderer, quote};

pub(super) fn compose(layout: &Layout<'_>) -> Vec<OutputUnit> {
    let directory = layout.settings.module_directory(&layout.service_id);

    let mut units = vec![layout.unit(directory.join("model.ts"), model(layout))];
    if let Some(contents) = client(layout) {
        units.push(layout.unit(directory.join("client.ts"), contents));
    }
    units
}

fn doc(w: &mut CodeWriter, documentation: &Option<String>, deprecated: bool) {
    if documentation.is_none() && !deprecated {
        return;
    }
    w.writeln("/**");
    if let Some(documentation) = documentation {
        for line in documentation.lines() {
            w.writeln(&format!(" * {}", line));
        }
    }
    if deprecated {
        w.writeln(" * @deprecated");
    }
    w.writeln(" */");
}

fn model(layout: &Layout<'_>) -> String {
    let renderer = Renderer::new(layout.profile);
    let input = &layout.input;
    let mut w = renderer.writer();

    layout.header(&mut w);
    renderer.scoped(
        &mut w,
        &format!("export class {} extends Error", input.error_base),
        |w| {
            renderer.scoped(w, "constructor(message?: string)", |w| {
                w.writeln("super(message);");
                w.writeln(&format!("this.name = {};", quote(&input.error_base)));
            });
        },
    );

    for unit in &input.units {
        w.blank_line();
        match unit.kind {
            UnitKind::Enum => enum_decl(&renderer, &mut w, unit),
            _ => interface_decl(&renderer, &mut w, unit),
        }
    }

    w.finish()
}

fn enum_decl(renderer: &Renderer, w: &mut CodeWriter, unit: &UnitView) {
    doc(w, &unit.documentation, false);
    renderer.scoped(w, &format!("export enum {}", unit.name), |w| {
        for value in &unit.enum_values {
            doc(w, &value.documentation, false);
            w.writeln(&format!("{} = {},", value.constant, quote(&value.value)));
        }
    });
}

fn interface_decl(renderer: &Renderer, w: &mut CodeWriter, unit: &UnitView) {
    doc(w, &unit.documentation, false);
    renderer.scoped(w, &format!("export interface {}", unit.name), |w| {
        for field in &unit.fields {
            doc(w, &field.documentation, field.deprecated);
            w.writeln(&format!("{}?: {};", field.name, field.ty));
        }
    });
    w.blank_line();
    renderer.scoped(w, &format!("export namespace {}", unit.name), |w| {
        w.writeln(&format!(
            "export const APPLICATION_MODEL_TYPE = {};",
            quote(&unit.wire_type)
        ));
        if let Some(error_type) = unit.error_type {
            w.writeln(&format!("export const ERROR_TYPE_STRING = {};", quote(error_type)));
        }
    });

    for function in &unit.entry_points {
        w.blank_line();
        renderer.entry_function(w, function);
    }
}

fn client(layout: &Layout<'_>) -> Option<String> {
    let stubs = layout.client.as_ref()?;
    let client = &layout.profile.client;
    let renderer = Renderer::new(layout.profile).with_model_prefix(client.model_prefix);
    let input = &layout.input;
    let mut w = renderer.writer();

    layout.header(&mut w);
    w.writeln("import * as model from \"./model\";");
    w.blank_line();
    w.writeln("export type Executor = (task: () => void) => void;");
    w.blank_line();
    renderer.scoped(&mut w, "export interface Connection", |w| {
        w.writeln("invoke<T>(operation: string, payload: any, fromWire: (payload: any) => T, handler: any): Promise<T>;");
    });

    for handler in &stubs.handlers {
        let values = [
            ("handler", handler.name.as_str()),
            ("event", handler.event_type.as_str()),
            ("marshal", handler.marshal.as_str()),
        ];
        w.blank_line();
        w.writeln(&fill(client.handler_decl, &values));
        w.blank_line();
        w.writeln(&fill(client.marshal_decorator, &values));
    }

    w.blank_line();
    renderer.scoped(&mut w, &format!("export class {}Client", input.service), |w| {
        w.writeln("constructor(private readonly connection: Connection) {}");
        for method in &stubs.methods {
            w.blank_line();
            let params: Vec<String> = method
                .params
                .iter()
                .map(|p| fill(client.param, &[("name", &p.name), ("ty", &p.ty)]))
                .collect();
            let header = fill(
                client.method_header,
                &[
                    ("name", &method.name),
                    ("params", &params.join(", ")),
                    ("ret", &method.return_type),
                ],
            );
            renderer.function(w, &header, &method.body);
        }
    });

    Some(w.finish())
}
