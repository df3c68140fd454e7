//! Python layout: `model.py` plus `client.py` in the service module directory

use super::{Layout, OutputUnit, UnitKind, UnitView};
use crate::client::MethodStub;
use crate::code_writer::CodeWriter;
use crate::profile::fill;
use crate::render::{Renderer, quote};

pub(super) fn compose(layout: &Layout<'_>) -> Vec<OutputUnit> {
    let directory = layout.settings.module_directory(&layout.service_id);

    let mut units = vec![layout.unit(directory.join("model.py"), model(layout))];
    if let Some(contents) = client(layout) {
        units.push(layout.unit(directory.join("client.py"), contents));
    }
    units
}

fn model(layout: &Layout<'_>) -> String {
    let renderer = Renderer::new(layout.profile);
    let input = &layout.input;
    let mut w = renderer.writer();

    layout.header(&mut w);
    w.writeln("from __future__ import annotations");
    w.blank_line();
    w.writeln("import base64");
    w.writeln("import datetime");
    w.writeln("import typing");
    w.blank_line();
    w.blank_line();

    renderer.scoped(&mut w, &format!("class {}(Exception)", input.error_base), |w| {
        w.writeln(&format!("\"\"\"Base class of every {} fault\"\"\"", input.service));
        w.blank_line();
        w.writeln("ERROR_TYPE_STRING = \"unknown\"");
    });

    for unit in &input.units {
        w.blank_line();
        w.blank_line();
        match unit.kind {
            UnitKind::Enum => enum_class(&renderer, &mut w, unit),
            _ => data_class(&renderer, &mut w, unit, &input.error_base),
        }
    }

    w.finish()
}

fn docstring(w: &mut CodeWriter, documentation: &Option<String>) -> bool {
    match documentation {
        Some(doc) => {
            w.writeln(&format!("\"\"\"{}\"\"\"", doc.replace("\"\"\"", "'''")));
            true
        }
        None => false,
    }
}

fn enum_class(renderer: &Renderer, w: &mut CodeWriter, unit: &UnitView) {
    renderer.scoped(w, &format!("class {}", unit.name), |w| {
        if docstring(w, &unit.documentation) {
            w.blank_line();
        }
        for value in &unit.enum_values {
            w.writeln(&format!("{} = {}", value.constant, quote(&value.value)));
        }
    });
}

fn data_class(renderer: &Renderer, w: &mut CodeWriter, unit: &UnitView, error_base: &str) {
    let header = if unit.is_error {
        format!("class {}({})", unit.name, error_base)
    } else {
        format!("class {}", unit.name)
    };

    renderer.scoped(w, &header, |w| {
        if docstring(w, &unit.documentation) {
            w.blank_line();
        }
        w.writeln(&format!("APPLICATION_MODEL_TYPE = {}", quote(&unit.wire_type)));
        if let Some(error_type) = unit.error_type {
            w.writeln(&format!("ERROR_TYPE_STRING = {}", quote(error_type)));
        }
        w.blank_line();

        let params: Vec<String> = unit
            .fields
            .iter()
            .map(|f| format!("{}: {} = None", f.name, f.ty))
            .collect();
        let init = if params.is_empty() {
            "def __init__(self)".to_string()
        } else {
            format!("def __init__(self, *, {})", params.join(", "))
        };
        renderer.scoped(w, &init, |w| {
            if unit.fields.is_empty() && !unit.is_error {
                w.writeln("pass");
            }
            if unit.is_error {
                let text = match &unit.message_field {
                    Some(message) => format!(
                        "{} if {} is not None else {}",
                        message,
                        message,
                        quote(&unit.name)
                    ),
                    None => quote(&unit.name),
                };
                w.writeln(&format!("super().__init__({})", text));
            }
            for field in &unit.fields {
                w.writeln(&format!("self.{} = {}", field.name, field.name));
            }
        });

        for function in &unit.entry_points {
            w.blank_line();
            renderer.entry_function(w, function);
        }
    });
}

fn client(layout: &Layout<'_>) -> Option<String> {
    let stubs = layout.client.as_ref()?;
    let client = &layout.profile.client;
    let renderer = Renderer::new(layout.profile).with_model_prefix(client.model_prefix);
    let input = &layout.input;
    let mut w = renderer.writer();

    layout.header(&mut w);
    w.writeln("from __future__ import annotations");
    w.blank_line();
    w.writeln("import concurrent.futures");
    w.writeln("import typing");
    w.blank_line();
    w.writeln("from . import model");
    w.blank_line();
    w.blank_line();

    w.writeln(&fill(
        client.unwrap_helper,
        &[("error", &format!("{}{}", client.model_prefix, input.error_base))],
    ));

    for handler in &stubs.handlers {
        let values = [
            ("handler", handler.name.as_str()),
            ("event", handler.event_type.as_str()),
            ("marshal", handler.marshal.as_str()),
        ];
        w.blank_line();
        w.blank_line();
        w.writeln(&fill(client.handler_decl, &values));
        w.blank_line();
        w.blank_line();
        w.writeln(&fill(client.marshal_decorator, &values));
    }

    w.blank_line();
    w.blank_line();
    renderer.scoped(&mut w, &format!("class {}Client", input.service), |w| {
        renderer.scoped(w, "def __init__(self, connection)", |w| {
            w.writeln("self._connection = connection");
        });
        for method in &stubs.methods {
            w.blank_line();
            method_def(&renderer, w, method);
        }
    });

    Some(w.finish())
}

fn method_def(renderer: &Renderer, w: &mut CodeWriter, method: &MethodStub) {
    let client = &renderer.profile().client;
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
