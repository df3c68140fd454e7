//! C++ layout: model and client, each split into a header under the include
//! directory and a definition file under the source directory

use super::{ClientInput, Layout, OutputUnit, UnitKind, UnitView};
use crate::client::MethodStub;
use crate::code_writer::CodeWriter;
use crate::profile::fill;
use crate::render::{Renderer, quote};
use shapegen_core::{CppFileKind, namespace_to_path};
use std::path::Path;

pub(super) fn compose(layout: &Layout<'_>) -> Vec<OutputUnit> {
    let headers = layout
        .settings
        .cpp_directory(&layout.service_id, CppFileKind::Header);
    let sources = layout
        .settings
        .cpp_directory(&layout.service_id, CppFileKind::Source);
    let service = &layout.input.service;

    let mut units = vec![
        layout.unit(
            headers.join(format!("{}Model.h", service)),
            model_header(layout),
        ),
        layout.unit(
            sources.join(format!("{}Model.cpp", service)),
            model_source(layout),
        ),
    ];

    if let Some(stubs) = &layout.client {
        units.push(layout.unit(
            headers.join(format!("{}Client.h", service)),
            client_header(layout, stubs),
        ));
        units.push(layout.unit(
            sources.join(format!("{}Client.cpp", service)),
            client_source(layout, stubs),
        ));
    }

    units
}

/// `#include` path of a generated header, relative to the include root
fn include_path(layout: &Layout<'_>, file: &str) -> String {
    let mut parts: Vec<String> = Path::new(&layout.settings.include_subdirectory)
        .components()
        .skip(1)
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.push(namespace_to_path(layout.service_id.namespace()));
    parts.push(file.to_string());
    parts.join("/")
}

fn namespaced(
    renderer: &Renderer,
    w: &mut CodeWriter,
    parts: &[&str],
    body: &mut dyn FnMut(&mut CodeWriter),
) {
    match parts.split_first() {
        None => body(w),
        Some((first, rest)) => renderer.scoped(w, &format!("namespace {}", first), |w| {
            namespaced(renderer, w, rest, body)
        }),
    }
}

fn in_service_namespace(
    layout: &Layout<'_>,
    renderer: &Renderer,
    w: &mut CodeWriter,
    body: &mut dyn FnMut(&mut CodeWriter),
) {
    let parts: Vec<&str> = layout.input.namespace.split('.').collect();
    namespaced(renderer, w, &parts, body);
}

fn doc(w: &mut CodeWriter, documentation: &Option<String>) {
    if let Some(documentation) = documentation {
        w.doc_comment("///", documentation);
    }
}

fn model_header(layout: &Layout<'_>) -> String {
    let renderer = Renderer::new(layout.profile);
    let input = &layout.input;
    let mut w = renderer.writer();

    layout.header(&mut w);
    w.writeln("#pragma once");
    w.blank_line();
    for include in [
        "aws/crt/DateTime.h",
        "aws/crt/JsonObject.h",
        "aws/crt/Optional.h",
        "aws/crt/Types.h",
    ] {
        w.writeln(&format!("#include <{}>", include));
    }
    w.blank_line();
    w.writeln("#include <stdexcept>");
    w.blank_line();

    in_service_namespace(layout, &renderer, &mut w, &mut |w| {
        renderer.declaration(
            w,
            &format!("class {} : public std::runtime_error", input.error_base),
            |w| {
                w.writeln("public:");
                w.writeln(&format!(
                    "explicit {}(const char *message) : std::runtime_error(message) {{}}",
                    input.error_base
                ));
                w.writeln("virtual const char *GetErrorTypeString() const noexcept { return \"unknown\"; }");
            },
        );

        for unit in &input.units {
            w.blank_line();
            match unit.kind {
                UnitKind::Enum => enum_declaration(&renderer, w, unit),
                _ => class_declaration(&renderer, w, unit, &input.error_base),
            }
        }
    });

    w.finish()
}

fn enum_declaration(renderer: &Renderer, w: &mut CodeWriter, unit: &UnitView) {
    doc(w, &unit.documentation);
    renderer.declaration(w, &format!("enum class {}", unit.name), |w| {
        for value in &unit.enum_values {
            doc(w, &value.documentation);
            w.writeln(&format!("{},", value.constant));
        }
    });
    w.blank_line();
    w.writeln(&format!(
        "Aws::Crt::String {}ToString({} value);",
        unit.name, unit.name
    ));
    w.writeln(&format!(
        "{} {}FromString(const Aws::Crt::String &value);",
        unit.name, unit.name
    ));
}

fn class_declaration(renderer: &Renderer, w: &mut CodeWriter, unit: &UnitView, error_base: &str) {
    let profile = renderer.profile();
    doc(w, &unit.documentation);
    let header = if unit.is_error {
        format!("class {} : public {}", unit.name, error_base)
    } else {
        format!("class {}", unit.name)
    };

    renderer.declaration(w, &header, |w| {
        w.writeln("public:");
        w.writeln(&format!(
            "static constexpr const char *APPLICATION_MODEL_TYPE = {};",
            quote(&unit.wire_type)
        ));
        w.blank_line();
        if let Some(error_type) = unit.error_type {
            w.writeln(&format!(
                "{}() : {}({}) {{}}",
                unit.name,
                error_base,
                quote(&unit.name)
            ));
            w.writeln(&format!(
                "explicit {}(const char *message) : {}(message) {{}}",
                unit.name, error_base
            ));
            w.writeln(&format!(
                "const char *GetErrorTypeString() const noexcept override {{ return {}; }}",
                quote(error_type)
            ));
            w.blank_line();
        }
        w.writeln("const char *GetApplicationModelType() const noexcept { return APPLICATION_MODEL_TYPE; }");
        w.blank_line();

        for field in &unit.fields {
            doc(w, &field.documentation);
            w.writeln(&format!("{} m_{};", field.ty, field.name));
        }

        if !unit.entry_points.is_empty() {
            if !unit.fields.is_empty() {
                w.blank_line();
            }
            for function in &unit.entry_points {
                let declaration = (profile.entry_header)(function.point).replace("{type}::", "");
                w.writeln(&format!(
                    "static {};",
                    fill(&declaration, &[("type", &function.type_name)])
                ));
            }
        }
    });
}

fn model_source(layout: &Layout<'_>) -> String {
    let renderer = Renderer::new(layout.profile);
    let input = &layout.input;
    let mut w = renderer.writer();

    layout.header(&mut w);
    w.writeln(&format!(
        "#include <{}>",
        include_path(layout, &format!("{}Model.h", input.service))
    ));
    w.blank_line();
    w.writeln("#include <aws/crt/Api.h>");
    w.blank_line();

    in_service_namespace(layout, &renderer, &mut w, &mut |w| {
        let mut first = true;
        for unit in &input.units {
            if unit.kind == UnitKind::Enum {
                if !first {
                    w.blank_line();
                }
                enum_conversions(&renderer, w, unit);
                first = false;
            }
            for function in &unit.entry_points {
                if !first {
                    w.blank_line();
                }
                renderer.entry_function(w, function);
                first = false;
            }
        }
    });

    w.finish()
}

fn enum_conversions(renderer: &Renderer, w: &mut CodeWriter, unit: &UnitView) {
    let name = &unit.name;
    renderer.scoped(
        w,
        &format!("Aws::Crt::String {}ToString({} value)", name, name),
        |w| {
            renderer.scoped(w, "switch (value)", |w| {
                for value in &unit.enum_values {
                    w.writeln(&format!("case {}::{}:", name, value.constant));
                    let _indent = w.indent();
                    w.writeln(&format!("return {};", quote(&value.value)));
                }
            });
            w.writeln("return \"\";");
        },
    );
    w.blank_line();
    renderer.scoped(
        w,
        &format!("{} {}FromString(const Aws::Crt::String &value)", name, name),
        |w| {
            for value in &unit.enum_values {
                renderer.scoped(w, &format!("if (value == {})", quote(&value.value)), |w| {
                    w.writeln(&format!("return {}::{};", name, value.constant));
                });
            }
            w.writeln(&format!(
                "throw std::invalid_argument({});",
                quote(&format!("unknown {} value", name))
            ));
        },
    );
}

fn method_header(renderer: &Renderer, method: &MethodStub, name: &str) -> String {
    let client = &renderer.profile().client;
    let params: Vec<String> = method
        .params
        .iter()
        .map(|p| fill(client.param, &[("name", &p.name), ("ty", &p.ty)]))
        .collect();
    fill(
        client.method_header,
        &[
            ("name", name),
            ("params", &params.join(", ")),
            ("ret", &method.return_type),
        ],
    )
}

fn client_header(layout: &Layout<'_>, stubs: &ClientInput) -> String {
    let renderer = Renderer::new(layout.profile);
    let client = &layout.profile.client;
    let input = &layout.input;
    let mut w = renderer.writer();

    layout.header(&mut w);
    w.writeln("#pragma once");
    w.blank_line();
    w.writeln(&format!(
        "#include <{}>",
        include_path(layout, &format!("{}Model.h", input.service))
    ));
    w.blank_line();
    for include in ["exception", "functional", "future", "memory"] {
        w.writeln(&format!("#include <{}>", include));
    }
    w.blank_line();

    in_service_namespace(layout, &renderer, &mut w, &mut |w| {
        w.writeln("using Executor = std::function<void(std::function<void()>)>;");
        w.blank_line();

        renderer.declaration(w, &format!("class {}Connection", input.service), |w| {
            w.writeln("public:");
            w.writeln("template <typename Response, typename Handler>");
            w.writeln("std::future<Response> Invoke(const Aws::Crt::String &operation, const Aws::Crt::JsonObject &payload, Response (*fromWire)(const Aws::Crt::JsonView &), Handler handler);");
        });

        for handler in &stubs.handlers {
            w.blank_line();
            w.writeln(&fill(
                client.handler_decl,
                &[("handler", &handler.name), ("event", &handler.event_type)],
            ));
        }

        w.blank_line();
        renderer.declaration(w, &format!("class {}Client", input.service), |w| {
            w.writeln("public:");
            w.writeln(&format!(
                "explicit {}Client({}Connection &connection) noexcept : m_connection(connection) {{}}",
                input.service, input.service
            ));
            for method in &stubs.methods {
                w.blank_line();
                w.writeln(&format!("{};", method_header(&renderer, method, &method.name)));
            }
            w.blank_line();
            w.writeln("private:");
            w.writeln(&format!("{}Connection &m_connection;", input.service));
        });
    });

    w.finish()
}

fn client_source(layout: &Layout<'_>, stubs: &ClientInput) -> String {
    let renderer = Renderer::new(layout.profile);
    let client = &layout.profile.client;
    let input = &layout.input;
    let class = format!("{}Client", input.service);
    let mut w = renderer.writer();

    layout.header(&mut w);
    w.writeln(&format!(
        "#include <{}>",
        include_path(layout, &format!("{}Client.h", input.service))
    ));
    w.blank_line();
    w.writeln("#include <stdexcept>");
    w.writeln("#include <utility>");
    w.blank_line();

    in_service_namespace(layout, &renderer, &mut w, &mut |w| {
        w.writeln(&fill(client.unwrap_helper, &[("error", &input.error_base)]));

        for handler in &stubs.handlers {
            w.blank_line();
            w.writeln(&fill(
                client.marshal_decorator,
                &[
                    ("handler", &handler.name),
                    ("event", &handler.event_type),
                    ("marshal", &handler.marshal),
                ],
            ));
        }

        for method in &stubs.methods {
            w.blank_line();
            let qualified = format!("{}::{}", class, method.name);
            renderer.function(w, &method_header(&renderer, method, &qualified), &method.body);
        }
    });

    w.finish()
}
