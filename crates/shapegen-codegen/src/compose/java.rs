//! Java layout: one file per model type plus the fault base and the codec in
//! the model package, and the client in the service package

use super::{Layout, OutputUnit, UnitKind, UnitView};
use crate::code_writer::CodeWriter;
use crate::naming::capitalize;
use crate::profile::fill;
use crate::render::{Renderer, quote};
use std::path::PathBuf;

const MODEL_IMPORTS: &[&str] = &[
    "com.google.gson.JsonArray",
    "com.google.gson.JsonElement",
    "com.google.gson.JsonObject",
    "com.google.gson.JsonPrimitive",
    "java.time.Instant",
    "java.util.ArrayList",
    "java.util.Arrays",
    "java.util.Base64",
    "java.util.HashMap",
    "java.util.HashSet",
    "java.util.List",
    "java.util.Map",
    "java.util.Objects",
    "java.util.Set",
];

pub(super) fn compose(layout: &Layout<'_>) -> Vec<OutputUnit> {
    let model_package = layout.settings.java_model_package(&layout.service_id);
    let service_package = layout.settings.java_service_package(&layout.service_id);
    let model_dir = package_path(&model_package);
    let input = &layout.input;
    let codec = format!("{}Codec", input.service);

    let mut units = vec![layout.unit(
        model_dir.join(format!("{}.java", input.error_base)),
        error_base(layout, &model_package),
    )];

    for unit in &input.units {
        units.push(layout.unit(
            model_dir.join(format!("{}.java", unit.name)),
            declaration(layout, &model_package, unit),
        ));
    }

    units.push(layout.unit(
        model_dir.join(format!("{}.java", codec)),
        codec_class(layout, &model_package, &codec),
    ));

    if let Some(contents) = client(layout, &service_package, &model_package, &codec) {
        units.push(layout.unit(
            package_path(&service_package).join(format!("{}ClientV2.java", input.service)),
            contents,
        ));
    }

    units
}

fn package_path(package: &str) -> PathBuf {
    package.split('.').collect()
}

fn preamble(layout: &Layout<'_>, w: &mut CodeWriter, package: &str, imports: &[&str]) {
    layout.header(w);
    w.writeln(&format!("package {};", package));
    if !imports.is_empty() {
        w.blank_line();
        for import in imports {
            w.writeln(&format!("import {};", import));
        }
    }
    w.blank_line();
}

fn javadoc(w: &mut CodeWriter, documentation: &Option<String>) {
    if let Some(documentation) = documentation {
        w.writeln("/**");
        for line in documentation.lines() {
            w.writeln(&format!(" * {}", line));
        }
        w.writeln(" */");
    }
}

fn error_base(layout: &Layout<'_>, package: &str) -> String {
    let renderer = Renderer::new(layout.profile);
    let name = &layout.input.error_base;
    let mut w = renderer.writer();

    preamble(layout, &mut w, package, &[]);
    renderer.scoped(&mut w, &format!("public class {} extends RuntimeException", name), |w| {
        renderer.scoped(w, &format!("public {}()", name), |w| {
            w.writeln("super();");
        });
        w.blank_line();
        renderer.scoped(w, &format!("public {}(String message)", name), |w| {
            w.writeln("super(message);");
        });
        w.blank_line();
        renderer.scoped(w, "public String getErrorTypeString()", |w| {
            w.writeln("return \"unknown\";");
        });
    });
    w.finish()
}

fn declaration(layout: &Layout<'_>, package: &str, unit: &UnitView) -> String {
    let renderer = Renderer::new(layout.profile);
    let mut w = renderer.writer();

    match unit.kind {
        UnitKind::Enum => {
            preamble(layout, &mut w, package, &[]);
            enum_class(&renderer, &mut w, unit);
        }
        _ => {
            preamble(layout, &mut w, package, MODEL_IMPORTS);
            data_class(&renderer, &mut w, unit, &layout.input.error_base);
        }
    }
    w.finish()
}

fn enum_class(renderer: &Renderer, w: &mut CodeWriter, unit: &UnitView) {
    javadoc(w, &unit.documentation);
    renderer.scoped(w, &format!("public enum {}", unit.name), |w| {
        let last = unit.enum_values.len().saturating_sub(1);
        for (i, value) in unit.enum_values.iter().enumerate() {
            javadoc(w, &value.documentation);
            let end = if i == last { ";" } else { "," };
            w.writeln(&format!("{}({}){}", value.constant, quote(&value.value), end));
        }
        if unit.enum_values.is_empty() {
            w.writeln(";");
        }
        w.blank_line();
        w.writeln("private final String value;");
        w.blank_line();
        renderer.scoped(w, &format!("{}(String value)", unit.name), |w| {
            w.writeln("this.value = value;");
        });
        w.blank_line();
        renderer.scoped(w, "public String getValue()", |w| {
            w.writeln("return value;");
        });
        w.blank_line();
        renderer.scoped(
            w,
            &format!("public static {} fromValue(String value)", unit.name),
            |w| {
                renderer.scoped(w, &format!("for ({} candidate : values())", unit.name), |w| {
                    renderer.scoped(w, "if (candidate.value.equals(value))", |w| {
                        w.writeln("return candidate;");
                    });
                });
                w.writeln(&format!(
                    "throw new IllegalArgumentException(\"Unknown {} value: \" + value);",
                    unit.name
                ));
            },
        );
    });
}

fn data_class(renderer: &Renderer, w: &mut CodeWriter, unit: &UnitView, error_base: &str) {
    javadoc(w, &unit.documentation);
    let header = if unit.is_error {
        format!("public class {} extends {}", unit.name, error_base)
    } else {
        format!("public class {}", unit.name)
    };

    renderer.scoped(w, &header, |w| {
        w.writeln(&format!(
            "public static final String APPLICATION_MODEL_TYPE = {};",
            quote(&unit.wire_type)
        ));
        w.blank_line();
        for field in &unit.fields {
            w.writeln(&format!("private {} {};", field.ty, field.name));
        }

        if let Some(error_type) = unit.error_type {
            error_members(renderer, w, unit, error_type);
        }

        for field in &unit.fields {
            let accessor = capitalize(&field.name);
            w.blank_line();
            javadoc(w, &field.documentation);
            if field.deprecated {
                w.writeln("@Deprecated");
            }
            renderer.scoped(w, &format!("public {} get{}()", field.ty, accessor), |w| {
                w.writeln(&format!("return {};", field.name));
            });
            w.blank_line();
            if field.deprecated {
                w.writeln("@Deprecated");
            }
            renderer.scoped(
                w,
                &format!("public void set{}({} {})", accessor, field.ty, field.name),
                |w| {
                    w.writeln(&format!("this.{} = {};", field.name, field.name));
                },
            );
        }

        w.blank_line();
        renderer.scoped(w, "public String getApplicationModelType()", |w| {
            w.writeln("return APPLICATION_MODEL_TYPE;");
        });
        w.blank_line();
        equals(renderer, w, unit);
        w.blank_line();
        hash_code(renderer, w, unit);
    });
}

/// Constructors that hand the fault text to the base, plus the fault side
fn error_members(renderer: &Renderer, w: &mut CodeWriter, unit: &UnitView, error_type: &str) {
    w.blank_line();
    renderer.scoped(w, &format!("public {}()", unit.name), |w| {
        w.writeln(&format!("super({});", quote(&unit.name)));
    });
    w.blank_line();
    renderer.scoped(w, &format!("public {}(String errorMessage)", unit.name), |w| {
        w.writeln("super(errorMessage);");
        if let Some(message) = &unit.message_field {
            w.writeln(&format!("this.{} = errorMessage;", message));
        }
    });
    w.blank_line();
    w.writeln("@Override");
    renderer.scoped(w, "public String getErrorTypeString()", |w| {
        w.writeln(&format!("return {};", quote(error_type)));
    });
}

fn equals(renderer: &Renderer, w: &mut CodeWriter, unit: &UnitView) {
    w.writeln("@Override");
    renderer.scoped(w, "public boolean equals(Object rhs)", |w| {
        renderer.scoped(w, "if (this == rhs)", |w| {
            w.writeln("return true;");
        });
        renderer.scoped(w, &format!("if (!(rhs instanceof {}))", unit.name), |w| {
            w.writeln("return false;");
        });
        if unit.fields.is_empty() {
            w.writeln("return true;");
            return;
        }
        w.writeln(&format!("{} other = ({}) rhs;", unit.name, unit.name));
        let comparisons: Vec<String> = unit
            .fields
            .iter()
            .map(|field| {
                let check = if field.blob { "Arrays.equals" } else { "Objects.equals" };
                format!("{}(this.{}, other.{})", check, field.name, field.name)
            })
            .collect();
        w.writeln(&format!("return {};", comparisons.join("\n    && ")));
    });
}

fn hash_code(renderer: &Renderer, w: &mut CodeWriter, unit: &UnitView) {
    w.writeln("@Override");
    renderer.scoped(w, "public int hashCode()", |w| {
        let parts: Vec<String> = unit
            .fields
            .iter()
            .map(|field| {
                if field.blob {
                    format!("Arrays.hashCode({})", field.name)
                } else {
                    field.name.clone()
                }
            })
            .collect();
        w.writeln(&format!("return Objects.hash({});", parts.join(", ")));
    });
}

fn codec_class(layout: &Layout<'_>, package: &str, codec: &str) -> String {
    let renderer = Renderer::new(layout.profile).with_codec(codec);
    let mut w = renderer.writer();

    preamble(layout, &mut w, package, MODEL_IMPORTS);
    renderer.scoped(&mut w, &format!("public final class {}", codec), |w| {
        renderer.scoped(w, &format!("private {}()", codec), |_| {});

        for unit in &layout.input.units {
            for function in &unit.entry_points {
                w.blank_line();
                renderer.entry_function(w, function);
            }
        }
    });
    w.finish()
}

fn client(
    layout: &Layout<'_>,
    package: &str,
    model_package: &str,
    codec: &str,
) -> Option<String> {
    let stubs = layout.client.as_ref()?;
    let client = &layout.profile.client;
    let renderer = Renderer::new(layout.profile)
        .with_model_prefix(client.model_prefix)
        .with_codec(codec);
    let input = &layout.input;
    let class = format!("{}ClientV2", input.service);
    let model_import = format!("{}.*", model_package);
    let mut w = renderer.writer();

    preamble(
        layout,
        &mut w,
        package,
        &[
            "com.google.gson.JsonObject",
            "java.util.concurrent.CompletableFuture",
            "java.util.concurrent.ExecutionException",
            "java.util.concurrent.Executor",
            "java.util.function.Function",
            &model_import,
        ],
    );

    renderer.scoped(&mut w, &format!("public class {}", class), |w| {
        renderer.scoped(w, "public interface Connection", |w| {
            w.writeln("<T> CompletableFuture<T> invoke(String operation, JsonObject payload, Function<JsonObject, T> fromWire, Object handler);");
        });
        w.blank_line();
        w.writeln("private final Connection connection;");
        w.blank_line();
        renderer.scoped(w, &format!("public {}(Connection connection)", class), |w| {
            w.writeln("this.connection = connection;");
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
        w.writeln(&fill(client.unwrap_helper, &[("error", &input.error_base)]));

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
