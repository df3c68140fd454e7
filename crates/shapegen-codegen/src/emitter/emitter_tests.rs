#![allow(non_snake_case)]

use super::*;
use crate::profile::{CPP, JAVA, PYTHON, TYPESCRIPT};
use crate::render::Renderer;
use shapegen_core::{OperationSide, Shape};

fn weather() -> ShapeGraph {
    ShapeGraph::from_json_str(include_str!("../../tests/fixtures/weather.json")).unwrap()
}

fn id(name: &str) -> ShapeId {
    ShapeId::new("example.weather", name)
}

fn render(renderer: &Renderer, stmts: &[Stmt]) -> String {
    let mut w = renderer.writer();
    renderer.stmts(&mut w, stmts);
    w.finish()
}

fn entry(emitter: &ShapeCodeEmitter<'_>, name: &str, point: EntryPoint) -> EntryFunction {
    emitter
        .entry_points(&DataModelObject::for_shape(&id(name)))
        .unwrap()
        .into_iter()
        .find(|f| f.point == point)
        .unwrap()
}

fn render_entry(renderer: &Renderer, function: &EntryFunction) -> String {
    let mut w = renderer.writer();
    renderer.entry_function(&mut w, function);
    w.finish()
}

// ============================================================================
// normalize
// ============================================================================

#[test]
fn ShapeCodeEmitter___normalize_timestamp___converts_to_epoch_seconds() {
    let graph = weather();
    let emitter = ShapeCodeEmitter::new(&graph, &JAVA);
    let mut names = emitter.names();

    let fragment = emitter
        .normalize(&ShapeId::prelude("Timestamp"), Expr::var("t"), "t", &mut names)
        .unwrap();

    assert!(fragment.stmts.is_empty());
    assert_eq!(
        fragment.result,
        Expr::convert(Conversion::TimestampToEpoch, Expr::var("t"))
    );
}

#[test]
fn ShapeCodeEmitter___normalize_blob___guards_empty_payload() {
    let graph = weather();
    let emitter = ShapeCodeEmitter::new(&graph, &JAVA);
    let mut names = emitter.names();

    let fragment = emitter
        .normalize(&ShapeId::prelude("Blob"), Expr::var("r"), "radar", &mut names)
        .unwrap();
    let text = render(&Renderer::new(&JAVA), &fragment.stmts);

    assert_eq!(fragment.result, Expr::var("radarEncoded"));
    assert_eq!(
        text,
        "String radarEncoded = \"\";\n\
         if (r.length > 0) {\n    \
         radarEncoded = Base64.getEncoder().encodeToString(r);\n\
         }\n"
    );
}

#[test]
fn ShapeCodeEmitter___normalize_float_and_double___are_distinct_cases() {
    let graph = weather();
    let emitter = ShapeCodeEmitter::new(&graph, &CPP);
    let renderer = Renderer::new(&CPP);
    let mut names = emitter.names();

    let float = emitter
        .normalize(&ShapeId::prelude("Float"), Expr::var("f"), "f", &mut names)
        .unwrap();
    let double = emitter
        .normalize(&ShapeId::prelude("Double"), Expr::var("d"), "d", &mut names)
        .unwrap();

    assert_eq!(renderer.expr(&float.result), "static_cast<double>(f)");
    assert_eq!(renderer.expr(&double.result), "d");
}

#[test]
fn ShapeCodeEmitter___python_list_of_scalars___passes_through() {
    let graph = weather();
    let emitter = ShapeCodeEmitter::new(&graph, &PYTHON);
    let mut names = emitter.names();

    let fragment = emitter
        .normalize(&id("HourlyList"), Expr::var("h"), "hourly", &mut names)
        .unwrap();

    assert!(fragment.is_identity_of(&Expr::var("h")));
}

#[test]
fn ShapeCodeEmitter___java_list_of_float___rebuilds_wire_array() {
    let graph = weather();
    let emitter = ShapeCodeEmitter::new(&graph, &JAVA);
    let mut names = emitter.names();

    let fragment = emitter
        .normalize(&id("HourlyList"), Expr::var("h"), "hourly", &mut names)
        .unwrap();
    let text = render(&Renderer::new(&JAVA), &fragment.stmts);

    assert_eq!(fragment.result, Expr::var("hourlyWire"));
    assert_eq!(
        text,
        "JsonArray hourlyWire = new JsonArray();\n\
         for (var hourlyItem : h) {\n    \
         hourlyWire.add(new JsonPrimitive(hourlyItem));\n\
         }\n"
    );
}

#[test]
fn ShapeCodeEmitter___map_of_list_of_structure___nests_loops_and_delegates() {
    let graph = weather();
    let emitter = ShapeCodeEmitter::new(&graph, &JAVA);
    let mut names = emitter.names();

    let fragment = emitter
        .normalize(&id("ReadingsByStation"), Expr::var("r"), "readings", &mut names)
        .unwrap();
    let text = render(
        &Renderer::new(&JAVA).with_codec("WeatherCodec"),
        &fragment.stmts,
    );

    assert_eq!(fragment.result, Expr::var("readingsWire"));
    assert_eq!(
        text,
        "JsonObject readingsWire = new JsonObject();\n\
         for (var readingsEntry : r.entrySet()) {\n    \
         String readingsKey = readingsEntry.getKey();\n    \
         var readingsValue = readingsEntry.getValue();\n    \
         JsonArray readingsValueWire = new JsonArray();\n    \
         for (var readingsValueItem : readingsValue) {\n        \
         readingsValueWire.add(WeatherCodec.toWireReading(readingsValueItem));\n    \
         }\n    \
         readingsWire.add(readingsKey, readingsValueWire);\n\
         }\n"
    );
}

#[test]
fn ShapeCodeEmitter___repeated_hint___allocates_fresh_names() {
    let graph = weather();
    let emitter = ShapeCodeEmitter::new(&graph, &JAVA);
    let mut names = emitter.names();

    let first = emitter
        .normalize(&id("HourlyList"), Expr::var("a"), "hourly", &mut names)
        .unwrap();
    let second = emitter
        .normalize(&id("HourlyList"), Expr::var("b"), "hourly", &mut names)
        .unwrap();

    assert_eq!(first.result, Expr::var("hourlyWire"));
    assert_eq!(second.result, Expr::var("hourlyWire2"));
}

#[test]
fn ShapeCodeEmitter___set_on_typescript___is_unsupported() {
    let tags = id("Tags");
    let graph = ShapeGraph::builder()
        .shape(Shape::new(
            tags.clone(),
            ShapeKind::Set(ShapeId::prelude("String")),
        ))
        .build()
        .unwrap();
    let emitter = ShapeCodeEmitter::new(&graph, &TYPESCRIPT);
    let mut names = emitter.names();

    let result = emitter.normalize(&tags, Expr::var("t"), "tags", &mut names);

    assert_eq!(
        result,
        Err(CodegenError::UnsupportedShape {
            shape: tags,
            kind: ShapeType::Set,
            backend: "TypeScript".to_string(),
        })
    );
}

#[test]
fn ShapeCodeEmitter___big_integer_on_java___is_unsupported() {
    let graph = weather();
    let emitter = ShapeCodeEmitter::new(&graph, &JAVA);
    let mut names = emitter.names();

    let result = emitter.deserialize(
        &ShapeId::prelude("BigInteger"),
        Expr::var("w"),
        "n",
        &mut names,
    );

    assert!(matches!(
        result,
        Err(CodegenError::UnsupportedShape { kind: ShapeType::BigInteger, .. })
    ));
}

// ============================================================================
// serialize / deserialize
// ============================================================================

#[test]
fn ShapeCodeEmitter___serialize___stores_under_member_key() {
    let graph = weather();
    let emitter = ShapeCodeEmitter::new(&graph, &CPP);

    let stmts = emitter
        .serialize(
            &ShapeId::prelude("Integer"),
            Expr::var("n"),
            Expr::var("payload"),
            "count",
        )
        .unwrap();

    assert_eq!(
        render(&Renderer::new(&CPP), &stmts),
        "payload.WithInteger(\"count\", n);\n"
    );
}

#[test]
fn ShapeCodeEmitter___deserialize_float___narrows_from_double() {
    let graph = weather();
    let emitter = ShapeCodeEmitter::new(&graph, &JAVA);
    let mut names = emitter.names();

    let fragment = emitter
        .deserialize(&ShapeId::prelude("Float"), Expr::var("w"), "t", &mut names)
        .unwrap();

    assert_eq!(
        Renderer::new(&JAVA).expr(&fragment.result),
        "(float) w.getAsDouble()"
    );
}

#[test]
fn ShapeCodeEmitter___deserialize_blob___decodes_only_non_empty_text() {
    let graph = weather();
    let emitter = ShapeCodeEmitter::new(&graph, &PYTHON);
    let mut names = emitter.names();

    let fragment = emitter
        .deserialize(
            &ShapeId::prelude("Blob"),
            Expr::wire_field(Expr::var("payload"), "radar"),
            "radar",
            &mut names,
        )
        .unwrap();
    let text = render(&Renderer::new(&PYTHON), &fragment.stmts);

    assert_eq!(fragment.result, Expr::var("radar_decoded"));
    assert_eq!(
        text,
        "radar_decoded = b''\n\
         radar_text = payload[\"radar\"]\n\
         if len(radar_text) > 0:\n    \
         radar_decoded = base64.b64decode(radar_text)\n"
    );
}

#[test]
fn ShapeCodeEmitter___deserialize_typescript_scalar_list___uses_wire_array() {
    let graph = weather();
    let emitter = ShapeCodeEmitter::new(&graph, &TYPESCRIPT);
    let mut names = emitter.names();

    let fragment = emitter
        .deserialize(&id("HourlyList"), Expr::var("w"), "hourly", &mut names)
        .unwrap();

    assert!(fragment.stmts.is_empty());
    assert_eq!(Renderer::new(&TYPESCRIPT).expr(&fragment.result), "w");
}

// ============================================================================
// Entry points
// ============================================================================

#[test]
fn ShapeCodeEmitter___to_wire_entry___skips_absent_members() {
    let graph = weather();
    let emitter = ShapeCodeEmitter::new(&graph, &JAVA);
    let renderer = Renderer::new(&JAVA).with_codec("WeatherCodec");

    let text = render_entry(&renderer, &entry(&emitter, "Forecast", EntryPoint::ToWire));

    assert!(text.starts_with("public static JsonObject toWireForecast(Forecast value) {\n"));
    assert!(text.contains("    JsonObject payload = new JsonObject();\n"));
    assert!(text.contains(
        "    if (value.getCity() != null) {\n        payload.addProperty(\"city\", value.getCity());\n    }\n"
    ));
    assert!(text.contains(
        "payload.addProperty(\"observedAt\", value.getObservedAt().toEpochMilli() / 1000.0);"
    ));
    assert!(text.contains("payload.addProperty(\"sky\", value.getSky().getValue());"));
    assert!(text.contains("payload.add(\"latest\", WeatherCodec.toWireAlert(value.getLatest()));"));
    assert!(text.ends_with("    return payload;\n}\n"));
}

#[test]
fn ShapeCodeEmitter___cpp_to_wire___widens_narrow_numerics() {
    let graph = weather();
    let emitter = ShapeCodeEmitter::new(&graph, &CPP);
    let renderer = Renderer::new(&CPP);

    let text = render_entry(&renderer, &entry(&emitter, "Forecast", EntryPoint::ToWire));

    assert!(text.contains(
        "payload.WithInteger(\"level\", static_cast<int32_t>(value.m_level.value()));"
    ));
    assert!(text.contains(
        "payload.WithDouble(\"temperature\", static_cast<double>(value.m_temperature.value()));"
    ));
    assert!(text.contains("payload.WithDouble(\"humidity\", value.m_humidity.value());"));
    assert!(text.contains("payload.WithString(\"sky\", SkyToString(value.m_sky.value()));"));
}

#[test]
fn ShapeCodeEmitter___from_wire_entry___reads_present_keys() {
    let graph = weather();
    let emitter = ShapeCodeEmitter::new(&graph, &TYPESCRIPT);
    let renderer = Renderer::new(&TYPESCRIPT);

    let text = render_entry(&renderer, &entry(&emitter, "Forecast", EntryPoint::FromWire));

    assert!(text.starts_with("export function fromWireForecast(payload: any): Forecast {\n"));
    assert!(text.contains("    let value: Forecast = {};\n"));
    assert!(text.contains("    if (payload[\"city\"] !== undefined) {\n"));
    assert!(text.contains("value.observedAt = new Date(Math.round(payload[\"observedAt\"] * 1000));"));
    assert!(text.contains("value.sky = payload[\"sky\"] as Sky;"));
    assert!(text.contains("value.hourly = payload[\"hourly\"];"));
    assert!(text.ends_with("    return value;\n}\n"));
}

#[test]
fn ShapeCodeEmitter___required_blob_absent___defaults_to_empty_payload() {
    let graph = weather();
    let emitter = ShapeCodeEmitter::new(&graph, &TYPESCRIPT);

    let function = entry(&emitter, "Reading", EntryPoint::FromWire);
    let text = render_entry(&Renderer::new(&TYPESCRIPT), &function);

    assert!(text.contains("} else {\n        value.raw = new Uint8Array(0);\n    }\n"));
}

#[test]
fn ShapeCodeEmitter___validate_entry___checks_required_members() {
    let graph = weather();
    let emitter = ShapeCodeEmitter::new(&graph, &JAVA);

    let text = render_entry(
        &Renderer::new(&JAVA),
        &entry(&emitter, "Forecast", EntryPoint::Validate),
    );

    assert!(text.contains(
        "    if (value.getCity() == null) {\n        throw new IllegalArgumentException(\"Forecast.city is required\");\n    }\n"
    ));
}

#[test]
fn ShapeCodeEmitter___python_validate___checks_element_types() {
    let graph = weather();
    let emitter = ShapeCodeEmitter::new(&graph, &PYTHON);

    let text = render_entry(
        &Renderer::new(&PYTHON),
        &entry(&emitter, "Forecast", EntryPoint::Validate),
    );

    assert!(text.starts_with("def _validate(self) -> None:\n"));
    assert!(text.contains(
        "        if not isinstance(self.temperature, (float, int)):\n            raise ValueError(\"Forecast.temperature must be a float\")\n"
    ));
    assert!(text.contains("        for hourly_item in self.hourly:\n"));
    assert!(text.contains("raise ValueError(\"Forecast.hourly[] must be a float\")"));
    assert!(text.contains("    if self.latest is not None:\n        self.latest._validate()\n"));
}

#[test]
fn ShapeCodeEmitter___union_validate___requires_exactly_one_member() {
    let graph = weather();
    let emitter = ShapeCodeEmitter::new(&graph, &JAVA);

    let function = entry(&emitter, "Alert", EntryPoint::Validate);
    let text = render_entry(&Renderer::new(&JAVA), &function);

    assert!(text.contains("    int membersSet = 0;\n"));
    assert!(text.contains("    if (value.getText() != null) {\n        membersSet += 1;\n    }\n"));
    assert!(text.contains(
        "    if (membersSet != 1) {\n        throw new IllegalArgumentException(\"Alert must have exactly one member set\");\n    }\n"
    ));
}

#[test]
fn ShapeCodeEmitter___enum_unit___has_no_entry_points() {
    let graph = weather();
    let emitter = ShapeCodeEmitter::new(&graph, &JAVA);

    let functions = emitter
        .entry_points(&DataModelObject::for_shape(&id("Sky")))
        .unwrap();

    assert!(functions.is_empty());
}

#[test]
fn ShapeCodeEmitter___placeholder_unit___gets_empty_entry_points() {
    let graph = weather();
    let emitter = ShapeCodeEmitter::new(&graph, &PYTHON);
    let unit = DataModelObject::placeholder(&id("Ping"), OperationSide::Request);

    let functions = emitter.entry_points(&unit).unwrap();

    assert_eq!(functions.len(), 3);
    assert!(functions.iter().all(|f| f.type_name == "PingRequest"));
    assert_eq!(
        functions[0].body,
        vec![
            Stmt::Declare {
                name: "payload".to_string(),
                ty: String::new(),
                value: Expr::New(Construct::WireObject),
            },
            Stmt::Return(Expr::var("payload")),
        ]
    );
    assert!(functions[2].body.is_empty());
}

#[test]
fn ShapeCodeEmitter___streaming_member___not_carried_inline() {
    let graph = weather();
    let emitter = ShapeCodeEmitter::new(&graph, &JAVA);

    let function = entry(&emitter, "SubscribeToAlertsResponse", EntryPoint::ToWire);

    assert_eq!(function.body.len(), 2);
}

// ============================================================================
// Field names
// ============================================================================

const KEYWORD_MEMBERS: &str = r#"{
  "smithy": "1.0",
  "shapes": {
    "example.route#Leg": {
      "type": "structure",
      "members": {
        "from": { "target": "smithy.api#String", "traits": { "smithy.api#required": {} } },
        "default": { "target": "smithy.api#Integer" }
      }
    }
  }
}"#;

const COLLIDING_MEMBERS: &str = r#"{
  "smithy": "1.0",
  "shapes": {
    "example.route#Stop": {
      "type": "structure",
      "members": {
        "cityId": { "target": "smithy.api#String" },
        "city_id": { "target": "smithy.api#String" }
      }
    }
  }
}"#;

fn leg() -> DataModelObject {
    DataModelObject::for_shape(&ShapeId::new("example.route", "Leg"))
}

#[test]
fn ShapeCodeEmitter___python_keyword_member___escaped_with_underscore() {
    let graph = ShapeGraph::from_json_str(KEYWORD_MEMBERS).unwrap();
    let emitter = ShapeCodeEmitter::new(&graph, &PYTHON);
    let renderer = Renderer::new(&PYTHON);

    let functions = emitter.entry_points(&leg()).unwrap();
    let to_wire = render_entry(&renderer, &functions[0]);
    let from_wire = render_entry(&renderer, &functions[1]);

    assert!(to_wire.contains("if self.from_ is not None:"));
    assert!(to_wire.contains("payload[\"from\"] = self.from_"));
    assert!(from_wire.contains("value.from_ = "));
    assert!(!to_wire.contains("self.from "));
}

#[test]
fn ShapeCodeEmitter___java_keyword_member___escaped_with_underscore() {
    let graph = ShapeGraph::from_json_str(KEYWORD_MEMBERS).unwrap();
    let emitter = ShapeCodeEmitter::new(&graph, &JAVA);
    let renderer = Renderer::new(&JAVA);

    let functions = emitter.entry_points(&leg()).unwrap();
    let to_wire = render_entry(&renderer, &functions[0]);

    assert!(to_wire.contains("value.getDefault_()"));
    assert!(to_wire.contains("payload.addProperty(\"default\", value.getDefault_());"));
    // `from` is not a Java keyword
    assert!(to_wire.contains("value.getFrom()"));
}

#[test]
fn ShapeCodeEmitter___members_colliding_after_case_conversion___rejected() {
    let graph = ShapeGraph::from_json_str(COLLIDING_MEMBERS).unwrap();
    let emitter = ShapeCodeEmitter::new(&graph, &PYTHON);
    let stop = DataModelObject::for_shape(&ShapeId::new("example.route", "Stop"));

    let err = emitter.entry_points(&stop).unwrap_err();

    assert!(matches!(err, CodegenError::InvalidModel(_)));
    let message = err.to_string();
    assert!(message.contains("example.route#Stop"));
    assert!(message.contains("cityId"));
    assert!(message.contains("city_id"));
}

#[test]
fn ShapeCodeEmitter___members_colliding_after_camel_case___rejected() {
    let graph = ShapeGraph::from_json_str(COLLIDING_MEMBERS).unwrap();
    let stop = DataModelObject::for_shape(&ShapeId::new("example.route", "Stop"));

    // `city_id` camel-cases to `cityId` as well
    for profile in [&JAVA, &CPP, &TYPESCRIPT] {
        let err = ShapeCodeEmitter::new(&graph, profile).entry_points(&stop).unwrap_err();
        assert!(err.to_string().contains(profile.display_name));
    }
}
