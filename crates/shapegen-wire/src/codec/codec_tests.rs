#![allow(non_snake_case)]

use super::*;
use serde_json::json;
use test_case::test_case;

fn catalog() -> ShapeGraph {
    ShapeGraph::from_json_str(include_str!("../../tests/fixtures/catalog.json")).unwrap()
}

fn id(name: &str) -> ShapeId {
    ShapeId::new("example.catalog", name)
}

fn minimal() -> Value {
    Value::structure([
        ("name", Value::string("Atlas")),
        ("cover", Value::Blob(Vec::new())),
    ])
}

// ============================================================================
// normalize
// ============================================================================

#[test]
fn WireCodec___normalize_struct___follows_member_order_and_omits_absent() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);
    let value = Value::structure([
        ("count", Value::Int(3)),
        ("name", Value::string("Atlas")),
    ]);

    let wire = codec.normalize(&id("Catalog"), &value).unwrap();

    assert_eq!(serde_json::to_string(&wire).unwrap(), r#"{"name":"Atlas","count":3}"#);
}

#[test]
fn WireCodec___normalize_empty_blob___empty_text() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let wire = codec.normalize(&id("Catalog"), &minimal()).unwrap();

    assert_eq!(wire["cover"], json!(""));
}

#[test]
fn WireCodec___normalize_blob___base64_standard() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let wire = codec
        .normalize(&ShapeId::prelude("Blob"), &Value::Blob(b"hello?".to_vec()))
        .unwrap();

    assert_eq!(wire, json!("aGVsbG8/"));
}

#[test]
fn WireCodec___normalize_timestamp___fractional_epoch_seconds() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let wire = codec
        .normalize(&ShapeId::prelude("Timestamp"), &Value::Timestamp(1_700_000_000_250))
        .unwrap();

    assert_eq!(wire, json!(1_700_000_000.25));
}

#[test]
fn WireCodec___normalize_float___widens_exactly() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let wire = codec
        .normalize(&ShapeId::prelude("Float"), &Value::Float(0.5))
        .unwrap();

    assert_eq!(wire, json!(0.5));
}

#[test]
fn WireCodec___normalize_union___single_key_object() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let wire = codec
        .normalize(&id("Choice"), &Value::union("code", Value::Int(42)))
        .unwrap();

    assert_eq!(wire, json!({ "code": 42 }));
}

#[test]
fn WireCodec___normalize_member_indirection___uses_target() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let wire = codec.normalize(&id("PageCount"), &Value::Int(120)).unwrap();

    assert_eq!(wire, json!(120));
}

#[test]
fn WireCodec___normalize_unknown_member___fails_with_path() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);
    let value = Value::structure([("title", Value::string("x")), ("isbn", Value::Int(1))]);

    let err = codec.normalize(&id("Book"), &value).unwrap_err();

    assert_eq!(
        err,
        WireError::UnknownMember {
            path: "$".to_string(),
            shape: "example.catalog#Book".to_string(),
            member: "isbn".to_string(),
        }
    );
}

#[test]
fn WireCodec___normalize_nan___out_of_range() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let err = codec
        .normalize(&ShapeId::prelude("Double"), &Value::Double(f64::NAN))
        .unwrap_err();

    assert!(matches!(err, WireError::OutOfRange { expected: ShapeType::Double, .. }));
}

#[test]
fn WireCodec___normalize_nested___paths_point_at_failure() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);
    let shelf = Value::Map(BTreeMap::from([(
        "fiction".to_string(),
        Value::List(vec![Value::structure([("title", Value::Int(1))])]),
    )]));

    let err = codec
        .normalize(&id("ShelfList"), &Value::List(vec![shelf]))
        .unwrap_err();

    assert_eq!(err.path(), Some("$[0][\"fiction\"][0].title"));
}

// ============================================================================
// serialize
// ============================================================================

#[test]
fn WireCodec___serialize___inserts_keyed_field() {
    let mut object = Map::new();

    WireCodec::serialize(&mut object, "count", json!(7));

    assert_eq!(Json::Object(object), json!({ "count": 7 }));
}

// ============================================================================
// deserialize
// ============================================================================

#[test]
fn WireCodec___deserialize_absent_required_blob___empty_payload() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let value = codec
        .deserialize(&id("Catalog"), &json!({ "name": "Atlas" }))
        .unwrap();

    assert_eq!(value.get("cover"), Some(&Value::Blob(Vec::new())));
    assert_eq!(value.get("thumbnail"), None);
}

#[test]
fn WireCodec___deserialize_empty_blob___empty_payload() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let value = codec
        .deserialize(&id("Catalog"), &json!({ "name": "Atlas", "thumbnail": "", "cover": "" }))
        .unwrap();

    assert_eq!(value.get("thumbnail"), Some(&Value::Blob(Vec::new())));
}

#[test]
fn WireCodec___deserialize_null_member___treated_as_absent() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let value = codec
        .deserialize(&id("Book"), &json!({ "title": "Dune", "pages": null }))
        .unwrap();

    assert_eq!(value, Value::structure([("title", Value::string("Dune"))]));
}

#[test]
fn WireCodec___deserialize_unknown_key___ignored() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let value = codec
        .deserialize(&id("Book"), &json!({ "title": "Dune", "publisher": "Chilton" }))
        .unwrap();

    assert_eq!(value, Value::structure([("title", Value::string("Dune"))]));
}

#[test]
fn WireCodec___deserialize_timestamp___rounds_to_millis() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let value = codec
        .deserialize(&ShapeId::prelude("Timestamp"), &json!(1.2344))
        .unwrap();

    assert_eq!(value, Value::Timestamp(1234));
}

#[test]
fn WireCodec___deserialize_bad_base64___fails_with_path() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let err = codec
        .deserialize(&id("Catalog"), &json!({ "name": "Atlas", "cover": "not base64!" }))
        .unwrap_err();

    assert!(matches!(err, WireError::Base64 { ref path, .. } if path == "$.cover"));
}

#[test_case(json!({}), 0 ; "no member")]
#[test_case(json!({ "isbn": "x", "code": 1 }), 2 ; "two members")]
#[test_case(json!({ "isbn": null }), 0 ; "null member")]
fn WireCodec___deserialize_union_arity(wire: Json, count: usize) {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let err = codec.deserialize(&id("Choice"), &wire).unwrap_err();

    assert_eq!(
        err,
        WireError::UnionArity {
            path: "$".to_string(),
            count
        }
    );
}

#[test_case("Byte", json!(128) ; "byte overflow")]
#[test_case("Short", json!(-32769) ; "short underflow")]
#[test_case("Integer", json!(2_147_483_648i64) ; "integer overflow")]
fn WireCodec___deserialize_out_of_range(shape: &str, wire: Json) {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let err = codec.deserialize(&ShapeId::prelude(shape), &wire).unwrap_err();

    assert!(matches!(err, WireError::OutOfRange { .. }));
}

#[test_case("Integer", json!("1"), "string" ; "string for integer")]
#[test_case("Integer", json!(1.5), "number" ; "fraction for integer")]
#[test_case("Boolean", json!(0), "number" ; "number for boolean")]
#[test_case("String", json!(null), "null" ; "null for string")]
fn WireCodec___deserialize_mismatch(shape: &str, wire: Json, found: &str) {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let err = codec.deserialize(&ShapeId::prelude(shape), &wire).unwrap_err();

    assert!(matches!(err, WireError::TypeMismatch { found: ref f, .. } if f == found));
}

#[test]
fn WireCodec___deserialize_big_integer___accepts_unsigned_range() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let value = codec
        .deserialize(&ShapeId::prelude("BigInteger"), &json!(u64::MAX))
        .unwrap();

    assert_eq!(value, Value::BigInt(i128::from(u64::MAX)));
}

// ============================================================================
// validate
// ============================================================================

#[test]
fn WireCodec___validate_minimal___ok() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    assert_eq!(codec.validate(&id("Catalog"), &minimal()), Ok(()));
}

#[test]
fn WireCodec___validate_missing_required___names_member_path() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);
    let value = Value::structure([("cover", Value::Blob(Vec::new()))]);

    let err = codec.validate(&id("Catalog"), &value).unwrap_err();

    assert_eq!(
        err,
        WireError::MissingRequired {
            path: "$.name".to_string()
        }
    );
}

#[test]
fn WireCodec___validate_unknown_enum_value___fails() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let err = codec
        .validate(&id("Status"), &Value::Enum("ARCHIVED".to_string()))
        .unwrap_err();

    assert!(matches!(err, WireError::UnknownEnumValue { .. }));
}

#[test]
fn WireCodec___validate_known_enum_value___ok() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    assert!(codec
        .validate(&id("Status"), &Value::Enum("published".to_string()))
        .is_ok());
}

#[test]
fn WireCodec___validate_duplicate_set_element___fails() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);
    let tags = Value::Set(vec![Value::string("a"), Value::string("b"), Value::string("a")]);

    let err = codec.validate(&id("Tags"), &tags).unwrap_err();

    assert_eq!(
        err,
        WireError::DuplicateElement {
            path: "$[2]".to_string()
        }
    );
}

#[test]
fn WireCodec___validate_wrong_kind___type_mismatch() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let err = codec
        .validate(&id("Book"), &Value::string("Dune"))
        .unwrap_err();

    assert_eq!(
        err,
        WireError::TypeMismatch {
            path: "$".to_string(),
            expected: ShapeType::Structure,
            found: "string".to_string(),
        }
    );
}

#[test]
fn WireCodec___unknown_shape___model_error() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let err = codec.validate(&id("Missing"), &Value::Bool(true)).unwrap_err();

    assert!(matches!(err, WireError::Model(_)));
    assert_eq!(err.path(), None);
}

// ============================================================================
// encode / decode
// ============================================================================

#[test]
fn WireCodec___encode_decode___round_trip() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);
    let value = Value::structure([
        ("name", Value::string("Atlas")),
        ("ratio", Value::Float(1.25)),
        ("created", Value::Timestamp(1_000)),
        ("cover", Value::Blob(vec![0, 255, 7])),
        ("status", Value::Enum("DRAFT".to_string())),
        ("pick", Value::union("isbn", Value::string("978-0"))),
    ]);

    let text = codec.encode(&id("Catalog"), &value).unwrap();
    let decoded = codec.decode(&id("Catalog"), &text).unwrap();

    assert_eq!(decoded, value);
}

#[test]
fn WireCodec___encode_invalid___rejected_before_normalizing() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let err = codec
        .encode(&id("Catalog"), &Value::structure([("count", Value::Int(1))]))
        .unwrap_err();

    assert!(matches!(err, WireError::MissingRequired { .. }));
}

#[test]
fn WireCodec___decode_malformed_json___malformed() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let err = codec.decode(&id("Catalog"), "{ not json").unwrap_err();

    assert!(matches!(err, WireError::Malformed(_)));
}

#[test_case(0 ; "epoch")]
#[test_case(1 ; "one millisecond")]
#[test_case(-1 ; "before epoch")]
#[test_case(1_700_000_000_123 ; "recent")]
fn epoch_conversion___round_trips(millis: i64) {
    assert_eq!(epoch_millis(epoch_seconds(millis)), Some(millis));
}

#[test_case(f64::INFINITY ; "infinite")]
#[test_case(f64::NAN ; "not a number")]
#[test_case(1e300 ; "beyond i64 milliseconds")]
fn epoch_millis___unrepresentable___none(seconds: f64) {
    assert_eq!(epoch_millis(seconds), None);
}

#[test_case("Float", ShapeType::Float ; "float beyond f32")]
#[test_case("Timestamp", ShapeType::Timestamp ; "timestamp beyond i64 milliseconds")]
fn WireCodec___deserialize_huge_number___out_of_range(shape: &str, expected: ShapeType) {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let err = codec
        .deserialize(&ShapeId::prelude(shape), &json!(1e300))
        .unwrap_err();

    assert!(
        matches!(&err, WireError::OutOfRange { expected: e, path, .. } if *e == expected && path == "$"),
        "{:?}",
        err
    );
}

#[test]
fn WireCodec___deserialize_float_at_f32_max___accepted() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let value = codec
        .deserialize(&ShapeId::prelude("Float"), &json!(f64::from(f32::MAX)))
        .unwrap();

    assert_eq!(value, Value::Float(f32::MAX));
}

#[test]
fn WireCodec___member_timestamp_overflow___reports_member_path() {
    let graph = catalog();
    let codec = WireCodec::new(&graph);

    let err = codec
        .deserialize(&id("Catalog"), &json!({ "created": 1e300 }))
        .unwrap_err();

    assert_eq!(err.path(), Some("$.created"));
}
