#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// ============================================================================
// Parameterized error code mapping tests
// ============================================================================

fn id() -> ShapeId {
    ShapeId::new("ns", "Shape")
}

#[test_case(CodegenError::MissingOperationIo { operation: id() }, 1 ; "missing operation io")]
#[test_case(CodegenError::UnknownShape(id()), 2 ; "unknown shape")]
#[test_case(CodegenError::NoGenerator(id()), 3 ; "no generator")]
#[test_case(
    CodegenError::UnsupportedShape { shape: id(), kind: ShapeType::BigInteger, backend: "java".into() },
    4 ;
    "unsupported shape"
)]
#[test_case(CodegenError::NonStringMapKey { map: id(), key: id() }, 5 ; "non string map key")]
#[test_case(CodegenError::MemberCycle(id()), 6 ; "member cycle")]
#[test_case(CodegenError::InvalidShapeId("x".into()), 7 ; "invalid shape id")]
#[test_case(CodegenError::ServiceNotFound(id()), 8 ; "service not found")]
#[test_case(CodegenError::NotImplemented("x".into()), 9 ; "not implemented")]
#[test_case(CodegenError::InvalidModel("x".into()), 10 ; "invalid model")]
#[test_case(CodegenError::SettingsError("x".into()), 11 ; "settings error")]
#[test_case(CodegenError::Io("x".into()), 12 ; "io")]
fn CodegenError___variant___maps_to_correct_code(error: CodegenError, expected_code: u32) {
    assert_eq!(error.error_code(), expected_code);
}

#[test_case(CodegenError::UnknownShape(id()), "ns#Shape")]
#[test_case(CodegenError::NoGenerator(id()), "ns#Shape")]
#[test_case(CodegenError::MemberCycle(id()), "ns#Shape")]
#[test_case(CodegenError::ServiceNotFound(id()), "ns#Shape")]
#[test_case(CodegenError::MissingOperationIo { operation: id() }, "ns#Shape")]
fn CodegenError___shape_variants___message_contains_id(error: CodegenError, expected: &str) {
    assert!(
        error.to_string().contains(expected),
        "'{}' should mention {}",
        error,
        expected
    );
}
