#![allow(non_snake_case)]

use super::*;
use crate::profile::{CPP, JAVA, PYTHON, TYPESCRIPT};
use test_case::test_case;

fn map_prelude(profile: &'static BackendProfile, name: &str) -> CodegenResult<TargetType> {
    let graph = ShapeGraph::builder().build()?;
    TypeMapper::new(&graph, profile).map(&ShapeId::prelude(name))
}

#[test_case("Boolean", "bool" ; "boolean")]
#[test_case("Byte", "int8_t" ; "byte")]
#[test_case("Short", "int16_t" ; "short")]
#[test_case("Integer", "int32_t" ; "integer")]
#[test_case("Long", "int64_t" ; "long")]
#[test_case("BigInteger", "int64_t" ; "big integer")]
#[test_case("Float", "float" ; "float")]
#[test_case("Double", "double" ; "double")]
#[test_case("Timestamp", "Aws::Crt::DateTime" ; "timestamp")]
#[test_case("Blob", "Aws::Crt::Vector<uint8_t>" ; "blob")]
fn TypeMapper___cpp_scalars(shape: &str, expected: &str) {
    assert_eq!(map_prelude(&CPP, shape).unwrap().name, expected);
}

#[test_case("Boolean", "boolean", "Boolean" ; "boolean")]
#[test_case("Byte", "byte", "Byte" ; "byte")]
#[test_case("Integer", "int", "Integer" ; "integer")]
#[test_case("Float", "float", "Float" ; "float")]
#[test_case("Double", "double", "Double" ; "double")]
fn TypeMapper___java_primitives_have_boxed_form(shape: &str, name: &str, boxed: &str) {
    let ty = map_prelude(&JAVA, shape).unwrap();

    assert_eq!(ty.name, name);
    assert_eq!(ty.generic_arg(), boxed);
}

#[test_case(&PYTHON, "Double", "float" ; "python double")]
#[test_case(&PYTHON, "BigInteger", "int" ; "python big integer")]
#[test_case(&PYTHON, "Blob", "bytes" ; "python blob")]
#[test_case(&TYPESCRIPT, "Long", "number" ; "typescript long")]
#[test_case(&TYPESCRIPT, "Document", "any" ; "typescript document")]
#[test_case(&JAVA, "Timestamp", "Instant" ; "java timestamp")]
fn TypeMapper___scalar_spelling(profile: &'static BackendProfile, shape: &str, expected: &str) {
    assert_eq!(map_prelude(profile, shape).unwrap().name, expected);
}

#[test_case(&TYPESCRIPT ; "typescript")]
#[test_case(&JAVA ; "java")]
fn TypeMapper___big_integer_unsupported(profile: &'static BackendProfile) {
    assert!(matches!(
        map_prelude(profile, "BigInteger"),
        Err(CodegenError::UnsupportedShape { .. })
    ));
}
