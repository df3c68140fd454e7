#![allow(non_snake_case)]

use super::*;

#[test]
fn Value___structure___keeps_member_order() {
    let value = Value::structure([("b", Value::Int(1)), ("a", Value::Bool(true))]);

    let Value::Struct(members) = &value else {
        panic!("expected a structure");
    };
    let names: Vec<&str> = members.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, vec!["b", "a"]);
}

#[test]
fn Value___get___finds_struct_and_union_members() {
    let structure = Value::structure([("city", Value::string("Oslo"))]);
    let union = Value::union("code", Value::Int(7));

    assert_eq!(structure.get("city"), Some(&Value::string("Oslo")));
    assert_eq!(structure.get("missing"), None);
    assert_eq!(union.get("code"), Some(&Value::Int(7)));
    assert_eq!(union.get("text"), None);
}

#[test]
fn Value___get_on_scalar___is_none() {
    assert_eq!(Value::Int(1).get("x"), None);
}

#[test]
fn Value___kind_name___names_variant() {
    assert_eq!(Value::Blob(Vec::new()).kind_name(), "blob");
    assert_eq!(Value::union("a", Value::Bool(false)).kind_name(), "union");
}
