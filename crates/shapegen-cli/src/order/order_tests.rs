#![allow(non_snake_case)]

use super::*;
use shapegen_core::{OperationSide, ShapeId};

#[test]
fn format_order___shape_units___numbered_with_wire_type() {
    let units = vec![
        DataModelObject::for_shape(&ShapeId::new("example.weather", "Sky")),
        DataModelObject::for_shape(&ShapeId::new("example.weather", "Forecast")),
    ];

    let lines = format_order(&units);

    assert_eq!(
        lines,
        vec![
            "  1. Sky (example.weather#Sky)".to_string(),
            "  2. Forecast (example.weather#Forecast)".to_string(),
        ]
    );
}

#[test]
fn format_order___placeholder___marked() {
    let operation = ShapeId::new("example.ping", "Ping");
    let units = vec![DataModelObject::placeholder(
        &operation,
        OperationSide::Request,
    )];

    let lines = format_order(&units);

    assert_eq!(
        lines,
        vec!["  1. PingRequest (example.ping#PingRequest) [placeholder]".to_string()]
    );
}

#[test]
fn format_order___empty___no_lines() {
    assert!(format_order(&[]).is_empty());
}
