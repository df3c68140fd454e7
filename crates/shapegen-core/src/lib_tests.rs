#![allow(non_snake_case)]

use super::*;

// LogLevel tests

#[test]
fn LogLevel___ordering___trace_less_than_debug() {
    assert!(LogLevel::Trace < LogLevel::Debug);
}

#[test]
fn LogLevel___ordering___warn_less_than_error() {
    assert!(LogLevel::Warn < LogLevel::Error);
}

#[test]
fn LogLevel___from_str___is_case_insensitive() {
    let level: LogLevel = "DeBuG".parse().unwrap();

    assert_eq!(level, LogLevel::Debug);
}

#[test]
fn LogLevel___from_str___accepts_warning_alias() {
    let level: LogLevel = "warning".parse().unwrap();

    assert_eq!(level, LogLevel::Warn);
}

#[test]
fn LogLevel___from_str___unknown_returns_settings_error() {
    let result = "loud".parse::<LogLevel>();

    assert!(matches!(result, Err(CodegenError::SettingsError(_))));
}

#[test]
fn LogLevel___display___uppercase() {
    assert_eq!(LogLevel::Warn.to_string(), "WARN");
    assert_eq!(LogLevel::Off.to_string(), "OFF");
}
