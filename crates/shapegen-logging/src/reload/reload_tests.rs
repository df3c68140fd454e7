#![allow(non_snake_case)]

use super::*;
use tracing_subscriber::prelude::*;

#[test]
fn ReloadHandle___new___not_initialized() {
    let handle = ReloadHandle::new();

    assert!(!handle.is_initialized());
}

#[test]
fn ReloadHandle___reload_without_handle___returns_error() {
    let handle = ReloadHandle::new();

    let result = handle.reload_level(LogLevel::Debug);

    assert!(result.is_err());
}

#[test]
fn ReloadHandle___reload_with_live_subscriber___succeeds() {
    let (filter, inner) = reload::Layer::new(LevelFilter::INFO);
    let _subscriber = tracing_subscriber::registry().with(filter);
    let handle = ReloadHandle::new();
    handle.set_handle(inner);

    let result = handle.reload_level(LogLevel::Debug);

    assert!(handle.is_initialized());
    assert_eq!(result, Ok(()));
}

#[test]
fn ReloadHandle___reload_after_subscriber_dropped___returns_error() {
    let (filter, inner) = reload::Layer::new(LevelFilter::INFO);
    let subscriber = tracing_subscriber::registry().with(filter);
    let handle = ReloadHandle::new();
    handle.set_handle(inner);
    drop(subscriber);

    let result = handle.reload_level(LogLevel::Warn);

    assert!(result.is_err());
}

#[test]
fn ReloadHandle___global___returns_same_instance() {
    assert!(std::ptr::eq(ReloadHandle::global(), ReloadHandle::global()));
}

#[test]
fn level_filter___every_level___maps_to_matching_filter() {
    assert_eq!(level_filter(LogLevel::Trace), LevelFilter::TRACE);
    assert_eq!(level_filter(LogLevel::Debug), LevelFilter::DEBUG);
    assert_eq!(level_filter(LogLevel::Info), LevelFilter::INFO);
    assert_eq!(level_filter(LogLevel::Warn), LevelFilter::WARN);
    assert_eq!(level_filter(LogLevel::Error), LevelFilter::ERROR);
    assert_eq!(level_filter(LogLevel::Off), LevelFilter::OFF);
}
