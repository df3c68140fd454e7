//! shapegen-logging - Tracing setup and diagnostics collection
//!
//! This crate provides:
//! - [`DiagnosticsLayer`] tracing layer that records warnings and errors
//! - [`DiagnosticsCollector`] holding what a run has reported
//! - [`init_logging`] to install stderr output with a reloadable level

mod diagnostics;
mod layer;
mod reload;

pub use diagnostics::{Diagnostic, DiagnosticsCollector};
pub use layer::{DiagnosticsLayer, init_logging};
pub use reload::{ReloadHandle, level_filter};
pub use shapegen_core::LogLevel;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Diagnostic, DiagnosticsCollector, DiagnosticsLayer, LogLevel, ReloadHandle, init_logging,
    };
}
