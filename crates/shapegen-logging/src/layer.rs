//! Tracing layer that records warnings and errors

use crate::diagnostics::DiagnosticsCollector;
use crate::reload::{ReloadHandle, level_filter};
use shapegen_core::LogLevel;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Tracing layer that copies WARN and ERROR events into a collector
pub struct DiagnosticsLayer {
    collector: &'static DiagnosticsCollector,
}

impl DiagnosticsLayer {
    /// Create a layer over the global collector
    pub fn new() -> Self {
        Self {
            collector: DiagnosticsCollector::global(),
        }
    }

    /// Create a layer with a specific collector
    pub fn with_collector(collector: &'static DiagnosticsCollector) -> Self {
        Self { collector }
    }

    fn convert_level(level: &Level) -> LogLevel {
        match *level {
            Level::TRACE => LogLevel::Trace,
            Level::DEBUG => LogLevel::Debug,
            Level::INFO => LogLevel::Info,
            Level::WARN => LogLevel::Warn,
            Level::ERROR => LogLevel::Error,
        }
    }
}

impl Default for DiagnosticsLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for DiagnosticsLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Self::convert_level(metadata.level());
        if level < LogLevel::Warn {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.collector
            .record(level, metadata.target(), &visitor.finish());
    }
}

/// Collects the message and renders other fields as `name=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            return self.message;
        }
        let fields = self.fields.join(" ");
        if self.message.is_empty() {
            fields
        } else {
            format!("{} {}", self.message, fields)
        }
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }
}

/// Install the global subscriber: level filter, stderr output, diagnostics
///
/// Returns `false` when a global subscriber was already installed, in which
/// case nothing changes.
pub fn init_logging(level: LogLevel) -> bool {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, reload};

    let (filter, handle) = reload::Layer::new(level_filter(level));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(DiagnosticsLayer::new());

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return false;
    }

    ReloadHandle::global().set_handle(handle);
    true
}
