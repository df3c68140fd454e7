//! Warning and error collection

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use shapegen_core::LogLevel;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One recorded warning or error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: LogLevel,
    pub target: String,
    pub message: String,
}

/// Global diagnostics collector
static COLLECTOR: OnceCell<DiagnosticsCollector> = OnceCell::new();

/// Counts and messages of the warnings and errors seen during a run
pub struct DiagnosticsCollector {
    records: RwLock<Vec<Diagnostic>>,
    warnings: AtomicUsize,
    errors: AtomicUsize,
}

impl DiagnosticsCollector {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            warnings: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
        }
    }

    /// Get the global collector instance
    pub fn global() -> &'static DiagnosticsCollector {
        COLLECTOR.get_or_init(DiagnosticsCollector::new)
    }

    /// Record an event; anything below WARN is ignored
    pub fn record(&self, level: LogLevel, target: &str, message: &str) {
        match level {
            LogLevel::Warn => self.warnings.fetch_add(1, Ordering::SeqCst),
            LogLevel::Error => self.errors.fetch_add(1, Ordering::SeqCst),
            _ => return,
        };

        self.records.write().push(Diagnostic {
            level,
            target: target.to_string(),
            message: message.to_string(),
        });
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.load(Ordering::SeqCst)
    }

    pub fn error_count(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Snapshot of everything recorded so far, oldest first
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.records.read().clone()
    }

    pub fn clear(&self) {
        let mut records = self.records.write();
        records.clear();
        self.warnings.store(0, Ordering::SeqCst);
        self.errors.store(0, Ordering::SeqCst);
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new()
    }
}
