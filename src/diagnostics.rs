//! Diagnostics sink for best-effort failures.
//!
//! Documentation lookup never fails outward, so problems found along the way
//! (unreadable or malformed resource files) are reported here instead. The
//! sink is passed explicitly to the components that need it, which keeps them
//! testable without a global logger.

use std::sync::{Arc, Mutex};

/// Severity of a diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Warn,
}

/// A single recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub level: Level,
    /// Component that emitted the event (e.g. "resource").
    pub target: &'static str,
    pub message: String,
}

/// Receives diagnostic events from the resolution pipeline.
pub trait DiagnosticsSink: Send + Sync {
    fn emit(&self, event: Event);

    fn debug(&self, target: &'static str, message: String) {
        self.emit(Event {
            level: Level::Debug,
            target,
            message,
        });
    }

    fn warn(&self, target: &'static str, message: String) {
        self.emit(Event {
            level: Level::Warn,
            target,
            message,
        });
    }
}

/// Forwards events to the `tracing` subscriber installed by the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn emit(&self, event: Event) {
        match event.level {
            Level::Debug => tracing::debug!(target: "shelldoc", component = event.target, "{}", event.message),
            Level::Warn => tracing::warn!(target: "shelldoc", component = event.target, "{}", event.message),
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn emit(&self, _event: Event) {}
}

/// Keeps events in memory so callers can inspect them afterwards.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Event>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events recorded so far.
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.events().is_empty()
    }
}

impl DiagnosticsSink for RecordingSink {
    fn emit(&self, event: Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// The sink used when none is supplied.
pub fn default_sink() -> Arc<dyn DiagnosticsSink> {
    Arc::new(TracingSink)
}
