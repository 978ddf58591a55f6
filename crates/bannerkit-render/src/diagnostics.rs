//! Sinks for recoverable render failures.

use std::sync::{Arc, Mutex};

/// A failure the renderer recovered from.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFailure {
    /// Image source or element id the failure concerns.
    pub source: String,
    pub error: String,
}

impl RenderFailure {
    pub fn new(source: impl Into<String>, error: impl ToString) -> Self {
        Self {
            source: source.into(),
            error: error.to_string(),
        }
    }
}

/// Receives non-fatal failures. Rendering continues after `report`.
pub trait ErrorSink {
    fn report(&self, failure: RenderFailure);
}

/// Forwards failures to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ErrorSink for LogSink {
    fn report(&self, failure: RenderFailure) {
        log::warn!("Render failure for {}: {}", failure.source, failure.error);
    }
}

/// Keeps failures in memory; clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    failures: Arc<Mutex<Vec<RenderFailure>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> Vec<RenderFailure> {
        match self.failures.lock() {
            Ok(failures) => failures.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ErrorSink for MemorySink {
    fn report(&self, failure: RenderFailure) {
        log::debug!("Recorded render failure for {}", failure.source);
        match self.failures.lock() {
            Ok(mut failures) => failures.push(failure),
            Err(poisoned) => poisoned.into_inner().push(failure),
        }
    }
}
