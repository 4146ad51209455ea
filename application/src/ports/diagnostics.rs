//! Diagnostic sink port: the host's error channel.
//!
//! Every failure surfaced by the scripting environment is handed to the sink
//! as human-readable text before the failing operation returns.

use std::sync::Mutex;

/// Receives error text from host operations.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, message: &str);
}

/// In-memory sink that keeps every reported message.
///
/// Used by tests and by embedders that surface errors in their own UI.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    messages: Mutex<Vec<String>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the messages reported so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.messages
            .lock()
            .map(|messages| messages.is_empty())
            .unwrap_or(true)
    }
}

impl DiagnosticSink for MemoryDiagnostics {
    fn report(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
