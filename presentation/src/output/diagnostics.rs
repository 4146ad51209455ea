//! Stderr diagnostic sink: the host's error channel for terminal use.

use lutro_application::DiagnosticSink;
use std::io::Write;

/// Writes each reported message verbatim to stderr, one per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrDiagnostics;

impl DiagnosticSink for StderrDiagnostics {
    fn report(&self, message: &str) {
        let mut stderr = std::io::stderr().lock();
        // Nothing sensible to do if stderr itself is gone.
        let _ = writeln!(stderr, "{}", message);
    }
}
