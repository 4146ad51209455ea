//! Presentation layer for lutro-host
//!
//! This crate contains the CLI definition, the stderr diagnostic sink
//! and console output formatting.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use output::console::ConsoleFormatter;
pub use output::diagnostics::StderrDiagnostics;
