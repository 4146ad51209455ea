//! Application layer for lutro-host
//!
//! This crate contains port definitions and the frame loop use case.
//! It depends only on the domain layer; the Lua runtime sits behind
//! [`GameRuntimePort`] in the infrastructure layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    diagnostics::{DiagnosticSink, MemoryDiagnostics},
    frame_clock::FrameClock,
    game_runtime::{GameRuntimePort, HostError},
};
pub use use_cases::run_game::{RunGameError, RunGameInput, RunGameUseCase, RunSummary};
