//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod diagnostics;
pub mod frame_clock;
pub mod game_runtime;
