//! Use cases
//!
//! Application-level operations that orchestrate the runtime ports.

pub mod run_game;
