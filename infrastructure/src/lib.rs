//! Infrastructure layer for lutro-host
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the Lua runtime host, frame clocks and
//! configuration file loading.

pub mod config;
pub mod scripting;
pub mod timing;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileDisplayConfig, FileRuntimeConfig, HostFileConfig,
};
pub use scripting::{CAPABILITIES, Capability, CapabilityContext, LuaRuntimeHost};
pub use timing::{FixedStepClock, PacedClock};
