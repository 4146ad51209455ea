//! Domain layer for lutro-host
//!
//! This crate contains the data the host shares with its collaborators and
//! the string rules it applies to the scripting runtime. It has no
//! dependency on the Lua runtime itself.
//!
//! # Core Concepts
//!
//! ## Settings Record
//!
//! The display and runtime configuration shared by the host, the rendering
//! collaborator and the input collaborator. Script configuration (the `conf`
//! hook) can override `width`/`height` exactly once, during load.
//!
//! ## Script hooks
//!
//! A game script may define `conf`, `load`, `update` and `draw` on the `lutro`
//! namespace table. All four are optional.

pub mod core;
pub mod input;
pub mod script;
pub mod settings;

// Re-export commonly used types
pub use core::error::DomainError;
pub use input::JoypadButton;
pub use script::{
    HookName,
    search_path::{append_search_path, package_path_fragment, script_base_dir},
};
pub use settings::{
    DEFAULT_HEIGHT, DEFAULT_WIDTH, DisplayOverride, InputCallback, MAX_DIMENSION, Settings,
    SettingsStore,
};
