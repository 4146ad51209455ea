//! Game runtime port: interface for the scripting host.
//!
//! This port abstracts the runtime so that:
//! - The application layer doesn't depend on mlua
//! - The frame loop can be tested against a scripted fake

use lutro_domain::HookName;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error from a host operation.
///
/// Script-originated variants display the runtime's message verbatim; that
/// text is what the diagnostic stream receives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// A capability module failed to register or resolve during initialization.
    #[error("capability '{name}' failed to initialize: {message}")]
    Capability { name: String, message: String },

    /// The scripting environment itself could not be prepared.
    #[error("runtime setup failed: {0}")]
    Runtime(String),

    /// Reading, executing or configuring the script failed.
    #[error("{message}")]
    ScriptLoad { path: PathBuf, message: String },

    /// A frame hook raised an error; the script module stays intact.
    #[error("{message}")]
    Hook { hook: HookName, message: String },

    /// `run_frame` was called without a successfully loaded script.
    #[error("no script loaded")]
    NotLoaded,
}

impl HostError {
    /// Errors the host cannot recover from by retrying with another script.
    pub fn is_fatal(&self) -> bool {
        matches!(self, HostError::Capability { .. } | HostError::Runtime(_))
    }

    /// Errors that abort only the current frame.
    pub fn is_frame_error(&self) -> bool {
        matches!(self, HostError::Hook { .. })
    }
}

/// Port for the scripting host.
///
/// An implementation owns exactly one scripting environment. All calls run to
/// completion on the calling thread.
pub trait GameRuntimePort {
    /// Load the script at `path` and run its `conf` and `load` hooks.
    ///
    /// Supported once per runtime instance.
    fn load(&mut self, path: &Path) -> Result<(), HostError>;

    /// Run one frame: `update(delta)` then `draw()`.
    ///
    /// `draw` is skipped when `update` fails.
    fn run_frame(&mut self, delta: f64) -> Result<(), HostError>;

    /// Whether a script module is loaded and callable.
    fn is_loaded(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_errors_display_verbatim() {
        let err = HostError::ScriptLoad {
            path: PathBuf::from("game/main.lua"),
            message: "game/main.lua:3: unexpected symbol near '}'".to_string(),
        };
        assert_eq!(err.to_string(), "game/main.lua:3: unexpected symbol near '}'");

        let err = HostError::Hook {
            hook: HookName::Update,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_error_classification() {
        let capability = HostError::Capability {
            name: "lutro.graphics".to_string(),
            message: "module not found".to_string(),
        };
        assert!(capability.is_fatal());
        assert!(!capability.is_frame_error());

        let hook = HostError::Hook {
            hook: HookName::Draw,
            message: "x".to_string(),
        };
        assert!(hook.is_frame_error());
        assert!(!hook.is_fatal());

        assert!(!HostError::NotLoaded.is_fatal());
        assert!(!HostError::NotLoaded.is_frame_error());
    }
}
