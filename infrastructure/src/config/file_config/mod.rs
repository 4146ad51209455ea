//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.

mod display;
mod runtime;

pub use display::FileDisplayConfig;
pub use runtime::FileRuntimeConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("runtime.fps cannot be 0")]
    ZeroFps,

    #[error("runtime.frames cannot be 0 (leave it unset to run until stopped)")]
    ZeroFrames,
}

/// Complete host configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostFileConfig {
    /// Initial display settings
    pub display: FileDisplayConfig,
    /// Frame loop settings
    pub runtime: FileRuntimeConfig,
}

impl HostFileConfig {
    /// Validate the configuration.
    ///
    /// Display dimensions are not checked here; the rendering collaborator
    /// validates them once the script has had its say.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.runtime.fps == 0 {
            return Err(ConfigValidationError::ZeroFps);
        }
        if self.runtime.frames == Some(0) {
            return Err(ConfigValidationError::ZeroFrames);
        }
        Ok(())
    }
}
