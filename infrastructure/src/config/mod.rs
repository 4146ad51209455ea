//! Configuration file loading for lutro-host
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `LUTRO_<SECTION>__<KEY>` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./lutro.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/lutro/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileDisplayConfig, FileRuntimeConfig, HostFileConfig,
};
pub use loader::ConfigLoader;
