//! Configuration file loader with multi-source merging

use super::file_config::HostFileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file name
const PROJECT_CONFIG_FILE: &str = "lutro.toml";

/// Prefix for environment overrides (`LUTRO_RUNTIME__FPS=30`)
const ENV_PREFIX: &str = "LUTRO_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `LUTRO_` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./lutro.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/lutro/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<HostFileConfig, Box<figment::Error>> {
        if let Some(path) = config_path {
            Self::require_file(path)?;
        }
        let global = Self::global_config_path();
        let project = Self::project_config_path();
        Self::figment(
            global.as_deref(),
            project.as_deref(),
            config_path.map(PathBuf::as_path),
        )
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> HostFileConfig {
        HostFileConfig::default()
    }

    /// File layers in priority order, lowest first. Missing files are skipped.
    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(HostFileConfig::default()));

        if let Some(path) = global.filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = project.filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }
        figment
    }

    /// An explicitly named config file must exist; figment skips missing files.
    fn require_file(path: &Path) -> Result<(), Box<figment::Error>> {
        if path.is_file() {
            Ok(())
        } else {
            Err(Box::new(figment::Error::from(format!(
                "config file not found: {}",
                path.display()
            ))))
        }
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/lutro/config.toml if set,
    /// otherwise the platform config directory equivalent
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("lutro").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_CONFIG_FILE);
        path.exists().then_some(path)
    }

    /// Describe the config file locations being used (for --show-config)
    pub fn describe_sources() -> Vec<String> {
        let mut lines = Vec::new();

        match Self::project_config_path() {
            Some(path) => lines.push(format!("[FOUND] Project: {}", path.display())),
            None => lines.push(format!("[     ] Project: ./{}", PROJECT_CONFIG_FILE)),
        }

        if let Some(path) = Self::global_config_path() {
            let marker = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("[{}] Global:  {}", marker, path.display()));
        }

        lines.push(format!("[     ] Env:     {}<SECTION>__<KEY>", ENV_PREFIX));
        lines.push("[     ] Default: built-in defaults".to_string());
        lines
    }
}
