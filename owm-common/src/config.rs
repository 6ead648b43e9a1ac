//! Configuration loading and config file resolution

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Config file resolution, priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. `<config dir>/owm/<module>.toml` if it exists
///
/// Returns None when no source names a file.
pub fn resolve_config_path(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    module_name: &str,
) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Per-user config directory
    default_config_path(module_name).filter(|path| path.exists())
}

/// Platform config path for a module, e.g. `~/.config/owm/owm-patcher.toml`
pub fn default_config_path(module_name: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("owm").join(format!("{}.toml", module_name)))
}

/// Load a TOML config file, falling back to defaults when it does not exist
///
/// A missing file is not fatal (warning + defaults); a file that exists but
/// cannot be read or parsed is.
pub fn load_toml_or_default<T>(path: Option<&Path>) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let Some(path) = path else {
        info!("No config file given, using built-in defaults");
        return Ok(T::default());
    };

    if !path.exists() {
        warn!(
            "Config file not found: {} (using built-in defaults)",
            path.display()
        );
        return Ok(T::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config = toml::from_str(&content)?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}
