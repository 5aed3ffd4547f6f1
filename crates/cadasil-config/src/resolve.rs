//! Configuration resolution and path discovery.
//!
//! Resolution order: CLI arguments → environment variables → XDG paths →
//! system config → defaults.

use std::path::{Path, PathBuf};

/// Discovered configuration file paths.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Path to parameters.json (or None if not found).
    pub parameters: Option<PathBuf>,

    /// Source of the parameters config (for diagnostics).
    pub parameters_source: ConfigSource,
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Found in /etc/cadasil-prognosis/.
    SystemConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::SystemConfig => write!(f, "system config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
pub const ENV_PARAMETERS_PATH: &str = "CADASIL_PARAMETERS";
pub const ENV_CONFIG_DIR: &str = "CADASIL_CONFIG_DIR";

/// Standard config file name.
pub const PARAMETERS_FILENAME: &str = "parameters.json";

/// Application name for XDG directories.
const APP_NAME: &str = "cadasil-prognosis";

/// Resolve configuration paths using the standard resolution order.
///
/// 1. Explicit CLI file path (if it exists)
/// 2. Explicit CLI config directory + filename
/// 3. Environment variable (CADASIL_PARAMETERS)
/// 4. CADASIL_CONFIG_DIR environment variable + filename
/// 5. XDG config directory (~/.config/cadasil-prognosis/)
/// 6. System config (/etc/cadasil-prognosis/)
/// 7. Built-in defaults (None)
pub fn resolve_config(cli_parameters: Option<&Path>, cli_config_dir: Option<&Path>) -> ConfigPaths {
    let mut paths = ConfigPaths::default();
    paths.parameters = resolve_single_config(
        cli_parameters,
        cli_config_dir,
        ENV_PARAMETERS_PATH,
        PARAMETERS_FILENAME,
        &mut paths.parameters_source,
    );
    paths
}

/// Resolve a single configuration file path.
fn resolve_single_config(
    cli_path: Option<&Path>,
    cli_dir: Option<&Path>,
    env_var: &str,
    filename: &str,
    source: &mut ConfigSource,
) -> Option<PathBuf> {
    // 1. CLI argument
    if let Some(path) = cli_path {
        if path.exists() {
            *source = ConfigSource::CliArgument;
            return Some(path.to_path_buf());
        }
    }

    // 2. CLI config directory
    if let Some(dir) = cli_dir {
        let path = dir.join(filename);
        if path.exists() {
            *source = ConfigSource::CliArgument;
            return Some(path);
        }
    }

    // 3. Environment variable (direct path)
    if let Ok(env_path) = std::env::var(env_var) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            *source = ConfigSource::Environment;
            return Some(path);
        }
    }

    // 4. Environment variable (config dir)
    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = PathBuf::from(config_dir).join(filename);
        if path.exists() {
            *source = ConfigSource::Environment;
            return Some(path);
        }
    }

    // 5. XDG config directory
    if let Some(xdg_config) = dirs::config_dir() {
        let path = xdg_config.join(APP_NAME).join(filename);
        if path.exists() {
            *source = ConfigSource::XdgConfig;
            return Some(path);
        }
    }

    // 6. System config
    let system_path = system_config_dir().join(filename);
    if system_path.exists() {
        *source = ConfigSource::SystemConfig;
        return Some(system_path);
    }

    // 7. Built-in default (None)
    *source = ConfigSource::BuiltinDefault;
    None
}

/// Get the XDG config directory for cadasil-prognosis.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the system config directory.
pub fn system_config_dir() -> PathBuf {
    PathBuf::from("/etc").join(APP_NAME)
}
