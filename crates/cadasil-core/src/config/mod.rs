//! Parameter loading for the CLI.
//!
//! Resolves the parameters file (CLI > env > XDG > /etc > built-in), reads
//! it, validates it semantically and records a snapshot of what was used.

pub use cadasil_config::{
    resolve_config, validate_parameters, ConfigPaths, ConfigSnapshot, ConfigSource,
    ModelParameters, ValidationError,
};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while loading parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Parameters file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid parameters in {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },

    #[error("Semantic validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl From<ConfigError> for cadasil_common::Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotFound { .. } => cadasil_common::Error::Config(err.to_string()),
            ConfigError::IoError { source, .. } => cadasil_common::Error::Io(source),
            ConfigError::Invalid { source, .. } | ConfigError::ValidationError(source) => {
                source.into()
            }
        }
    }
}

/// Where to look for parameters.
#[derive(Debug, Default, Clone)]
pub struct ConfigOptions {
    /// Explicit config directory.
    pub config_dir: Option<PathBuf>,
    /// Explicit parameters file; must exist when given.
    pub parameters_path: Option<PathBuf>,
}

/// Validated parameters with provenance.
#[derive(Debug, Clone)]
pub struct LoadedParameters {
    pub parameters: ModelParameters,
    pub paths: ConfigPaths,
    pub snapshot: ConfigSnapshot,
}

/// Load and validate parameters using the standard resolution order.
pub fn load_parameters(options: &ConfigOptions) -> Result<LoadedParameters, ConfigError> {
    if let Some(path) = &options.parameters_path {
        if !path.exists() {
            return Err(ConfigError::NotFound { path: path.clone() });
        }
    }

    let paths = resolve_config(
        options.parameters_path.as_deref(),
        options.config_dir.as_deref(),
    );

    let Some(path) = paths.parameters.clone() else {
        debug!("no parameters file found, using built-in tables");
        return Ok(LoadedParameters {
            parameters: ModelParameters::default(),
            paths,
            snapshot: ConfigSnapshot::defaults_only(),
        });
    };

    let (parameters, content) = read_parameters(&path)?;
    validate_parameters(&parameters).map_err(|source| ConfigError::Invalid {
        path: path.clone(),
        source,
    })?;

    let snapshot = ConfigSnapshot::new(&parameters, &paths, Some(&content));
    info!(
        path = %path.display(),
        source = %paths.parameters_source,
        snapshot = snapshot.short_id(),
        "loaded model parameters"
    );

    Ok(LoadedParameters {
        parameters,
        paths,
        snapshot,
    })
}

fn read_parameters(path: &Path) -> Result<(ModelParameters, String), ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    let parameters =
        ModelParameters::from_json(&content).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
    Ok((parameters, content))
}
