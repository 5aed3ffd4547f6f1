//! Configuration snapshots for reproducible projections.
//!
//! A snapshot captures which parameter tables produced a projection, so a
//! curve can be traced back to the exact file (or built-in defaults) it came
//! from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::parameters::ModelParameters;
use crate::resolve::{ConfigPaths, ConfigSource};

/// A frozen snapshot of configuration state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// When this snapshot was taken.
    pub timestamp: DateTime<Utc>,

    /// Schema version of the configuration.
    pub schema_version: String,

    /// SHA-256 hash of the parameters JSON content.
    #[serde(default)]
    pub parameters_hash: Option<String>,

    /// Path where parameters were loaded from.
    #[serde(default)]
    pub parameters_path: Option<String>,

    /// Source of parameters configuration.
    pub parameters_source: String,

    /// Hash identifying the effective tables (file hash or defaults marker).
    pub combined_hash: String,

    /// Key configuration values for quick reference.
    pub summary: ConfigSummary,
}

/// Summary of key configuration values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSummary {
    /// Male Gompertz coefficients (A, B).
    pub male_gompertz: (f64, f64),

    /// Female Gompertz coefficients (A, B).
    pub female_gompertz: (f64, f64),

    /// Hazard ratios in stage order (0 .. 4A).
    pub hazard_ratios: Vec<f64>,

    /// Number of milestone onsets.
    pub milestone_count: usize,

    /// Maximum simulated years.
    pub max_years: u32,
}

impl ConfigSnapshot {
    /// Create a new snapshot from loaded parameters.
    pub fn new(params: &ModelParameters, paths: &ConfigPaths, parameters_json: Option<&str>) -> Self {
        let parameters_hash = parameters_json.map(hash_content);
        let combined_hash = hash_content(parameters_hash.as_deref().unwrap_or("defaults"));

        ConfigSnapshot {
            timestamp: Utc::now(),
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            parameters_hash,
            parameters_path: paths.parameters.as_ref().map(|p| p.display().to_string()),
            parameters_source: paths.parameters_source.to_string(),
            combined_hash,
            summary: ConfigSummary::from_parameters(params),
        }
    }

    /// Create a snapshot with only defaults (no config files loaded).
    pub fn defaults_only() -> Self {
        let params = ModelParameters::default();
        ConfigSnapshot {
            timestamp: Utc::now(),
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            parameters_hash: None,
            parameters_path: None,
            parameters_source: ConfigSource::BuiltinDefault.to_string(),
            combined_hash: hash_content("defaults"),
            summary: ConfigSummary::from_parameters(&params),
        }
    }

    /// Serialize snapshot to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check if this snapshot matches another (same tables).
    pub fn matches(&self, other: &ConfigSnapshot) -> bool {
        self.combined_hash == other.combined_hash
    }

    /// Get a short identifier for this snapshot (first 12 chars of hash).
    pub fn short_id(&self) -> &str {
        &self.combined_hash[..12.min(self.combined_hash.len())]
    }
}

impl ConfigSummary {
    fn from_parameters(params: &ModelParameters) -> Self {
        ConfigSummary {
            male_gompertz: (params.gompertz.male.a, params.gompertz.male.b),
            female_gompertz: (params.gompertz.female.a, params.gompertz.female.b),
            hazard_ratios: params
                .hazard_ratios
                .in_order()
                .iter()
                .map(|(_, hr)| *hr)
                .collect(),
            milestone_count: params.milestones.len(),
            max_years: params.limits.max_years,
        }
    }
}

/// Hash content with SHA-256 and return hex string.
fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
