//! CADASIL prognosis configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for parameters.json (mortality curves, stage hazard
//!   ratios, milestones, simulation limits)
//! - Config resolution (CLI → env → XDG → system → defaults)
//! - Semantic validation
//! - Config snapshots for reproducible projections

pub mod parameters;
pub mod resolve;
pub mod snapshot;
pub mod validate;

pub use parameters::{Milestone, ModelParameters, SexCurves, SimulationLimits, StageHazardRatios};
pub use resolve::{resolve_config, ConfigPaths, ConfigSource};
pub use snapshot::ConfigSnapshot;
pub use validate::{validate_parameters, ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
