//! CADASIL prognosis common types and errors.
//!
//! This crate provides foundational types shared across the workspace:
//! - Patient sex and NOTCH3-SVD disease stage enumerations
//! - Population milestone onset table
//! - Common error types
//! - Output format selection

pub mod error;
pub mod output;
pub mod sex;
pub mod stage;

pub use error::{Error, ErrorCategory, Result};
pub use output::OutputFormat;
pub use sex::Sex;
pub use stage::{DiseaseStage, MilestoneOnset, StageGrading, MILESTONE_ONSETS};

/// Schema version stamped on every serialized projection.
pub const SCHEMA_VERSION: &str = "1.0.0";
