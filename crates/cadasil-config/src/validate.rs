//! Configuration validation errors and semantic validation.

use thiserror::Error;

use crate::parameters::{ModelParameters, SimulationLimits};
use cadasil_common::Sex;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::SemanticError(_) => 63,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

impl From<ValidationError> for cadasil_common::Error {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::VersionMismatch { expected, actual } => {
                cadasil_common::Error::SchemaMismatch { expected, actual }
            }
            ValidationError::IoError(msg) | ValidationError::ParseError(msg) => {
                cadasil_common::Error::Config(msg)
            }
            other => cadasil_common::Error::InvalidParameters(other.to_string()),
        }
    }
}

/// Longest horizon a parameter file may request.
pub const MAX_SIMULATED_YEARS: u32 = 150;

/// Validate model parameters semantically.
///
/// Checks:
/// - schema version
/// - Gompertz coefficients are finite and positive
/// - every hazard ratio is finite and >= 1.0, non-decreasing with severity
/// - milestones have positive finite ages, non-empty labels, ascending order
/// - simulation limits are usable
pub fn validate_parameters(params: &ModelParameters) -> ValidationResult<()> {
    if params.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: params.schema_version.clone(),
        });
    }

    for sex in Sex::ALL {
        let curve = params.curve(sex);
        if !curve.is_valid() {
            return Err(ValidationError::InvalidValue {
                field: format!("gompertz.{}", sex.to_string().to_lowercase()),
                message: format!(
                    "A and B must be finite and positive, got A={} B={}",
                    curve.a, curve.b
                ),
            });
        }
    }

    let mut previous: Option<f64> = None;
    for (stage, hr) in params.hazard_ratios.in_order() {
        let field = format!("hazard_ratios.stage_{}", stage.code().to_lowercase());
        if !hr.is_finite() || hr < 1.0 {
            return Err(ValidationError::InvalidValue {
                field,
                message: format!("Must be finite and >= 1.0, got {}", hr),
            });
        }
        if let Some(prev) = previous {
            if hr < prev {
                return Err(ValidationError::SemanticError(format!(
                    "{} ({}) is lower than the preceding stage ({}); hazard ratios must not decrease with severity",
                    field, hr, prev
                )));
            }
        }
        previous = Some(hr);
    }

    let mut last_age = f64::NEG_INFINITY;
    for (i, milestone) in params.milestones.iter().enumerate() {
        if !milestone.age.is_finite() || milestone.age <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: format!("milestones[{}].age", i),
                message: format!("Must be finite and positive, got {}", milestone.age),
            });
        }
        if milestone.label.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: format!("milestones[{}].label", i),
                message: "Must not be empty".to_string(),
            });
        }
        if milestone.age <= last_age {
            return Err(ValidationError::SemanticError(format!(
                "milestones must be sorted by strictly increasing age (milestones[{}].age = {})",
                i, milestone.age
            )));
        }
        last_age = milestone.age;
    }

    validate_limits(&params.limits)
}

fn validate_limits(limits: &SimulationLimits) -> ValidationResult<()> {
    if limits.max_years == 0 || limits.max_years > MAX_SIMULATED_YEARS {
        return Err(ValidationError::InvalidValue {
            field: "limits.max_years".to_string(),
            message: format!(
                "Must be between 1 and {}, got {}",
                MAX_SIMULATED_YEARS, limits.max_years
            ),
        });
    }

    if !(limits.survival_floor > 0.0 && limits.survival_floor < 0.5) {
        return Err(ValidationError::InvalidValue {
            field: "limits.survival_floor".to_string(),
            message: format!("Must be in (0, 0.5), got {}", limits.survival_floor),
        });
    }

    if !limits.adult_age_floor.is_finite() || limits.adult_age_floor < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: "limits.adult_age_floor".to_string(),
            message: format!("Must be finite and non-negative, got {}", limits.adult_age_floor),
        });
    }

    if !limits.max_age.is_finite() || limits.max_age <= limits.adult_age_floor {
        return Err(ValidationError::InvalidValue {
            field: "limits.max_age".to_string(),
            message: format!(
                "Must be finite and above adult_age_floor ({}), got {}",
                limits.adult_age_floor, limits.max_age
            ),
        });
    }

    Ok(())
}
