//! Validation of caller-supplied patient inputs.
//!
//! The simulator itself is total; these checks only keep the CLI from
//! presenting projections for ages that are not clinically meaningful.

use cadasil_common::{Error, Result};

pub const MIN_AGE: f64 = 0.0;
pub const MAX_AGE: f64 = 120.0;

/// Accept a finite age in `[MIN_AGE, MAX_AGE]`.
pub fn validate_age(age: f64) -> Result<f64> {
    if !age.is_finite() {
        return Err(Error::InvalidInput {
            field: "age".to_string(),
            message: format!("must be a finite number, got {}", age),
        });
    }
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(Error::InvalidInput {
            field: "age".to_string(),
            message: format!("must be between {} and {}, got {}", MIN_AGE, MAX_AGE, age),
        });
    }
    Ok(age)
}

/// Accept strictly increasing horizons.
pub fn validate_horizons(horizons: &[u32]) -> Result<()> {
    if horizons.is_empty() {
        return Err(Error::InvalidInput {
            field: "horizons".to_string(),
            message: "at least one horizon is required".to_string(),
        });
    }
    if horizons.windows(2).any(|w| w[0] >= w[1]) {
        return Err(Error::InvalidInput {
            field: "horizons".to_string(),
            message: format!("must be strictly increasing, got {:?}", horizons),
        });
    }
    Ok(())
}
