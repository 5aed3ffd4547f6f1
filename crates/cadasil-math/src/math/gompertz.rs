//! Gompertz-law mortality curves.
//!
//! The force of mortality grows exponentially with age:
//!
//! ```text
//! q(x) = A · exp(B · x)
//! ```
//!
//! `A` sets the level at age zero and `B` the rate of ageing. The curve is
//! evaluated once per simulated year, so the result is read as an annual
//! probability of death rather than an instantaneous rate.

use serde::{Deserialize, Serialize};

/// Coefficients of a Gompertz mortality curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GompertzParams {
    /// Level parameter (A).
    pub a: f64,
    /// Ageing rate (B).
    pub b: f64,
}

impl GompertzParams {
    /// Create new Gompertz coefficients.
    pub const fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Unclamped annual rate at `age`.
    pub fn rate(&self, age: f64) -> f64 {
        self.a * (self.b * age).exp()
    }

    /// Both coefficients are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.a > 0.0 && self.b > 0.0
    }

    /// Mortality rate doubling time in years: ln(2) / B.
    pub fn doubling_time(&self) -> f64 {
        std::f64::consts::LN_2 / self.b
    }
}
