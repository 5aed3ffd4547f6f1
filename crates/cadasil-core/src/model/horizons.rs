//! Survival probability at fixed horizons.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::ModelResult;

/// Horizons shown when the caller does not pick any.
pub const DEFAULT_HORIZONS: [u32; 6] = [5, 10, 15, 20, 25, 30];

/// Display band for a survival percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilityBand {
    High,
    Moderate,
    Low,
    VeryLow,
}

impl ProbabilityBand {
    /// Band for a percentage: above 75 high, above 50 moderate, above 25 low.
    pub fn from_percent(probability: f64) -> Self {
        if probability > 75.0 {
            ProbabilityBand::High
        } else if probability > 50.0 {
            ProbabilityBand::Moderate
        } else if probability > 25.0 {
            ProbabilityBand::Low
        } else {
            ProbabilityBand::VeryLow
        }
    }
}

impl fmt::Display for ProbabilityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProbabilityBand::High => "high",
            ProbabilityBand::Moderate => "moderate",
            ProbabilityBand::Low => "low",
            ProbabilityBand::VeryLow => "very low",
        };
        f.write_str(s)
    }
}

/// One row of the horizon table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonProbability {
    pub years_from_now: u32,
    pub future_age: f64,
    /// Survival percentage at that year.
    pub probability: f64,
    pub band: ProbabilityBand,
}

/// Read survival at each horizon off the trajectory.
///
/// Horizons past the last simulated year are omitted; survival there is
/// below the simulation floor.
pub fn horizon_table(result: &ModelResult, horizons: &[u32]) -> Vec<HorizonProbability> {
    horizons
        .iter()
        .filter_map(|&years| {
            let point = result.points.get(years as usize)?;
            Some(HorizonProbability {
                years_from_now: years,
                future_age: point.age,
                probability: point.survival_probability,
                band: ProbabilityBand::from_percent(point.survival_probability),
            })
        })
        .collect()
}
