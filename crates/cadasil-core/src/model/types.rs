//! Projection output types.

use serde::{Deserialize, Serialize};

/// One simulated year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivalPoint {
    /// Whole years since the starting age.
    pub years_from_start: u32,
    /// Attained age.
    pub age: f64,
    /// Probability of being alive, in percent.
    pub survival_probability: f64,
}

/// What a progression marker annotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// The patient's stage at the starting age.
    Current,
    /// A population milestone still ahead of the patient.
    Milestone,
}

/// Annotation placed on the survival curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionMarker {
    pub kind: MarkerKind,
    /// Target year; may be fractional for non-integer starting ages.
    pub years_from_start: f64,
    pub age: f64,
    pub label: String,
    /// Copied from the matching [`SurvivalPoint`]; 0 until that year is reached.
    pub survival_probability: f64,
}

/// How the median survival figure was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedianSource {
    /// Linear interpolation of the 50% crossing.
    Interpolated,
    /// Survival never reached 50% inside the horizon; the mean is reported instead.
    MeanFallback,
}

/// Why the simulation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Survival fell below the floor.
    SurvivalFloor,
    /// Attained age reached the cap.
    AgeCap,
    /// All horizon years were simulated.
    HorizonExhausted,
}

/// Result of a survival projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResult {
    /// Expected additional years of life, one decimal.
    pub mean_expectancy: f64,
    /// Years from start until survival reaches 50%, one decimal.
    pub median_survival: f64,
    /// Year-by-year trajectory, strictly increasing `years_from_start`.
    pub points: Vec<SurvivalPoint>,
    /// Unrounded median (after the fallback rule).
    pub years_to_50_percent: f64,
    /// Markers whose year lies inside the simulated horizon.
    pub progression_markers: Vec<ProgressionMarker>,
    pub median_source: MedianSource,
    pub termination: Termination,
}

impl ModelResult {
    /// Projected median age: starting age plus median survival, one decimal.
    pub fn projected_median_age(&self) -> f64 {
        let start_age = self.points.first().map(|p| p.age).unwrap_or(0.0);
        cadasil_math::round_tenths(start_age + self.median_survival)
    }

    /// Last simulated year.
    pub fn horizon_years(&self) -> u32 {
        self.points.last().map(|p| p.years_from_start).unwrap_or(0)
    }

    /// Survival percentage at a whole year, if simulated.
    pub fn survival_at(&self, years_from_start: u32) -> Option<f64> {
        self.points
            .get(years_from_start as usize)
            .map(|p| p.survival_probability)
    }
}
