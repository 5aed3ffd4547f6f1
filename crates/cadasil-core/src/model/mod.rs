//! Survival projection model.
//!
//! A discrete-time life table: each simulated year applies the Gompertz
//! baseline mortality for the attained age, scaled by the stage hazard ratio
//! under proportional hazards, to the running survival fraction.
//!
//! # Example
//!
//! ```
//! use cadasil_core::model::simulate;
//! use cadasil_common::{DiseaseStage, Sex};
//!
//! let result = simulate(45.0, DiseaseStage::Stage1A, Sex::Female);
//! assert_eq!(result.points[0].survival_probability, 100.0);
//! println!("mean: {} years, median: {} years", result.mean_expectancy, result.median_survival);
//! ```

pub mod baseline;
pub mod horizons;
pub mod markers;
pub mod simulator;
pub mod types;

pub use baseline::{baseline_mortality, baseline_mortality_with};
pub use horizons::{horizon_table, HorizonProbability, ProbabilityBand, DEFAULT_HORIZONS};
pub use markers::{fill_markers, seed_markers, within_horizon, MARKER_TOLERANCE};
pub use simulator::{builtin_parameters, simulate, simulate_with};
pub use types::{MarkerKind, MedianSource, ModelResult, ProgressionMarker, SurvivalPoint, Termination};
