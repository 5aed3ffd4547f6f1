//! Baseline (disease-free) annual mortality.

use cadasil_common::Sex;
use cadasil_config::ModelParameters;
use cadasil_math::clamp_probability;

use super::simulator::builtin_parameters;

/// Annual probability of death at `age` for the general population, using
/// the built-in tables.
pub fn baseline_mortality(age: f64, sex: Sex) -> f64 {
    baseline_mortality_with(builtin_parameters(), age, sex)
}

/// Annual probability of death at `age` under `params`.
///
/// Ages below the adult floor use the floor rate; the result never exceeds
/// [`cadasil_math::MAX_ANNUAL_PROBABILITY`].
pub fn baseline_mortality_with(params: &ModelParameters, age: f64, sex: Sex) -> f64 {
    let effective_age = age.max(params.limits.adult_age_floor);
    clamp_probability(params.curve(sex).rate(effective_age))
}
