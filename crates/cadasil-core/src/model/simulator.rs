//! Discrete-time survival simulation.

use std::sync::OnceLock;

use cadasil_common::{DiseaseStage, Sex};
use cadasil_config::validate::MAX_SIMULATED_YEARS;
use cadasil_config::ModelParameters;
use cadasil_math::{interpolate_crossing, proportional_hazard, round_tenths, survive_step};
use tracing::{debug, trace};

use super::baseline::baseline_mortality_with;
use super::markers::{fill_markers, seed_markers, within_horizon};
use super::types::{MedianSource, ModelResult, SurvivalPoint, Termination};

/// Survival fraction defining the median.
const MEDIAN_THRESHOLD: f64 = 0.5;

/// Half-year correction applied to the left Riemann sum of survival.
const CONTINUITY_CORRECTION: f64 = 0.5;

/// Built-in parameter tables, constructed once.
pub fn builtin_parameters() -> &'static ModelParameters {
    static PARAMS: OnceLock<ModelParameters> = OnceLock::new();
    PARAMS.get_or_init(ModelParameters::default)
}

/// Project survival from `start_age` with the built-in tables.
pub fn simulate(start_age: f64, stage: DiseaseStage, sex: Sex) -> ModelResult {
    simulate_with(builtin_parameters(), start_age, stage, sex)
}

/// Project survival from `start_age` under `params`.
///
/// Total over its numeric domain: a very old starting age yields a short
/// trajectory rather than an error. Callers loading custom tables should run
/// them through `cadasil_config::validate_parameters` first.
///
/// When survival never reaches 50% inside the horizon the median is reported
/// as the mean expectancy ([`MedianSource::MeanFallback`]). This is a
/// definitional stand-in, not a statistical median.
pub fn simulate_with(
    params: &ModelParameters,
    start_age: f64,
    stage: DiseaseStage,
    sex: Sex,
) -> ModelResult {
    let limits = params.limits;
    let hazard_ratio = params.hazard_ratio(stage);

    let mut markers = seed_markers(start_age, stage, &params.milestones);
    let mut points = Vec::with_capacity(limits.max_years.min(MAX_SIMULATED_YEARS) as usize + 1);

    let mut survival = 1.0_f64;
    let mut previous_survival = 1.0_f64;
    let mut survival_sum = 0.0_f64;
    let mut years_to_50: Option<f64> = None;
    let mut termination = Termination::HorizonExhausted;

    for year in 0..=limits.max_years {
        let age = start_age + f64::from(year);
        let probability = survival * 100.0;

        points.push(SurvivalPoint {
            years_from_start: year,
            age,
            survival_probability: probability,
        });
        fill_markers(&mut markers, year, probability);

        // Year 0 always has survival 1.0, so a crossing has a previous year.
        if years_to_50.is_none() && survival <= MEDIAN_THRESHOLD {
            let crossing =
                interpolate_crossing(year, previous_survival, survival, MEDIAN_THRESHOLD);
            trace!(year, crossing, "median threshold crossed");
            years_to_50 = Some(crossing);
        }

        let base = baseline_mortality_with(params, age, sex);
        let adjusted = proportional_hazard(base, hazard_ratio);

        survival_sum += survival;
        previous_survival = survival;
        survival = survive_step(survival, adjusted);

        if survival < limits.survival_floor {
            termination = Termination::SurvivalFloor;
            break;
        }
        if age >= limits.max_age {
            termination = Termination::AgeCap;
            break;
        }
    }

    let mean = survival_sum - CONTINUITY_CORRECTION;
    let (median, median_source) = match years_to_50 {
        Some(years) => (years, MedianSource::Interpolated),
        None => (mean, MedianSource::MeanFallback),
    };

    let progression_markers = within_horizon(markers, points.len());

    debug!(
        start_age,
        stage = stage.code(),
        %sex,
        points = points.len(),
        termination = ?termination,
        median_source = ?median_source,
        mean,
        median,
        "survival projection complete"
    );

    ModelResult {
        mean_expectancy: round_tenths(mean),
        median_survival: round_tenths(median),
        points,
        years_to_50_percent: median,
        progression_markers,
        median_source,
        termination,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::MarkerKind;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn female_45_stage_1a() {
        let result = simulate(45.0, DiseaseStage::Stage1A, Sex::Female);

        assert_eq!(result.points.len(), 41);
        assert_eq!(result.points[0].survival_probability, 100.0);
        assert_eq!(result.mean_expectancy, 22.9);
        assert_eq!(result.median_survival, 23.8);
        assert!(approx_eq(result.years_to_50_percent, 23.8425, 1e-3));
        assert_eq!(result.median_source, MedianSource::Interpolated);
        assert_eq!(result.termination, Termination::SurvivalFloor);

        let stage2 = result
            .progression_markers
            .iter()
            .find(|m| m.label == "Stage 2 (Lacunes/Stroke)")
            .expect("stage 2 marker");
        assert_eq!(stage2.years_from_start, 3.0);
        assert_eq!(stage2.age, 48.0);
        assert_eq!(
            stage2.survival_probability,
            result.points[3].survival_probability
        );
        assert!(approx_eq(stage2.survival_probability, 97.87, 0.01));
    }

    #[test]
    fn male_70_stage_0_has_only_current_marker() {
        let result = simulate(70.0, DiseaseStage::Stage0, Sex::Male);

        assert_eq!(result.points.len(), 15);
        assert_eq!(result.mean_expectancy, 4.9);
        assert_eq!(result.median_survival, 4.3);
        assert_eq!(result.progression_markers.len(), 1);
        let current = &result.progression_markers[0];
        assert_eq!(current.kind, MarkerKind::Current);
        assert_eq!(current.label, "Current: Stage 0");
        assert_eq!(current.survival_probability, 100.0);
    }

    #[test]
    fn old_severe_patient_terminates_immediately() {
        let result = simulate(90.0, DiseaseStage::Stage4A, Sex::Male);

        assert_eq!(result.points.len(), 1);
        assert_eq!(result.termination, Termination::SurvivalFloor);
        assert_eq!(result.mean_expectancy, 0.5);
        assert_eq!(result.median_survival, 0.5);
        assert_eq!(result.median_source, MedianSource::MeanFallback);
    }

    #[test]
    fn child_never_crosses_median_within_horizon() {
        let result = simulate(5.0, DiseaseStage::Stage0, Sex::Male);

        assert_eq!(result.points.len(), 61);
        assert_eq!(result.termination, Termination::HorizonExhausted);
        assert_eq!(result.median_source, MedianSource::MeanFallback);
        assert_eq!(result.median_survival, result.mean_expectancy);
        assert_eq!(result.mean_expectancy, 54.7);
    }

    #[test]
    fn age_cap_stops_loop() {
        let result = simulate(105.0, DiseaseStage::Stage0, Sex::Female);
        assert_eq!(result.points.len(), 1);
        assert_eq!(result.termination, Termination::AgeCap);

        let result = simulate(104.5, DiseaseStage::Stage0, Sex::Male);
        assert_eq!(result.points.len(), 2);
    }

    #[test]
    fn half_year_start_fills_every_kept_marker() {
        let result = simulate(45.5, DiseaseStage::Stage1B, Sex::Female);
        for marker in &result.progression_markers {
            assert!(marker.survival_probability > 0.0, "{}", marker.label);
        }
    }

    #[test]
    fn half_year_offsets_take_later_year_probability() {
        let result = simulate(0.5, DiseaseStage::Stage0, Sex::Male);
        let markers = &result.progression_markers;

        // Milestones at 32, 48, 59 sit at years 31.5, 47.5, 58.5; 66 is past the horizon.
        assert_eq!(markers.len(), 4);
        for (marker, year) in markers[1..].iter().zip([32usize, 48, 59]) {
            assert_eq!(marker.survival_probability, result.points[year].survival_probability);
            assert!(marker.survival_probability > 0.0, "{}", marker.label);
        }
    }

    #[test]
    fn custom_limits_shorten_horizon() {
        let mut params = ModelParameters::default();
        params.limits.max_years = 10;
        let result = simulate_with(&params, 30.0, DiseaseStage::Stage0, Sex::Female);

        assert_eq!(result.points.len(), 11);
        assert_eq!(result.termination, Termination::HorizonExhausted);
        // markers at 32 and 48 -> years 2 and 18; only year 2 is inside
        assert_eq!(result.progression_markers.len(), 2);
    }

    #[test]
    fn unvalidated_huge_horizon_does_not_preallocate() {
        let mut params = ModelParameters::default();
        params.limits.max_years = u32::MAX;
        let result = simulate_with(&params, 45.0, DiseaseStage::Stage1A, Sex::Female);

        // The survival floor ends the loop long before the horizon would.
        assert_eq!(result.points.len(), 41);
        assert_eq!(result.termination, Termination::SurvivalFloor);
    }

    #[test]
    fn identical_inputs_identical_output() {
        let a = simulate(52.0, DiseaseStage::Stage2B, Sex::Male);
        let b = simulate(52.0, DiseaseStage::Stage2B, Sex::Male);
        assert_eq!(a, b);
    }
}
