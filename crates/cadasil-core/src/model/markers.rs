//! Progression marker placement.
//!
//! Markers are seeded before the simulation, filled in place as the loop
//! reaches their year, and trimmed to the simulated horizon afterwards.

use cadasil_common::DiseaseStage;
use cadasil_config::Milestone;

use super::types::{MarkerKind, ProgressionMarker};

/// Maximum distance between a marker's target year and a simulated year for
/// the marker to take that year's probability. Inclusive, so every marker
/// inside the horizon is filled; on a tie the later year wins.
///
/// This departs from the published calculator's strict `< 0.5`, under which
/// markers at half-year offsets (for example a start age of 0.5) kept the 0%
/// placeholder. Here those markers carry the survival of the later year.
pub const MARKER_TOLERANCE: f64 = 0.5;

/// Build the current-status marker plus one marker per milestone still ahead
/// of `start_age`.
pub fn seed_markers(
    start_age: f64,
    stage: DiseaseStage,
    milestones: &[Milestone],
) -> Vec<ProgressionMarker> {
    let mut markers = Vec::with_capacity(milestones.len() + 1);
    markers.push(ProgressionMarker {
        kind: MarkerKind::Current,
        years_from_start: 0.0,
        age: start_age,
        label: format!("Current: {}", stage.short_name()),
        survival_probability: 100.0,
    });

    for milestone in milestones.iter().filter(|m| m.age > start_age) {
        markers.push(ProgressionMarker {
            kind: MarkerKind::Milestone,
            years_from_start: milestone.age - start_age,
            age: milestone.age,
            label: milestone.label.clone(),
            survival_probability: 0.0,
        });
    }

    markers
}

/// Copy `probability` into every marker whose target year is within
/// [`MARKER_TOLERANCE`] of `year`.
pub fn fill_markers(markers: &mut [ProgressionMarker], year: u32, probability: f64) {
    let year = f64::from(year);
    for marker in markers
        .iter_mut()
        .filter(|m| (m.years_from_start - year).abs() <= MARKER_TOLERANCE)
    {
        marker.survival_probability = probability;
    }
}

/// Keep only markers whose target year is inside a trajectory of
/// `point_count` points.
pub fn within_horizon(markers: Vec<ProgressionMarker>, point_count: usize) -> Vec<ProgressionMarker> {
    let last_year = point_count.saturating_sub(1) as f64;
    markers
        .into_iter()
        .filter(|m| m.years_from_start <= last_year)
        .collect()
}
