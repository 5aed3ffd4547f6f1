//! Fuzz target for the survival simulator.
//!
//! The simulator is total: any age, including NaN and infinities, yields a
//! non-empty, non-increasing trajectory that starts at 100%.

#![no_main]

use arbitrary::Arbitrary;
use cadasil_common::{DiseaseStage, Sex};
use cadasil_core::model::simulate;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    age: f64,
    stage: u8,
    female: bool,
}

fuzz_target!(|input: Input| {
    let stage = DiseaseStage::ALL[input.stage as usize % DiseaseStage::ALL.len()];
    let sex = if input.female { Sex::Female } else { Sex::Male };

    let result = simulate(input.age, stage, sex);
    assert!(!result.points.is_empty());
    assert!(result.points.len() <= 61);
    assert_eq!(result.points[0].survival_probability, 100.0);
    for pair in result.points.windows(2) {
        assert!(pair[1].survival_probability <= pair[0].survival_probability);
    }
});
