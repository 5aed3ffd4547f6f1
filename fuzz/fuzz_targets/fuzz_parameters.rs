//! Fuzz target for parameters.json loading.
//!
//! Arbitrary input must parse or fail cleanly, and any table that passes
//! validation must simulate without panicking.

#![no_main]

use cadasil_common::{DiseaseStage, Sex};
use cadasil_config::{validate_parameters, ModelParameters};
use cadasil_core::model::simulate_with;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(params) = serde_json::from_slice::<ModelParameters>(data) else {
        return;
    };
    if validate_parameters(&params).is_err() {
        return;
    }
    for stage in [DiseaseStage::Stage0, DiseaseStage::Stage4A] {
        let result = simulate_with(&params, 45.0, stage, Sex::Female);
        assert!(!result.points.is_empty());
    }
});
