//! Model parameter tables.
//!
//! The defaults reproduce the built-in tables: Gompertz coefficients tuned
//! so the unadjusted model matches general-population mortality, the
//! NOTCH3-SVD stage hazard ratios, and the four population milestones.

use cadasil_common::{DiseaseStage, Sex, MILESTONE_ONSETS};
use cadasil_math::GompertzParams;
use serde::{Deserialize, Serialize};

use crate::validate::ValidationError;

/// Complete parameter set for the survival model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    pub schema_version: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Baseline mortality curves per sex.
    pub gompertz: SexCurves,

    /// Hazard ratio per disease stage.
    pub hazard_ratios: StageHazardRatios,

    /// Population-average milestone onsets, sorted by age.
    pub milestones: Vec<Milestone>,

    #[serde(default)]
    pub limits: SimulationLimits,
}

/// Gompertz coefficients for each sex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SexCurves {
    pub male: GompertzParams,
    pub female: GompertzParams,
}

impl SexCurves {
    pub fn for_sex(&self, sex: Sex) -> GompertzParams {
        match sex {
            Sex::Male => self.male,
            Sex::Female => self.female,
        }
    }
}

impl Default for SexCurves {
    fn default() -> Self {
        SexCurves {
            male: GompertzParams::new(0.00008, 0.105),
            female: GompertzParams::new(0.000045, 0.108),
        }
    }
}

/// Hazard ratio keyed by stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageHazardRatios {
    pub stage_0: f64,
    pub stage_1a: f64,
    pub stage_1b: f64,
    pub stage_2a: f64,
    pub stage_2b: f64,
    pub stage_3a: f64,
    pub stage_3b: f64,
    pub stage_4a: f64,
}

impl StageHazardRatios {
    pub fn get(&self, stage: DiseaseStage) -> f64 {
        match stage {
            DiseaseStage::Stage0 => self.stage_0,
            DiseaseStage::Stage1A => self.stage_1a,
            DiseaseStage::Stage1B => self.stage_1b,
            DiseaseStage::Stage2A => self.stage_2a,
            DiseaseStage::Stage2B => self.stage_2b,
            DiseaseStage::Stage3A => self.stage_3a,
            DiseaseStage::Stage3B => self.stage_3b,
            DiseaseStage::Stage4A => self.stage_4a,
        }
    }

    /// Ratios in stage order.
    pub fn in_order(&self) -> [(DiseaseStage, f64); 8] {
        DiseaseStage::ALL.map(|stage| (stage, self.get(stage)))
    }
}

impl Default for StageHazardRatios {
    fn default() -> Self {
        StageHazardRatios {
            stage_0: DiseaseStage::Stage0.hazard_ratio(),
            stage_1a: DiseaseStage::Stage1A.hazard_ratio(),
            stage_1b: DiseaseStage::Stage1B.hazard_ratio(),
            stage_2a: DiseaseStage::Stage2A.hazard_ratio(),
            stage_2b: DiseaseStage::Stage2B.hazard_ratio(),
            stage_3a: DiseaseStage::Stage3A.hazard_ratio(),
            stage_3b: DiseaseStage::Stage3B.hazard_ratio(),
            stage_4a: DiseaseStage::Stage4A.hazard_ratio(),
        }
    }
}

/// Typical age at which patients reach the next severity band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub age: f64,
    pub label: String,
}

/// Bounds on the simulated horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationLimits {
    /// Maximum simulated years after year 0.
    pub max_years: u32,
    /// Stop once survival drops below this fraction.
    pub survival_floor: f64,
    /// Stop once attained age reaches this value.
    pub max_age: f64,
    /// Ages below this use the rate at this age.
    pub adult_age_floor: f64,
}

impl Default for SimulationLimits {
    fn default() -> Self {
        SimulationLimits {
            max_years: 60,
            survival_floor: 0.005,
            max_age: 105.0,
            adult_age_floor: 18.0,
        }
    }
}

impl Default for ModelParameters {
    fn default() -> Self {
        ModelParameters {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            description: Some("Built-in NOTCH3-SVD survival tables".to_string()),
            gompertz: SexCurves::default(),
            hazard_ratios: StageHazardRatios::default(),
            milestones: MILESTONE_ONSETS
                .iter()
                .map(|m| Milestone {
                    age: m.age,
                    label: m.label.to_string(),
                })
                .collect(),
            limits: SimulationLimits::default(),
        }
    }
}

impl ModelParameters {
    /// Load parameters from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parse parameters from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn hazard_ratio(&self, stage: DiseaseStage) -> f64 {
        self.hazard_ratios.get(stage)
    }

    pub fn curve(&self, sex: Sex) -> GompertzParams {
        self.gompertz.for_sex(sex)
    }
}
