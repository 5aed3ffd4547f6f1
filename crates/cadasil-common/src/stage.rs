//! NOTCH3-SVD disease stages and population milestones.
//!
//! Stages 1 and 2 are graded on MRI (white-matter hyperintensity burden and
//! lacune count); stages 3 and 4 on clinical disability (modified Rankin
//! Scale). Each stage carries the hazard ratio applied on top of baseline
//! population mortality:
//!
//! | stage | basis      | hazard ratio |
//! |-------|------------|--------------|
//! | 0     | genetic    | 1.0          |
//! | 1A    | MRI (WMH)  | 1.1          |
//! | 1B    | MRI (WMH)  | 1.25         |
//! | 2A    | MRI (lac.) | 1.5          |
//! | 2B    | MRI (lac.) | 1.9          |
//! | 3A    | mRS 3      | 2.8          |
//! | 3B    | mRS 4      | 4.2          |
//! | 4A    | mRS 5      | 7.5          |

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal NOTCH3-SVD severity stage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Serialize, Deserialize,
)]
pub enum DiseaseStage {
    /// Premanifest carrier.
    #[value(name = "0", alias = "stage-0")]
    #[serde(rename = "stage_0")]
    Stage0,
    /// Low WMH burden (Fazekas 1).
    #[value(name = "1a", alias = "stage-1a")]
    #[serde(rename = "stage_1a")]
    Stage1A,
    /// High WMH burden (Fazekas ≥2).
    #[value(name = "1b", alias = "stage-1b")]
    #[serde(rename = "stage_1b")]
    Stage1B,
    /// Low lacune burden (1-4).
    #[value(name = "2a", alias = "stage-2a")]
    #[serde(rename = "stage_2a")]
    Stage2A,
    /// High lacune burden (≥5).
    #[value(name = "2b", alias = "stage-2b")]
    #[serde(rename = "stage_2b")]
    Stage2B,
    /// Moderate disability (mRS 3).
    #[value(name = "3a", alias = "stage-3a")]
    #[serde(rename = "stage_3a")]
    Stage3A,
    /// Moderately severe disability (mRS 4).
    #[value(name = "3b", alias = "stage-3b")]
    #[serde(rename = "stage_3b")]
    Stage3B,
    /// Severe disability (mRS 5).
    #[value(name = "4a", alias = "stage-4a")]
    #[serde(rename = "stage_4a")]
    Stage4A,
}

/// What a stage is graded on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageGrading {
    /// Carrier status only.
    Genetic,
    /// MRI findings (WMH, lacunes).
    Imaging,
    /// Clinical disability (mRS).
    Disability,
}

impl DiseaseStage {
    /// All stages in increasing severity.
    pub const ALL: [DiseaseStage; 8] = [
        DiseaseStage::Stage0,
        DiseaseStage::Stage1A,
        DiseaseStage::Stage1B,
        DiseaseStage::Stage2A,
        DiseaseStage::Stage2B,
        DiseaseStage::Stage3A,
        DiseaseStage::Stage3B,
        DiseaseStage::Stage4A,
    ];

    /// Position in [`DiseaseStage::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Built-in hazard ratio relative to the general population.
    pub const fn hazard_ratio(self) -> f64 {
        match self {
            DiseaseStage::Stage0 => 1.0,
            DiseaseStage::Stage1A => 1.1,
            DiseaseStage::Stage1B => 1.25,
            DiseaseStage::Stage2A => 1.5,
            DiseaseStage::Stage2B => 1.9,
            DiseaseStage::Stage3A => 2.8,
            DiseaseStage::Stage3B => 4.2,
            DiseaseStage::Stage4A => 7.5,
        }
    }

    /// Full clinical label.
    pub const fn label(self) -> &'static str {
        match self {
            DiseaseStage::Stage0 => "Stage 0: Premanifest (Genetic Predisposition)",
            DiseaseStage::Stage1A => "Stage 1A: Low WMH burden (Fazekas 1)",
            DiseaseStage::Stage1B => "Stage 1B: High WMH burden (Fazekas ≥2)",
            DiseaseStage::Stage2A => "Stage 2A: Low Lacune burden (count 1-4)",
            DiseaseStage::Stage2B => "Stage 2B: High Lacune burden (count ≥5)",
            DiseaseStage::Stage3A => "Stage 3A: Moderate Disability (mRS 3)",
            DiseaseStage::Stage3B => "Stage 3B: Mod. Severe Disability (mRS 4)",
            DiseaseStage::Stage4A => "Stage 4A: Severe Disability (mRS 5)",
        }
    }

    /// Label up to the first colon, e.g. `Stage 1A`.
    pub fn short_name(self) -> &'static str {
        let label = self.label();
        match label.find(':') {
            Some(idx) => &label[..idx],
            None => label,
        }
    }

    /// Stage code as used on the command line, e.g. `1A`.
    pub const fn code(self) -> &'static str {
        match self {
            DiseaseStage::Stage0 => "0",
            DiseaseStage::Stage1A => "1A",
            DiseaseStage::Stage1B => "1B",
            DiseaseStage::Stage2A => "2A",
            DiseaseStage::Stage2B => "2B",
            DiseaseStage::Stage3A => "3A",
            DiseaseStage::Stage3B => "3B",
            DiseaseStage::Stage4A => "4A",
        }
    }

    pub const fn grading(self) -> StageGrading {
        match self {
            DiseaseStage::Stage0 => StageGrading::Genetic,
            DiseaseStage::Stage1A
            | DiseaseStage::Stage1B
            | DiseaseStage::Stage2A
            | DiseaseStage::Stage2B => StageGrading::Imaging,
            DiseaseStage::Stage3A | DiseaseStage::Stage3B | DiseaseStage::Stage4A => {
                StageGrading::Disability
            }
        }
    }
}

impl fmt::Display for DiseaseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for DiseaseStage {
    type Err = String;

    /// Accepts `1a`, `1A`, `stage 1a`, `stage-1a`, `stage_1a`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .trim_start_matches("stage")
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();
        DiseaseStage::ALL
            .into_iter()
            .find(|stage| stage.code().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| format!("unknown disease stage: {}", s))
    }
}

/// Population-average onset of a severity band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MilestoneOnset {
    /// Typical age at onset.
    pub age: f64,
    pub label: &'static str,
}

/// Typical onset ages for the NOTCH3-SVD severity bands.
///
/// WMH appear in the thirties, lacunes in the forties to fifties, disability
/// in the fifties to sixties.
pub const MILESTONE_ONSETS: [MilestoneOnset; 4] = [
    MilestoneOnset {
        age: 32.0,
        label: "Stage 1 (WMH Onset)",
    },
    MilestoneOnset {
        age: 48.0,
        label: "Stage 2 (Lacunes/Stroke)",
    },
    MilestoneOnset {
        age: 59.0,
        label: "Stage 3 (Disability)",
    },
    MilestoneOnset {
        age: 66.0,
        label: "Stage 4 (Severe)",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hazard_ratios_are_ordered() {
        for pair in DiseaseStage::ALL.windows(2) {
            assert!(pair[0].hazard_ratio() < pair[1].hazard_ratio());
        }
        assert_eq!(DiseaseStage::Stage0.hazard_ratio(), 1.0);
    }

    #[test]
    fn index_matches_table_position() {
        for (i, stage) in DiseaseStage::ALL.iter().enumerate() {
            assert_eq!(stage.index(), i);
        }
    }

    #[test]
    fn short_name_strips_description() {
        assert_eq!(DiseaseStage::Stage1A.short_name(), "Stage 1A");
        assert_eq!(DiseaseStage::Stage0.short_name(), "Stage 0");
        assert_eq!(DiseaseStage::Stage4A.short_name(), "Stage 4A");
    }

    #[test]
    fn parse_accepts_codes_and_prefixes() {
        assert_eq!("1a".parse::<DiseaseStage>().unwrap(), DiseaseStage::Stage1A);
        assert_eq!("Stage 3B".parse::<DiseaseStage>().unwrap(), DiseaseStage::Stage3B);
        assert_eq!("stage_2a".parse::<DiseaseStage>().unwrap(), DiseaseStage::Stage2A);
        assert_eq!("0".parse::<DiseaseStage>().unwrap(), DiseaseStage::Stage0);
        assert!("5".parse::<DiseaseStage>().is_err());
    }

    #[test]
    fn grading_bands() {
        assert_eq!(DiseaseStage::Stage0.grading(), StageGrading::Genetic);
        assert_eq!(DiseaseStage::Stage2B.grading(), StageGrading::Imaging);
        assert_eq!(DiseaseStage::Stage3A.grading(), StageGrading::Disability);
    }

    #[test]
    fn serde_names() {
        let json = serde_json::to_string(&DiseaseStage::Stage1B).unwrap();
        assert_eq!(json, r#""stage_1b""#);
        let back: DiseaseStage = serde_json::from_str(r#""stage_4a""#).unwrap();
        assert_eq!(back, DiseaseStage::Stage4A);
    }

    #[test]
    fn milestones_are_sorted() {
        for pair in MILESTONE_ONSETS.windows(2) {
            assert!(pair[0].age < pair[1].age);
        }
    }
}
