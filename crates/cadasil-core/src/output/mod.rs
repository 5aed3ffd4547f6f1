//! Rendering of command payloads.
//!
//! Every payload is wrapped in an [`Envelope`] carrying the schema version
//! and generation time, then rendered as JSON, Markdown or a one-line
//! summary. Output goes to stdout; logs never do.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use cadasil_common::{DiseaseStage, OutputFormat, Sex, SCHEMA_VERSION};
use cadasil_config::ModelParameters;

use crate::model::{horizon_table, HorizonProbability, MedianSource, ModelResult};
use crate::narrative::Narrative;

/// Payload with provenance fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Envelope<T> {
    pub fn new(payload: T) -> Self {
        Envelope {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            payload,
        }
    }
}

/// Inputs echoed back with every projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    pub age: f64,
    pub sex: Sex,
    pub stage: DiseaseStage,
    pub hazard_ratio: f64,
}

/// Output of `project` and `narrate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionReport {
    pub input: ProjectionInput,
    pub projected_median_age: f64,
    pub result: ModelResult,
    pub horizons: Vec<HorizonProbability>,
    /// Where the parameter tables came from.
    pub parameters_source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative: Option<Narrative>,
}

impl ProjectionReport {
    pub fn new(
        input: ProjectionInput,
        result: ModelResult,
        horizons: &[u32],
        parameters_source: impl Into<String>,
    ) -> Self {
        ProjectionReport {
            projected_median_age: result.projected_median_age(),
            horizons: horizon_table(&result, horizons),
            input,
            result,
            parameters_source: parameters_source.into(),
            narrative: None,
        }
    }

    pub fn with_narrative(mut self, narrative: Narrative) -> Self {
        self.narrative = Some(narrative);
        self
    }
}

/// Output of `table`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorizonReport {
    pub input: ProjectionInput,
    pub horizons: Vec<HorizonProbability>,
}

/// One row of `stages`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRow {
    pub code: String,
    pub stage: DiseaseStage,
    pub label: String,
    pub hazard_ratio: f64,
}

/// Stage listing using the hazard ratios in `params`.
pub fn stage_rows(params: &ModelParameters) -> Vec<StageRow> {
    DiseaseStage::ALL
        .iter()
        .map(|&stage| StageRow {
            code: stage.code().to_string(),
            stage,
            label: stage.label().to_string(),
            hazard_ratio: params.hazard_ratio(stage),
        })
        .collect()
}

fn to_json<T: Serialize>(payload: T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Envelope::new(payload))
}

fn headline(input: &ProjectionInput) -> String {
    format!(
        "{}, age {}, {} (HR {})",
        input.sex,
        input.age,
        input.stage.short_name(),
        input.hazard_ratio
    )
}

fn median_note(result: &ModelResult) -> &'static str {
    match result.median_source {
        MedianSource::Interpolated => "",
        MedianSource::MeanFallback => " (50% not reached; mean shown)",
    }
}

fn horizons_markdown(out: &mut String, horizons: &[HorizonProbability]) {
    out.push_str("| Horizon | Age | Survival | Band |\n");
    out.push_str("|---------|-----|----------|------|\n");
    for row in horizons {
        let _ = writeln!(
            out,
            "| +{} years | {} | {:.0}% | {} |",
            row.years_from_now, row.future_age, row.probability, row.band
        );
    }
}

/// Render a projection (optionally with narrative).
pub fn render_projection(
    report: &ProjectionReport,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Summary => {
            let result = &report.result;
            Ok(format!(
                "{}: mean {:.1} y, median {:.1} y{}, projected median age {:.1}",
                headline(&report.input),
                result.mean_expectancy,
                result.median_survival,
                median_note(result),
                report.projected_median_age
            ))
        }
        OutputFormat::Md => {
            let result = &report.result;
            let mut out = String::new();
            let _ = writeln!(out, "# Survival projection\n");
            let _ = writeln!(out, "{}\n", headline(&report.input));
            out.push_str("| Measure | Value |\n|---------|-------|\n");
            let _ = writeln!(out, "| Mean additional years | {:.1} |", result.mean_expectancy);
            let _ = writeln!(
                out,
                "| Median survival (years){} | {:.1} |",
                median_note(result),
                result.median_survival
            );
            let _ = writeln!(out, "| Projected median age | {:.1} |", report.projected_median_age);
            let _ = writeln!(out, "| Years simulated | {} |", result.horizon_years());

            out.push_str("\n## Milestones\n\n");
            out.push_str("| Year | Age | Marker | Survival |\n");
            out.push_str("|------|-----|--------|----------|\n");
            for marker in &result.progression_markers {
                let _ = writeln!(
                    out,
                    "| {} | {} | {} | {:.1}% |",
                    marker.years_from_start, marker.age, marker.label, marker.survival_probability
                );
            }

            if !report.horizons.is_empty() {
                out.push_str("\n## Survival probability by duration\n\n");
                horizons_markdown(&mut out, &report.horizons);
            }

            if let Some(narrative) = &report.narrative {
                out.push_str("\n## Interpretation\n\n");
                out.push_str(&narrative.text);
                out.push('\n');
            }

            let _ = write!(out, "\n_Parameters: {}_\n", report.parameters_source);
            Ok(out)
        }
    }
}

/// Render the horizon table.
pub fn render_horizons(
    report: &HorizonReport,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Summary => Ok(report
            .horizons
            .iter()
            .map(|row| format!("+{}y {:.0}%", row.years_from_now, row.probability))
            .collect::<Vec<_>>()
            .join(", ")),
        OutputFormat::Md => {
            let mut out = String::new();
            let _ = writeln!(out, "# {}\n", headline(&report.input));
            horizons_markdown(&mut out, &report.horizons);
            Ok(out)
        }
    }
}

/// Render the stage listing.
pub fn render_stages(rows: &[StageRow], format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct Stages<'a> {
                stages: &'a [StageRow],
            }
            to_json(Stages { stages: rows })
        }
        OutputFormat::Summary => Ok(rows
            .iter()
            .map(|row| format!("{}={}", row.code, row.hazard_ratio))
            .collect::<Vec<_>>()
            .join(" ")),
        OutputFormat::Md => {
            let mut out = String::from("| Code | Hazard ratio | Label |\n|------|--------------|-------|\n");
            for row in rows {
                let _ = writeln!(out, "| {} | {} | {} |", row.code, row.hazard_ratio, row.label);
            }
            Ok(out)
        }
    }
}
