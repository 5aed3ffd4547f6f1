//! Prose interpretation of a projection.
//!
//! The narrative is produced by an external text-generation service. It only
//! ever sees the summary scalars of a finished projection, and any failure
//! degrades to a fixed message. Nothing here can alter a [`ModelResult`].

#[cfg(feature = "narrative-http")]
pub mod gemini;

use std::time::Duration;

use cadasil_common::{DiseaseStage, Sex, StageGrading};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::ModelResult;

/// Shown when no API key is configured.
pub const FALLBACK_MISSING_KEY: &str = "Error: API Key missing.";

/// Shown when the service answered with no text.
pub const FALLBACK_EMPTY: &str = "Analysis could not be generated at this time.";

/// Shown for transport and decoding failures.
pub const FALLBACK_TRANSPORT: &str =
    "An error occurred while communicating with the AI service. Please try again later.";

/// Upper bound on the interpretation length requested from the service.
pub const MAX_WORDS: u32 = 150;

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_API_KEY_FALLBACK: &str = "API_KEY";
pub const ENV_MODEL: &str = "CADASIL_NARRATIVE_MODEL";
pub const ENV_ENDPOINT: &str = "CADASIL_NARRATIVE_ENDPOINT";
pub const ENV_TIMEOUT_SECS: &str = "CADASIL_NARRATIVE_TIMEOUT";

const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Narrative collaborator failures.
#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("no API key configured (GEMINI_API_KEY or API_KEY)")]
    MissingCredentials,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("service returned no text")]
    EmptyResponse,

    #[error("could not decode response: {0}")]
    Parse(String),
}

impl NarrativeError {
    /// Fixed user-facing text replacing the narrative.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            NarrativeError::MissingCredentials => FALLBACK_MISSING_KEY,
            NarrativeError::EmptyResponse => FALLBACK_EMPTY,
            NarrativeError::Transport(_) | NarrativeError::Parse(_) => FALLBACK_TRANSPORT,
        }
    }
}

impl From<NarrativeError> for cadasil_common::Error {
    fn from(err: NarrativeError) -> Self {
        match err {
            NarrativeError::MissingCredentials => {
                cadasil_common::Error::MissingCredentials(err.to_string())
            }
            other => cadasil_common::Error::Narrative(other.to_string()),
        }
    }
}

/// Settings for the text-generation service.
#[derive(Debug, Clone)]
pub struct NarrativeConfig {
    pub api_key: Option<String>,
    pub model: String,
    /// Base URL; the model name and method are appended.
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        NarrativeConfig {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl NarrativeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = NarrativeConfig::default();

        config.api_key = get(ENV_API_KEY).or_else(|| get(ENV_API_KEY_FALLBACK));
        if let Some(model) = get(ENV_MODEL) {
            config.model = model;
        }
        if let Some(endpoint) = get(ENV_ENDPOINT) {
            config.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        if let Some(secs) = get(ENV_TIMEOUT_SECS).and_then(|v| v.trim().parse::<u64>().ok()) {
            config.timeout = Duration::from_secs(secs);
        }
        config
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}

/// The only facts about a projection passed to the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeRequest {
    pub age: f64,
    pub sex: Sex,
    pub stage: DiseaseStage,
    pub mean_expectancy: f64,
    pub median_survival: f64,
}

impl NarrativeRequest {
    pub fn new(age: f64, stage: DiseaseStage, sex: Sex, result: &ModelResult) -> Self {
        NarrativeRequest {
            age,
            sex,
            stage,
            mean_expectancy: result.mean_expectancy,
            median_survival: result.median_survival,
        }
    }

    /// Median survival age, rounded to whole years.
    pub fn median_age(&self) -> i64 {
        (self.age + self.median_survival).round() as i64
    }
}

fn stage_guidance(stage: DiseaseStage) -> &'static str {
    match stage.grading() {
        StageGrading::Genetic => {
            "This stage means the mutation is present but there are no MRI findings or symptoms yet."
        }
        StageGrading::Imaging => {
            "This stage is based on MRI: WMH = White Matter Hyperintensities, Lacunes = small strokes."
        }
        StageGrading::Disability => "This stage is based on physical disability levels.",
    }
}

/// Prompt sent to the service.
pub fn build_prompt(request: &NarrativeRequest) -> String {
    format!(
        "You are an expert genetic counselor and neurologist specializing in CADASIL (NOTCH3 mutation).\n\
         \n\
         A user is viewing a probability model based on data from JAMA Neurology 2024 \
         (\"Life Expectancy in CADASIL\") using the NOTCH3-SVD staging system.\n\
         \n\
         Input Parameters:\n\
         - Patient Age: {age}\n\
         - Sex: {sex}\n\
         - Current Stage: {stage}\n\
         \n\
         Model Results:\n\
         - Estimated Mean Life Expectancy (from now): {mean:.1} additional years\n\
         - Estimated Median Survival Age: {median_age} years old\n\
         \n\
         Please provide a scientific, compassionate interpretation.\n\
         1. Briefly explain the current stage in plain English. {guidance}\n\
         2. Discuss the prognosis based on Sex and Age.\n\
         3. Mention that progression varies; some patients stay in early stages for decades.\n\
         4. Provide a disclaimer: This is a statistical model, not an individual prediction. \
         Genotype and lifestyle matter.\n\
         \n\
         Keep the tone professional yet supportive. Max {max_words} words.\n",
        age = request.age,
        sex = request.sex,
        stage = request.stage,
        mean = request.mean_expectancy,
        median_age = request.median_age(),
        guidance = stage_guidance(request.stage),
        max_words = MAX_WORDS,
    )
}

/// A text-generation backend.
pub trait NarrativeProvider {
    fn name(&self) -> &str;

    /// Generate text for `prompt`. An empty string is a valid answer and is
    /// handled by the caller.
    fn generate(&self, prompt: &str) -> Result<String, NarrativeError>;
}

/// Provider used when the HTTP client is not compiled in.
#[derive(Debug, Clone)]
pub struct OfflineProvider {
    config: NarrativeConfig,
}

impl OfflineProvider {
    pub fn new(config: NarrativeConfig) -> Self {
        OfflineProvider { config }
    }
}

impl NarrativeProvider for OfflineProvider {
    fn name(&self) -> &str {
        "offline"
    }

    fn generate(&self, _prompt: &str) -> Result<String, NarrativeError> {
        if !self.config.has_credentials() {
            return Err(NarrativeError::MissingCredentials);
        }
        Err(NarrativeError::Transport(
            "HTTP client not available in this build (enable the narrative-http feature)"
                .to_string(),
        ))
    }
}

/// Best provider available in this build.
pub fn default_provider(config: NarrativeConfig) -> Box<dyn NarrativeProvider> {
    #[cfg(feature = "narrative-http")]
    {
        Box::new(gemini::GeminiProvider::new(config))
    }
    #[cfg(not(feature = "narrative-http"))]
    {
        Box::new(OfflineProvider::new(config))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeSource {
    Generated,
    Fallback,
}

/// Narrative text as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    pub text: String,
    pub source: NarrativeSource,
    /// Underlying failure, for logs and JSON output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Narrative {
    pub fn is_fallback(&self) -> bool {
        self.source == NarrativeSource::Fallback
    }
}

/// Ask `provider` for an interpretation; never fails.
pub fn narrate_or_fallback<P: NarrativeProvider + ?Sized>(
    provider: &P,
    request: &NarrativeRequest,
) -> Narrative {
    let prompt = build_prompt(request);
    debug!(provider = provider.name(), prompt_len = prompt.len(), "requesting narrative");

    let outcome = provider.generate(&prompt).and_then(|text| {
        let text = text.trim();
        if text.is_empty() {
            Err(NarrativeError::EmptyResponse)
        } else {
            Ok(text.to_string())
        }
    });

    match outcome {
        Ok(text) => Narrative {
            text,
            source: NarrativeSource::Generated,
            error: None,
        },
        Err(err) => {
            warn!(provider = provider.name(), error = %err, "narrative unavailable, using fallback");
            Narrative {
                text: err.fallback_message().to_string(),
                source: NarrativeSource::Fallback,
                error: Some(err.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::simulate;
    use std::collections::HashMap;

    struct Canned(Result<&'static str, fn() -> NarrativeError>);

    impl NarrativeProvider for Canned {
        fn name(&self) -> &str {
            "canned"
        }

        fn generate(&self, _prompt: &str) -> Result<String, NarrativeError> {
            match &self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(make) => Err(make()),
            }
        }
    }

    fn request() -> NarrativeRequest {
        let result = simulate(45.0, DiseaseStage::Stage1A, Sex::Female);
        NarrativeRequest::new(45.0, DiseaseStage::Stage1A, Sex::Female, &result)
    }

    #[test]
    fn prompt_carries_summary_scalars() {
        let prompt = build_prompt(&request());
        assert!(prompt.contains("Patient Age: 45"));
        assert!(prompt.contains("Sex: Female"));
        assert!(prompt.contains("Stage 1A: Low WMH burden (Fazekas 1)"));
        assert!(prompt.contains("22.9 additional years"));
        // 45 + 23.8 = 68.8
        assert!(prompt.contains("Median Survival Age: 69 years old"));
        assert!(prompt.contains("based on MRI"));
        assert!(prompt.contains("Max 150 words"));
    }

    #[test]
    fn prompt_guidance_follows_grading() {
        let mut req = request();
        req.stage = DiseaseStage::Stage3B;
        assert!(build_prompt(&req).contains("physical disability"));
        req.stage = DiseaseStage::Stage0;
        assert!(build_prompt(&req).contains("no MRI findings"));
    }

    #[test]
    fn generated_text_is_trimmed() {
        let narrative = narrate_or_fallback(&Canned(Ok("  Interpretation.\n")), &request());
        assert_eq!(narrative.text, "Interpretation.");
        assert_eq!(narrative.source, NarrativeSource::Generated);
        assert!(narrative.error.is_none());
    }

    #[test]
    fn empty_answer_falls_back() {
        let narrative = narrate_or_fallback(&Canned(Ok("   ")), &request());
        assert_eq!(narrative.text, FALLBACK_EMPTY);
        assert!(narrative.is_fallback());
    }

    #[test]
    fn failures_map_to_fixed_messages() {
        let cases: [(fn() -> NarrativeError, &str); 3] = [
            (|| NarrativeError::MissingCredentials, FALLBACK_MISSING_KEY),
            (|| NarrativeError::Transport("timeout".into()), FALLBACK_TRANSPORT),
            (|| NarrativeError::Parse("bad json".into()), FALLBACK_TRANSPORT),
        ];
        for (make, expected) in cases {
            let narrative = narrate_or_fallback(&Canned(Err(make)), &request());
            assert_eq!(narrative.text, expected);
            assert!(narrative.is_fallback());
            assert!(narrative.error.is_some());
        }
    }

    #[test]
    fn offline_provider_reports_missing_key_first() {
        let provider = OfflineProvider::new(NarrativeConfig::default());
        let narrative = narrate_or_fallback(&provider, &request());
        assert_eq!(narrative.text, FALLBACK_MISSING_KEY);

        let provider = OfflineProvider::new(NarrativeConfig {
            api_key: Some("k".into()),
            ..Default::default()
        });
        let narrative = narrate_or_fallback(&provider, &request());
        assert_eq!(narrative.text, FALLBACK_TRANSPORT);
    }

    #[test]
    fn config_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENV_API_KEY_FALLBACK, "fallback-key"),
            (ENV_ENDPOINT, "http://localhost:8080/models/"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_MODEL, " "),
        ]
        .into_iter()
        .collect();
        let config = NarrativeConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_key.as_deref(), Some("fallback-key"));
        assert_eq!(config.endpoint, "http://localhost:8080/models");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn primary_key_wins() {
        let config = NarrativeConfig::from_lookup(|k| match k {
            ENV_API_KEY => Some("primary".to_string()),
            ENV_API_KEY_FALLBACK => Some("secondary".to_string()),
            _ => None,
        });
        assert_eq!(config.api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn error_conversion() {
        let err: cadasil_common::Error = NarrativeError::MissingCredentials.into();
        assert_eq!(err.code(), 31);
        let err: cadasil_common::Error = NarrativeError::EmptyResponse.into();
        assert_eq!(err.code(), 30);
    }
}
