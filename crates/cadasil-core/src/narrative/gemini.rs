//! Gemini `generateContent` client.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{NarrativeConfig, NarrativeError, NarrativeProvider};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    pub(crate) fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Narrative provider backed by the Gemini REST API.
pub struct GeminiProvider {
    config: NarrativeConfig,
    agent: ureq::Agent,
}

impl GeminiProvider {
    pub fn new(config: NarrativeConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        GeminiProvider { config, agent }
    }

    fn url(&self) -> String {
        format!("{}/{}:generateContent", self.config.endpoint, self.config.model)
    }
}

impl NarrativeProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn generate(&self, prompt: &str) -> Result<String, NarrativeError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(NarrativeError::MissingCredentials)?;

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        debug!(model = %self.config.model, "calling generateContent");
        let response = self
            .agent
            .post(&self.url())
            .set("x-goog-api-key", api_key)
            .send_json(&body)
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => NarrativeError::Transport(format!("HTTP {}", code)),
                ureq::Error::Transport(t) => NarrativeError::Transport(t.to_string()),
            })?;

        let parsed: GenerateResponse = response
            .into_json()
            .map_err(|e| NarrativeError::Parse(e.to_string()))?;
        Ok(parsed.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_candidate_text() {
        let json = r#"{"candidates":[{"content":{"parts":[{"text":"Hello "},{"text":"world"}]}},
                       {"content":{"parts":[{"text":"ignored"}]}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.text(), "Hello world");
    }

    #[test]
    fn blocked_response_has_no_text() {
        let parsed: GenerateResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert_eq!(parsed.text(), "");
    }

    #[test]
    fn missing_key_short_circuits() {
        let provider = GeminiProvider::new(NarrativeConfig::default());
        let err = provider.generate("prompt").unwrap_err();
        assert!(matches!(err, NarrativeError::MissingCredentials));
    }

    #[test]
    fn url_joins_model() {
        let provider = GeminiProvider::new(NarrativeConfig {
            endpoint: "http://localhost:1/v1beta/models".into(),
            model: "m".into(),
            ..Default::default()
        });
        assert_eq!(provider.url(), "http://localhost:1/v1beta/models/m:generateContent");
    }
}
