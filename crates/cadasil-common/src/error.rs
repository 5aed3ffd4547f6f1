//! Error types for CADASIL prognosis.
//!
//! The survival model itself is total and never fails; these errors cover
//! the surfaces around it:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Recoverability hints and remediation text for humans
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Invalid Model Parameters
//!   Reason: invalid model parameters: hazard_ratios.stage_2a: must be >= 1.0, got 0.8
//!   Fix: Run 'cadasil check' to validate, or remove the parameters file to use built-in tables.
//! ```
//!
//! # Machine-Facing Output
//!
//! ```json
//! {
//!   "code": 11,
//!   "category": "config",
//!   "message": "invalid model parameters: ...",
//!   "recoverable": true
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for CADASIL prognosis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Parameter and configuration file errors.
    Config,
    /// Caller-supplied input outside the accepted domain.
    Input,
    /// Narrative collaborator errors.
    Narrative,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Narrative => write!(f, "narrative"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for CADASIL prognosis.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid model parameters: {0}")]
    InvalidParameters(String),

    #[error("schema version mismatch: expected {expected}, got {actual}")]
    SchemaMismatch { expected: String, actual: String },

    // Input errors (20-29)
    #[error("invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    // Narrative errors (30-39)
    #[error("narrative generation failed: {0}")]
    Narrative(String),

    #[error("narrative credentials missing: {0}")]
    MissingCredentials(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Input errors
    /// - 30-39: Narrative errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidParameters(_) => 11,
            Error::SchemaMismatch { .. } => 12,
            Error::InvalidInput { .. } => 20,
            Error::Narrative(_) => 30,
            Error::MissingCredentials(_) => 31,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidParameters(_) | Error::SchemaMismatch { .. } => {
                ErrorCategory::Config
            }
            Error::InvalidInput { .. } => ErrorCategory::Input,
            Error::Narrative(_) | Error::MissingCredentials(_) => ErrorCategory::Narrative,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns whether this error is potentially recoverable.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Config(_) => true,
            Error::InvalidParameters(_) => true,
            Error::SchemaMismatch { .. } => true,
            Error::InvalidInput { .. } => true,
            // Transport failures are often transient
            Error::Narrative(_) => true,
            Error::MissingCredentials(_) => true,
            Error::Io(_) => true,
            Error::Json(_) => false,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) => {
                "Run 'cadasil check' to validate configuration, or check the syntax of parameters.json."
            }
            Error::InvalidParameters(_) => {
                "Run 'cadasil check' to validate, or remove the parameters file to use built-in tables."
            }
            Error::SchemaMismatch { .. } => {
                "Regenerate parameters.json with 'cadasil check --dump-defaults' and reapply your edits."
            }
            Error::InvalidInput { .. } => {
                "Pass a finite age between 0 and 120, a sex (male/female), and a stage code (0, 1a .. 4a)."
            }
            Error::Narrative(_) => {
                "Retry later. The numeric projection is unaffected by narrative failures."
            }
            Error::MissingCredentials(_) => {
                "Set GEMINI_API_KEY (or API_KEY) in the environment to enable narrative interpretation."
            }
            Error::Io(_) => "Check that the file exists and is readable, then retry.",
            Error::Json(_) => {
                "Invalid JSON. Check syntax with 'cat <file> | jq .' or restore from backup."
            }
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::InvalidParameters(_) => "Invalid Model Parameters",
            Error::SchemaMismatch { .. } => "Schema Version Mismatch",
            Error::InvalidInput { .. } => "Invalid Input",
            Error::Narrative(_) => "Narrative Unavailable",
            Error::MissingCredentials(_) => "Missing Credentials",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Parse Error",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Additional structured context (e.g., offending field).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::InvalidInput { field, .. } => {
                context.insert("field".to_string(), serde_json::json!(field));
            }
            Error::SchemaMismatch { expected, actual } => {
                context.insert("expected".to_string(), serde_json::json!(expected));
                context.insert("actual".to_string(), serde_json::json!(actual));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            context,
        }
    }
}

impl StructuredError {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }

    /// Serialize to pretty JSON string.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.to_json())
    }
}

/// Format an error for human-readable stderr output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        red = red,
        cyan = cyan,
        reset = reset,
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bad_age() -> Error {
        Error::InvalidInput {
            field: "age".into(),
            message: "must be finite".into(),
        }
    }

    #[test]
    fn test_error_code() {
        assert_eq!(Error::Config("test".into()).code(), 10);
        assert_eq!(Error::InvalidParameters("x".into()).code(), 11);
        assert_eq!(bad_age().code(), 20);
        assert_eq!(Error::MissingCredentials("API_KEY".into()).code(), 31);
    }

    #[test]
    fn test_error_category() {
        assert_eq!(Error::Config("test".into()).category(), ErrorCategory::Config);
        assert_eq!(bad_age().category(), ErrorCategory::Input);
        assert_eq!(Error::Narrative("timeout".into()).category(), ErrorCategory::Narrative);
    }

    #[test]
    fn test_structured_error_from_error() {
        let structured = StructuredError::from(&bad_age());

        assert_eq!(structured.code, 20);
        assert_eq!(structured.category, ErrorCategory::Input);
        assert!(structured.recoverable);
        assert_eq!(structured.context.get("field"), Some(&serde_json::json!("age")));
    }

    #[test]
    fn test_structured_error_json() {
        let err = Error::InvalidParameters("hazard_ratios.stage_0: must be >= 1.0".into());
        let json = StructuredError::from(&err).to_json();

        assert!(json.contains(r#""code":11"#));
        assert!(json.contains(r#""category":"config""#));
        assert!(json.contains(r#""recoverable":true"#));
    }

    #[test]
    fn test_format_error_human() {
        let formatted = format_error_human(&bad_age(), false);

        assert!(formatted.contains("Invalid Input"));
        assert!(formatted.contains("invalid age: must be finite"));
        assert!(formatted.contains("Fix:"));
    }

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::Config.to_string(), "config");
        assert_eq!(ErrorCategory::Narrative.to_string(), "narrative");
    }
}
