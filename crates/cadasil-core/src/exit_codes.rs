//! Exit codes for the `cadasil` CLI.
//!
//! Exit code ranges:
//! - 0-1: outcomes (parse from the code, not the output)
//! - 10-19: user/environment errors (fixable by the caller)
//! - 20-29: internal errors

use cadasil_common::{Error, ErrorCategory};

/// Process exit status. Stable contract for scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    // ========================================================================
    // Outcomes (0-1)
    // ========================================================================
    /// Success.
    Clean = 0,

    /// Projection printed but the narrative fell back to its fixed message.
    NarrativeDegraded = 1,

    // ========================================================================
    // User / Environment Errors (10-19)
    // ========================================================================
    /// Invalid arguments.
    ArgsError = 10,

    /// Parameter file missing, unreadable or invalid.
    ConfigError = 11,

    /// Parameter file written for another schema version.
    VersionError = 13,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug).
    InternalError = 20,

    /// I/O error.
    IoError = 21,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Clean | ExitCode::NarrativeDegraded)
    }

    /// Codes 10-19.
    pub fn is_user_error(self) -> bool {
        (10..20).contains(&self.as_i32())
    }

    /// Codes 20 and up.
    pub fn is_internal_error(self) -> bool {
        self.as_i32() >= 20
    }

    /// Name used in JSON error output.
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::NarrativeDegraded => "OK_NARRATIVE_FALLBACK",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::VersionError => "ERR_VERSION",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::SchemaMismatch { .. } => ExitCode::VersionError,
            Error::Json(_) => ExitCode::InternalError,
            _ => match err.category() {
                ErrorCategory::Config => ExitCode::ConfigError,
                ErrorCategory::Input => ExitCode::ArgsError,
                ErrorCategory::Narrative => ExitCode::NarrativeDegraded,
                ErrorCategory::Io => ExitCode::IoError,
            },
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges() {
        assert!(ExitCode::Clean.is_success());
        assert!(ExitCode::NarrativeDegraded.is_success());
        assert!(ExitCode::ArgsError.is_user_error());
        assert!(ExitCode::VersionError.is_user_error());
        assert!(ExitCode::IoError.is_internal_error());
        assert!(!ExitCode::ConfigError.is_internal_error());
    }

    #[test]
    fn error_mapping() {
        let err = Error::InvalidInput {
            field: "age".to_string(),
            message: "must be finite".to_string(),
        };
        assert_eq!(ExitCode::from(&err), ExitCode::ArgsError);

        let err = Error::SchemaMismatch {
            expected: "1.0.0".to_string(),
            actual: "2.0.0".to_string(),
        };
        assert_eq!(ExitCode::from(&err), ExitCode::VersionError);

        let err = Error::InvalidParameters("bad".to_string());
        assert_eq!(ExitCode::from(&err), ExitCode::ConfigError);
    }

    #[test]
    fn category_decides_remaining_codes() {
        let cases = [
            (Error::Narrative("timeout".to_string()), ErrorCategory::Narrative, ExitCode::NarrativeDegraded),
            (Error::MissingCredentials("no key".to_string()), ErrorCategory::Narrative, ExitCode::NarrativeDegraded),
            (Error::Config("missing".to_string()), ErrorCategory::Config, ExitCode::ConfigError),
            (
                Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")),
                ErrorCategory::Io,
                ExitCode::IoError,
            ),
        ];
        for (err, category, code) in cases {
            assert_eq!(err.category(), category);
            assert_eq!(ExitCode::from(&err), code, "{err}");
        }
    }

    #[test]
    fn display() {
        assert_eq!(ExitCode::ArgsError.to_string(), "ERR_ARGS (10)");
    }
}
