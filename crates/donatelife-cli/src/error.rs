//! Error handling for the DonateLife CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use donatelife_core::{domain::ValidationError, error::DonorError};

// Re-export so callers only need `use crate::error::*`.
pub use donatelife_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input that never reached the registry.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A date that is not `YYYY-MM-DD`.
    #[error("Invalid date format. Use YYYY-MM-DD.")]
    InvalidDate { input: String },

    /// Donor details failed validation (`validate` command).
    #[error("Donor details are invalid ({})", count_problems(.violations))]
    InvalidDonor { violations: Vec<ValidationError> },

    /// No donor id starts with the given text.
    #[error("No donor matches '{query}'")]
    UnknownDonor { query: String },

    /// More than one donor id starts with the given text.
    #[error("'{query}' matches {matches} donors")]
    AmbiguousId { query: String, matches: usize },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `donatelife-core`.
    #[error("{0}")]
    Core(#[from] DonorError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

fn count_problems(violations: &[ValidationError]) -> String {
    match violations.len() {
        1 => "1 problem".into(),
        n => format!("{n} problems"),
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {message}"),
                "Use 'help' or --help for usage information".into(),
            ],

            Self::InvalidDate { input } => vec![
                format!("'{input}' is not a calendar date"),
                "Example: 2026-03-14".into(),
            ],

            Self::InvalidDonor { violations } => {
                violations.iter().map(|v| format!("{}: {v}", v.field())).collect()
            }

            Self::UnknownDonor { .. } => vec![
                "Use 'list' to see registered donors".into(),
                "IDs can be abbreviated to any unique prefix".into(),
            ],

            Self::AmbiguousId { .. } => vec!["Type more characters of the ID".into()],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Use 'donatelife init' to create a default config".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. }
            | Self::InvalidDate { .. }
            | Self::InvalidDonor { .. }
            | Self::AmbiguousId { .. } => ErrorCategory::UserError,
            Self::UnknownDonor { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Conflict => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Validation violations carried by this error, if any.
    pub fn violations(&self) -> &[ValidationError] {
        match self {
            Self::InvalidDonor { violations } => violations,
            Self::Core(core) => core.violations(),
            _ => &[],
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "\u{2717}".red().bold(), // ✗
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "\u{2192}".dimmed(), // →
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`] with no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {self}\n"));

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use donatelife_core::domain::{DonationDateError, RegistryError};
    use std::io;
    use uuid::Uuid;

    // ── suggestions ───────────────────────────────────────────────────────

    #[test]
    fn invalid_donor_suggestions_name_each_field() {
        let err = CliError::InvalidDonor {
            violations: vec![ValidationError::InvalidPhone, ValidationError::MissingCity],
        };
        assert_eq!(
            err.suggestions(),
            vec![
                "phone: Enter a valid 10-digit phone number".to_string(),
                "city: City is required".to_string(),
            ]
        );
        assert_eq!(err.to_string(), "Donor details are invalid (2 problems)");
    }

    #[test]
    fn invalid_date_uses_form_wording() {
        let err = CliError::InvalidDate {
            input: "14/03/2026".into(),
        };
        assert_eq!(err.to_string(), "Invalid date format. Use YYYY-MM-DD.");
    }

    #[test]
    fn core_suggestions_pass_through() {
        let err: CliError = DonorError::from(DonationDateError::Inactive).into();
        assert!(err.suggestions().iter().any(|s| s.contains("--active true")));
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn exit_code_user_error() {
        assert_eq!(
            CliError::InvalidInput {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            2
        );
        let dup: CliError = DonorError::from(RegistryError::DuplicateId { id: Uuid::nil() }).into();
        assert_eq!(dup.exit_code(), 2);
    }

    #[test]
    fn exit_code_not_found() {
        assert_eq!(CliError::UnknownDonor { query: "ab".into() }.exit_code(), 3);
        let core: CliError = DonorError::from(RegistryError::NotFound { id: Uuid::nil() }).into();
        assert_eq!(core.exit_code(), 3);
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_error_header() {
        let err = CliError::UnknownDonor { query: "ff".into() };
        let s = err.format_plain(false);
        assert!(s.contains("Error: No donor matches 'ff'"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_omits_hint() {
        let err = CliError::AmbiguousId {
            query: "a".into(),
            matches: 2,
        };
        let s = err.format_plain(true);
        assert!(!s.contains("--verbose"));
    }

    // ── IntoCli ───────────────────────────────────────────────────────────

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading config");
        assert!(matches!(cli, Err(CliError::IoError { .. })));
    }
}
