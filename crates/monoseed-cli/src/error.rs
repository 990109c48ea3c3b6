//! Error handling for the monoseed CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use monoseed_core::{
    application::ApplicationError,
    domain::DomainError,
    error::{ErrorCategory, MonoseedError},
};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// The name given on the command line or at the prompt is invalid.
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from `monoseed-core`.
    #[error("{0}")]
    Core(#[from] MonoseedError),

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The user dismissed a prompt.
    #[error("Operation cancelled.")]
    Cancelled,
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidProjectName { name, reason } => {
                CliError::InvalidProjectName { name, reason }
            }
            other => CliError::Core(other.into()),
        }
    }
}

impl CliError {
    pub fn config(message: impl Into<String>, source: anyhow::Error) -> Self {
        CliError::ConfigError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { .. } => vec![
                "Use only lowercase letters, numbers, and hyphens".into(),
                "Examples: demo-app, shop2, my-nest-react-app".into(),
            ],

            Self::ConfigError { .. } => vec![
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Run 'monoseed init --force' to recreate the default config".into(),
                "Environment overrides use MONOSEED_<SECTION>__<KEY>".into(),
            ],

            Self::Core(core) => {
                let mut suggestions = Vec::new();
                if let MonoseedError::Application(ApplicationError::StepFailed { step, .. }) =
                    core
                {
                    suggestions.push(format!("Failed step: {step}"));
                }
                suggestions.extend(core.suggestions());
                suggestions
            }

            Self::IoError { .. } => vec![
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],

            Self::Cancelled => Vec::new(),
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// Every unrecoverable failure exits 1; a cancelled prompt is a clean
    /// no-op and exits 0.  Argument errors (2) are reported by clap before
    /// a `CliError` can exist.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Cancelled => 0,
            _ => 1,
        }
    }

    fn headline(&self) -> &'static str {
        match self {
            Self::Core(core) => match core.category() {
                ErrorCategory::Validation => "Invalid input:",
                ErrorCategory::NotFound => "Not found:",
                ErrorCategory::Configuration => "Configuration error:",
                ErrorCategory::External => "Scaffolding failed:",
                ErrorCategory::Internal => "Error:",
            },
            _ => "Error:",
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        if matches!(self, Self::Cancelled) {
            return format!("{}\n", self.to_string().yellow());
        }

        let mut output = String::new();
        output.push_str(&format!(
            "\n{} {}\n\n",
            "\u{2717}".red().bold(),
            self.headline().red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "\u{2192}".dimmed(),
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
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        if matches!(self, Self::Cancelled) {
            return format!("{self}\n");
        }

        let mut out = format!("\n{} {}\n", self.headline(), self);

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
        match self {
            Self::Cancelled => tracing::info!("Cancelled by user"),
            Self::InvalidProjectName { .. } => tracing::warn!("User error: {}", self),
            Self::ConfigError { .. } => tracing::error!("Configuration error: {}", self),
            Self::Core(core) => match core.category() {
                ErrorCategory::Validation => tracing::warn!("User error: {}", self),
                _ => tracing::error!(step = ?core.failed_step(), "Scaffold error: {}", self),
            },
            Self::IoError { .. } => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Convenience for `std::io` results at call-sites with a descriptive
/// context message.
pub trait IoContext<T> {
    fn io_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IoContext<T> for Result<T, std::io::Error> {
    fn io_context<F, S>(self, f: F) -> CliResult<T>
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
    use monoseed_core::domain::StepId;
    use std::path::PathBuf;
    use std::io;

    fn step_failure() -> CliError {
        CliError::Core(
            ApplicationError::StepFailed {
                step: StepId::PluginReact,
                detail: "exit code 1".into(),
                recovery: "re-run the command".into(),
            }
            .into(),
        )
    }

    #[test]
    fn step_failure_names_step_and_recovery() {
        let suggestions = step_failure().suggestions();
        assert_eq!(suggestions[0], "Failed step: plugin-react");
        assert!(suggestions.iter().any(|s| s.contains("re-run")));
    }

    #[test]
    fn domain_name_error_becomes_cli_name_error() {
        let err: CliError = DomainError::InvalidProjectName {
            name: "Bad".into(),
            reason: "uppercase".into(),
        }
        .into();
        assert!(matches!(err, CliError::InvalidProjectName { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn cancellation_exits_cleanly() {
        let err = CliError::Cancelled;
        assert_eq!(err.exit_code(), 0);
        assert_eq!(err.format_plain(false), "Operation cancelled.\n");
    }

    #[test]
    fn every_failure_exits_one() {
        let errors = [
            step_failure(),
            CliError::ConfigError {
                message: "x".into(),
                source: None,
            },
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            },
            CliError::Core(
                ApplicationError::ProjectExists {
                    path: PathBuf::from("/tmp/x"),
                }
                .into(),
            ),
        ];
        for err in errors {
            assert_eq!(err.exit_code(), 1, "{err}");
        }
    }

    #[test]
    fn format_plain_contains_message_and_suggestions() {
        let err = CliError::Core(
            ApplicationError::ProjectExists {
                path: PathBuf::from("/tmp/x"),
            }
            .into(),
        );
        let s = err.format_plain(false);
        assert!(s.contains("/tmp/x"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_shows_cause() {
        let err = CliError::IoError {
            message: "writing config".into(),
            source: io::Error::other("disk full"),
        };
        let s = err.format_plain(true);
        assert!(s.contains("Caused by: disk full"));
        assert!(!s.contains("--verbose"));
    }

    #[test]
    fn io_context_wraps_message() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli = result.io_context(|| "reading config");
        assert!(matches!(cli, Err(CliError::IoError { message, .. }) if message == "reading config"));
    }
}
