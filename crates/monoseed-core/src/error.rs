//! Unified error handling for monoseed core.
//!
//! Wraps domain and application errors behind one type that carries
//! user-actionable suggestions and a display category.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for monoseed core operations.
#[derive(Debug, Error, Clone)]
pub enum MonoseedError {
    /// Invalid input or a broken built-in rule.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Orchestration failures: filesystem, steps, template layout.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl MonoseedError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Run `monoseed config show` to inspect the resolved configuration".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in monoseed".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The failed step, if this error came from the step pipeline.
    pub fn failed_step(&self) -> Option<crate::domain::StepId> {
        match self {
            Self::Application(ApplicationError::StepFailed { step, .. }) => Some(*step),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    /// An external command failed or timed out.
    External,
    Internal,
}

/// Convenient result type alias.
pub type MonoseedResult<T> = Result<T, MonoseedError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::StepId;

    #[test]
    fn step_failure_is_external_and_names_step() {
        let err: MonoseedError = ApplicationError::StepFailed {
            step: StepId::WorkspaceInit,
            detail: "exit status: 1".into(),
            recovery: "check npx".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::External);
        assert_eq!(err.failed_step(), Some(StepId::WorkspaceInit));
        assert!(err.to_string().contains("workspace-init"));
    }

    #[test]
    fn invalid_name_is_validation() {
        let err: MonoseedError = DomainError::InvalidProjectName {
            name: "Bad".into(),
            reason: "nope".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn existing_project_suggests_another_name() {
        let err: MonoseedError = ApplicationError::ProjectExists {
            path: PathBuf::from("/work/demo-app"),
        }
        .into();
        assert!(err
            .suggestions()
            .iter()
            .any(|s| s.contains("different project name")));
    }
}
