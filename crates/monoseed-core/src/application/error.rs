//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::StepId;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Project already exists at target location.
    #[error("Directory already exists: {path}")]
    ProjectExists { path: PathBuf },

    /// An external step exited non-zero, timed out, or could not start.
    #[error("Step '{step}' failed: {detail}")]
    StepFailed {
        step: StepId,
        detail: String,
        recovery: String,
    },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// `package.json` could not be read as a JSON object.
    #[error("Invalid manifest at {path}: {reason}")]
    ManifestInvalid { path: PathBuf, reason: String },

    /// The template root does not exist or is not a directory.
    #[error("Template directory not found: {path}")]
    TemplateMissing { path: PathBuf },

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ProjectExists { path } => vec![
                format!("Remove {} or choose a different project name", path.display()),
            ],
            Self::StepFailed { recovery, .. } => vec![recovery.clone()],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::ManifestInvalid { .. } => vec![
                "The generated package.json could not be parsed".into(),
                "Re-run with -vv to see the generator output".into(),
            ],
            Self::TemplateMissing { .. } => vec![
                "Pass --template-dir or set MONOSEED_TEMPLATE_DIR".into(),
                "Build a template with `monoseed package --source <workspace>`".into(),
            ],
            Self::RollbackFailed { path, .. } => vec![format!(
                "Remove {} by hand before retrying",
                path.display()
            )],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::StepFailed { .. } => ErrorCategory::External,
            Self::TemplateMissing { .. } => ErrorCategory::NotFound,
            Self::FilesystemError { .. }
            | Self::ManifestInvalid { .. }
            | Self::RollbackFailed { .. } => ErrorCategory::Internal,
        }
    }
}
