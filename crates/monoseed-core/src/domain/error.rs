// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (carried inside outcomes and reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Unknown {kind} '{value}' (expected one of: {expected})")]
    InvalidChoice {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Target path must be absolute: {path}")]
    TargetNotAbsolute { path: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Rewrite rule '{rule}' has an invalid pattern: {reason}")]
    InvalidRewritePattern { rule: &'static str, reason: String },

    #[error("Package manifest is not valid: {reason}")]
    InvalidManifest { reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { .. } => vec![
                "Use only lowercase letters, numbers, and hyphens".into(),
                "Examples: my-app, shop-2024, api".into(),
            ],
            Self::InvalidChoice { kind, expected, .. } => {
                vec![format!("Valid {kind} values: {expected}")]
            }
            Self::AbsolutePathNotAllowed { path } => vec![
                format!("'{path}' must be relative to the project root"),
            ],
            Self::TargetNotAbsolute { path } => vec![
                format!("Resolve '{path}' against the working directory first"),
            ],
            Self::InvalidRewritePattern { .. } => vec![
                "This is a bug in a built-in rewrite rule, please report it".into(),
            ],
            Self::InvalidManifest { .. } => vec![
                "package.json must be a JSON object".into(),
                "Check the template or generator output for a truncated file".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. } | Self::InvalidChoice { .. } => {
                ErrorCategory::Validation
            }
            Self::AbsolutePathNotAllowed { .. }
            | Self::TargetNotAbsolute { .. }
            | Self::InvalidRewritePattern { .. }
            | Self::InvalidManifest { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
