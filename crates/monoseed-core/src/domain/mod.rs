//! Core domain layer for monoseed.
//!
//! Pure values and rules: what a project is, which steps build it, which
//! text rewrites and files finish it. No filesystem access and no process
//! spawning happen here; the application layer drives those through ports.
//!
//! ## Layout
//!
//! - [`value_objects`]: validated names and the closed choice enums
//! - [`entities`]: project spec, steps and outcomes, rewrite rules, file set
//! - [`plan`]: the fixed generator step order
//! - [`artifacts`] and [`manifest`]: auxiliary files and `package.json` edits
pub mod artifacts;
pub mod entities;
pub mod error;
pub mod manifest;
pub mod plan;
pub mod value_objects;

pub use entities::{
    ConfigOptions, FileSetEntry, PipelineOutcome, PipelineStatus, ProjectSpec, RelativePath,
    Replacement, RewriteRule, Step, StepId, StepResult, StepTimeouts, TemplateFileSet,
    ToolVersions,
};
pub use error::{DomainError, ErrorCategory};
pub use manifest::Manifest;
pub use value_objects::{Bundler, OutputMode, PackageManager, ProjectName, Strategy};
