pub mod common;
pub mod file_set;
pub mod project;
pub mod rewrite;
pub mod step;

pub use crate::domain::DomainError;
pub use common::RelativePath;
pub use file_set::{FileSetEntry, TemplateFileSet};
pub use project::{ConfigOptions, ProjectSpec, StepTimeouts, ToolVersions};
pub use rewrite::{Replacement, RewriteRule};
pub use step::{PipelineOutcome, PipelineStatus, Step, StepId, StepResult};
