//! Application services - orchestrate use cases.
//!
//! `WorkspaceMaterializer` is the entry point for creating a project;
//! `TemplatePackager` builds the static template offline. The remaining
//! services are the building blocks both of them share.

pub mod materializer;
pub mod packager;
pub mod rollback;
pub mod step_runner;
pub mod template_repository;
pub mod token_rewriter;

pub use materializer::{InstallStatus, ScaffoldReport, WorkspaceMaterializer};
pub use packager::TemplatePackager;
pub use rollback::RollbackManager;
pub use step_runner::StepRunner;
pub use template_repository::{CopyReport, TemplateRepository};
pub use token_rewriter::{RewriteReport, TokenRewriter};
