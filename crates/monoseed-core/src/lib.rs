//! monoseed core - domain and application layers.
//!
//! Scaffolds a NestJS + React monorepo managed by Nx, either by copying a
//! packaged template or by driving the Nx generators step by step.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           monoseed-cli (CLI)            │
//! │    prompts, config, progress, exit      │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (WorkspaceMaterializer, Packager, ...)  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Filesystem, CommandRunner, Progress)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    monoseed-adapters (Infrastructure)   │
//! │ (LocalFilesystem, ProcessRunner, ...)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use monoseed_core::prelude::*;
//!
//! let spec = ProjectSpec::new(
//!     ProjectName::parse("demo-app")?,
//!     std::env::current_dir()?,
//!     Strategy::StaticCopy,
//!     ConfigOptions::default(),
//! )?;
//!
//! let materializer = WorkspaceMaterializer::new(filesystem, runner, Arc::new(SilentProgress))
//!     .with_template("/opt/monoseed/template");
//! let report = materializer.materialize(&spec)?;
//! ```

pub mod application;
pub mod domain;
pub mod error;

/// Public API - what external crates should use.
pub mod prelude {
    pub use crate::application::{
        ApplicationError, CommandRunner, CopyReport, Filesystem, InstallStatus, Progress,
        RewriteReport, ScaffoldReport, SilentProgress, TemplatePackager, WorkspaceMaterializer,
    };
    pub use crate::domain::{
        Bundler, ConfigOptions, DomainError, OutputMode, PackageManager, PipelineOutcome,
        PipelineStatus, ProjectName, ProjectSpec, Step, StepId, StepResult, StepTimeouts,
        Strategy, ToolVersions,
    };
    pub use crate::error::{ErrorCategory, MonoseedError, MonoseedResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
