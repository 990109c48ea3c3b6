//! Application layer for monoseed.
//!
//! This layer contains:
//! - **Services**: use case orchestration (WorkspaceMaterializer, TemplatePackager)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    CopyReport, InstallStatus, RewriteReport, ScaffoldReport, TemplatePackager,
    WorkspaceMaterializer,
};

pub use ports::{CommandRunner, Filesystem, Progress, SilentProgress};

pub use error::ApplicationError;
