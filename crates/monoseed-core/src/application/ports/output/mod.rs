//! Driven (output) ports - implemented by infrastructure.

use std::path::Path;

use crate::domain::{OutputMode, Step, StepResult};
use crate::error::MonoseedResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `monoseed_adapters::filesystem::LocalFilesystem` (production)
/// - `monoseed_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Paths are absolute; services resolve relative entries against the
/// project or template root before calling in.
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> MonoseedResult<()>;

    /// Write content to a file, creating parent directories.
    fn write_file(&self, path: &Path, content: &str) -> MonoseedResult<()>;

    /// Read a whole file as UTF-8.
    fn read_file(&self, path: &Path) -> MonoseedResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Copy a file, or a directory recursively, creating parents of `to`.
    fn copy_tree(&self, from: &Path, to: &Path) -> MonoseedResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> MonoseedResult<()>;

    /// Remove a file or a directory tree. Missing paths are not an error.
    fn remove_path(&self, path: &Path) -> MonoseedResult<()>;
}

/// Port for running one external step.
///
/// Never fails: spawn errors, non-zero exits and timeouts all come back as
/// an unsuccessful [`StepResult`].
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, step: &Step) -> StepResult;
}

/// Port for user-facing phase reporting.
pub trait Progress: Send + Sync {
    /// A phase started. `mode` tells whether child output will stream.
    fn begin(&self, message: &str, mode: OutputMode);

    fn finish(&self, message: &str);

    fn fail(&self, message: &str);

    fn warn(&self, message: &str);
}

/// Reports nothing. Used by tests and library callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl Progress for SilentProgress {
    fn begin(&self, _message: &str, _mode: OutputMode) {}
    fn finish(&self, _message: &str) {}
    fn fail(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
}
