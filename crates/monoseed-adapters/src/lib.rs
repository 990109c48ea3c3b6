//! Infrastructure adapters for monoseed.
//!
//! This crate implements the ports defined in `monoseed_core::application::ports`.
//! It contains all filesystem access and process spawning.

pub mod filesystem;
pub mod process;
pub mod template_dir;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem, Snapshot};
pub use process::ProcessRunner;
pub use template_dir::{TEMPLATE_DIR_ENV, TemplateLocator};
