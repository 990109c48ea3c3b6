//! Application ports (traits) for external dependencies.
//!
//! Ports define what the orchestration needs from the outside world.
//! Adapters in `monoseed-adapters` and `monoseed-cli` implement them.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: called by the application
//!   - `Filesystem`: file and directory operations
//!   - `CommandRunner`: runs one external step with a timeout
//!   - `Progress`: phase start/finish reporting

pub mod output;

#[cfg(test)]
pub use output::MockCommandRunner;
pub use output::{CommandRunner, Filesystem, Progress, SilentProgress};
