//! One module per command; each exposes `execute`.

pub mod completions;
pub mod config;
pub mod create;
pub mod init;
pub mod package;
