//! Domain value objects: ProjectName, PackageManager, Bundler, Strategy, OutputMode.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. Each
//! enum owns its string representation, its `FromStr` parser, and the few
//! command-line fragments that depend on it. Nothing here performs I/O.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── ProjectName ───────────────────────────────────────────────────────────────

static PROJECT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("static project name pattern"));

/// A validated project name: lowercase letters, digits, and hyphens only.
///
/// The name doubles as the target directory name and as the identity token
/// written into the manifest and readme, so it is validated once, before any
/// directory is created, and is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    /// Name used when the user accepts all defaults.
    pub const DEFAULT: &'static str = "my-nest-react-app";

    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::InvalidProjectName {
                name: raw,
                reason: "project name is required".into(),
            });
        }
        if !PROJECT_NAME_RE.is_match(&raw) {
            return Err(DomainError::InvalidProjectName {
                name: raw,
                reason: "project name can only contain lowercase letters, numbers, and hyphens"
                    .into(),
            });
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The scoped package name used by the static template manifest.
    pub fn scoped_package(&self) -> String {
        format!("@{}/source", self.0)
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── PackageManager ────────────────────────────────────────────────────────────

/// The package manager the generated workspace is driven by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    pub const ALL: [Self; 3] = [Self::Npm, Self::Yarn, Self::Pnpm];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// Executable name.
    pub const fn program(&self) -> &'static str {
        self.as_str()
    }

    /// Arguments for a plain dependency install.
    pub fn install_args(&self) -> Vec<String> {
        vec!["install".into()]
    }

    /// Program and leading arguments that run a workspace-local binary
    /// (`npx nx ...`, `yarn nx ...`, `pnpm exec nx ...`).
    pub fn exec_prefix(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Npm => ("npx", &[]),
            Self::Yarn => ("yarn", &[]),
            Self::Pnpm => ("pnpm", &["exec"]),
        }
    }

    /// The command a user types to run a manifest script.
    pub fn run_script(&self, script: &str) -> String {
        match self {
            Self::Npm => format!("npm run {script}"),
            Self::Yarn => format!("yarn {script}"),
            Self::Pnpm => format!("pnpm run {script}"),
        }
    }

    /// The command a user types to install dependencies by hand.
    pub fn install_command(&self) -> String {
        format!("{} install", self.as_str())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            "pnpm" => Ok(Self::Pnpm),
            other => Err(DomainError::InvalidChoice {
                kind: "package manager",
                value: other.into(),
                expected: "npm, yarn, pnpm",
            }),
        }
    }
}

// ── Bundler ───────────────────────────────────────────────────────────────────

/// The bundler used for the client application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bundler {
    #[default]
    Vite,
    Webpack,
}

impl Bundler {
    pub const ALL: [Self; 2] = [Self::Vite, Self::Webpack];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vite => "vite",
            Self::Webpack => "webpack",
        }
    }

    /// Whether the generated client config needs the module-style rewrite.
    pub const fn needs_import_normalization(&self) -> bool {
        matches!(self, Self::Vite)
    }

    /// Unit test runner matching this bundler.
    pub const fn test_runner(&self) -> &'static str {
        match self {
            Self::Vite => "vitest",
            Self::Webpack => "jest",
        }
    }
}

impl fmt::Display for Bundler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bundler {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vite" => Ok(Self::Vite),
            "webpack" => Ok(Self::Webpack),
            other => Err(DomainError::InvalidChoice {
                kind: "bundler",
                value: other.into(),
                expected: "vite, webpack",
            }),
        }
    }
}

// ── Strategy ──────────────────────────────────────────────────────────────────

/// How the workspace is constructed. Chosen once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Copy the pre-built template tree and rewrite identity tokens.
    #[default]
    #[serde(rename = "static")]
    StaticCopy,
    /// Drive the external generators step by step, then post-process.
    #[serde(rename = "generator")]
    GeneratorPipeline,
}

impl Strategy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StaticCopy => "static",
            Self::GeneratorPipeline => "generator",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "static" | "static-copy" | "template" => Ok(Self::StaticCopy),
            "generator" | "generator-pipeline" | "generate" => Ok(Self::GeneratorPipeline),
            other => Err(DomainError::InvalidChoice {
                kind: "strategy",
                value: other.into(),
                expected: "static, generator",
            }),
        }
    }
}

// ── OutputMode ────────────────────────────────────────────────────────────────

/// Whether a step's child output is suppressed or streamed to the terminal.
///
/// Presentation only: both modes share the same success semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Capture,
    Inherit,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capture => f.write_str("capture"),
            Self::Inherit => f.write_str("inherit"),
        }
    }
}
