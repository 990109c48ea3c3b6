//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the values derived from
//! it (`ConfigOptions`, `ToolVersions`, `StepTimeouts`).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `MONOSEED_*` environment variables, nested keys separated by `__`
//!    (`MONOSEED_DEFAULTS__BUNDLER=webpack`)
//! 3. Config file (`--config`, or `config.toml` in the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use monoseed_core::domain::{Bundler, PackageManager, StepTimeouts, Strategy, ToolVersions};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "MONOSEED";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Answers used when a choice is neither given as a flag nor prompted.
    pub defaults: Defaults,
    /// Generator version pins.
    pub versions: ToolVersions,
    /// Step timeouts in seconds.
    pub timeouts: TimeoutConfig,
    pub output: OutputConfig,
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub strategy: Strategy,
    pub package_manager: PackageManager,
    pub bundler: Bundler,
    pub docker: bool,
    pub tests: bool,
    pub install: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            strategy: Strategy::StaticCopy,
            package_manager: PackageManager::Npm,
            bundler: Bundler::Vite,
            docker: true,
            tests: true,
            install: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub workspace_secs: u64,
    pub plugin_secs: u64,
    pub generator_secs: u64,
    pub install_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        let defaults = StepTimeouts::default();
        Self {
            workspace_secs: defaults.workspace.as_secs(),
            plugin_secs: defaults.plugin.as_secs(),
            generator_secs: defaults.generator.as_secs(),
            install_secs: defaults.install.as_secs(),
        }
    }
}

impl TimeoutConfig {
    pub fn to_step_timeouts(self) -> StepTimeouts {
        StepTimeouts {
            workspace: Duration::from_secs(self.workspace_secs),
            plugin: Duration::from_secs(self.plugin_secs),
            generator: Duration::from_secs(self.generator_secs),
            install: Duration::from_secs(self.install_secs),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Packaged template location; searched for when unset.
    pub dir: Option<PathBuf>,
}

impl AppConfig {
    /// Resolve configuration from defaults, file, and environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let defaults = config::Config::try_from(&Self::default())
            .context("Failed to build default configuration")?;

        config::Config::builder()
            .add_source(defaults)
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.monoseed.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "monoseed", "monoseed")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".monoseed.toml"))
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to serialise configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_non_interactive_answers() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.strategy, Strategy::StaticCopy);
        assert_eq!(cfg.defaults.package_manager, PackageManager::Npm);
        assert_eq!(cfg.defaults.bundler, Bundler::Vite);
        assert!(cfg.defaults.install);
        assert_eq!(cfg.timeouts.install_secs, 300);
    }

    #[test]
    fn missing_optional_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("absent.toml"), false).unwrap();
        assert_eq!(cfg.defaults, Defaults::default());
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(AppConfig::load_from(&dir.path().join("absent.toml"), true).is_err());
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[defaults]\npackage_manager = \"pnpm\"\nbundler = \"webpack\"\n\n[versions]\nnx = \"20.1.0\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path, true).unwrap();
        assert_eq!(cfg.defaults.package_manager, PackageManager::Pnpm);
        assert_eq!(cfg.defaults.bundler, Bundler::Webpack);
        assert_eq!(cfg.versions.nx, "20.1.0");
        assert_eq!(cfg.versions.nest_plugin, "latest");
        assert!(cfg.defaults.docker);
    }

    #[test]
    fn written_defaults_load_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, AppConfig::default().to_toml().unwrap()).unwrap();
        assert_eq!(AppConfig::load_from(&path, true).unwrap(), AppConfig::default());
    }

    #[test]
    fn timeouts_convert_to_durations() {
        let timeouts = TimeoutConfig {
            install_secs: 42,
            ..TimeoutConfig::default()
        }
        .to_step_timeouts();
        assert_eq!(timeouts.install, Duration::from_secs(42));
        assert_eq!(timeouts.workspace, StepTimeouts::default().workspace);
    }
}
