//! What to build: the project identity and the user's configuration choices.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    value_objects::{Bundler, PackageManager, ProjectName, Strategy},
};

/// Configuration choices collected from flags, prompts, or defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigOptions {
    pub package_manager: PackageManager,
    pub bundler: Bundler,
    pub add_container_config: bool,
    pub add_test_config: bool,
    pub install_dependencies: bool,
}

impl Default for ConfigOptions {
    /// The non-interactive defaults.
    fn default() -> Self {
        Self {
            package_manager: PackageManager::Npm,
            bundler: Bundler::Vite,
            add_container_config: true,
            add_test_config: true,
            install_dependencies: true,
        }
    }
}

/// Version pins for the external generators.
///
/// Only meaningful for [`Strategy::GeneratorPipeline`]; the static template
/// is pre-built and ignores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolVersions {
    /// `create-nx-workspace`.
    pub nx: String,
    /// `@nx/nest`.
    pub nest_plugin: String,
    /// `@nx/react`.
    pub react_plugin: String,
}

impl Default for ToolVersions {
    fn default() -> Self {
        Self {
            nx: "latest".into(),
            nest_plugin: "latest".into(),
            react_plugin: "latest".into(),
        }
    }
}

impl ToolVersions {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Per-phase timeouts for external steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTimeouts {
    pub workspace: Duration,
    pub plugin: Duration,
    pub generator: Duration,
    pub install: Duration,
}

impl Default for StepTimeouts {
    fn default() -> Self {
        Self {
            workspace: Duration::from_secs(600),
            plugin: Duration::from_secs(300),
            generator: Duration::from_secs(300),
            install: Duration::from_secs(300),
        }
    }
}

/// Everything one run needs, fixed before the first mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSpec {
    name: ProjectName,
    target_path: PathBuf,
    strategy: Strategy,
    options: ConfigOptions,
    versions: ToolVersions,
    timeouts: StepTimeouts,
}

impl ProjectSpec {
    /// Create a spec for `name` placed directly under `parent_dir`.
    ///
    /// `parent_dir` must be absolute; the target path is `parent_dir/name`.
    pub fn new(
        name: ProjectName,
        parent_dir: impl AsRef<Path>,
        strategy: Strategy,
        options: ConfigOptions,
    ) -> Result<Self, DomainError> {
        let parent_dir = parent_dir.as_ref();
        if !parent_dir.is_absolute() {
            return Err(DomainError::TargetNotAbsolute {
                path: parent_dir.display().to_string(),
            });
        }
        Ok(Self {
            target_path: parent_dir.join(name.as_str()),
            name,
            strategy,
            options,
            versions: ToolVersions::default(),
            timeouts: StepTimeouts::default(),
        })
    }

    pub fn with_versions(mut self, versions: ToolVersions) -> Self {
        self.versions = versions;
        self
    }

    pub fn with_timeouts(mut self, timeouts: StepTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Directory the target is created in.
    pub fn parent_dir(&self) -> &Path {
        self.target_path
            .parent()
            .unwrap_or_else(|| Path::new("/"))
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn options(&self) -> &ConfigOptions {
        &self.options
    }

    pub fn versions(&self) -> &ToolVersions {
        &self.versions
    }

    pub fn timeouts(&self) -> &StepTimeouts {
        &self.timeouts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> ProjectName {
        ProjectName::parse(s).unwrap()
    }

    #[test]
    fn target_is_parent_joined_with_name() {
        let spec = ProjectSpec::new(
            name("demo-app"),
            "/work",
            Strategy::StaticCopy,
            ConfigOptions::default(),
        )
        .unwrap();
        assert_eq!(spec.target_path(), Path::new("/work/demo-app"));
        assert_eq!(spec.parent_dir(), Path::new("/work"));
    }

    #[test]
    fn relative_parent_is_rejected() {
        let err = ProjectSpec::new(
            name("demo-app"),
            "work",
            Strategy::StaticCopy,
            ConfigOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::TargetNotAbsolute { .. }));
    }

    #[test]
    fn defaults_install_and_add_everything() {
        let opts = ConfigOptions::default();
        assert_eq!(opts.package_manager, PackageManager::Npm);
        assert_eq!(opts.bundler, Bundler::Vite);
        assert!(opts.add_container_config && opts.add_test_config && opts.install_dependencies);
    }

    #[test]
    fn install_timeout_is_five_minutes() {
        assert_eq!(StepTimeouts::default().install, Duration::from_secs(300));
    }
}
