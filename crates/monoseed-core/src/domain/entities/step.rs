//! External step descriptors and their outcomes.
//!
//! A [`Step`] carries everything needed to run one external command: program,
//! arguments, working directory, timeout, and output mode. Working directories
//! are explicit on every step; nothing relies on the process-wide current
//! directory.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::value_objects::{OutputMode, PackageManager};

/// Identity of a step in the fixed pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StepId {
    WorkspaceInit,
    PluginNest,
    PluginReact,
    AppServer,
    AppClient,
    Install,
}

impl StepId {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WorkspaceInit => "workspace-init",
            Self::PluginNest => "plugin-nest",
            Self::PluginReact => "plugin-react",
            Self::AppServer => "app-server",
            Self::AppClient => "app-client",
            Self::Install => "install",
        }
    }

    /// Human-readable phase label used for progress output.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::WorkspaceInit => "Creating Nx workspace",
            Self::PluginNest => "Adding @nx/nest plugin",
            Self::PluginReact => "Adding @nx/react plugin",
            Self::AppServer => "Generating NestJS server app",
            Self::AppClient => "Generating React client app",
            Self::Install => "Installing dependencies",
        }
    }

    /// Whether a failure of this step is recoverable by the user.
    ///
    /// Only the dependency install is: the project is structurally complete
    /// by then, so it is kept.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Install)
    }

    /// What the user can do by hand after this step failed.
    pub fn recovery_hint(&self, project: &str, package_manager: PackageManager) -> String {
        match self {
            Self::Install => format!(
                "dependencies failed to install; run `cd {project} && {}` manually",
                package_manager.install_command()
            ),
            Self::WorkspaceInit => {
                "check that Node.js and npx are installed and that the registry is reachable".into()
            }
            _ => format!(
                "re-run the command; if it keeps failing try pinning versions with --nx-version (step: {})",
                self.as_str()
            ),
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub id: StepId,
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub timeout: Duration,
    pub mode: OutputMode,
}

impl Step {
    pub fn new(id: StepId, program: impl Into<String>, cwd: impl AsRef<Path>) -> Self {
        Self {
            id,
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.as_ref().to_path_buf(),
            timeout: Duration::from_secs(300),
            mode: OutputMode::Inherit,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// The command as a user would type it.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Result of running one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    pub step_id: StepId,
    pub succeeded: bool,
    pub error_detail: Option<String>,
    pub elapsed: Duration,
}

impl StepResult {
    pub fn success(step_id: StepId, elapsed: Duration) -> Self {
        Self {
            step_id,
            succeeded: true,
            error_detail: None,
            elapsed,
        }
    }

    pub fn failure(step_id: StepId, detail: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            step_id,
            succeeded: false,
            error_detail: Some(detail.into()),
            elapsed,
        }
    }
}

/// Terminal status of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineStatus {
    Success,
    Failed { step: StepId, detail: String },
}

/// All step results of one run plus the terminal status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    pub results: Vec<StepResult>,
    pub status: PipelineStatus,
}

impl PipelineOutcome {
    /// An outcome with no steps, e.g. for the static strategy.
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            status: PipelineStatus::Success,
        }
    }

    /// Fold results into an outcome. The status is taken from the first
    /// failed result; results after it are not expected to exist.
    pub fn from_results(results: Vec<StepResult>) -> Self {
        let status = results
            .iter()
            .find(|r| !r.succeeded)
            .map(|r| PipelineStatus::Failed {
                step: r.step_id,
                detail: r
                    .error_detail
                    .clone()
                    .unwrap_or_else(|| "step failed".into()),
            })
            .unwrap_or(PipelineStatus::Success);
        Self { results, status }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, PipelineStatus::Success)
    }

    pub fn failed_step(&self) -> Option<StepId> {
        match &self.status {
            PipelineStatus::Failed { step, .. } => Some(*step),
            PipelineStatus::Success => None,
        }
    }

    pub fn total_elapsed(&self) -> Duration {
        self.results.iter().map(|r| r.elapsed).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_joins_program_and_args() {
        let step = Step::new(StepId::PluginNest, "npx", "/tmp")
            .args(["nx", "add"])
            .arg("@nx/nest@latest");
        assert_eq!(step.command_line(), "npx nx add @nx/nest@latest");
    }

    #[test]
    fn outcome_takes_first_failure() {
        let outcome = PipelineOutcome::from_results(vec![
            StepResult::success(StepId::WorkspaceInit, Duration::ZERO),
            StepResult::failure(StepId::PluginNest, "exit status 1", Duration::ZERO),
        ]);
        assert!(!outcome.is_success());
        assert_eq!(outcome.failed_step(), Some(StepId::PluginNest));
        assert_eq!(
            outcome.status,
            PipelineStatus::Failed {
                step: StepId::PluginNest,
                detail: "exit status 1".into()
            }
        );
    }

    #[test]
    fn empty_outcome_is_success() {
        assert!(PipelineOutcome::empty().is_success());
    }

    #[test]
    fn only_install_is_recoverable() {
        assert!(StepId::Install.is_recoverable());
        assert!(!StepId::WorkspaceInit.is_recoverable());
        assert!(!StepId::AppClient.is_recoverable());
    }

    #[test]
    fn install_hint_names_package_manager() {
        let hint = StepId::Install.recovery_hint("demo", PackageManager::Pnpm);
        assert!(hint.contains("pnpm install"));
        assert!(hint.contains("cd demo"));
    }
}
