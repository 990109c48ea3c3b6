//! Workspace Materializer - main application orchestrator.
//!
//! Builds one project with one of two strategies:
//! 1. Static copy: copy the packaged template, then rewrite identity tokens
//! 2. Generator pipeline: run the Nx steps, normalize the client config,
//!    then write the auxiliary files
//!
//! Both strategies run inside the rollback guard. The optional dependency
//! install runs afterwards and is never rolled back.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, Filesystem, Progress},
        services::{
            RewriteReport, RollbackManager, StepRunner, TemplateRepository, TokenRewriter,
        },
    },
    domain::{
        Manifest, OutputMode, PipelineOutcome, PipelineStatus, ProjectSpec, RelativePath,
        StepId, Strategy,
        artifacts::{container_artifacts, readme},
        entities::rewrite::{identity_rules, vite_import_normalization},
        manifest::MANIFEST_PATH,
        plan::{generator_steps, install_step},
    },
    error::{MonoseedError, MonoseedResult},
};

/// Result of the dependency install phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallStatus {
    Installed { elapsed: Duration },
    Skipped,
    /// The project is complete; only the install needs a manual re-run.
    Failed { detail: String, recovery: String },
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub project_root: PathBuf,
    pub strategy: Strategy,
    pub outcome: PipelineOutcome,
    pub rewrites: RewriteReport,
    pub install: InstallStatus,
}

pub struct WorkspaceMaterializer {
    filesystem: Arc<dyn Filesystem>,
    progress: Arc<dyn Progress>,
    steps: StepRunner,
    rewriter: TokenRewriter,
    rollback: RollbackManager,
    template: Option<TemplateRepository>,
}

impl WorkspaceMaterializer {
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        runner: Arc<dyn CommandRunner>,
        progress: Arc<dyn Progress>,
    ) -> Self {
        Self {
            steps: StepRunner::new(runner, Arc::clone(&progress)),
            rewriter: TokenRewriter::new(Arc::clone(&filesystem)),
            rollback: RollbackManager::new(Arc::clone(&filesystem), Arc::clone(&progress)),
            template: None,
            filesystem,
            progress,
        }
    }

    /// Use the packaged template at `root` for the static strategy.
    pub fn with_template(mut self, root: impl Into<PathBuf>) -> Self {
        self.template = Some(TemplateRepository::new(Arc::clone(&self.filesystem), root));
        self
    }

    #[instrument(
        skip_all,
        fields(
            project = %spec.name(),
            strategy = %spec.strategy(),
            target = %spec.target_path().display()
        )
    )]
    pub fn materialize(&self, spec: &ProjectSpec) -> MonoseedResult<ScaffoldReport> {
        info!("Scaffolding project");
        let target = spec.target_path();

        // Preconditions: nothing below this point runs unless both hold,
        // and nothing above it mutates the filesystem.
        if self.filesystem.exists(target) {
            return Err(ApplicationError::ProjectExists {
                path: target.to_path_buf(),
            }
            .into());
        }
        if spec.strategy() == Strategy::StaticCopy {
            self.template_repository()?.ensure_available()?;
            if !spec.versions().is_default() {
                debug!(versions = ?spec.versions(), "Version pins ignored by the static template");
            }
        }

        let (outcome, rewrites) = self.rollback.protect(target, || match spec.strategy() {
            Strategy::StaticCopy => self.build_static(spec),
            Strategy::GeneratorPipeline => self.build_generated(spec),
        })?;

        let install = if spec.options().install_dependencies {
            self.install(spec)
        } else {
            debug!("Dependency install skipped");
            InstallStatus::Skipped
        };

        info!("Scaffold completed successfully");
        Ok(ScaffoldReport {
            project_root: target.to_path_buf(),
            strategy: spec.strategy(),
            outcome,
            rewrites,
            install,
        })
    }

    // -------------------------------------------------------------------------
    // Strategies
    // -------------------------------------------------------------------------

    fn build_static(&self, spec: &ProjectSpec) -> MonoseedResult<(PipelineOutcome, RewriteReport)> {
        let target = spec.target_path();

        self.progress.begin("Copying template files", OutputMode::Capture);
        self.template_repository()?.copy_to(target)?;
        self.progress.finish("Template files copied");

        self.progress.begin("Configuring project", OutputMode::Capture);
        let rewrites = self.rewriter.apply(target, &identity_rules(spec.name())?)?;
        self.edit_manifest(spec, |m| m.set_name(spec.name().scoped_package()))?;
        self.progress.finish("Project configured");

        Ok((PipelineOutcome::empty(), rewrites))
    }

    fn build_generated(
        &self,
        spec: &ProjectSpec,
    ) -> MonoseedResult<(PipelineOutcome, RewriteReport)> {
        let outcome = self.steps.run_all(&generator_steps(spec));
        if let PipelineStatus::Failed { step, detail } = &outcome.status {
            return Err(step_failed(spec, *step, detail));
        }

        let target = spec.target_path();
        let mut rewrites = RewriteReport::default();
        if spec.options().bundler.needs_import_normalization() {
            rewrites.merge(self.rewriter.apply(target, &[vite_import_normalization()?])?);
        }

        self.progress.begin("Writing workspace configuration", OutputMode::Capture);
        for artifact in container_artifacts(spec) {
            self.write(&artifact.path, &artifact.contents, spec)?;
        }
        self.edit_manifest(spec, |m| {
            m.set_name(spec.name().as_str());
            m.replace_scripts();
        })?;
        self.write(&RelativePath::from_static("README.md"), &readme(spec), spec)?;
        self.progress.finish("Workspace configured");

        Ok((outcome, rewrites))
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn install(&self, spec: &ProjectSpec) -> InstallStatus {
        let result = self.steps.run_one(&install_step(spec));
        if result.succeeded {
            return InstallStatus::Installed {
                elapsed: result.elapsed,
            };
        }

        let detail = result
            .error_detail
            .unwrap_or_else(|| "install failed".into());
        let recovery =
            StepId::Install.recovery_hint(spec.name().as_str(), spec.options().package_manager);
        warn!(%detail, "Dependency install failed, keeping project");
        self.progress.warn(&recovery);
        InstallStatus::Failed { detail, recovery }
    }

    fn edit_manifest(
        &self,
        spec: &ProjectSpec,
        edit: impl FnOnce(&mut Manifest),
    ) -> MonoseedResult<()> {
        let path = spec.target_path().join(MANIFEST_PATH);
        let text = self.filesystem.read_file(&path)?;
        let invalid = |e: crate::domain::DomainError| -> MonoseedError {
            ApplicationError::ManifestInvalid {
                path: path.clone(),
                reason: e.to_string(),
            }
            .into()
        };

        let mut manifest = Manifest::parse(&text).map_err(&invalid)?;
        edit(&mut manifest);
        let rendered = manifest.render().map_err(&invalid)?;
        if rendered != text {
            self.filesystem.write_file(&path, &rendered)?;
        }
        Ok(())
    }

    fn write(&self, file: &RelativePath, contents: &str, spec: &ProjectSpec) -> MonoseedResult<()> {
        debug!(%file, "Writing file");
        self.filesystem
            .write_file(&file.resolve(spec.target_path()), contents)
    }

    fn template_repository(&self) -> MonoseedResult<&TemplateRepository> {
        self.template.as_ref().ok_or_else(|| {
            MonoseedError::Configuration {
                message: "no template directory configured for the static strategy".into(),
            }
        })
    }
}

fn step_failed(spec: &ProjectSpec, step: StepId, detail: &str) -> MonoseedError {
    ApplicationError::StepFailed {
        step,
        detail: detail.to_string(),
        recovery: step.recovery_hint(spec.name().as_str(), spec.options().package_manager),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ProjectSpec {
        ProjectSpec::new(
            crate::domain::ProjectName::parse("demo-app").unwrap(),
            "/work",
            Strategy::GeneratorPipeline,
            crate::domain::ConfigOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn step_failure_carries_recovery_hint() {
        let err = step_failed(&spec(), StepId::WorkspaceInit, "exit status: 1");
        assert_eq!(err.failed_step(), Some(StepId::WorkspaceInit));
        assert!(err.to_string().contains("workspace-init"));
        assert!(err.suggestions()[0].contains("npx"));
    }
}
